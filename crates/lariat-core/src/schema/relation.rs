mod foreign_key;
pub use foreign_key::ForeignKey;

mod many_to_many;
pub use many_to_many::ManyToMany;

mod one_to_one;
pub use one_to_one::OneToOne;

/// Whether a relation field is resolved during hydration.
///
/// `Unset` falls back to the process-wide default at hydration time, not at
/// descriptor-build time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FetchPolicy {
    Eager,
    Lazy,
    #[default]
    Unset,
}

impl FetchPolicy {
    /// The effective policy given a configured default.
    pub fn or_default(self, default: FetchPolicy) -> FetchPolicy {
        match self {
            Self::Unset => default,
            set => set,
        }
    }

    pub fn is_eager(self) -> bool {
        matches!(self, Self::Eager)
    }
}
