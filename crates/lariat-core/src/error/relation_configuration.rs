use super::Error;

/// Error when relationship metadata cannot resolve its target entity.
///
/// This is a configuration error, not a runtime condition: it is raised at
/// first use of the broken descriptor and never silently defaulted.
#[derive(Debug)]
pub(super) struct RelationConfigurationError {
    relation: Box<str>,
    reason: Box<str>,
}

impl std::error::Error for RelationConfigurationError {}

impl core::fmt::Display for RelationConfigurationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "relation misconfigured at `{}`: {}",
            self.relation, self.reason
        )
    }
}

impl Error {
    /// Creates a relation configuration error.
    ///
    /// `relation` names the offending relation as `entity.field`.
    pub fn relation_configuration(
        relation: impl Into<String>,
        reason: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::RelationConfiguration(
            RelationConfigurationError {
                relation: relation.into().into(),
                reason: reason.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is a relation configuration error.
    pub fn is_relation_configuration(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::RelationConfiguration(_))
    }
}
