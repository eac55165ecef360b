use lariat_core::schema::FetchPolicy;
use lariat_sql::Serializer;

/// Engine-wide settings, threaded explicitly through every
/// translate/execute/hydrate call.
///
/// There is no package-level mutable state; callers that want different
/// behavior build a different `Config`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Effective fetch policy for relation fields that declare none.
    pub default_fetch: FetchPolicy,

    /// What happens when the driver rejects a statement.
    pub error_policy: ErrorPolicy,

    /// Dialect used when serializing statements to SQL text.
    pub flavor: SqlFlavor,
}

/// Process-wide switch applied to every statement failure.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Surface the failure to the caller as a typed error.
    #[default]
    Propagate,

    /// Log the failure and return an empty result.
    LogAndSuppress,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SqlFlavor {
    #[default]
    Ansi,
    Mysql,
    Postgresql,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_fetch: FetchPolicy::Lazy,
            error_policy: ErrorPolicy::default(),
            flavor: SqlFlavor::default(),
        }
    }
}

impl Config {
    pub fn default_fetch(mut self, policy: FetchPolicy) -> Self {
        self.default_fetch = policy;
        self
    }

    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    pub fn flavor(mut self, flavor: SqlFlavor) -> Self {
        self.flavor = flavor;
        self
    }

    pub(crate) fn serializer(&self) -> Serializer {
        match self.flavor {
            SqlFlavor::Ansi => Serializer::ansi(),
            SqlFlavor::Mysql => Serializer::mysql(),
            SqlFlavor::Postgresql => Serializer::postgresql(),
        }
    }
}
