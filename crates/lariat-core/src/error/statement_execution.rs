use super::Error;

/// Error from the underlying statement driver.
#[derive(Debug)]
pub(super) struct StatementExecutionError {
    inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for StatementExecutionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for StatementExecutionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        // Display the error and walk its source chain
        core::fmt::Display::fmt(&self.inner, f)?;
        let mut source = self.inner.source();
        while let Some(err) = source {
            write!(f, ": {}", err)?;
            source = err.source();
        }
        Ok(())
    }
}

impl Error {
    /// Creates an error wrapping a driver failure.
    ///
    /// This is the preferred way to convert driver-specific errors into
    /// lariat errors.
    pub fn statement_execution(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::StatementExecution(
            StatementExecutionError {
                inner: Box::new(err),
            },
        ))
    }

    /// Creates a statement execution error from a message.
    pub fn statement_execution_msg(message: impl Into<String>) -> Error {
        struct Message(String);

        impl std::error::Error for Message {}

        impl core::fmt::Debug for Message {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl core::fmt::Display for Message {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        Error::statement_execution(Message(message.into()))
    }

    /// Returns `true` if this error wraps a driver failure.
    pub fn is_statement_execution(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::StatementExecution(_))
    }
}
