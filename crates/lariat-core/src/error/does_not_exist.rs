use super::Error;

/// Error when a single-record fetch returns no rows.
#[derive(Debug)]
pub(super) struct DoesNotExistError {
    context: Option<Box<str>>,
}

impl std::error::Error for DoesNotExistError {}

impl core::fmt::Display for DoesNotExistError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("does not exist")?;
        if let Some(ref ctx) = self.context {
            write!(f, ": {}", ctx)?;
        }
        Ok(())
    }
}

impl Error {
    /// Creates a does-not-exist error.
    ///
    /// The context parameter describes the fetch that came up empty.
    pub fn does_not_exist(context: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::DoesNotExist(DoesNotExistError {
            context: Some(context.into().into()),
        }))
    }

    /// Returns `true` if this error is a does-not-exist error.
    pub fn is_does_not_exist(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::DoesNotExist(_))
    }
}
