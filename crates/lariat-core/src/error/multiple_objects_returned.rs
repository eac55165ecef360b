use super::Error;

/// Error when a single-record fetch matches more than one row.
#[derive(Debug)]
pub(super) struct MultipleObjectsReturnedError {
    context: Option<Box<str>>,
}

impl std::error::Error for MultipleObjectsReturnedError {}

impl core::fmt::Display for MultipleObjectsReturnedError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("multiple objects returned")?;
        if let Some(ref ctx) = self.context {
            write!(f, ": {}", ctx)?;
        }
        Ok(())
    }
}

impl Error {
    /// Creates a multiple-objects-returned error.
    pub fn multiple_objects_returned(context: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MultipleObjectsReturned(
            MultipleObjectsReturnedError {
                context: Some(context.into().into()),
            },
        ))
    }

    /// Returns `true` if this error is a multiple-objects-returned error.
    pub fn is_multiple_objects_returned(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::MultipleObjectsReturned(_))
    }
}
