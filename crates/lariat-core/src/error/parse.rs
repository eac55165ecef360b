use super::Error;

/// Error when a lookup token cannot be parsed.
///
/// Always names the offending token so callers can report which part of a
/// multi-token filter call was malformed.
#[derive(Debug)]
pub(super) struct ParseError {
    token: Box<str>,
    reason: Box<str>,
}

impl std::error::Error for ParseError {}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "malformed lookup `{}`: {}", self.token, self.reason)
    }
}

impl Error {
    /// Creates a parse error for a malformed lookup token.
    pub fn parse(token: impl Into<String>, reason: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Parse(ParseError {
            token: token.into().into(),
            reason: reason.into().into(),
        }))
    }

    /// Returns `true` if this error is a lookup parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::Parse(_))
    }
}
