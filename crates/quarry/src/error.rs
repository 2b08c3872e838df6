use thiserror::Error as ThisError;

///
/// Error
///
/// Public error taxonomy for the criteria/dispatch layer.
///
/// `InvalidArgument` is always detected before a statement reaches the
/// session. `AmbiguousResult` is detected from the session's response.
/// Anything the session itself raises travels through `Backend` unchanged:
/// no retry, no translation, no suppression.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("statement {statement} expected at most one row, matched {matched}")]
    AmbiguousResult { statement: String, matched: u64 },

    #[error(transparent)]
    Backend(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Construct an `InvalidArgument` error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Construct an `AmbiguousResult` error for a select-exactly-one request.
    pub fn ambiguous(statement: impl Into<String>, matched: u64) -> Self {
        Self::AmbiguousResult {
            statement: statement.into(),
            matched,
        }
    }

    /// Wrap a backend failure for pass-through propagation.
    pub fn backend(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Backend(err.into())
    }

    /// Construct an `InvalidArgument` for a field missing from the whitelist.
    pub(crate) fn unrecognized_field(entity: &'static str, field: &str) -> Self {
        Self::invalid_argument(format!("unrecognizable field `{field}` on entity {entity}"))
    }

    /// True when the error is pre-dispatch argument rejection.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// True when a select-exactly-one request matched more than one row.
    #[must_use]
    pub const fn is_ambiguous(&self) -> bool {
        matches!(self, Self::AmbiguousResult { .. })
    }
}
