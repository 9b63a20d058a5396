/// Crate-level error type for the staffline notation engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A conversion received a value outside its domain (e.g. a frequency <= 0).
    #[error("invalid input `{name}`: got {value}, {reason}")]
    InvalidInput {
        name: &'static str,
        value: f32,
        reason: &'static str,
    },

    /// A note-name string could not be parsed.
    #[error("unparseable note name {input:?}: {reason}")]
    UnparseableNoteName { input: String, reason: &'static str },

    /// A key-signature label could not be parsed or spelled.
    #[error("unknown key signature {input:?}: {reason}")]
    UnknownKeySignature { input: String, reason: &'static str },

    /// Invalid configuration value, rejected at construction time.
    #[error("invalid parameter `{name}`: got {value}, {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl Error {
    pub(crate) fn note(input: &str, reason: &'static str) -> Self {
        Error::UnparseableNoteName {
            input: input.to_string(),
            reason,
        }
    }

    pub(crate) fn parameter(name: &'static str, value: impl ToString, reason: &str) -> Self {
        Error::InvalidParameter {
            name,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Convenience Result type for staffline operations.
pub type Result<T> = std::result::Result<T, Error>;
