//! Error types shared by the chunker, driver and output sink.

use std::io;

use crate::translation::RemoteError;

/// Errors that end a translation run.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// Missing or invalid input argument.
    #[error("{0}")]
    Argument(String),

    /// Chunking, pacing or retry settings that cannot be used.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// File open/read/write/flush failure.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// The remote translation call failed and will not be retried again.
    #[error("translation request failed after {attempts} attempt(s): {source}")]
    RemoteCall {
        attempts: u32,
        #[source]
        source: RemoteError,
    },

    /// The run was interrupted before it finished.
    #[error("translation cancelled")]
    Cancelled,
}

impl TranslateError {
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Process exit code for this error.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Argument(_) => exitcode::NOINPUT,
            Self::InvalidSettings(_) => exitcode::CONFIG,
            Self::Io { .. } => exitcode::IOERR,
            Self::RemoteCall { .. } => exitcode::UNAVAILABLE,
            Self::Cancelled => 130,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_message_includes_context() {
        let err = TranslateError::io(
            "Failed to write out.txt",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "Failed to write out.txt: denied");
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [
            TranslateError::Argument(String::new()).exit_code(),
            TranslateError::InvalidSettings(String::new()).exit_code(),
            TranslateError::io("x", io::Error::other("y")).exit_code(),
            TranslateError::RemoteCall {
                attempts: 1,
                source: RemoteError::Transport("down".to_string()),
            }
            .exit_code(),
            TranslateError::Cancelled.exit_code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
