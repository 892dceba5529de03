//! Error types for copyrs.

use std::fmt;

/// Errors that can occur during a copy operation.
#[derive(Debug)]
pub enum CopyError {
    /// An I/O error raised by the source's read or the destination's write.
    ///
    /// The underlying error is propagated unchanged: the copier performs no
    /// retry and no suppression, and bytes already written stay written.
    Io(std::io::Error),

    /// The cancellation token fired at a checkpoint.
    ///
    /// Distinct from both success and I/O failure. No bytes beyond
    /// `bytes_copied` were written to the destination.
    Cancelled {
        /// Total bytes written to the destination before cancellation.
        bytes_copied: u64,
    },

    /// Invalid configuration parameter.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl CopyError {
    /// Returns `true` if this error is a cancellation outcome.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CopyError::Cancelled { .. })
    }
}

impl fmt::Display for CopyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CopyError::Io(e) => write!(f, "io error: {}", e),
            CopyError::Cancelled { bytes_copied } => {
                write!(f, "copy cancelled after {} bytes", bytes_copied)
            }
            CopyError::InvalidConfig { message } => {
                write!(f, "invalid config: {}", message)
            }
        }
    }
}

impl std::error::Error for CopyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CopyError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CopyError {
    fn from(e: std::io::Error) -> Self {
        CopyError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "test");
        let err: CopyError = io_err.into();
        matches!(err, CopyError::Io(_));
    }

    #[test]
    fn test_display() {
        let err = CopyError::Cancelled { bytes_copied: 512 };
        assert!(err.to_string().contains("cancelled after 512"));
    }

    #[test]
    fn test_is_cancelled() {
        assert!(CopyError::Cancelled { bytes_copied: 0 }.is_cancelled());
        assert!(!CopyError::InvalidConfig { message: "x" }.is_cancelled());
    }
}
