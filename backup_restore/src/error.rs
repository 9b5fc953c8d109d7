use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a backup or restore call.
#[derive(Debug, Error)]
pub enum BackupError {
    #[error("cannot open {} for write", .path.display())]
    OpenWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot open {} for read", .path.display())]
    OpenRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Read, write or flush failure after the stream was opened.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("checksum mismatch: stored {stored:#018x}, computed {computed:#018x}")]
    ChecksumMismatch { stored: u64, computed: u64 },

    /// Stream ended before the value and its checksum were complete.
    /// `offset` counts the payload bytes read up to that point.
    #[error("backup truncated after {offset} payload bytes")]
    Truncated { offset: u64 },

    /// Decoded length prefix cannot be addressed on this host.
    #[error("length prefix {0} exceeds addressable size")]
    LengthOverflow(u64),

    /// Target container could not grow to the decoded length.
    #[error("cannot allocate restored container: {0}")]
    Allocation(#[from] TryReserveError),
}

/// Coarse classification of [`BackupError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    ChecksumMismatch,
    Resource,
}

impl BackupError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BackupError::OpenWrite { .. } | BackupError::OpenRead { .. } | BackupError::Io(_) => {
                ErrorKind::Io
            }
            BackupError::ChecksumMismatch { .. } | BackupError::Truncated { .. } => {
                ErrorKind::ChecksumMismatch
            }
            BackupError::LengthOverflow(_) | BackupError::Allocation(_) => ErrorKind::Resource,
        }
    }
}

pub type Result<T> = std::result::Result<T, BackupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_errors_name_the_mode() {
        let err = BackupError::OpenRead {
            path: PathBuf::from("state.bin3"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(err.to_string(), "cannot open state.bin3 for read");
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn mismatch_display_is_hex() {
        let err = BackupError::ChecksumMismatch {
            stored: 0x10,
            computed: 0x20,
        };
        assert_eq!(
            err.to_string(),
            "checksum mismatch: stored 0x0000000000000010, computed 0x0000000000000020"
        );
        assert_eq!(err.kind(), ErrorKind::ChecksumMismatch);
    }

    #[test]
    fn truncation_fails_like_a_mismatch() {
        let err = BackupError::Truncated { offset: 24 };
        assert_eq!(err.to_string(), "backup truncated after 24 payload bytes");
        assert_eq!(err.kind(), ErrorKind::ChecksumMismatch);
    }

    #[test]
    fn allocation_failure_is_a_resource_error() {
        let reserve = Vec::<u8>::new().try_reserve(usize::MAX).unwrap_err();
        assert_eq!(BackupError::from(reserve).kind(), ErrorKind::Resource);
    }
}
