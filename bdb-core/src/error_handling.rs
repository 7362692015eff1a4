use std::{fmt, path::PathBuf};

/// Fatal errors. Traversal problems below the scan root never surface here;
/// they only shrink the affected branch.
#[derive(Debug)]
pub enum ScanError {
    /// Scan root does not exist or cannot be stat'ed
    InvalidRoot {
        path: PathBuf,
        source: std::io::Error,
    },
    NotADirectory {
        path: PathBuf,
    },
    /// Option value out of range (e.g. zero threads)
    BadOption {
        option: &'static str,
        reason: String,
    },
    /// Unparsable line in a saved report
    MalformedReport {
        path: PathBuf,
        line: usize,
    },
    WorkerPanicked,
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::InvalidRoot { path, .. } => {
                write!(f, "cannot stat directory: {}", path.display())
            }
            ScanError::NotADirectory { path } => {
                write!(f, "{} is not a directory", path.display())
            }
            ScanError::BadOption { option, reason } => {
                write!(f, "invalid value for {option}: {reason}")
            }
            ScanError::MalformedReport { path, line } => {
                write!(f, "{}:{}: malformed report line", path.display(), line)
            }
            ScanError::WorkerPanicked => write!(f, "scan worker panicked"),
            ScanError::Io { path, .. } => write!(f, "cannot access {}", path.display()),
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScanError::InvalidRoot { source, .. } | ScanError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl ScanError {
    /// True for the errors raised while validating the scan root.
    pub fn is_invalid_root(&self) -> bool {
        matches!(
            self,
            ScanError::InvalidRoot { .. } | ScanError::NotADirectory { .. }
        )
    }
}

pub type ScanResult<T> = Result<T, ScanError>;
