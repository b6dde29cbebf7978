use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory not found: {}", .path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("Tool error: {message}")]
    Tool { message: String },

    #[error("Tool timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    #[error("Operation cancelled by user")]
    Cancelled,

    #[error("Destination already exists: {}", .path.display())]
    Collision { path: PathBuf },

    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl Error {
    pub fn directory_not_found<P: Into<PathBuf>>(path: P) -> Self {
        Self::DirectoryNotFound { path: path.into() }
    }

    pub fn tool<T: Into<String>>(message: T) -> Self {
        Self::Tool {
            message: message.into(),
        }
    }

    pub fn timeout(seconds: u64) -> Self {
        Self::Timeout { seconds }
    }

    pub fn collision<P: Into<PathBuf>>(path: P) -> Self {
        Self::Collision { path: path.into() }
    }

    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Per-file failures the batch loop records and moves past.
    pub fn is_per_file(&self) -> bool {
        matches!(self, Self::Tool { .. } | Self::Timeout { .. } | Self::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = Error::directory_not_found("/missing/videos");
        assert_eq!(err.to_string(), "Directory not found: /missing/videos");

        let err = Error::timeout(30);
        assert_eq!(err.to_string(), "Tool timed out after 30 seconds");

        let err = Error::tool("ffmpeg exited with code 1");
        assert_eq!(err.to_string(), "Tool error: ffmpeg exited with code 1");
    }

    #[test]
    fn test_per_file_classification() {
        assert!(Error::tool("boom").is_per_file());
        assert!(Error::timeout(5).is_per_file());
        assert!(!Error::Cancelled.is_per_file());
        assert!(!Error::directory_not_found("/x").is_per_file());
        assert!(!Error::validation("bad").is_per_file());
    }
}
