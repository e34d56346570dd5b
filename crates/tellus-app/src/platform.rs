//! Platform directory resolution.
//!
//! Isolates OS-specific path conventions (XDG on Linux, Known Folders on
//! Windows, Library on macOS) behind one small struct.

use std::path::PathBuf;
use std::{fmt, io};

const APP_NAME: &str = "tellus";

/// Errors that can occur during platform directory setup.
#[derive(Debug)]
pub enum PlatformError {
    /// The OS did not provide a configuration directory.
    NoConfigDir,
    /// Directory creation failed.
    Io(io::Error),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoConfigDir => write!(f, "could not determine OS configuration directory"),
            Self::Io(e) => write!(f, "platform I/O error: {e}"),
        }
    }
}

impl std::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for PlatformError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// OS-specific directory paths for the viewer.
pub struct PlatformDirs {
    /// User configuration: `config.ron`.
    pub config_dir: PathBuf,
    /// Log files.
    pub log_dir: PathBuf,
}

impl PlatformDirs {
    /// Resolve platform-specific directories without creating them on disk.
    pub fn resolve() -> Result<Self, PlatformError> {
        let config_base = dirs::config_dir().ok_or(PlatformError::NoConfigDir)?;
        let app_dir = config_base.join(APP_NAME);
        Ok(Self {
            config_dir: app_dir.join("config"),
            log_dir: app_dir.join("logs"),
        })
    }

    /// Resolve directories and create them on disk.
    pub fn resolve_and_create() -> Result<Self, PlatformError> {
        let dirs = Self::resolve()?;
        std::fs::create_dir_all(&dirs.config_dir)?;
        std::fs::create_dir_all(&dirs.log_dir)?;
        Ok(dirs)
    }

    /// Resolve directories rooted under a custom base path. Used for the
    /// `--config` override and for tests.
    pub fn resolve_with_root(root: &std::path::Path) -> Self {
        Self {
            config_dir: root.to_path_buf(),
            log_dir: root.join("logs"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_with_root_uses_given_path() {
        let temp = tempfile::tempdir().unwrap();
        let dirs = PlatformDirs::resolve_with_root(temp.path());
        assert_eq!(dirs.config_dir, temp.path());
        assert_eq!(dirs.log_dir, temp.path().join("logs"));
    }

    #[test]
    fn test_error_display() {
        let err = PlatformError::NoConfigDir;
        assert!(err.to_string().contains("configuration directory"));
    }
}
