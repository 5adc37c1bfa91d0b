//! Error types for resource resolution
//!
//! Every variant collapses to a miss at the `resolve` boundary; the
//! taxonomy exists so callers of `try_resolve` and the logs can tell the
//! failure modes apart.

use std::fmt;

#[derive(Debug)]
pub enum ResolveError {
    /// Empty or oversized request URI, rejected before any disk access
    InvalidUri(String),
    /// Path absent from the filesystem
    NotFound(String),
    /// Path exists but is neither a regular file nor a directory
    UnsupportedType(String),
    /// Owner permission bits not fully set on a file or directory
    PermissionDenied(String),
    /// File could not be opened or read despite passing metadata checks
    Io(Box<std::io::Error>),
    /// Directory could not be enumerated for listing
    Enumeration(Box<std::io::Error>),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::InvalidUri(msg) => write!(f, "Invalid URI: {}", msg),
            ResolveError::NotFound(path) => write!(f, "Not found: {}", path),
            ResolveError::UnsupportedType(path) => write!(f, "Unsupported file type: {}", path),
            ResolveError::PermissionDenied(path) => write!(f, "Permission denied: {}", path),
            ResolveError::Io(err) => write!(f, "IO error: {}", err),
            ResolveError::Enumeration(err) => write!(f, "Directory enumeration error: {}", err),
        }
    }
}

impl std::error::Error for ResolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResolveError::Io(err) => Some(err.as_ref()),
            ResolveError::Enumeration(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ResolveError {
    fn from(err: std::io::Error) -> Self {
        ResolveError::Io(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, ResolveError>;
