//! In-memory resource cache for a static-content server
//!
//! Maps request URIs to disk paths under a fixed base path, loads file
//! bytes or generated directory listings into memory, and serves repeated
//! requests from cache without touching the disk again.

pub mod cache;
pub mod error;
pub mod host;
pub mod lister;
pub mod loader;
pub mod types;

pub use cache::ResourceCache;
pub use error::{ResolveError, Result};
pub use host::{ResourceHost, MAX_URI_LEN};
pub use lister::list_directory;
pub use loader::DiskLoader;
pub use types::{CacheStats, HostConfig, Resource};
