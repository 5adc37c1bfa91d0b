//! Core types for resource resolution

use serde::{Deserialize, Serialize};

/// In-memory representation of servable content: raw file bytes or a
/// generated directory listing, plus the metadata needed to serve it.
///
/// Once a resource is published into the cache its buffer is immutable for
/// the life of the process; readers only ever get shared access.
#[derive(Debug, Clone)]
pub struct Resource {
    location: String,
    data: Vec<u8>,
    mime_type: String,
    is_listing: bool,
}

impl Resource {
    /// Create a resource holding raw file bytes
    pub(crate) fn file(location: String, data: Vec<u8>, mime_type: String) -> Self {
        Self {
            location,
            data,
            mime_type,
            is_listing: false,
        }
    }

    /// Create a resource holding a generated directory listing
    pub(crate) fn listing(location: String, data: Vec<u8>) -> Self {
        Self {
            location,
            data,
            mime_type: "text/html".to_string(),
            is_listing: true,
        }
    }

    /// Logical location of the resource (its cache key lineage)
    pub fn location(&self) -> &str {
        &self.location
    }

    /// The resource's byte content
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Byte length of the content
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// MIME type assigned at load time
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// True if the content is a generated directory listing rather than
    /// raw file bytes
    pub fn is_listing(&self) -> bool {
        self.is_listing
    }
}

/// Configuration for a resource host
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Base disk path all request URIs are resolved under
    pub base_path: String,
    /// Ordered candidate filenames probed when a directory is requested
    pub index_files: Vec<String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            base_path: "./public".to_string(),
            index_files: vec!["index.html".to_string(), "index.htm".to_string()],
        }
    }
}

/// Statistics about the resource cache
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: usize,
    pub total_bytes: u64,
    pub hits: u64,
    pub misses: u64,
}
