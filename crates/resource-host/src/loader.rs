//! Disk loading of files and directories
//!
//! Reads a single file's bytes into a freshly allocated buffer, or
//! resolves a directory request by probing for index files before falling
//! back to a generated listing.

use crate::error::{ResolveError, Result};
use crate::lister;
use crate::types::{HostConfig, Resource};
use std::fs::{self, File, Metadata};
use std::io::Read;
use std::os::unix::fs::PermissionsExt;
use tracing::debug;

/// Owner read/write/execute bits; all three must be set on anything served
const OWNER_RWX: u32 = 0o700;

/// Loads resources from disk according to the host configuration
#[derive(Debug)]
pub struct DiskLoader {
    config: HostConfig,
}

impl DiskLoader {
    pub fn new(config: HostConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Read a regular file into memory.
    ///
    /// The byte count is trusted from the metadata snapshot taken at
    /// resolution time, not re-derived from the read.
    pub fn load_file(&self, path: &str, metadata: &Metadata) -> Result<Resource> {
        if metadata.permissions().mode() & OWNER_RWX != OWNER_RWX {
            return Err(ResolveError::PermissionDenied(path.to_string()));
        }

        let mut file = File::open(path)?;
        let len = metadata.len() as usize;
        let mut data = vec![0u8; len];
        file.read_exact(&mut data)?;

        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .to_string();

        debug!(path = %path, size = len, mime = %mime_type, "Loaded file");
        Ok(Resource::file(path.to_string(), data, mime_type))
    }

    /// Resolve a directory request: serve a configured index file if one
    /// is present, otherwise generate a listing.
    ///
    /// An index hit short-circuits into the file load path; the
    /// directory's own permission bits are only checked on the listing
    /// branch.
    pub fn load_directory(&self, path: &str, metadata: &Metadata) -> Result<Resource> {
        let path = if path.ends_with('/') {
            path.to_string()
        } else {
            format!("{}/", path)
        };

        for index in &self.config.index_files {
            let candidate = format!("{}{}", path, index);
            if let Ok(index_meta) = fs::symlink_metadata(&candidate) {
                debug!(path = %candidate, "Index file satisfies directory request");
                return self.load_file(&candidate, &index_meta);
            }
        }

        if metadata.permissions().mode() & OWNER_RWX != OWNER_RWX {
            return Err(ResolveError::PermissionDenied(path));
        }

        let listing = lister::list_directory(&self.config.base_path, &path)?;
        debug!(path = %path, size = listing.len(), "Generated directory listing");
        Ok(Resource::listing(path, listing.into_bytes()))
    }
}
