//! Resource resolution orchestration
//!
//! `ResourceHost` composes the disk loader and the cache into a single
//! `resolve(uri)` operation: cached resources are returned as-is, misses
//! are loaded from disk and published into the cache. One host instance is
//! single-threaded (`resolve` takes `&mut self`); integrators serving
//! concurrent requests wrap it in their own synchronization layer.

use crate::cache::ResourceCache;
use crate::error::{ResolveError, Result};
use crate::loader::DiskLoader;
use crate::types::{CacheStats, HostConfig, Resource};
use std::fs;
use std::sync::Arc;
use tracing::debug;

/// Longest accepted request URI, in bytes
pub const MAX_URI_LEN: usize = 255;

/// Resolves request URIs to in-memory resources backed by a disk tree
#[derive(Debug)]
pub struct ResourceHost {
    loader: DiskLoader,
    cache: ResourceCache,
    hits: u64,
    misses: u64,
}

impl ResourceHost {
    pub fn new(config: HostConfig) -> Self {
        Self {
            loader: DiskLoader::new(config),
            cache: ResourceCache::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Resolve a request URI, collapsing every failure to a miss.
    pub fn resolve(&mut self, uri: &str) -> Option<Arc<Resource>> {
        match self.try_resolve(uri) {
            Ok(resource) => Some(resource),
            Err(err) => {
                debug!(uri = %uri, error = %err, "Resolve miss");
                None
            }
        }
    }

    /// Resolve a request URI, surfacing the failure taxonomy.
    ///
    /// The URI must be non-empty and at most `MAX_URI_LEN` bytes; anything
    /// else is rejected before the cache or the disk is consulted. A cache
    /// hit is returned unchanged, with no re-stat of the backing path.
    pub fn try_resolve(&mut self, uri: &str) -> Result<Arc<Resource>> {
        if uri.is_empty() {
            return Err(ResolveError::InvalidUri("empty".to_string()));
        }
        if uri.len() > MAX_URI_LEN {
            return Err(ResolveError::InvalidUri(format!(
                "{} bytes exceeds the {} byte limit",
                uri.len(),
                MAX_URI_LEN
            )));
        }

        let key = format!("{}{}", self.loader.config().base_path, uri);

        if let Some(resource) = self.cache.get(&key) {
            self.hits += 1;
            debug!(key = %key, "Cache hit");
            return Ok(resource);
        }
        self.misses += 1;

        // Snapshot without following links so that links can be rejected
        let metadata =
            fs::symlink_metadata(&key).map_err(|_| ResolveError::NotFound(key.clone()))?;

        let file_type = metadata.file_type();
        let resource = if file_type.is_dir() {
            self.loader.load_directory(&key, &metadata)?
        } else if file_type.is_file() {
            self.loader.load_file(&key, &metadata)?
        } else {
            // Device, socket, symbolic link: only plain files and
            // enumerable directories are served
            return Err(ResolveError::UnsupportedType(key));
        };

        let resource = Arc::new(resource);
        self.cache.insert(key, Arc::clone(&resource));
        Ok(resource)
    }

    /// Drop every cached resource. Hit/miss counters describe the host's
    /// lifetime and are not reset.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Snapshot of cache occupancy and hit/miss counters
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.cache.len(),
            total_bytes: self.cache.total_bytes(),
            hits: self.hits,
            misses: self.misses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;
    use tempfile::{tempdir, TempDir};

    fn host_for(dir: &TempDir) -> ResourceHost {
        ResourceHost::new(HostConfig {
            base_path: dir.path().to_string_lossy().into_owned(),
            ..HostConfig::default()
        })
    }

    fn write_served_file(path: &Path, contents: &[u8]) {
        let mut file = File::create(path).unwrap();
        file.write_all(contents).unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn test_empty_uri_is_rejected_without_disk_access() {
        let dir = tempdir().unwrap();
        let mut host = host_for(&dir);

        assert!(host.resolve("").is_none());
        let err = host.try_resolve("").unwrap_err();
        assert!(matches!(err, ResolveError::InvalidUri(_)));

        // Rejected before the cache was even consulted
        let stats = host.stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
    }

    #[test]
    fn test_oversized_uri_is_rejected_without_disk_access() {
        let dir = tempdir().unwrap();
        let mut host = host_for(&dir);

        let uri = format!("/{}", "a".repeat(MAX_URI_LEN));
        let err = host.try_resolve(&uri).unwrap_err();
        assert!(matches!(err, ResolveError::InvalidUri(_)));
        assert_eq!(host.stats().misses, 0);
    }

    #[test]
    fn test_uri_at_limit_is_accepted() {
        let dir = tempdir().unwrap();
        let mut host = host_for(&dir);

        let uri = format!("/{}", "a".repeat(MAX_URI_LEN - 1));
        let err = host.try_resolve(&uri).unwrap_err();
        // Past the input gate: fails on the filesystem, not on validation
        assert!(matches!(err, ResolveError::NotFound(_)));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempdir().unwrap();
        write_served_file(&dir.path().join("hello.txt"), b"hello world\n");
        let mut host = host_for(&dir);

        let res = host.resolve("/hello.txt").unwrap();
        assert_eq!(res.data(), b"hello world\n");
        assert_eq!(res.len(), 12);
        assert_eq!(res.mime_type(), "text/plain");
        assert!(res.location().ends_with("/hello.txt"));
        assert!(!res.is_listing());
    }

    #[test]
    fn test_second_resolve_is_served_from_cache() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cached.txt");
        write_served_file(&path, b"payload");
        let mut host = host_for(&dir);

        let first = host.resolve("/cached.txt").unwrap();

        // Remove the backing file: a second disk read would now fail
        fs::remove_file(&path).unwrap();

        let second = host.resolve("/cached.txt").unwrap();
        assert_eq!(first.data(), second.data());
        assert_eq!(first.location(), second.location());

        let stats = host.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_missing_path_is_not_found() {
        let dir = tempdir().unwrap();
        let mut host = host_for(&dir);

        assert!(host.resolve("/nope.txt").is_none());
        let err = host.try_resolve("/nope.txt").unwrap_err();
        assert!(matches!(err, ResolveError::NotFound(_)));
    }

    #[test]
    fn test_directory_with_index_serves_index_content() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("site");
        fs::create_dir(&sub).unwrap();
        write_served_file(&sub.join("index.html"), b"<html>front</html>");
        write_served_file(&sub.join("other.txt"), b"other");
        // Owner write stripped: the listing branch would reject this
        // directory, the index branch never checks it
        fs::set_permissions(&sub, fs::Permissions::from_mode(0o500)).unwrap();
        let mut host = host_for(&dir);

        let res = host.resolve("/site").unwrap();
        assert_eq!(res.data(), b"<html>front</html>");
        assert!(!res.is_listing());

        fs::set_permissions(&sub, fs::Permissions::from_mode(0o700)).unwrap();
    }

    #[test]
    fn test_directory_without_index_serves_listing() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("files");
        fs::create_dir(&sub).unwrap();
        write_served_file(&sub.join("one.txt"), b"1");
        write_served_file(&sub.join("two.txt"), b"2");
        File::create(sub.join(".secret")).unwrap();
        let mut host = host_for(&dir);

        let res = host.resolve("/files").unwrap();
        assert!(res.is_listing());
        assert_eq!(res.mime_type(), "text/html");

        let body = String::from_utf8(res.data().to_vec()).unwrap();
        assert!(body.contains("<a href=\"/files/one.txt\">one.txt</a>"));
        assert!(body.contains("<a href=\"/files/two.txt\">two.txt</a>"));
        assert!(!body.contains(".secret"));
    }

    #[test]
    fn test_repeated_directory_request_hits_cache() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("files");
        fs::create_dir(&sub).unwrap();
        write_served_file(&sub.join("one.txt"), b"1");
        let mut host = host_for(&dir);

        host.resolve("/files").unwrap();
        host.resolve("/files").unwrap();

        let stats = host.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }

    #[test]
    fn test_clear_cache_forces_fresh_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("page.txt");
        write_served_file(&path, b"old");
        let mut host = host_for(&dir);

        let before = host.resolve("/page.txt").unwrap();
        assert_eq!(before.data(), b"old");

        host.clear_cache();
        write_served_file(&path, b"new");

        let after = host.resolve("/page.txt").unwrap();
        assert_eq!(after.data(), b"new");
        assert_eq!(host.stats().entries, 1);
    }

    #[test]
    fn test_symlink_is_rejected() {
        let dir = tempdir().unwrap();
        write_served_file(&dir.path().join("real.txt"), b"real");
        std::os::unix::fs::symlink(dir.path().join("real.txt"), dir.path().join("link.txt"))
            .unwrap();
        let mut host = host_for(&dir);

        assert!(host.resolve("/link.txt").is_none());
        let err = host.try_resolve("/link.txt").unwrap_err();
        assert!(matches!(err, ResolveError::UnsupportedType(_)));
    }

    #[test]
    fn test_socket_is_rejected() {
        let dir = tempdir().unwrap();
        let _listener = std::os::unix::net::UnixListener::bind(dir.path().join("ipc.sock")).unwrap();
        let mut host = host_for(&dir);

        let err = host.try_resolve("/ipc.sock").unwrap_err();
        assert!(matches!(err, ResolveError::UnsupportedType(_)));
    }

    #[test]
    fn test_permission_stripped_file_is_a_miss() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("secret.txt");
        let mut file = File::create(&path).unwrap();
        file.write_all(b"secret").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).unwrap();
        let mut host = host_for(&dir);

        assert!(host.resolve("/secret.txt").is_none());
        let err = host.try_resolve("/secret.txt").unwrap_err();
        assert!(matches!(err, ResolveError::PermissionDenied(_)));
    }

    #[test]
    fn test_failed_loads_are_not_cached() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("late.txt");
        let mut host = host_for(&dir);

        assert!(host.resolve("/late.txt").is_none());

        // The file appears after the first miss; nothing stale was cached
        write_served_file(&path, b"here now");
        let res = host.resolve("/late.txt").unwrap();
        assert_eq!(res.data(), b"here now");
    }

    #[test]
    fn test_stats_reflect_cache_contents() {
        let dir = tempdir().unwrap();
        write_served_file(&dir.path().join("a.txt"), b"aaaa");
        write_served_file(&dir.path().join("b.txt"), b"bb");
        let mut host = host_for(&dir);

        host.resolve("/a.txt").unwrap();
        host.resolve("/b.txt").unwrap();
        host.resolve("/a.txt").unwrap();

        let stats = host.stats();
        assert_eq!(stats.entries, 2);
        assert_eq!(stats.total_bytes, 6);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
    }
}
