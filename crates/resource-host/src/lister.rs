//! Directory listing generation
//!
//! Renders a directory's visible entries into a minimal HTML document. An
//! unreadable directory is an `Enumeration` error; a readable directory
//! with no visible entries is a valid document with zero links.

use crate::error::{ResolveError, Result};
use std::fmt::Write;
use std::fs;

/// Render an HTML listing for the directory at `path`.
///
/// The displayed URI is recovered by stripping the `base_path` prefix from
/// `path`; if the prefix does not match, a `?` placeholder is shown. Entry
/// names starting with `.` are skipped. Names are HTML-escaped in text
/// position and percent-encoded in link targets.
pub fn list_directory(base_path: &str, path: &str) -> Result<String> {
    let uri = path.strip_prefix(base_path).unwrap_or("?");

    let entries = fs::read_dir(path).map_err(|e| ResolveError::Enumeration(Box::new(e)))?;

    let mut doc = String::new();
    let _ = write!(
        doc,
        "<html><head><title>{uri}</title></head><body><h1>Index of {uri}</h1><hr><br />",
        uri = escape_html(uri)
    );

    for entry in entries {
        let entry = entry.map_err(|e| ResolveError::Enumeration(Box::new(e)))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        let href = format!("{}{}", uri, urlencoding::encode(&name));
        let _ = write!(
            doc,
            "<a href=\"{}\">{}</a><br />",
            escape_html(&href),
            escape_html(&name)
        );
    }

    doc.push_str("</body></html>");
    Ok(doc)
}

/// Escape HTML special characters
fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
