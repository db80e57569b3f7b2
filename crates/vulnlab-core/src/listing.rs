// SPDX-License-Identifier: Apache-2.0

//! Stored XSS through a directory listing (CWE-79).
//!
//! WARNING: intentionally vulnerable. Every entry name in the working
//! directory is written to the response body verbatim. Anyone who can
//! create a file named `<script>...</script>` gets script execution in
//! the browser of whoever views the listing.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::Path;

use axum::response::{Html, IntoResponse};

/// Writes one line per directory entry name, sorted by name.
///
/// Errors from the directory read are dropped and nothing is written.
/// Write errors are dropped as well.
pub fn write_listing<W: Write>(dir: &Path, out: &mut W) {
    let names = read_names(dir).unwrap_or_default();

    for name in names {
        let _ = out.write_all(name.as_encoded_bytes());
        let _ = out.write_all(b"\n");
    }
}

/// Renders the listing for `dir` into a byte buffer.
#[must_use]
pub fn list_directory(dir: &Path) -> Vec<u8> {
    let mut body = Vec::new();
    write_listing(dir, &mut body);
    body
}

// All or nothing: a failure on any entry discards the whole listing.
fn read_names(dir: &Path) -> io::Result<Vec<OsString>> {
    let mut names = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.file_name()))
        .collect::<io::Result<Vec<_>>>()?;
    names.sort();
    Ok(names)
}

/// `GET /files/list`: lists the current working directory.
///
/// Served as HTML so browsers render injected markup; a plain `String`
/// response would be labelled `text/plain` by axum.
pub async fn list_files() -> impl IntoResponse {
    tracing::debug!("listing working directory");
    Html(list_directory(Path::new(".")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_reflects_markup_verbatim() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("a.txt"), b"").expect("write a.txt");
        std::fs::write(dir.path().join("<script>x</script>"), b"").expect("write markup");

        let body = String::from_utf8(list_directory(dir.path())).expect("utf-8 names");
        let lines: Vec<&str> = body.lines().collect();

        assert!(lines.contains(&"a.txt"));
        assert!(lines.contains(&"<script>x</script>"));
        assert!(!body.contains("&lt;"));
        assert!(body.ends_with('\n'));
    }

    #[test]
    fn test_listing_is_sorted_and_flat() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("b"), b"").expect("write b");
        std::fs::write(dir.path().join("a"), b"").expect("write a");
        std::fs::create_dir(dir.path().join("c")).expect("mkdir c");
        std::fs::write(dir.path().join("c").join("nested"), b"").expect("write nested");

        assert_eq!(list_directory(dir.path()), b"a\nb\nc\n");
    }

    #[test]
    fn test_unreadable_directory_writes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("gone");

        assert!(list_directory(&missing).is_empty());
    }

    #[test]
    fn test_file_instead_of_directory_writes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("plain");
        std::fs::write(&file, b"data").expect("write file");

        assert!(list_directory(&file).is_empty());
    }

    #[test]
    fn test_empty_directory_writes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(list_directory(dir.path()).is_empty());
    }
}
