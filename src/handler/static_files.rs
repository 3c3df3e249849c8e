//! Static file serving module
//!
//! Resolves request paths against the configured root directory and streams
//! hits back in fixed-size chunks.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use hyper::Response;
use tokio::fs::File;

use crate::http::{mime, response, ResponseBody};
use crate::logger;

/// Index files tried, in order, when a request names a directory.
pub const INDEX_FILES: [&str; 4] = ["index.html", "index.htm", "default.html", "default.htm"];

/// Resolve a request path to a regular file under `root`.
///
/// The leading slash is stripped and the remainder joined onto `root`. An
/// empty remainder, a trailing slash, or a directory hit scans
/// [`INDEX_FILES`] in order. Returns `None` when nothing matches so the
/// caller can fall through to dynamic dispatch; a candidate escaping
/// `root` is logged and treated the same as a miss.
pub fn resolve_file(root: &str, url_path: &str) -> Option<PathBuf> {
    let relative = url_path.trim_start_matches('/');

    // Security: candidates are checked against the canonical root below
    let root_canonical = match Path::new(root).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Static root not found or inaccessible '{root}': {e}"
            ));
            return None;
        }
    };

    let mut candidate = Path::new(root).join(relative);

    if relative.is_empty() || relative.ends_with('/') || candidate.is_dir() {
        let dir = candidate;
        candidate = INDEX_FILES
            .iter()
            .map(|index_file| dir.join(index_file))
            .find(|index_path| index_path.is_file())?;
    }

    // File not found is common (404), no need to log at warning level
    if !candidate.is_file() {
        return None;
    }

    let Ok(candidate_canonical) = candidate.canonicalize() else {
        return None;
    };
    if !candidate_canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {url_path} -> {}",
            candidate_canonical.display()
        ));
        return None;
    }

    Some(candidate)
}

/// Open a resolved file and build the streaming 200 response for it.
///
/// A file that disappears or fails to stat between resolution and open is
/// a server-side failure, reported as 500 and logged.
pub async fn serve_resolved(
    path: &Path,
    chunk_size: usize,
    is_head: bool,
) -> Response<ResponseBody> {
    let file = match File::open(path).await {
        Ok(f) => f,
        Err(e) => {
            logger::log_error(&format!("Failed to open '{}': {e}", path.display()));
            return response::build_error_response(500, "failed to read file");
        }
    };

    let metadata = match file.metadata().await {
        Ok(m) => m,
        Err(e) => {
            logger::log_error(&format!("Failed to stat '{}': {e}", path.display()));
            return response::build_error_response(500, "failed to read file");
        }
    };

    let modified = metadata.modified().unwrap_or_else(|_| SystemTime::now());
    let content_type = mime::get_content_type(path.extension().and_then(|e| e.to_str()));

    response::build_file_response(
        file,
        metadata.len(),
        modified,
        content_type,
        chunk_size,
        is_head,
    )
}
