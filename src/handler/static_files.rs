//! Static file serving module
//!
//! Resolves request paths under the server root, blocks traversal
//! escapes, and maps filesystem outcomes to HTTP responses.

use crate::config::ServerConfig;
use crate::handler::listing;
use crate::handler::router::RequestContext;
use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;

/// Index file served in place of a directory listing when present.
const INDEX_FILE: &str = "index.html";

/// Outcome of resolving a request path against the root directory.
#[derive(Debug)]
pub enum Resolved {
    /// Regular file, read in full.
    File {
        content: Vec<u8>,
        content_type: &'static str,
    },
    /// Directory requested without a trailing slash.
    Redirect(String),
    /// Generated directory index page.
    Listing(String),
    NotFound,
    PermissionDenied,
    /// Any other filesystem failure.
    ReadError,
}

/// Serve a request for `ctx.path` from the configured root.
pub async fn serve(ctx: &RequestContext<'_>, config: &ServerConfig) -> Response<Full<Bytes>> {
    match resolve(&config.root, ctx.path).await {
        Resolved::File {
            content,
            content_type,
        } => http::build_file_response(content, content_type, ctx.is_head),
        Resolved::Redirect(target) => {
            http::build_redirect_response(&listing::encode_path(&target))
        }
        Resolved::Listing(html) => http::build_html_response(html, ctx.is_head),
        Resolved::NotFound => http::build_404_response(),
        Resolved::PermissionDenied => http::build_403_response(),
        Resolved::ReadError => http::build_500_response(),
    }
}

/// Resolve a decoded request path to a filesystem outcome.
///
/// Both the root and the joined candidate are canonicalized; a
/// canonical result outside the canonical root is a traversal attempt
/// and is reported as `NotFound` so nothing outside the root is even
/// acknowledged to exist.
pub async fn resolve(root: &Path, request_path: &str) -> Resolved {
    let root_canonical = match root.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Server root '{}' not accessible: {e}",
                root.display()
            ));
            return Resolved::ReadError;
        }
    };

    let relative = request_path.trim_start_matches('/');
    let candidate = root_canonical.join(relative);

    let canonical = match candidate.canonicalize() {
        Ok(p) => p,
        Err(e) => return io_error_outcome(&e),
    };

    if !canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            request_path,
            canonical.display()
        ));
        return Resolved::NotFound;
    }

    if canonical.is_dir() {
        return resolve_directory(&canonical, request_path).await;
    }

    read_file(&canonical).await
}

/// Resolve a request that landed on a directory: redirect to the
/// slash-terminated form, serve the index file if one exists, or
/// generate a listing.
async fn resolve_directory(dir: &Path, request_path: &str) -> Resolved {
    if !request_path.ends_with('/') {
        return Resolved::Redirect(format!("{request_path}/"));
    }

    let index_path = dir.join(INDEX_FILE);
    if index_path.is_file() {
        return read_file(&index_path).await;
    }

    match listing::render(dir, request_path).await {
        Ok(html) => Resolved::Listing(html),
        Err(e) => {
            logger::log_error(&format!(
                "Failed to list directory '{}': {e}",
                dir.display()
            ));
            io_error_outcome(&e)
        }
    }
}

async fn read_file(path: &Path) -> Resolved {
    match fs::read(path).await {
        Ok(content) => {
            let content_type =
                mime::get_content_type(path.extension().and_then(|e| e.to_str()));
            Resolved::File {
                content,
                content_type,
            }
        }
        Err(e) => {
            // File not found is common (404), no need to log
            if e.kind() != ErrorKind::NotFound {
                logger::log_error(&format!("Failed to read '{}': {e}", path.display()));
            }
            io_error_outcome(&e)
        }
    }
}

fn io_error_outcome(err: &std::io::Error) -> Resolved {
    match err.kind() {
        // NotADirectory: a path element names a regular file, e.g.
        // "/hello.txt/". Not-found to the client, same as a missing path.
        ErrorKind::NotFound | ErrorKind::NotADirectory => Resolved::NotFound,
        ErrorKind::PermissionDenied => Resolved::PermissionDenied,
        _ => Resolved::ReadError,
    }
}
