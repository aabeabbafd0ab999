//! Request dispatch module
//!
//! Entry point for HTTP request processing: decodes the request path,
//! builds the request context and hands off to the static file
//! handler. Every request is answered; filesystem problems become
//! status codes, never errors out of the service.

use crate::config::ServerConfig;
use crate::handler::static_files;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::{Method, Request, Response};
use percent_encoding::percent_decode_str;
use std::convert::Infallible;
use std::sync::Arc;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    /// Percent-decoded request path, always starting with `/`.
    pub path: &'a str,
    pub is_head: bool,
}

/// Main entry point for HTTP request handling.
///
/// All methods are served with `GET` semantics; `HEAD` suppresses the
/// response body. The handler only ever reads files, so nothing else
/// is meaningful to distinguish.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    config: Arc<ServerConfig>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    Ok(respond(req.method(), req.uri().path(), &config).await)
}

/// Decode the raw request path and serve it.
///
/// Decoding happens before any filesystem resolution, so an encoded
/// traversal (`/%2e%2e/...`) is seen by the resolver in its decoded
/// form and rejected there. Paths that do not decode to UTF-8 are 404.
async fn respond(
    method: &Method,
    raw_path: &str,
    config: &ServerConfig,
) -> Response<Full<Bytes>> {
    let is_head = *method == Method::HEAD;

    match percent_decode_str(raw_path).decode_utf8() {
        Ok(decoded) => {
            let ctx = RequestContext {
                path: &decoded,
                is_head,
            };
            let response = static_files::serve(&ctx, config).await;
            log_access(method, &decoded, &response);
            response
        }
        Err(_) => {
            logger::log_warning(&format!("Undecodable request path: {raw_path}"));
            let response = http::build_404_response();
            log_access(method, raw_path, &response);
            response
        }
    }
}

fn log_access(method: &Method, path: &str, response: &Response<Full<Bytes>>) {
    let body_bytes = response
        .body()
        .size_hint()
        .exact()
        .unwrap_or_default();
    logger::log_access(
        method,
        path,
        response.status().as_u16(),
        usize::try_from(body_bytes).unwrap_or(usize::MAX),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use std::path::Path;

    fn test_config(root: &Path) -> ServerConfig {
        ServerConfig {
            root: root.to_path_buf(),
            port: 5000,
        }
    }

    #[tokio::test]
    async fn test_respond_serves_decoded_path() {
        let dir = tempfile::tempdir().unwrap();
        std_fs::write(dir.path().join("with space.txt"), "hi").unwrap();
        let config = test_config(dir.path());

        let resp = respond(&Method::GET, "/with%20space.txt", &config).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Length"], "2");
    }

    #[tokio::test]
    async fn test_respond_rejects_encoded_traversal() {
        let outer = tempfile::tempdir().unwrap();
        std_fs::write(outer.path().join("secret.txt"), "secret").unwrap();
        let root = outer.path().join("root");
        std_fs::create_dir(&root).unwrap();
        let config = test_config(&root);

        let resp = respond(&Method::GET, "/%2e%2e/secret.txt", &config).await;
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_respond_rejects_undecodable_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());

        // %ff is not valid UTF-8 once decoded
        let resp = respond(&Method::GET, "/%ff", &config).await;
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_respond_head_has_empty_body_with_length() {
        let dir = tempfile::tempdir().unwrap();
        std_fs::write(dir.path().join("hello.txt"), "hi").unwrap();
        let config = test_config(dir.path());

        let resp = respond(&Method::HEAD, "/hello.txt", &config).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Length"], "2");
        assert_eq!(resp.body().size_hint().exact(), Some(0));
    }
}
