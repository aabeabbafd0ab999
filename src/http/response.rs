//! HTTP response building module
//!
//! Builders for the status codes the file server produces. Building a
//! response can only fail on a malformed header value, which these
//! builders never produce; the fallback path exists so the handler
//! never panics.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("404 Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("404 Not Found")))
        })
}

/// Build 403 Forbidden response
pub fn build_403_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(403)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("403 Forbidden")))
        .unwrap_or_else(|e| {
            log_build_error("403", &e);
            Response::new(Full::new(Bytes::from("403 Forbidden")))
        })
}

/// Build 500 Internal Server Error response
pub fn build_500_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(500)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("500 Internal Server Error")))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(Full::new(Bytes::from("500 Internal Server Error")))
        })
}

/// Build 301 redirect response (directory paths without a trailing slash)
pub fn build_redirect_response(target: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(301)
        .header("Location", target)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("Moved Permanently")))
        .unwrap_or_else(|e| {
            log_build_error("301", &e);
            Response::new(Full::new(Bytes::from("Moved Permanently")))
        })
}

/// Build 200 response for a served file.
///
/// `HEAD` requests get the full headers (including `Content-Length`)
/// with an empty body.
pub fn build_file_response(
    data: Vec<u8>,
    content_type: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(data)
    };

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build generic HTML response (directory listings)
pub fn build_html_response(content: String, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    Response::builder()
        .status(200)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(build_404_response().status(), 404);
        assert_eq!(build_403_response().status(), 403);
        assert_eq!(build_500_response().status(), 500);
    }

    #[test]
    fn test_redirect_sets_location() {
        let resp = build_redirect_response("/docs/");
        assert_eq!(resp.status(), 301);
        assert_eq!(resp.headers()["Location"], "/docs/");
    }

    #[test]
    fn test_file_response_headers() {
        let resp = build_file_response(b"hi".to_vec(), "text/plain; charset=utf-8", false);
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "text/plain; charset=utf-8");
        assert_eq!(resp.headers()["Content-Length"], "2");
    }

    #[test]
    fn test_head_keeps_content_length() {
        let resp = build_file_response(b"hello".to_vec(), "text/plain; charset=utf-8", true);
        assert_eq!(resp.headers()["Content-Length"], "5");
    }
}
