//! Directory listing module
//!
//! Generates the HTML index page returned for a directory that has no
//! index file. Entries are sorted by name, subdirectories shown with a
//! trailing slash. Names are HTML-escaped for display and
//! percent-encoded in hrefs.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::io;
use std::path::Path;
use tokio::fs;

/// Characters that must be escaped inside a path segment href.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'%')
    .add(b'/');

/// Render the index page for `dir`, requested as `request_path`
/// (slash-terminated).
pub async fn render(dir: &Path, request_path: &str) -> io::Result<String> {
    let mut entries = Vec::new();
    let mut read_dir = fs::read_dir(dir).await?;
    while let Some(entry) = read_dir.next_entry().await? {
        let mut name = entry.file_name().to_string_lossy().into_owned();
        let is_dir = entry.file_type().await.is_ok_and(|t| t.is_dir());
        if is_dir {
            name.push('/');
        }
        entries.push(name);
    }
    entries.sort();

    Ok(render_page(request_path, &entries))
}

fn render_page(request_path: &str, entries: &[String]) -> String {
    let title = escape_html(request_path);
    let mut page = String::with_capacity(256 + entries.len() * 64);
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    page.push_str("<meta charset=\"utf-8\">\n");
    page.push_str(&format!("<title>Index of {title}</title>\n"));
    page.push_str("</head>\n<body>\n");
    page.push_str(&format!("<h1>Index of {title}</h1>\n<hr>\n<pre>\n"));

    if request_path != "/" {
        page.push_str("<a href=\"../\">../</a>\n");
    }
    for name in entries {
        page.push_str(&format!(
            "<a href=\"{}\">{}</a>\n",
            encode_href(name),
            escape_html(name)
        ));
    }

    page.push_str("</pre>\n<hr>\n</body>\n</html>\n");
    page
}

/// Percent-encode a decoded request path for use in a `Location`
/// header, segment by segment.
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Percent-encode an entry name for use as a relative href. A
/// directory entry keeps its trailing slash unencoded.
fn encode_href(name: &str) -> String {
    if let Some(stripped) = name.strip_suffix('/') {
        format!("{}/", utf8_percent_encode(stripped, SEGMENT))
    } else {
        utf8_percent_encode(name, SEGMENT).to_string()
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
