//! Minimal HTTP/1.0-style request line parsing and query-string decoding.
//!
//! An external-collaborator contract per spec §1/§6 — not a general-purpose
//! HTTP library. Grounded directly on `original_source/server/main.c`'s
//! `get_query_param`/`url_decode`/`send_http` helpers, translated idiomatically
//! (owned `String`s instead of fixed output buffers, a `HashMap` instead of a
//! linear `strncmp` scan).

use std::collections::HashMap;

/// A parsed request line: method, path, and decoded query parameters.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
}

/// Parse one HTTP request line (`METHOD /path?query HTTP/x.y`).
///
/// Returns `None` if the line doesn't have at least a method and a target.
pub fn parse_request_line(line: &str) -> Option<Request> {
    let mut parts = line.trim_end().splitn(3, ' ');
    let method = parts.next()?.to_string();
    let target = parts.next()?;

    let (path, raw_query) = match target.split_once('?') {
        Some((p, q)) => (p, q),
        None => (target, ""),
    };

    Some(Request {
        method,
        path: path.to_string(),
        query: parse_query_string(raw_query),
    })
}

/// Parse an `a=1&b=2` query string into URL-decoded key/value pairs.
pub fn parse_query_string(query: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    if query.is_empty() {
        return map;
    }
    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (key, value) = match pair.split_once('=') {
            Some((k, v)) => (k, v),
            None => (pair, ""),
        };
        map.insert(url_decode(key), url_decode(value));
    }
    map
}

/// Decode `%XX` escapes and `+` as space, matching `original_source`'s
/// `url_decode`.
pub fn url_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
                if let Some(value) = hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                    out.push(value);
                    i += 3;
                } else {
                    out.push(bytes[i]);
                    i += 1;
                }
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Render a `200 OK` response for `body`, with the headers spec §6 requires.
///
/// Per the original C source's `send_http`, the status line is always `200
/// OK`; logical failures are distinguished only by the JSON body's
/// `"ok":false` field.
pub fn render_response(body: &str) -> String {
    format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
        body.len(),
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_get_with_query() {
        let req = parse_request_line("GET /hello?name=A+B%21 HTTP/1.1").unwrap();
        assert_eq!(req.method, "GET");
        assert_eq!(req.path, "/hello");
        assert_eq!(req.query.get("name"), Some(&"A B!".to_string()));
    }

    #[test]
    fn parses_path_without_query() {
        let req = parse_request_line("GET /list HTTP/1.1").unwrap();
        assert_eq!(req.path, "/list");
        assert!(req.query.is_empty());
    }

    #[test]
    fn rejects_line_without_target() {
        assert!(parse_request_line("GET").is_none());
    }

    #[test]
    fn url_decode_handles_percent_and_plus() {
        assert_eq!(url_decode("a%20b+c"), "a b c");
        assert_eq!(url_decode("100%25"), "100%");
    }

    #[test]
    fn render_response_sets_content_length() {
        let rendered = render_response("{\"ok\":true}");
        assert!(rendered.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(rendered.contains("Content-Length: 11\r\n"));
        assert!(rendered.ends_with("{\"ok\":true}"));
    }
}
