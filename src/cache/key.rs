//! Cache Key Module
//!
//! Derives the lookup key that decides whether two requests share a cached
//! response.

use std::fmt::Write;

use axum::http::{header, HeaderMap, HeaderValue, Method};

// == Derive Key ==
/// Builds the cache key for a request.
///
/// The key is `"{method} {target} {content_type} {authorization}"`, with an
/// absent header contributing an empty component. The target is used
/// verbatim; no normalization happens here.
///
/// Components are joined with a single space and are not escaped, so values
/// that themselves contain spaces (`Authorization: Bearer ...`) can make two
/// different requests collide. This is a known weakness of the format.
pub fn derive_key(
    method: &Method,
    target: &str,
    content_type: &str,
    authorization: &str,
) -> String {
    format!("{} {} {} {}", method, target, content_type, authorization)
}

// == Derive Key From Headers ==
/// Convenience wrapper reading `Content-Type` and `Authorization` from a
/// request header map. Only the first value of each header is used.
pub fn derive_key_from_headers(method: &Method, target: &str, headers: &HeaderMap) -> String {
    let content_type = header_component(headers.get(header::CONTENT_TYPE));
    let authorization = header_component(headers.get(header::AUTHORIZATION));
    derive_key(method, target, &content_type, &authorization)
}

/// Renders a header value without losing bytes.
///
/// UTF-8 text is kept as is, except `\` which becomes `\\`. Bytes that are
/// not valid UTF-8 become `\xNN`. Distinct values always render differently.
fn header_component(value: Option<&HeaderValue>) -> String {
    let Some(value) = value else {
        return String::new();
    };

    let mut out = String::with_capacity(value.len());
    for chunk in value.as_bytes().utf8_chunks() {
        for c in chunk.valid().chars() {
            if c == '\\' {
                out.push_str("\\\\");
            } else {
                out.push(c);
            }
        }
        for byte in chunk.invalid() {
            let _ = write!(out, "\\x{:02x}", byte);
        }
    }
    out
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        let key = derive_key(
            &Method::GET,
            "http://example.com/a",
            "application/json",
            "token",
        );
        assert_eq!(key, "GET http://example.com/a application/json token");
    }

    #[test]
    fn test_key_with_absent_headers() {
        let key = derive_key_from_headers(&Method::POST, "http://example.com/a", &HeaderMap::new());
        assert_eq!(key, "POST http://example.com/a  ");
    }

    #[test]
    fn test_key_reads_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));

        let key = derive_key_from_headers(&Method::GET, "http://example.com/", &headers);
        assert_eq!(key, "GET http://example.com/ text/plain Bearer abc");
    }

    #[test]
    fn test_key_uses_first_header_value() {
        let mut headers = HeaderMap::new();
        headers.append(header::AUTHORIZATION, HeaderValue::from_static("first"));
        headers.append(header::AUTHORIZATION, HeaderValue::from_static("second"));

        let key = derive_key_from_headers(&Method::GET, "http://example.com/", &headers);
        assert!(key.ends_with(" first"));
    }

    #[test]
    fn test_key_distinguishes_non_utf8_headers() {
        let mut first = HeaderMap::new();
        first.insert(header::AUTHORIZATION, HeaderValue::from_bytes(b"tok\xff").unwrap());
        let mut second = HeaderMap::new();
        second.insert(header::AUTHORIZATION, HeaderValue::from_bytes(b"tok\xfe").unwrap());

        let key_first = derive_key_from_headers(&Method::GET, "http://e.com/", &first);
        let key_second = derive_key_from_headers(&Method::GET, "http://e.com/", &second);
        assert_ne!(key_first, key_second);
        assert_eq!(key_first, "GET http://e.com/  tok\\xff");
    }

    #[test]
    fn test_key_escaped_bytes_do_not_collide_with_text() {
        let mut raw = HeaderMap::new();
        raw.insert(header::CONTENT_TYPE, HeaderValue::from_bytes(b"a\xff").unwrap());
        let mut text = HeaderMap::new();
        text.insert(header::CONTENT_TYPE, HeaderValue::from_static("a\\xff"));

        assert_ne!(
            derive_key_from_headers(&Method::GET, "http://e.com/", &raw),
            derive_key_from_headers(&Method::GET, "http://e.com/", &text)
        );
    }

    #[test]
    fn test_key_keeps_utf8_header_text() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_bytes("Bearer café".as_bytes()).unwrap(),
        );

        let key = derive_key_from_headers(&Method::GET, "http://e.com/", &headers);
        assert_eq!(key, "GET http://e.com/  Bearer café");
    }

    #[test]
    fn test_key_distinguishes_method() {
        let get = derive_key(&Method::GET, "http://example.com/", "", "");
        let post = derive_key(&Method::POST, "http://example.com/", "", "");
        assert_ne!(get, post);
    }

    #[test]
    fn test_key_does_not_normalize_target() {
        let plain = derive_key(&Method::GET, "http://example.com/a?x=1&y=2", "", "");
        let reordered = derive_key(&Method::GET, "http://example.com/a?y=2&x=1", "", "");
        assert_ne!(plain, reordered);
    }

    #[test]
    fn test_key_space_collision_is_possible() {
        // Known weakness: unescaped delimiter.
        let a = derive_key(&Method::GET, "http://example.com/", "text/plain x", "");
        let b = derive_key(&Method::GET, "http://example.com/", "text/plain", "x ");
        assert_eq!(a, b);
    }
}
