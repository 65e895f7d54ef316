//! Terminal vs. browser client detection.

use axum::http::{header, HeaderMap};

const BROWSER_AGENT_MARKERS: [&str; 6] = ["mozilla", "chrome", "safari", "edg", "firefox", "opera"];

pub const BROWSER_HINT: &str = "\
This endpoint streams ANSI graphics and is meant for a terminal.

Open it from a terminal, for example:
  curl -N http://<host>:<port>/a/woohoo?delay=0.04
or on Windows PowerShell:
  curl.exe -N http://<host>:<port>/a/woohoo?delay=0.04

Available animations: /a
";

pub const USAGE: &str = "\
ASCII Streamer is running.

Endpoints:
  GET /a                 -> list available animations
  GET /a/{name}          -> stream named animation (terminal only)
       Query: delay (float), alt (bool), banner (big|ticker), loops (int)
  GET /healthz           -> liveness probe
  GET /metrics           -> prometheus metrics

Streams are not rendered in a browser. Use a terminal (curl -N ...).
";

fn header_lower(headers: &HeaderMap, name: header::HeaderName) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_lowercase()
}

pub fn user_agent(headers: &HeaderMap) -> String {
    header_lower(headers, header::USER_AGENT)
}

/// A browser announces itself through its user agent or by asking for HTML.
pub fn is_browser(headers: &HeaderMap) -> bool {
    let ua = user_agent(headers);
    let accept = header_lower(headers, header::ACCEPT);

    BROWSER_AGENT_MARKERS.iter().any(|m| ua.contains(m)) || accept.contains("text/html")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(ua: Option<&'static str>, accept: Option<&'static str>) -> HeaderMap {
        let mut h = HeaderMap::new();
        if let Some(ua) = ua {
            h.insert(header::USER_AGENT, HeaderValue::from_static(ua));
        }
        if let Some(accept) = accept {
            h.insert(header::ACCEPT, HeaderValue::from_static(accept));
        }
        h
    }

    #[test]
    fn terminals_are_not_browsers() {
        assert!(!is_browser(&headers(Some("curl/8.5.0"), Some("*/*"))));
        assert!(!is_browser(&headers(None, None)));
        assert!(!is_browser(&headers(Some("Wget/1.21"), None)));
    }

    #[test]
    fn browsers_by_agent_or_accept() {
        assert!(is_browser(&headers(
            Some("Mozilla/5.0 (X11; Linux x86_64) Firefox/120.0"),
            None
        )));
        assert!(is_browser(&headers(Some("Edg/120"), None)));
        assert!(is_browser(&headers(
            Some("curl/8.5.0"),
            Some("TEXT/HTML,application/xhtml+xml")
        )));
    }
}
