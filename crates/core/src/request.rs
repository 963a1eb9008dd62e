//! Request context handed to the resolver.
//!
//! Rules are keyed by the decoded URL exactly as the client requested it, in
//! two forms: the absolute URL (scheme, host, port, path, query, fragment) and
//! the server-relative URL (path, query, fragment).

/// Query markers that only show up in probes for old configuration-injection
/// holes. Requests carrying them never touch the rule store.
const SUSPICIOUS_MARKERS: &[&str] = &["mosConfig_", "=http://", "=https://"];

/// Components of the URL of the failed request, still percent-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestUrl {
    pub scheme: String,
    pub host: String,
    pub port: Option<u16>,
    pub path: String,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

impl RequestUrl {
    /// Decoded `scheme://host[:port]path[?query][#fragment]`.
    pub fn absolute(&self) -> String {
        let mut raw = format!("{}://{}", self.scheme, self.host);
        if let Some(port) = self.port {
            raw.push(':');
            raw.push_str(&port.to_string());
        }
        raw.push_str(&self.relative_raw());
        raw_decode(&raw)
    }

    /// Decoded `path[?query][#fragment]`.
    pub fn relative(&self) -> String {
        raw_decode(&self.relative_raw())
    }

    fn relative_raw(&self) -> String {
        let mut raw = self.path.clone();
        if let Some(query) = self.query.as_deref().filter(|q| !q.is_empty()) {
            raw.push('?');
            raw.push_str(query);
        }
        if let Some(fragment) = self.fragment.as_deref().filter(|f| !f.is_empty()) {
            raw.push('#');
            raw.push_str(fragment);
        }
        raw
    }
}

/// Ambient context of the failed request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub url: RequestUrl,
    /// Value of the `Referer` header, if the client sent one.
    pub referer: Option<String>,
    /// True when the request was served by the administrative surface.
    pub is_admin: bool,
}

/// Percent-decode without turning `+` into a space. Invalid UTF-8 is
/// replaced rather than rejected.
pub fn raw_decode(input: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(input.as_bytes())).into_owned()
}

/// Whether a decoded URL carries a known injection probe marker.
pub fn is_suspicious(decoded_url: &str) -> bool {
    SUSPICIOUS_MARKERS
        .iter()
        .any(|marker| decoded_url.contains(marker))
}
