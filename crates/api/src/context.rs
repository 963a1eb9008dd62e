//! Builds the resolver's [`RequestContext`] from an incoming HTTP request.

use axum::http::header::{HOST, REFERER};
use axum::http::uri::Authority;
use axum::http::{HeaderMap, Uri};
use relink_core::request::{RequestContext, RequestUrl};

use crate::config::ServerConfig;

/// Prefix of the JSON curation API, always treated as administrative.
pub const ADMIN_API_PREFIX: &str = "/api/v1/admin";

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Reconstruct the URL the client asked for, plus referer and admin flag.
///
/// The scheme comes from `X-Forwarded-Proto` (first value) and defaults to
/// `http`. Host and port come from the request target when it is in absolute
/// form, otherwise from the `Host` header. Clients never send fragments.
pub fn request_context(uri: &Uri, headers: &HeaderMap, config: &ServerConfig) -> RequestContext {
    let scheme = header_str(headers, FORWARDED_PROTO)
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty())
        .or_else(|| uri.scheme_str().map(str::to_string))
        .unwrap_or_else(|| "http".to_string());

    let authority = uri.authority().cloned().or_else(|| {
        header_str(headers, HOST.as_str()).and_then(|h| h.parse::<Authority>().ok())
    });
    let (host, port) = match &authority {
        Some(a) => (a.host().to_string(), a.port_u16()),
        None => ("localhost".to_string(), None),
    };

    let path = uri.path().to_string();
    let is_admin = is_admin_path(&path, &config.admin_path_prefix);

    RequestContext {
        url: RequestUrl {
            scheme,
            host,
            port,
            path,
            query: uri.query().map(str::to_string),
            fragment: None,
        },
        referer: header_str(headers, REFERER.as_str()).map(str::to_string),
        is_admin,
    }
}

/// Whether `path` is the admin prefix itself or lies below it.
pub fn is_admin_path(path: &str, admin_prefix: &str) -> bool {
    [admin_prefix, ADMIN_API_PREFIX].iter().any(|prefix| {
        path == *prefix
            || path
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
