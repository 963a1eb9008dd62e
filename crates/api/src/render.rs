//! Generic error renderer: turns a resolver [`Outcome`] into an HTTP response.

use axum::http::header::{InvalidHeaderValue, LOCATION};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use relink_core::error::ErrorReport;
use relink_core::resolver::Outcome;
use serde_json::json;
use url::Url;

pub fn render(outcome: Outcome) -> Response {
    match outcome {
        Outcome::Redirect { location, status } => redirect(&location, status),
        Outcome::Rendered(report) => error_page(&report),
    }
}

fn redirect(location: &str, status: u16) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::MOVED_PERMANENTLY);
    match location_header(location) {
        Ok(value) => (status, [(LOCATION, value)]).into_response(),
        Err(err) => {
            tracing::error!(location, error = %err, "Unusable redirect location");
            error_page(&ErrorReport::new(500, "Invalid redirect location"))
        }
    }
}

/// Absolute locations are re-serialized by `url`, which percent-encodes
/// anything a header value cannot carry. Relative ones are sent as stored.
fn location_header(location: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    match Url::parse(location) {
        Ok(url) => HeaderValue::from_str(url.as_str()),
        Err(_) => HeaderValue::from_str(location),
    }
}

/// JSON error body `{ "error", "code", "status" }`.
///
/// Causes are logged, never sent to the client.
fn error_page(report: &ErrorReport) -> Response {
    let status = StatusCode::from_u16(report.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if let Some(cause) = &report.cause {
        tracing::debug!(status = status.as_u16(), cause = %cause, "Rendering error with cause");
    }

    let code = status
        .canonical_reason()
        .map(|reason| reason.to_ascii_uppercase().replace([' ', '-', '\''], "_"))
        .unwrap_or_else(|| "ERROR".to_string());

    let body = json!({
        "error": report.message,
        "code": code,
        "status": status.as_u16(),
    });

    (status, axum::Json(body)).into_response()
}
