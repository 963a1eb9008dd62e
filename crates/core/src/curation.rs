//! Consistency checks for rules edited by administrators.

use crate::error::CoreError;
use crate::resolver::{effective_status, is_redirect};

/// A published rule that redirects must say where to.
///
/// Whether a rule redirects depends on the header mode: with custom codes off
/// every rule redirects with 301, otherwise rules re-signalling an error may
/// leave the destination empty.
pub fn check_destination(
    new_url: &str,
    published: bool,
    header: Option<i32>,
    mode: bool,
) -> Result<(), CoreError> {
    let redirects = is_redirect(effective_status(mode, header));
    if published && redirects && new_url.trim().is_empty() {
        return Err(CoreError::Validation(
            "new_url is required for a published redirect".to_string(),
        ));
    }
    Ok(())
}
