//! Internal route resolution for redirect destinations.

use url::Url;

use crate::error::CoreError;

/// Turns stored destinations into canonical URLs.
pub trait Router: Send + Sync {
    /// Whether `url` points at this site.
    fn is_internal(&self, url: &str) -> bool;

    /// Canonical absolute URL for an internal destination.
    fn route(&self, url: &str) -> String;
}

/// Router for a site served under a single base URL.
///
/// Relative destinations are resolved against the base: `/path` is
/// host-absolute, `path` is relative to the base path. Absolute URLs are
/// internal only when they share the base's scheme, host and port.
#[derive(Debug, Clone)]
pub struct SiteRouter {
    base: Url,
}

impl SiteRouter {
    pub fn new(base: &str) -> Result<Self, CoreError> {
        let mut base = Url::parse(base)
            .map_err(|e| CoreError::Validation(format!("invalid site base URL '{base}': {e}")))?;
        if base.cannot_be_a_base() {
            return Err(CoreError::Validation(format!(
                "site base URL '{base}' cannot be used as a base"
            )));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { base })
    }
}

impl Router for SiteRouter {
    fn is_internal(&self, url: &str) -> bool {
        match self.base.join(url) {
            Ok(joined) => joined.origin() == self.base.origin(),
            Err(_) => false,
        }
    }

    fn route(&self, url: &str) -> String {
        match self.base.join(url) {
            Ok(joined) => joined.to_string(),
            Err(_) => url.to_string(),
        }
    }
}
