use serde::Deserialize;

/// Settings that shape how the resolver treats stored rules and misses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RedirectConfig {
    /// Record unmatched URLs in the rule store for later curation.
    #[serde(default = "default_collect_urls")]
    pub collect_urls: bool,
    /// Honor the status code stored on each rule. When off, every redirect
    /// is issued as 301.
    #[serde(default)]
    pub mode: bool,
}

fn default_collect_urls() -> bool {
    true
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            collect_urls: true,
            mode: false,
        }
    }
}
