//! Rule store abstraction.
//!
//! The resolver only ever reads and writes individual rows keyed by
//! `old_url`. The [`RuleStore`] trait captures exactly those operations so the
//! PostgreSQL repository and the [`memory::InMemoryRuleStore`] used in tests
//! are interchangeable.

pub mod memory;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// The fields of a stored rule the resolver needs to decide on a redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    /// Destination URL. Empty or missing while the rule is uncurated.
    pub new_url: Option<String>,
    /// Status code to issue. `None` means "use the default".
    pub header: Option<i32>,
    pub published: bool,
}

/// A first-time miss to be recorded for curation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMiss {
    pub old_url: String,
    /// `Referer` of the request, empty when absent.
    pub referer: String,
    pub created_date: Timestamp,
}

/// Row-level access to the redirect rule table.
///
/// Implementations must be `Send + Sync`; single-row atomicity is the
/// backend's responsibility.
#[async_trait]
pub trait RuleStore: Send + Sync {
    /// First rule whose `old_url` equals `old_url` exactly.
    async fn find_rule(&self, old_url: &str) -> Result<Option<RuleMatch>, CoreError>;

    /// Id of the record for `old_url`, published or not.
    async fn find_id(&self, old_url: &str) -> Result<Option<DbId>, CoreError>;

    /// Insert an unpublished record with an empty destination and one hit.
    async fn record_miss(&self, miss: &NewMiss) -> Result<(), CoreError>;

    /// Add one to the hit counter of an existing record.
    async fn increment_hits(&self, id: DbId) -> Result<(), CoreError>;

    /// Check that the rule table can be read.
    async fn ping(&self) -> Result<(), CoreError>;
}
