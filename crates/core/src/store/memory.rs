//! In-memory [`RuleStore`] for tests and embedding.
//!
//! Records live in a `Vec` behind `std::sync::RwLock`. Two failure switches
//! simulate an unavailable backend: one fails every call, the other only the
//! writes (lookups keep working).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

use super::{NewMiss, RuleMatch, RuleStore};

/// A stored record, mirroring the columns of `redirect_links`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRule {
    pub id: DbId,
    pub old_url: String,
    pub new_url: String,
    pub referer: String,
    pub comment: String,
    pub hits: i64,
    pub published: bool,
    pub header: Option<i32>,
    pub created_date: Timestamp,
}

/// In-memory rule store.
pub struct InMemoryRuleStore {
    rules: RwLock<Vec<StoredRule>>,
    failing: AtomicBool,
    writes_failing: AtomicBool,
}

impl InMemoryRuleStore {
    pub fn new() -> Self {
        Self {
            rules: RwLock::new(Vec::new()),
            failing: AtomicBool::new(false),
            writes_failing: AtomicBool::new(false),
        }
    }

    /// Add a curated rule and return its id.
    pub fn insert_rule(
        &self,
        old_url: &str,
        new_url: &str,
        header: Option<i32>,
        published: bool,
    ) -> DbId {
        let mut rules = self.rules.write().unwrap_or_else(|e| e.into_inner());
        let id = rules.len() as DbId + 1;
        rules.push(StoredRule {
            id,
            old_url: old_url.to_string(),
            new_url: new_url.to_string(),
            referer: String::new(),
            comment: String::new(),
            hits: 0,
            published,
            header,
            created_date: chrono::Utc::now(),
        });
        id
    }

    /// Make every subsequent call fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Make `record_miss` and `increment_hits` fail while lookups succeed.
    pub fn set_writes_failing(&self, failing: bool) {
        self.writes_failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of all stored records, in insertion order.
    pub fn rules(&self) -> Vec<StoredRule> {
        self.rules
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn find(&self, old_url: &str) -> Option<StoredRule> {
        self.rules().into_iter().find(|r| r.old_url == old_url)
    }

    fn check(&self) -> Result<(), CoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CoreError::Storage("rule store unavailable".into()));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), CoreError> {
        self.check()?;
        if self.writes_failing.load(Ordering::SeqCst) {
            return Err(CoreError::Storage("rule store rejected write".into()));
        }
        Ok(())
    }
}

impl Default for InMemoryRuleStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RuleStore for InMemoryRuleStore {
    async fn find_rule(&self, old_url: &str) -> Result<Option<RuleMatch>, CoreError> {
        self.check()?;
        Ok(self.find(old_url).map(|r| RuleMatch {
            new_url: Some(r.new_url),
            header: r.header,
            published: r.published,
        }))
    }

    async fn find_id(&self, old_url: &str) -> Result<Option<DbId>, CoreError> {
        self.check()?;
        Ok(self.find(old_url).map(|r| r.id))
    }

    async fn record_miss(&self, miss: &NewMiss) -> Result<(), CoreError> {
        self.check_write()?;
        let mut rules = self.rules.write().unwrap_or_else(|e| e.into_inner());
        // A concurrent first miss already created the row.
        if let Some(existing) = rules.iter_mut().find(|r| r.old_url == miss.old_url) {
            existing.hits += 1;
            return Ok(());
        }
        let id = rules.len() as DbId + 1;
        rules.push(StoredRule {
            id,
            old_url: miss.old_url.clone(),
            new_url: String::new(),
            referer: miss.referer.clone(),
            comment: String::new(),
            hits: 1,
            published: false,
            header: None,
            created_date: miss.created_date,
        });
        Ok(())
    }

    async fn increment_hits(&self, id: DbId) -> Result<(), CoreError> {
        self.check_write()?;
        let mut rules = self.rules.write().unwrap_or_else(|e| e.into_inner());
        let rule = rules
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(CoreError::NotFound {
                entity: "RedirectLink",
                id,
            })?;
        rule.hits += 1;
        Ok(())
    }

    async fn ping(&self) -> Result<(), CoreError> {
        self.check()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[tokio::test]
    async fn record_then_increment() {
        let store = InMemoryRuleStore::new();
        store
            .record_miss(&NewMiss {
                old_url: "/gone".into(),
                referer: "https://ref.example/".into(),
                created_date: chrono::Utc::now(),
            })
            .await
            .unwrap();

        let id = store.find_id("/gone").await.unwrap().unwrap();
        store.increment_hits(id).await.unwrap();

        let rule = store.find("/gone").unwrap();
        assert_eq!(rule.hits, 2);
        assert!(!rule.published);
        assert_eq!(rule.new_url, "");
        assert_eq!(rule.referer, "https://ref.example/");
    }

    #[tokio::test]
    async fn failing_store_reports_storage_error() {
        let store = InMemoryRuleStore::new();
        store.set_failing(true);
        assert_matches!(store.find_rule("/x").await, Err(CoreError::Storage(_)));
    }

    #[tokio::test]
    async fn failing_writes_leave_lookups_working() {
        let store = InMemoryRuleStore::new();
        let id = store.insert_rule("/kept", "/new", None, true);
        store.set_writes_failing(true);

        assert_matches!(store.find_rule("/kept").await, Ok(Some(_)));
        assert_matches!(store.increment_hits(id).await, Err(CoreError::Storage(_)));
        assert_eq!(store.find("/kept").unwrap().hits, 0);
    }

    #[tokio::test]
    async fn increment_unknown_id_is_not_found() {
        let store = InMemoryRuleStore::new();
        assert_matches!(
            store.increment_hits(99).await,
            Err(CoreError::NotFound { id: 99, .. })
        );
    }
}
