//! [`RuleStore`] backed by the `redirect_links` table.

use async_trait::async_trait;
use relink_core::error::CoreError;
use relink_core::store::{NewMiss, RuleMatch, RuleStore};
use relink_core::types::DbId;

use crate::repositories::RedirectLinkRepo;
use crate::DbPool;

/// PostgreSQL rule store used by the resolver.
#[derive(Clone)]
pub struct PgRuleStore {
    pool: DbPool,
}

impl PgRuleStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn storage(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Redirect table query failed");
    CoreError::Storage(err.to_string())
}

#[async_trait]
impl RuleStore for PgRuleStore {
    async fn find_rule(&self, old_url: &str) -> Result<Option<RuleMatch>, CoreError> {
        let target = RedirectLinkRepo::find_by_old_url(&self.pool, old_url)
            .await
            .map_err(storage)?;
        Ok(target.map(|t| RuleMatch {
            new_url: Some(t.new_url),
            header: t.header,
            published: t.published,
        }))
    }

    async fn find_id(&self, old_url: &str) -> Result<Option<DbId>, CoreError> {
        RedirectLinkRepo::find_id_by_old_url(&self.pool, old_url)
            .await
            .map_err(storage)
    }

    async fn record_miss(&self, miss: &NewMiss) -> Result<(), CoreError> {
        RedirectLinkRepo::record_miss(&self.pool, &miss.old_url, &miss.referer, miss.created_date)
            .await
            .map_err(storage)
    }

    async fn increment_hits(&self, id: DbId) -> Result<(), CoreError> {
        let updated = RedirectLinkRepo::increment_hits(&self.pool, id)
            .await
            .map_err(storage)?;
        if !updated {
            return Err(CoreError::NotFound {
                entity: "RedirectLink",
                id,
            });
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), CoreError> {
        RedirectLinkRepo::ping(&self.pool).await.map_err(storage)
    }
}
