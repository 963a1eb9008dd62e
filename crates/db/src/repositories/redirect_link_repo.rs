//! Repository for the `redirect_links` table.
//!
//! The lookup and bookkeeping queries serve the 404 resolver; the rest serve
//! administrators curating collected URLs into redirects.

use relink_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::redirect_link::{
    CreateRedirectLink, RedirectLink, RedirectLinkFilter, RedirectTarget, UpdateRedirectLink,
};

/// Column list for `redirect_links` queries.
const COLUMNS: &str = "\
    id, old_url, new_url, referer, comment, hits, published, header, \
    created_date, modified_date";

/// Default page size for [`RedirectLinkRepo::list`].
const DEFAULT_LIMIT: i64 = 50;

/// Upper bound on page size for [`RedirectLinkRepo::list`].
const MAX_LIMIT: i64 = 500;

/// Provides data access for redirect links.
pub struct RedirectLinkRepo;

impl RedirectLinkRepo {
    /// Destination, status and publish state of the rule for `old_url`.
    pub async fn find_by_old_url(
        pool: &PgPool,
        old_url: &str,
    ) -> Result<Option<RedirectTarget>, sqlx::Error> {
        sqlx::query_as::<_, RedirectTarget>(
            "SELECT new_url, header, published FROM redirect_links \
             WHERE old_url = $1 \
             LIMIT 1",
        )
        .bind(old_url)
        .fetch_optional(pool)
        .await
    }

    /// Id of the record for `old_url`, published or not.
    pub async fn find_id_by_old_url(
        pool: &PgPool,
        old_url: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM redirect_links WHERE old_url = $1")
            .bind(old_url)
            .fetch_optional(pool)
            .await
    }

    /// Touch the table without reading any row data.
    pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1 FROM redirect_links LIMIT 1")
            .fetch_optional(pool)
            .await?;
        Ok(())
    }

    /// Insert an unpublished, uncurated record for a first-time miss.
    ///
    /// Two concurrent first misses for the same URL collapse into one row
    /// with the hit counted twice.
    pub async fn record_miss(
        pool: &PgPool,
        old_url: &str,
        referer: &str,
        created_date: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO redirect_links \
                 (old_url, new_url, referer, comment, hits, published, created_date, modified_date) \
             VALUES ($1, '', $2, '', 1, FALSE, $3, $3) \
             ON CONFLICT (old_url) DO UPDATE SET hits = redirect_links.hits + 1",
        )
        .bind(old_url)
        .bind(referer)
        .bind(created_date)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Add one to the hit counter. Returns `false` if the row is gone.
    pub async fn increment_hits(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE redirect_links SET hits = hits + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List records, most hit first.
    pub async fn list(
        pool: &PgPool,
        filter: &RedirectLinkFilter,
    ) -> Result<Vec<RedirectLink>, sqlx::Error> {
        let limit = filter.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = filter.offset.unwrap_or(0).max(0);
        let query = format!(
            "SELECT {COLUMNS} FROM redirect_links \
             WHERE ($1::BOOLEAN IS NULL OR published = $1) \
             ORDER BY hits DESC, id ASC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, RedirectLink>(&query)
            .bind(filter.published)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<RedirectLink>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM redirect_links WHERE id = $1");
        sqlx::query_as::<_, RedirectLink>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a curated record.
    pub async fn create(
        pool: &PgPool,
        dto: &CreateRedirectLink,
    ) -> Result<RedirectLink, sqlx::Error> {
        let query = format!(
            "INSERT INTO redirect_links (old_url, new_url, comment, published, header) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RedirectLink>(&query)
            .bind(&dto.old_url)
            .bind(&dto.new_url)
            .bind(&dto.comment)
            .bind(dto.published)
            .bind(dto.header)
            .fetch_one(pool)
            .await
    }

    /// Patch a record. Only provided fields change; `hits` and `referer` are
    /// never touched here.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateRedirectLink,
    ) -> Result<Option<RedirectLink>, sqlx::Error> {
        let query = format!(
            "UPDATE redirect_links SET \
                 old_url = COALESCE($2, old_url), \
                 new_url = COALESCE($3, new_url), \
                 comment = COALESCE($4, comment), \
                 published = COALESCE($5, published), \
                 header = COALESCE($6, header), \
                 modified_date = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RedirectLink>(&query)
            .bind(id)
            .bind(&dto.old_url)
            .bind(&dto.new_url)
            .bind(&dto.comment)
            .bind(dto.published)
            .bind(dto.header)
            .fetch_optional(pool)
            .await
    }

    /// Delete a record. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM redirect_links WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
