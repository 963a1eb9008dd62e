//! Redirect link entity model and DTOs.

use relink_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `redirect_links` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RedirectLink {
    pub id: DbId,
    pub old_url: String,
    pub new_url: String,
    pub referer: String,
    pub comment: String,
    pub hits: i64,
    pub published: bool,
    pub header: Option<i32>,
    pub created_date: Timestamp,
    pub modified_date: Timestamp,
}

/// The subset of columns the resolver reads on every 404.
#[derive(Debug, Clone, FromRow)]
pub struct RedirectTarget {
    pub new_url: String,
    pub header: Option<i32>,
    pub published: bool,
}

/// DTO for creating a curated redirect.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRedirectLink {
    #[validate(length(min = 1, max = 2048))]
    pub old_url: String,
    #[serde(default)]
    #[validate(length(max = 2048))]
    pub new_url: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub published: bool,
    #[validate(range(min = 300, max = 599))]
    pub header: Option<i32>,
}

/// DTO for curating an existing redirect. Omitted fields keep their value.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateRedirectLink {
    #[validate(length(min = 1, max = 2048))]
    pub old_url: Option<String>,
    #[validate(length(max = 2048))]
    pub new_url: Option<String>,
    pub comment: Option<String>,
    pub published: Option<bool>,
    #[validate(range(min = 300, max = 599))]
    pub header: Option<i32>,
}

/// Query parameters for listing redirects.
#[derive(Debug, Default, Deserialize)]
pub struct RedirectLinkFilter {
    pub published: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
