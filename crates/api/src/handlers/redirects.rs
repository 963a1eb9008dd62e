//! Handlers for curating the redirect table.
//!
//! Administrators review collected misses (most hit first), give them a
//! destination and publish them. Authentication is handled outside this
//! service.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use relink_core::curation::check_destination;
use relink_core::error::CoreError;
use relink_core::types::DbId;
use relink_db::models::redirect_link::{
    CreateRedirectLink, RedirectLinkFilter, UpdateRedirectLink,
};
use relink_db::repositories::RedirectLinkRepo;
use validator::Validate;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: "RedirectLink",
        id,
    }
}

/// GET /api/v1/admin/redirects
///
/// List redirects, optionally filtered by `published`, most hit first.
pub async fn list_redirects(
    State(state): State<AppState>,
    Query(filter): Query<RedirectLinkFilter>,
) -> AppResult<impl IntoResponse> {
    let links = RedirectLinkRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: links }))
}

/// GET /api/v1/admin/redirects/{id}
pub async fn get_redirect(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let link = RedirectLinkRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: link }))
}

/// POST /api/v1/admin/redirects
pub async fn create_redirect(
    State(state): State<AppState>,
    Json(input): Json<CreateRedirectLink>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    check_destination(
        &input.new_url,
        input.published,
        input.header,
        state.config.redirect.mode,
    )?;

    let link = RedirectLinkRepo::create(&state.pool, &input).await?;

    tracing::info!(
        id = link.id,
        old_url = %link.old_url,
        published = link.published,
        "Redirect created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: link })))
}

/// PUT /api/v1/admin/redirects/{id}
///
/// Patch a redirect. The merged result must still be consistent.
pub async fn update_redirect(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRedirectLink>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let existing = RedirectLinkRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    check_destination(
        input.new_url.as_deref().unwrap_or(&existing.new_url),
        input.published.unwrap_or(existing.published),
        input.header.or(existing.header),
        state.config.redirect.mode,
    )?;

    let link = RedirectLinkRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        id = link.id,
        old_url = %link.old_url,
        published = link.published,
        "Redirect updated",
    );

    Ok(Json(DataResponse { data: link }))
}

/// DELETE /api/v1/admin/redirects/{id}
pub async fn delete_redirect(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !RedirectLinkRepo::delete(&state.pool, id).await? {
        return Err(not_found(id).into());
    }

    tracing::info!(id, "Redirect deleted");
    Ok(StatusCode::NO_CONTENT)
}
