// src/handlers/ulok_eksisting.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    common::{
        acl::can_ulok_eksisting,
        cursor::{decode_cursor, next_cursor_from_rows},
        error::AppError,
        pagination::clamp_limit,
    },
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::rbac::UlokEksistingAction,
};

#[derive(Debug, Deserialize)]
pub struct UlokEksistingListQuery {
    pub search: Option<String>,
    pub after: Option<String>,
    pub limit: Option<String>,
}

// GET /api/ulok_eksisting
#[utoipa::path(
    get,
    path = "/api/ulok_eksisting",
    tag = "UlokEksisting",
    params(
        ("search" = Option<String>, Query, description = "Pencarian nama toko"),
        ("after" = Option<String>, Query, description = "Cursor halaman berikut"),
        ("limit" = Option<String>, Query, description = "Maksimal baris, 1-100")
    ),
    responses(
        (status = 200, description = "Listing toko eksisting (baca-saja)"),
        (status = 401, description = "Tidak terautentikasi")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_ulok_eksisting(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<UlokEksistingListQuery>,
) -> Result<impl IntoResponse, AppError> {
    if !can_ulok_eksisting(UlokEksistingAction::Read, &user) {
        return Err(AppError::Forbidden);
    }

    let branch = if user.role.is_regional_or_above() {
        None
    } else {
        Some(user.branch_id.ok_or(AppError::NoBranch)?)
    };
    let after = query.after.as_deref().and_then(decode_cursor);
    let limit = clamp_limit(
        query.limit.as_deref().and_then(|s| s.trim().parse().ok()),
        100,
    );

    let rows = app_state
        .ulok_eksisting_repo
        .list(branch, query.search.as_deref(), after.as_ref(), limit)
        .await?;
    let next_cursor = next_cursor_from_rows(&rows, limit);

    Ok((StatusCode::OK, Json(json!({ "data": rows, "next_cursor": next_cursor }))))
}
