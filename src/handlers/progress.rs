// src/handlers/progress.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::{
    common::{
        acl::can_progress_kplt,
        error::AppError,
        pagination::{coerce_page, coerce_per_page},
    },
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::rbac::ProgressAction,
};

#[derive(Debug, Deserialize)]
pub struct ProgressListQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
}

// GET /api/progress
#[utoipa::path(
    get,
    path = "/api/progress",
    tag = "Progress",
    params(
        ("page" = Option<String>, Query, description = "Halaman, minimal 1"),
        ("per_page" = Option<String>, Query, description = "Isi halaman, 1-100")
    ),
    responses(
        (status = 200, description = "Listing progress KPLT"),
        (status = 401, description = "Tidak terautentikasi"),
        (status = 403, description = "Akses ditolak")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_progress(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<ProgressListQuery>,
) -> Result<impl IntoResponse, AppError> {
    if !can_progress_kplt(ProgressAction::Read, &user) {
        return Err(AppError::Forbidden);
    }

    // Parameter paging rusak jatuh ke default, tidak menggagalkan request
    let page = coerce_page(query.page.as_deref());
    let per_page = coerce_per_page(query.per_page.as_deref());

    let result = app_state.progress_service.list(&user, page, per_page).await?;
    let data = result.get("data").cloned().unwrap_or_else(|| json!([]));
    let total = result.get("total").cloned().unwrap_or_else(|| json!(0));

    Ok((
        StatusCode::OK,
        Json(json!({
            "data": data,
            "page": page,
            "per_page": per_page,
            "total": total,
        })),
    ))
}

// GET /api/progress/{progress_id}
#[utoipa::path(
    get,
    path = "/api/progress/{progress_id}",
    tag = "Progress",
    params(("progress_id" = Uuid, Path, description = "ID progress KPLT")),
    responses(
        (status = 200, description = "Detail progress beserta timeline tahapan"),
        (status = 401, description = "Tidak terautentikasi"),
        (status = 403, description = "Akses ditolak"),
        (status = 404, description = "Progress tidak ditemukan")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_progress(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(progress_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !can_progress_kplt(ProgressAction::Read, &user) {
        return Err(AppError::Forbidden);
    }

    let data: Value = app_state.progress_service.detail(&user, progress_id).await?;

    Ok((StatusCode::OK, Json(json!({ "success": true, "data": data }))))
}
