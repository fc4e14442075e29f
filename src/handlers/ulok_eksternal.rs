// src/handlers/ulok_eksternal.rs
//
// Intake usulan dari pihak eksternal. Tiga mutasi dipegang role berbeda:
// Regional Manager menugaskan branch, Location Manager menunjuk
// penanggung jawab, Location Specialist memutus OK/NOK.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::{
        acl::can_ulok_eksternal,
        cursor::decode_cursor,
        error::AppError,
        extract::AppJson,
        pagination::clamp_limit,
    },
    config::AppState,
    db::ulok_eksternal_repo::{PageDirection, UlokEksternalListFilter},
    middleware::auth::AuthenticatedUser,
    models::rbac::{Role, UlokEksternalAction},
    models::ulok_eksternal::UlokEksternalStatus,
};

#[derive(Debug, Deserialize)]
pub struct UlokEksternalListQuery {
    pub search: Option<String>,
    pub after: Option<String>,
    pub before: Option<String>,
    pub limit: Option<String>,
}

// GET /api/ulok_eksternal
#[utoipa::path(
    get,
    path = "/api/ulok_eksternal",
    tag = "UlokEksternal",
    params(
        ("search" = Option<String>, Query, description = "Pencarian"),
        ("after" = Option<String>, Query, description = "Cursor maju"),
        ("before" = Option<String>, Query, description = "Cursor mundur"),
        ("limit" = Option<String>, Query, description = "Maksimal baris, 1-200")
    ),
    responses(
        (status = 200, description = "Listing intake eksternal"),
        (status = 401, description = "Tidak terautentikasi"),
        (status = 422, description = "Kombinasi cursor tidak valid")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_ulok_eksternal(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<UlokEksternalListQuery>,
) -> Result<impl IntoResponse, AppError> {
    if !can_ulok_eksternal(UlokEksternalAction::Read, &user) {
        return Err(AppError::Forbidden);
    }
    if query.after.is_some() && query.before.is_some() {
        return Err(AppError::invalid_field(
            "before",
            "Gunakan salah satu dari after atau before, tidak keduanya.",
        ));
    }

    let (cursor_raw, direction) = match (&query.after, &query.before) {
        (_, Some(b)) => (Some(b.as_str()), PageDirection::Before),
        (a, None) => (a.as_deref(), PageDirection::After),
    };

    let filter = UlokEksternalListFilter {
        branch: None,
        search: query.search.clone(),
        cursor: cursor_raw.and_then(decode_cursor),
        direction,
        limit: clamp_limit(
            query.limit.as_deref().and_then(|s| s.trim().parse().ok()),
            200,
        ),
    };

    let result = app_state.ulok_eksternal_service.list(&user, filter).await?;
    Ok((StatusCode::OK, Json(result)))
}

// GET /api/ulok_eksternal/{id}
#[utoipa::path(
    get,
    path = "/api/ulok_eksternal/{id}",
    tag = "UlokEksternal",
    params(("id" = Uuid, Path, description = "ID intake eksternal")),
    responses(
        (status = 200, description = "Detail intake"),
        (status = 401, description = "Tidak terautentikasi"),
        (status = 404, description = "Data tidak ditemukan")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_ulok_eksternal(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !can_ulok_eksternal(UlokEksternalAction::Read, &user) {
        return Err(AppError::Forbidden);
    }

    let data = app_state.ulok_eksternal_service.detail(&user, id).await?;
    Ok((StatusCode::OK, Json(json!({ "data": data }))))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct AssignBranchPayload {
    pub branch_id: Uuid,
}

// PATCH /api/ulok_eksternal/{id}/assign-branch
#[utoipa::path(
    patch,
    path = "/api/ulok_eksternal/{id}/assign-branch",
    tag = "UlokEksternal",
    request_body = AssignBranchPayload,
    params(("id" = Uuid, Path, description = "ID intake eksternal")),
    responses(
        (status = 200, description = "Branch penindak lanjut ditugaskan"),
        (status = 401, description = "Tidak terautentikasi"),
        (status = 403, description = "Hanya Regional Manager"),
        (status = 404, description = "Data tidak ditemukan")
    ),
    security(("api_jwt" = []))
)]
pub async fn assign_branch(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<AssignBranchPayload>,
) -> Result<impl IntoResponse, AppError> {
    if user.role != Role::RegionalManager {
        return Err(AppError::Forbidden);
    }

    let data = app_state
        .ulok_eksternal_service
        .assign_branch(&user, id, payload.branch_id)
        .await?;
    Ok((StatusCode::OK, Json(json!({ "data": data }))))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct AssignPenanggungjawabPayload {
    pub penanggungjawab: Uuid,
}

// PATCH /api/ulok_eksternal/{id}/assign-penanggungjawab
#[utoipa::path(
    patch,
    path = "/api/ulok_eksternal/{id}/assign-penanggungjawab",
    tag = "UlokEksternal",
    request_body = AssignPenanggungjawabPayload,
    params(("id" = Uuid, Path, description = "ID intake eksternal")),
    responses(
        (status = 200, description = "Penanggung jawab ditunjuk"),
        (status = 401, description = "Tidak terautentikasi"),
        (status = 403, description = "Hanya Location Manager"),
        (status = 404, description = "Data tidak ditemukan")
    ),
    security(("api_jwt" = []))
)]
pub async fn assign_penanggungjawab(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<AssignPenanggungjawabPayload>,
) -> Result<impl IntoResponse, AppError> {
    if user.role != Role::LocationManager {
        return Err(AppError::Forbidden);
    }
    if user.branch_id.is_none() {
        return Err(AppError::NoBranch);
    }

    let data = app_state
        .ulok_eksternal_service
        .assign_penanggungjawab(&user, id, payload.penanggungjawab)
        .await?;
    Ok((StatusCode::OK, Json(json!({ "data": data }))))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UlokEksternalApprovalPayload {
    pub status_ulok_eksternal: String,
}

// PATCH /api/ulok_eksternal/{id}/approval
#[utoipa::path(
    patch,
    path = "/api/ulok_eksternal/{id}/approval",
    tag = "UlokEksternal",
    request_body = UlokEksternalApprovalPayload,
    params(("id" = Uuid, Path, description = "ID intake eksternal")),
    responses(
        (status = 200, description = "Keputusan tercatat; OK memicu pembuatan ULOK"),
        (status = 401, description = "Tidak terautentikasi"),
        (status = 403, description = "Hanya Location Specialist"),
        (status = 404, description = "Data tidak ditemukan"),
        (status = 409, description = "Status sudah difinalisasi"),
        (status = 422, description = "Payload tidak valid")
    ),
    security(("api_jwt" = []))
)]
pub async fn approve_ulok_eksternal(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UlokEksternalApprovalPayload>,
) -> Result<impl IntoResponse, AppError> {
    if user.role != Role::LocationSpecialist {
        return Err(AppError::Forbidden);
    }
    if user.branch_id.is_none() {
        return Err(AppError::NoBranch);
    }

    let raw = payload.status_ulok_eksternal.trim();
    let status = if raw.eq_ignore_ascii_case("ok") {
        UlokEksternalStatus::Ok
    } else if raw.eq_ignore_ascii_case("nok") {
        UlokEksternalStatus::Nok
    } else {
        return Err(AppError::invalid_field(
            "status_ulok_eksternal",
            "Nilai harus \"OK\" atau \"NOK\".",
        ));
    };

    let data = app_state
        .ulok_eksternal_service
        .approve(&user, id, status)
        .await?;
    Ok((StatusCode::OK, Json(json!({ "data": data }))))
}
