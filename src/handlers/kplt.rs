// src/handlers/kplt.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::{
        acl::can_kplt,
        cursor::decode_cursor,
        error::AppError,
        extract::AppJson,
        pagination::{clamp_limit, parse_month, parse_year},
    },
    config::AppState,
    db::kplt_repo::KpltListFilter,
    middleware::auth::AuthenticatedUser,
    models::rbac::KpltAction,
};

fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("Nilai tidak boleh negatif.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct KpltListQuery {
    pub search: Option<String>,
    pub month: Option<String>,
    pub year: Option<String>,
    pub after: Option<String>,
    pub limit: Option<String>,
}

// GET /api/kplt
#[utoipa::path(
    get,
    path = "/api/kplt",
    tag = "Kplt",
    params(
        ("search" = Option<String>, Query, description = "Pencarian"),
        ("month" = Option<String>, Query, description = "Filter bulan (1-12)"),
        ("year" = Option<String>, Query, description = "Filter tahun (1970-2100)"),
        ("after" = Option<String>, Query, description = "Cursor halaman berikut"),
        ("limit" = Option<String>, Query, description = "Maksimal baris, 1-100")
    ),
    responses(
        (status = 200, description = "Listing KPLT branch caller"),
        (status = 401, description = "Tidak terautentikasi"),
        (status = 403, description = "Akses ditolak"),
        (status = 422, description = "Filter di luar rentang")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_kplt(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<KpltListQuery>,
) -> Result<impl IntoResponse, AppError> {
    if !can_kplt(KpltAction::Read, &user) {
        return Err(AppError::Forbidden);
    }

    let month = parse_month(query.month.as_deref())?;
    let year = parse_year(query.year.as_deref())?;

    let filter = KpltListFilter {
        branch: None,
        search: query.search.clone(),
        month,
        year,
        after: query.after.as_deref().and_then(decode_cursor),
        limit: clamp_limit(
            query.limit.as_deref().and_then(|s| s.trim().parse().ok()),
            100,
        ),
    };

    let result = app_state.kplt_service.list(&user, filter).await?;
    Ok((StatusCode::OK, Json(result)))
}

/// Pembuatan KPLT dari ULOK yang sudah OK. `ulok_id` memilih induknya;
/// branch dan status diturunkan di fungsi database.
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateKpltPayload {
    pub ulok_id: Uuid,
    pub grade_lokasi: Option<String>,
    #[validate(custom(function = "validate_not_negative"))]
    pub estimasi_investasi: Option<Decimal>,
    pub catatan: Option<String>,
}

// POST /api/kplt
#[utoipa::path(
    post,
    path = "/api/kplt",
    tag = "Kplt",
    request_body = CreateKpltPayload,
    responses(
        (status = 201, description = "KPLT dibuat dari ULOK yang sudah OK"),
        (status = 401, description = "Tidak terautentikasi"),
        (status = 403, description = "Akses ditolak atau user tanpa branch"),
        (status = 404, description = "ULOK induk tidak ditemukan"),
        (status = 409, description = "ULOK sudah memiliki KPLT"),
        (status = 422, description = "Payload tidak valid atau ULOK belum OK")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_kplt(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    AppJson(payload): AppJson<CreateKpltPayload>,
) -> Result<impl IntoResponse, AppError> {
    if !can_kplt(KpltAction::Create, &user) {
        return Err(AppError::Forbidden);
    }
    if user.branch_id.is_none() {
        return Err(AppError::NoBranch);
    }

    payload.validate().map_err(AppError::ValidationError)?;
    let ulok_id = payload.ulok_id;
    let payload = serde_json::to_value(&payload).map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;

    let data = app_state.kplt_service.create(&user, ulok_id, payload).await?;
    Ok((StatusCode::CREATED, Json(json!({ "data": data }))))
}

// GET /api/kplt/{kplt_id}
#[utoipa::path(
    get,
    path = "/api/kplt/{kplt_id}",
    tag = "Kplt",
    params(("kplt_id" = Uuid, Path, description = "ID KPLT")),
    responses(
        (status = 200, description = "Detail KPLT"),
        (status = 401, description = "Tidak terautentikasi"),
        (status = 403, description = "Akses ditolak"),
        (status = 404, description = "KPLT tidak ditemukan")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_kplt(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(kplt_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !can_kplt(KpltAction::Read, &user) {
        return Err(AppError::Forbidden);
    }

    let data = app_state.kplt_service.detail(&user, kplt_id).await?;
    Ok((StatusCode::OK, Json(json!({ "data": data }))))
}
