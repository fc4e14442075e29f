// src/handlers/ulok.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::{
        acl::can_ulok,
        cursor::decode_cursor,
        error::AppError,
        extract::AppJson,
        pagination::{clamp_limit, parse_month, parse_year},
    },
    config::AppState,
    db::ulok_repo::UlokListFilter,
    middleware::auth::AuthenticatedUser,
    models::rbac::{Role, UlokAction},
    models::ulok::UlokDecision,
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
pub struct UlokListQuery {
    pub search: Option<String>,
    pub month: Option<String>,
    pub year: Option<String>,
    pub after: Option<String>,
    pub limit: Option<String>,
}

// GET /api/ulok
#[utoipa::path(
    get,
    path = "/api/ulok",
    tag = "Ulok",
    params(
        ("search" = Option<String>, Query, description = "Pencarian nama/alamat"),
        ("month" = Option<String>, Query, description = "Filter bulan (1-12)"),
        ("year" = Option<String>, Query, description = "Filter tahun (1970-2100)"),
        ("after" = Option<String>, Query, description = "Cursor halaman berikut"),
        ("limit" = Option<String>, Query, description = "Maksimal baris, 1-100")
    ),
    responses(
        (status = 200, description = "Listing ULOK branch caller"),
        (status = 401, description = "Tidak terautentikasi"),
        (status = 403, description = "Akses ditolak"),
        (status = 422, description = "Filter di luar rentang")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_ulok(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<UlokListQuery>,
) -> Result<impl IntoResponse, AppError> {
    if !can_ulok(UlokAction::Read, &user) {
        return Err(AppError::Forbidden);
    }

    // Batas murah divalidasi sebelum menyentuh database
    let month = parse_month(query.month.as_deref())?;
    let year = parse_year(query.year.as_deref())?;

    let filter = UlokListFilter {
        branch: None, // diisi service sesuai scoping role
        search: query.search.clone(),
        month,
        year,
        after: query.after.as_deref().and_then(decode_cursor),
        limit: clamp_limit(
            query.limit.as_deref().and_then(|s| s.trim().parse().ok()),
            100,
        ),
    };

    let result = app_state.ulok_service.list(&user, filter).await?;
    Ok((StatusCode::OK, Json(result)))
}

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateUlokPayload {
    #[validate(length(min = 1, message = "Nama ULOK wajib diisi."))]
    pub nama_ulok: String,

    #[validate(length(min = 1, message = "Alamat wajib diisi."))]
    pub alamat: String,

    pub kelurahan: Option<String>,
    pub kecamatan: Option<String>,
    pub kabupaten: Option<String>,
    pub provinsi: Option<String>,

    #[validate(range(min = -11.0, max = 6.0, message = "Latitude di luar wilayah layanan."))]
    pub latitude: Option<f64>,
    #[validate(range(min = 95.0, max = 141.0, message = "Longitude di luar wilayah layanan."))]
    pub longitude: Option<f64>,

    #[validate(custom(function = "validate_not_negative"))]
    pub luas_tanah: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub luas_bangunan: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub harga_sewa: Option<Decimal>,

    pub nama_pemilik: Option<String>,
    pub kontak_pemilik: Option<String>,
    pub bentuk_objek: Option<String>,
    pub alas_hak: Option<String>,
}

// POST /api/ulok
#[utoipa::path(
    post,
    path = "/api/ulok",
    tag = "Ulok",
    request_body = CreateUlokPayload,
    responses(
        (status = 201, description = "ULOK dibuat dengan status In Progress"),
        (status = 401, description = "Tidak terautentikasi"),
        (status = 403, description = "Akses ditolak atau user tanpa branch"),
        (status = 422, description = "Payload tidak valid")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_ulok(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    AppJson(payload): AppJson<CreateUlokPayload>,
) -> Result<impl IntoResponse, AppError> {
    if !can_ulok(UlokAction::Create, &user) {
        return Err(AppError::Forbidden);
    }
    if user.branch_id.is_none() {
        return Err(AppError::NoBranch);
    }

    payload.validate().map_err(AppError::ValidationError)?;
    let payload = serde_json::to_value(&payload).map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;

    let data = app_state.ulok_service.create(&user, payload).await?;
    Ok((StatusCode::CREATED, Json(json!({ "data": data }))))
}

// GET /api/ulok/{ulok_id}
#[utoipa::path(
    get,
    path = "/api/ulok/{ulok_id}",
    tag = "Ulok",
    params(("ulok_id" = Uuid, Path, description = "ID ULOK")),
    responses(
        (status = 200, description = "Detail ULOK"),
        (status = 401, description = "Tidak terautentikasi"),
        (status = 403, description = "Akses ditolak"),
        (status = 404, description = "ULOK tidak ditemukan")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_ulok(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(ulok_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !can_ulok(UlokAction::Read, &user) {
        return Err(AppError::Forbidden);
    }

    let data = app_state.ulok_service.detail(&user, ulok_id).await?;
    Ok((StatusCode::OK, Json(json!({ "data": data }))))
}

/// Update field bisnis ULOK. Status approval dan field identitas bukan
/// bagian kontrak ini; endpoint approval yang memegangnya.
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateUlokPayload {
    #[validate(length(min = 1, message = "Nama ULOK tidak boleh kosong."))]
    pub nama_ulok: Option<String>,
    #[validate(length(min = 1, message = "Alamat tidak boleh kosong."))]
    pub alamat: Option<String>,
    pub kelurahan: Option<String>,
    pub kecamatan: Option<String>,
    pub kabupaten: Option<String>,
    pub provinsi: Option<String>,
    #[validate(range(min = -11.0, max = 6.0, message = "Latitude di luar wilayah layanan."))]
    pub latitude: Option<f64>,
    #[validate(range(min = 95.0, max = 141.0, message = "Longitude di luar wilayah layanan."))]
    pub longitude: Option<f64>,
    #[validate(custom(function = "validate_not_negative"))]
    pub luas_tanah: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub luas_bangunan: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub harga_sewa: Option<Decimal>,
    pub nama_pemilik: Option<String>,
    pub kontak_pemilik: Option<String>,
    pub bentuk_objek: Option<String>,
    pub alas_hak: Option<String>,
}

// PATCH /api/ulok/{ulok_id}
#[utoipa::path(
    patch,
    path = "/api/ulok/{ulok_id}",
    tag = "Ulok",
    request_body = UpdateUlokPayload,
    params(("ulok_id" = Uuid, Path, description = "ID ULOK")),
    responses(
        (status = 200, description = "ULOK diperbarui"),
        (status = 401, description = "Tidak terautentikasi"),
        (status = 403, description = "Akses ditolak"),
        (status = 404, description = "ULOK tidak ditemukan"),
        (status = 422, description = "Payload tidak valid")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_ulok(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(ulok_id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateUlokPayload>,
) -> Result<impl IntoResponse, AppError> {
    if !can_ulok(UlokAction::Update, &user) {
        return Err(AppError::Forbidden);
    }
    if user.branch_id.is_none() {
        return Err(AppError::NoBranch);
    }

    payload.validate().map_err(AppError::ValidationError)?;
    let payload = serde_json::to_value(&payload).map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;

    let data = app_state.ulok_service.update(&user, ulok_id, payload).await?;
    Ok((StatusCode::OK, Json(json!({ "data": data }))))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UlokApprovalPayload {
    pub approval_status: String,
    pub alasan_nok: Option<String>,
}

// PATCH /api/ulok/{ulok_id}/approval
#[utoipa::path(
    patch,
    path = "/api/ulok/{ulok_id}/approval",
    tag = "Ulok",
    request_body = UlokApprovalPayload,
    params(("ulok_id" = Uuid, Path, description = "ID ULOK")),
    responses(
        (status = 200, description = "Keputusan tercatat"),
        (status = 401, description = "Tidak terautentikasi"),
        (status = 403, description = "Hanya role manajer yang boleh memutus"),
        (status = 404, description = "ULOK tidak ditemukan"),
        (status = 409, description = "Status sudah difinalisasi"),
        (status = 422, description = "Payload tidak valid")
    ),
    security(("api_jwt" = []))
)]
pub async fn approve_ulok(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(ulok_id): Path<Uuid>,
    AppJson(payload): AppJson<UlokApprovalPayload>,
) -> Result<impl IntoResponse, AppError> {
    // Keputusan usulan adalah wewenang manajerial
    if !matches!(
        user.role,
        Role::LocationManager | Role::BranchManager | Role::RegionalManager
    ) {
        return Err(AppError::Forbidden);
    }
    if user.branch_id.is_none() {
        return Err(AppError::NoBranch);
    }

    let decision = UlokDecision::parse(&payload.approval_status)
        .ok_or_else(|| AppError::invalid_field("approval_status", "Nilai harus \"OK\" atau \"NOK\"."))?;
    if decision == UlokDecision::Nok
        && payload.alasan_nok.as_deref().map(str::trim).unwrap_or("").is_empty()
    {
        return Err(AppError::invalid_field("alasan_nok", "Alasan wajib diisi untuk keputusan NOK."));
    }

    let data = app_state
        .ulok_service
        .approve(&user, ulok_id, decision, payload.alasan_nok.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(json!({ "data": data }))))
}
