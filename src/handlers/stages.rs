// src/handlers/stages.rs
//
// Endpoint keenam tahap progress (mou, izin_tetangga, perizinan, notaris,
// renovasi, grand_opening) pada satu segmen path dinamis. Urutan
// pemeriksaan pada setiap mutasi tetap dan tidak boleh diubah:
// user -> kapabilitas -> branch -> path -> body -> scoping -> prosedur.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::{
        acl::{can_approve_stage, can_progress_kplt},
        error::AppError,
        extract::AppJson,
    },
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::progress::{ApprovalDecision, StageKind},
    models::rbac::ProgressAction,
};

fn parse_stage(segment: &str) -> Result<StageKind, AppError> {
    StageKind::from_path(segment).ok_or_else(|| AppError::NotFound("Tahap".into()))
}

/// Body approval wajib berisi tepat satu field `final_status_<stage>`
/// dengan nilai selesai/batal (case-insensitive). Field lain ditolak:
/// endpoint ini tidak menerima perubahan data apa pun selain keputusan.
fn parse_approval_body(stage: StageKind, body: &Value) -> Result<ApprovalDecision, AppError> {
    let field = stage.final_status_field();

    let Some(obj) = body.as_object() else {
        return Err(AppError::invalid_field(field, "Body harus berupa objek JSON."));
    };
    if let Some(asing) = obj.keys().find(|k| k.as_str() != field) {
        return Err(AppError::invalid_field(field, format!("Field tidak dikenal: {asing}.")));
    }
    let Some(raw) = obj.get(field) else {
        return Err(AppError::invalid_field(field, format!("Field {field} wajib diisi.")));
    };
    let Some(raw) = raw.as_str() else {
        return Err(AppError::invalid_field(field, "Nilai harus berupa string."));
    };
    ApprovalDecision::parse(raw).ok_or_else(|| {
        AppError::invalid_field(field, "Nilai harus \"selesai\" atau \"batal\".")
    })
}

// PATCH /api/progress/{progress_id}/{stage}/approval
#[utoipa::path(
    patch,
    path = "/api/progress/{progress_id}/{stage}/approval",
    tag = "Progress",
    params(
        ("progress_id" = Uuid, Path, description = "ID progress KPLT"),
        ("stage" = String, Path, description = "mou | izin_tetangga | perizinan | notaris | renovasi | grand_opening")
    ),
    responses(
        (status = 200, description = "Tahap difinalisasi; timestamp selesai di-set server"),
        (status = 401, description = "Tidak terautentikasi"),
        (status = 403, description = "Akses ditolak atau user tanpa branch"),
        (status = 404, description = "Progress/tahap tidak ditemukan"),
        (status = 409, description = "Status sudah difinalisasi"),
        (status = 422, description = "Body tidak valid atau prasyarat tahap belum terpenuhi")
    ),
    security(("api_jwt" = []))
)]
pub async fn approve_stage(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((progress_id, stage)): Path<(Uuid, String)>,
    AppJson(body): AppJson<Value>,
) -> Result<impl IntoResponse, AppError> {
    if !can_approve_stage(&user) {
        return Err(AppError::Forbidden);
    }
    if user.branch_id.is_none() {
        return Err(AppError::NoBranch);
    }

    let stage = parse_stage(&stage)?;
    let decision = parse_approval_body(stage, &body)?;

    let data = app_state
        .progress_service
        .stage_approve(&user, stage, progress_id, decision)
        .await?;

    Ok((StatusCode::OK, Json(json!({ "data": data }))))
}

// PATCH /api/progress/{progress_id}/{stage}
#[utoipa::path(
    patch,
    path = "/api/progress/{progress_id}/{stage}",
    tag = "Progress",
    params(
        ("progress_id" = Uuid, Path, description = "ID progress KPLT"),
        ("stage" = String, Path, description = "Segmen tahap")
    ),
    responses(
        (status = 200, description = "Field bisnis tahap diperbarui"),
        (status = 401, description = "Tidak terautentikasi"),
        (status = 403, description = "Akses ditolak"),
        (status = 404, description = "Progress/tahap tidak ditemukan"),
        (status = 422, description = "Body tidak valid")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_stage(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((progress_id, stage)): Path<(Uuid, String)>,
    AppJson(body): AppJson<Value>,
) -> Result<impl IntoResponse, AppError> {
    if !can_progress_kplt(ProgressAction::Update, &user) {
        return Err(AppError::Forbidden);
    }
    if user.branch_id.is_none() {
        return Err(AppError::NoBranch);
    }

    let stage = parse_stage(&stage)?;
    let payload = validate_stage_update(stage, body)?;

    let data = app_state
        .progress_service
        .stage_update(&user, stage, progress_id, payload)
        .await?;

    Ok((StatusCode::OK, Json(json!({ "data": data }))))
}

// GET /api/progress/{progress_id}/{stage}/history
#[utoipa::path(
    get,
    path = "/api/progress/{progress_id}/{stage}/history",
    tag = "Progress",
    params(
        ("progress_id" = Uuid, Path, description = "ID progress KPLT"),
        ("stage" = String, Path, description = "Segmen tahap")
    ),
    responses(
        (status = 200, description = "Riwayat transisi status tahap"),
        (status = 401, description = "Tidak terautentikasi"),
        (status = 403, description = "Akses ditolak"),
        (status = 404, description = "Progress/tahap tidak ditemukan")
    ),
    security(("api_jwt" = []))
)]
pub async fn stage_history(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((progress_id, stage)): Path<(Uuid, String)>,
) -> Result<impl IntoResponse, AppError> {
    if !can_progress_kplt(ProgressAction::Read, &user) {
        return Err(AppError::Forbidden);
    }

    let stage = parse_stage(&stage)?;
    let data = app_state
        .progress_service
        .stage_history(&user, stage, progress_id)
        .await?;

    Ok((StatusCode::OK, Json(json!({ "data": data }))))
}

// ---
// Payload update per tahap. Strict: field yang dikontrol server
// (final_status_*, tgl_selesai_*, id, timestamp) tidak punya tempat di
// struct ini dan key asing ditolak deny_unknown_fields.
// ---

fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("Nilai tidak boleh negatif.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct MouUpdatePayload {
    pub pihak_pemilik: Option<String>,
    #[validate(custom(function = "validate_not_negative"))]
    pub harga_sewa: Option<Decimal>,
    #[validate(range(min = 1, max = 30, message = "Jangka waktu harus 1-30 tahun."))]
    pub jangka_waktu_tahun: Option<i32>,
    pub tgl_mou: Option<NaiveDate>,
    pub catatan: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct IzinTetanggaUpdatePayload {
    #[validate(range(min = 0, message = "Jumlah tetangga tidak boleh negatif."))]
    pub jumlah_tetangga: Option<i32>,
    #[validate(custom(function = "validate_not_negative"))]
    pub biaya_izin: Option<Decimal>,
    pub tgl_izin: Option<NaiveDate>,
    pub catatan: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct PerizinanUpdatePayload {
    pub jenis_izin: Option<String>,
    pub nomor_izin: Option<String>,
    #[validate(custom(function = "validate_not_negative"))]
    pub biaya_perizinan: Option<Decimal>,
    pub tgl_pengajuan: Option<NaiveDate>,
    pub catatan: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NotarisUpdatePayload {
    pub nama_notaris: Option<String>,
    pub nomor_akta: Option<String>,
    #[validate(custom(function = "validate_not_negative"))]
    pub biaya_notaris: Option<Decimal>,
    pub tgl_akta: Option<NaiveDate>,
    pub catatan: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct RenovasiUpdatePayload {
    pub kontraktor: Option<String>,
    #[validate(custom(function = "validate_not_negative"))]
    pub biaya_renovasi: Option<Decimal>,
    pub tgl_mulai: Option<NaiveDate>,
    pub tgl_target_selesai: Option<NaiveDate>,
    pub catatan: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct GrandOpeningUpdatePayload {
    pub tgl_rencana: Option<NaiveDate>,
    #[validate(custom(function = "validate_not_negative"))]
    pub biaya_promosi: Option<Decimal>,
    pub catatan: Option<String>,
}

fn validate_stage_update(stage: StageKind, body: Value) -> Result<Value, AppError> {
    fn check<T>(body: Value) -> Result<Value, AppError>
    where
        T: DeserializeOwned + Serialize + Validate,
    {
        let payload: T =
            serde_json::from_value(body).map_err(|e| AppError::BodyRejection(e.to_string()))?;
        payload.validate().map_err(AppError::ValidationError)?;
        serde_json::to_value(&payload).map_err(|e| AppError::Internal(anyhow::anyhow!(e)))
    }

    match stage {
        StageKind::Mou => check::<MouUpdatePayload>(body),
        StageKind::IzinTetangga => check::<IzinTetanggaUpdatePayload>(body),
        StageKind::Perizinan => check::<PerizinanUpdatePayload>(body),
        StageKind::Notaris => check::<NotarisUpdatePayload>(body),
        StageKind::Renovasi => check::<RenovasiUpdatePayload>(body),
        StageKind::GrandOpening => check::<GrandOpeningUpdatePayload>(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn approval_menerima_selesai_batal_case_insensitive() {
        let body = json!({ "final_status_notaris": "SELESAI" });
        assert_eq!(
            parse_approval_body(StageKind::Notaris, &body).unwrap(),
            ApprovalDecision::Selesai
        );
        let body = json!({ "final_status_mou": "batal" });
        assert_eq!(
            parse_approval_body(StageKind::Mou, &body).unwrap(),
            ApprovalDecision::Batal
        );
    }

    #[test]
    fn approval_menolak_nilai_lain_dengan_path_field() {
        let body = json!({ "final_status_notaris": "disetujui" });
        let err = parse_approval_body(StageKind::Notaris, &body).unwrap_err();
        let api = err.to_api_error();
        assert_eq!(api.status, StatusCode::UNPROCESSABLE_ENTITY);
        let detail = api.detail.unwrap();
        assert_eq!(detail[0]["path"][0], "final_status_notaris");
    }

    #[test]
    fn approval_menolak_field_asing() {
        let body = json!({
            "final_status_renovasi": "selesai",
            "tgl_selesai_renovasi": "2025-01-01"
        });
        assert!(parse_approval_body(StageKind::Renovasi, &body).is_err());
    }

    #[test]
    fn approval_menolak_field_tahap_lain() {
        // field milik tahap lain juga asing untuk endpoint tahap ini
        let body = json!({ "final_status_mou": "selesai" });
        assert!(parse_approval_body(StageKind::Notaris, &body).is_err());
    }

    #[test]
    fn approval_menolak_body_kosong_atau_non_objek() {
        assert!(parse_approval_body(StageKind::Mou, &json!({})).is_err());
        assert!(parse_approval_body(StageKind::Mou, &json!("selesai")).is_err());
        assert!(parse_approval_body(StageKind::Mou, &json!({ "final_status_mou": 1 })).is_err());
    }

    #[test]
    fn update_menolak_field_yang_dikontrol_server() {
        let body = json!({
            "nama_notaris": "Budi, S.H.",
            "final_status_notaris": "Selesai"
        });
        assert!(validate_stage_update(StageKind::Notaris, body).is_err());

        let body = json!({ "tgl_selesai_mou": "2025-01-01" });
        assert!(validate_stage_update(StageKind::Mou, body).is_err());

        let body = json!({ "updated_at": "2025-01-01T00:00:00Z" });
        assert!(validate_stage_update(StageKind::Renovasi, body).is_err());
    }

    #[test]
    fn update_valid_diteruskan_apa_adanya() {
        let body = json!({
            "kontraktor": "CV Karya Mandiri",
            "biaya_renovasi": 250000000.0
        });
        let out = validate_stage_update(StageKind::Renovasi, body).unwrap();
        assert_eq!(out["kontraktor"], "CV Karya Mandiri");
    }

    #[test]
    fn update_menolak_nilai_negatif() {
        let body = json!({ "biaya_izin": -1.0 });
        assert!(validate_stage_update(StageKind::IzinTetangga, body).is_err());
    }

    #[test]
    fn segmen_tahap_tak_dikenal_menjadi_404() {
        let err = parse_stage("pembukaan").unwrap_err();
        assert_eq!(err.to_api_error().status, StatusCode::NOT_FOUND);
    }
}
