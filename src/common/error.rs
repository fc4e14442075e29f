// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error;

/// Error domain internal. Dipetakan ke `ApiError` (bentuk respons HTTP)
/// lewat `to_api_error`; handler tidak pernah membiarkan exception lolos
/// ke transport tanpa menjadi body JSON.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validasi gagal")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Body request tidak valid: {0}")]
    BodyRejection(String),

    #[error("Tidak terautentikasi")]
    Unauthenticated,

    #[error("Token autentikasi tidak valid atau tidak ada")]
    InvalidToken,

    #[error("Email atau password salah")]
    InvalidCredentials,

    #[error("Akses ditolak")]
    Forbidden,

    #[error("User tidak memiliki branch")]
    NoBranch,

    #[error("{0} tidak ditemukan")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// Prasyarat tahap belum terpenuhi; parameter = nama tahap yang kurang.
    #[error("Syarat {0} belum terpenuhi")]
    PreconditionFailed(String),

    #[error("Status tidak valid")]
    InvalidStatus,

    #[error("Kesalahan database")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Kesalahan internal")]
    Internal(#[from] anyhow::Error),

    #[error("Kesalahan JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Kesalahan bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),
}

impl AppError {
    /// Error validasi satu field dengan path statis, untuk pemeriksaan
    /// manual di luar derive `Validate` (pola yang sama dengan
    /// ValidationErrors bentukan validator).
    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        let mut err = validator::ValidationError::new("invalid");
        err.message = Some(message.into().into());
        let mut errors = validator::ValidationErrors::new();
        errors.add(field, err);
        AppError::ValidationError(errors)
    }

    pub fn to_api_error(self) -> ApiError {
        match self {
            AppError::ValidationError(errors) => {
                let mut detail = Vec::new();
                for (field, field_errors) in errors.field_errors() {
                    for e in field_errors.iter() {
                        let message = e
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string());
                        detail.push(json!({ "path": [field], "message": message }));
                    }
                }
                ApiError {
                    status: StatusCode::UNPROCESSABLE_ENTITY,
                    error: "Validation Error".into(),
                    message: Some("Satu atau lebih field tidak valid.".into()),
                    detail: Some(Value::Array(detail)),
                }
            }
            AppError::BodyRejection(reason) => ApiError {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: "Validation Error".into(),
                message: Some(reason),
                detail: None,
            },
            AppError::Unauthenticated | AppError::InvalidToken => ApiError {
                status: StatusCode::UNAUTHORIZED,
                error: "Unauthorized".into(),
                message: None,
                detail: None,
            },
            AppError::InvalidCredentials => ApiError {
                status: StatusCode::UNAUTHORIZED,
                error: "Unauthorized".into(),
                message: Some("Email atau password salah.".into()),
                detail: None,
            },
            AppError::Forbidden => ApiError {
                status: StatusCode::FORBIDDEN,
                error: "Forbidden".into(),
                message: Some("Akses ditolak.".into()),
                detail: None,
            },
            AppError::NoBranch => ApiError {
                status: StatusCode::FORBIDDEN,
                error: "Forbidden".into(),
                message: Some("User tidak memiliki branch.".into()),
                detail: None,
            },
            AppError::NotFound(what) => ApiError {
                status: StatusCode::NOT_FOUND,
                error: "Not Found".into(),
                message: Some(format!("{what} tidak ditemukan.")),
                detail: None,
            },
            AppError::Conflict(msg) => ApiError {
                status: StatusCode::CONFLICT,
                error: "Conflict".into(),
                message: Some(msg),
                detail: None,
            },
            AppError::PreconditionFailed(stage) => ApiError {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: "Precondition Failed".into(),
                message: Some(format!("Syarat {stage} belum terpenuhi")),
                detail: None,
            },
            AppError::InvalidStatus => ApiError {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: "Validation Error".into(),
                message: Some("Status tidak valid.".into()),
                detail: None,
            },
            AppError::DatabaseError(e) => {
                tracing::error!("Kesalahan database: {e}");
                ApiError {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: "Internal Server Error".into(),
                    message: None,
                    detail: Some(json!(e.to_string())),
                }
            }
            ref e => {
                tracing::error!("Kesalahan internal: {e}");
                ApiError {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: "Internal Server Error".into(),
                    message: None,
                    detail: None,
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error().into_response()
    }
}

/// Bentuk seragam respons error: `{error, message?, detail?}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub message: Option<String>,
    pub detail: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = serde_json::Map::new();
        body.insert("error".into(), json!(self.error));
        if let Some(message) = self.message {
            body.insert("message".into(), json!(message));
        }
        if let Some(detail) = self.detail {
            body.insert("detail".into(), detail);
        }
        (self.status, Json(Value::Object(body))).into_response()
    }
}

// ---
// Klasifikasi error fungsi database
// ---

/// Fungsi database memberi sinyal lewat ERRCODE P0001 dengan kepala pesan
/// terstruktur `KODE[:DETAIL]`. Layer ini switch pada kode, bukan substring
/// teks bebas.
pub fn classify_procedure_error(err: sqlx::Error) -> AppError {
    let classified = err
        .as_database_error()
        .and_then(|db| classify_db_code(db.code().as_deref(), db.message()));
    match classified {
        Some(app) => app,
        None => AppError::DatabaseError(err),
    }
}

fn classify_db_code(code: Option<&str>, message: &str) -> Option<AppError> {
    match code {
        // unique_violation
        Some("23505") => Some(AppError::Conflict("Data sudah ada (duplikat).".into())),
        // invalid_text_representation: input enum tidak valid
        Some("22P02") => Some(AppError::InvalidStatus),
        // raise_exception: kode terstruktur dari fungsi database
        Some("P0001") => {
            let head = message.trim();
            let (kode, detail) = match head.split_once(':') {
                Some((k, d)) => (k.trim(), Some(d.trim())),
                None => (head, None),
            };
            match kode {
                "ALREADY_FINALIZED" => {
                    Some(AppError::Conflict("Status sudah difinalisasi.".into()))
                }
                "PREREQUISITE" => Some(AppError::PreconditionFailed(
                    detail.unwrap_or("tahap sebelumnya").to_string(),
                )),
                "INVALID_STATUS" => Some(AppError::InvalidStatus),
                "NOT_FOUND" => Some(AppError::NotFound(detail.unwrap_or("Data").to_string())),
                _ => None,
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn klasifikasi_already_finalized() {
        let err = classify_db_code(Some("P0001"), "ALREADY_FINALIZED").unwrap();
        let api = err.to_api_error();
        assert_eq!(api.status, StatusCode::CONFLICT);
        assert_eq!(api.error, "Conflict");
    }

    #[test]
    fn klasifikasi_prasyarat_menyebut_tahap() {
        let err = classify_db_code(Some("P0001"), "PREREQUISITE:Notaris").unwrap();
        let api = err.to_api_error();
        assert_eq!(api.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(api.error, "Precondition Failed");
        assert_eq!(api.message.as_deref(), Some("Syarat Notaris belum terpenuhi"));
    }

    #[test]
    fn klasifikasi_unique_violation() {
        let err = classify_db_code(Some("23505"), "duplicate key value").unwrap();
        assert_eq!(err.to_api_error().status, StatusCode::CONFLICT);
    }

    #[test]
    fn klasifikasi_enum_tidak_valid() {
        let err = classify_db_code(Some("22P02"), "invalid input value for enum").unwrap();
        assert_eq!(err.to_api_error().status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn klasifikasi_not_found() {
        let err = classify_db_code(Some("P0001"), "NOT_FOUND:Progress").unwrap();
        let api = err.to_api_error();
        assert_eq!(api.status, StatusCode::NOT_FOUND);
        assert_eq!(api.message.as_deref(), Some("Progress tidak ditemukan."));
    }

    #[test]
    fn kode_tak_dikenal_tidak_diklasifikasi() {
        assert!(classify_db_code(Some("P0001"), "SOMETHING_ELSE").is_none());
        assert!(classify_db_code(Some("40001"), "serialization failure").is_none());
        assert!(classify_db_code(None, "connection reset").is_none());
    }

    #[test]
    fn invalid_field_membawa_path() {
        let api = AppError::invalid_field("final_status_notaris", "Nilai harus selesai atau batal.")
            .to_api_error();
        assert_eq!(api.status, StatusCode::UNPROCESSABLE_ENTITY);
        let detail = api.detail.unwrap();
        let first = &detail.as_array().unwrap()[0];
        assert_eq!(first["path"][0], "final_status_notaris");
    }
}
