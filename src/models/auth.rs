// src/models/auth.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::rbac::Role;

/// Konteks user yang sudah terautentikasi, hasil decode claims JWT.
/// Immutable selama satu request.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub nama: String,
    pub branch_id: Option<Uuid>,
    pub branch_nama: Option<String>,
    pub position_id: Uuid,
    #[serde(rename = "position_nama")]
    pub role: Role,
}

/// Baris user + join branch/position untuk login.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserAuthRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub nama: String,
    pub branch_id: Option<Uuid>,
    pub branch_nama: Option<String>,
    pub position_id: Uuid,
    pub position_nama: String,
}

/// Claims di dalam JWT. Konteks identitas (branch, posisi) ikut dibawa
/// di token supaya resolusi per-request tidak menyentuh database.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub nama: String,
    pub branch_id: Option<Uuid>,
    pub branch_nama: Option<String>,
    pub position_id: Uuid,
    pub position_nama: String,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(email(message = "Email tidak valid."))]
    pub email: String,
    #[validate(length(min = 6, message = "Password minimal 6 karakter."))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}
