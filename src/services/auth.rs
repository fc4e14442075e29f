// src/services/auth.rs

use bcrypt::verify;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::common::error::AppError;
use crate::db::UserRepository;
use crate::models::auth::{Claims, CurrentUser, UserAuthRow};
use crate::models::rbac::Role;

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String) -> Self {
        Self { user_repo, jwt_secret }
    }

    /// Login: verifikasi password lalu terbitkan token yang membawa
    /// konteks identitas lengkap (branch + posisi), sehingga resolusi
    /// user per-request tidak perlu menyentuh database.
    pub async fn login_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .user_repo
            .find_auth_context_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        // Akun dengan posisi yang tidak dikenal tidak boleh masuk; jangan
        // bocorkan bahwa akunnya ada tapi salah konfigurasi.
        if Role::parse(&user.position_nama).is_none() {
            tracing::warn!("login ditolak: posisi '{}' tidak dikenal", user.position_nama);
            return Err(AppError::InvalidCredentials);
        }

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Verifikasi bcrypt di thread blocking terpisah
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Task verifikasi password gagal: {e}"))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.create_token(&user)
    }

    /// Decode token menjadi CurrentUser. Semua bentuk kegagalan (token
    /// kadaluarsa, signature salah, posisi tidak dikenal) menjadi 401.
    pub fn validate_token(&self, token: &str) -> Result<CurrentUser, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        let claims = token_data.claims;
        let role = Role::parse(&claims.position_nama).ok_or(AppError::InvalidToken)?;

        Ok(CurrentUser {
            id: claims.sub,
            email: claims.email,
            nama: claims.nama,
            branch_id: claims.branch_id,
            branch_nama: claims.branch_nama,
            position_id: claims.position_id,
            role,
        })
    }

    fn create_token(&self, user: &UserAuthRow) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            nama: user.nama.clone(),
            branch_id: user.branch_id,
            branch_nama: user.branch_nama.clone(),
            position_id: user.position_id,
            position_nama: user.position_nama.clone(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
