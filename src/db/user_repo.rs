// src/db/user_repo.rs

use sqlx::PgPool;

use crate::common::error::AppError;
use crate::models::auth::UserAuthRow;

/// Repositori user untuk kebutuhan login: baris user beserta nama branch
/// dan posisinya. Provisioning user dilakukan sistem HR di luar service ini.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_auth_context_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserAuthRow>, AppError> {
        let row = sqlx::query_as::<_, UserAuthRow>(
            r#"
            SELECT u.id, u.email, u.password_hash, u.nama,
                   u.branch_id, b.nama AS branch_nama,
                   u.position_id, p.nama AS position_nama
            FROM users u
            LEFT JOIN branches b ON b.id = u.branch_id
            JOIN positions p ON p.id = u.position_id
            WHERE u.email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}
