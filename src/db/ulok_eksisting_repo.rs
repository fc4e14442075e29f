// src/db/ulok_eksisting_repo.rs

use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::cursor::Cursor;
use crate::common::error::{AppError, classify_procedure_error};

#[derive(Clone)]
pub struct UlokEksistingRepository {
    pool: PgPool,
}

impl UlokEksistingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Listing toko eksisting, baca-saja untuk semua role.
    pub async fn list(
        &self,
        branch: Option<Uuid>,
        search: Option<&str>,
        after: Option<&Cursor>,
        limit: i64,
    ) -> Result<Value, AppError> {
        sqlx::query_scalar::<_, Value>("SELECT fn_ulok_eksisting_list($1, $2, $3, $4, $5)")
            .bind(branch)
            .bind(search)
            .bind(after.map(|c| c.sort_value.clone()))
            .bind(after.map(|c| c.id))
            .bind(limit)
            .fetch_one(&self.pool)
            .await
            .map_err(classify_procedure_error)
    }
}
