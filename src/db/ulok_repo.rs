// src/db/ulok_repo.rs

use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::cursor::Cursor;
use crate::common::error::{AppError, classify_procedure_error};

/// Filter listing ULOK, sudah tervalidasi di handler sebelum sampai sini.
#[derive(Debug, Clone, Default)]
pub struct UlokListFilter {
    pub branch: Option<Uuid>,
    pub search: Option<String>,
    pub month: Option<i32>,
    pub year: Option<i32>,
    pub after: Option<Cursor>,
    pub limit: i64,
}

#[derive(Clone)]
pub struct UlokRepository {
    pool: PgPool,
}

impl UlokRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, filter: &UlokListFilter) -> Result<Value, AppError> {
        sqlx::query_scalar::<_, Value>("SELECT fn_ulok_list($1, $2, $3, $4, $5, $6, $7)")
            .bind(filter.branch)
            .bind(filter.search.as_deref())
            .bind(filter.month)
            .bind(filter.year)
            .bind(filter.after.as_ref().map(|c| c.sort_value.clone()))
            .bind(filter.after.as_ref().map(|c| c.id))
            .bind(filter.limit)
            .fetch_one(&self.pool)
            .await
            .map_err(classify_procedure_error)
    }

    /// Branch pemilik ULOK; None jika tidak ditemukan.
    pub async fn branch_of(&self, ulok_id: Uuid) -> Result<Option<Uuid>, AppError> {
        let branch = sqlx::query_scalar::<_, Uuid>("SELECT branch_id FROM ulok WHERE id = $1")
            .bind(ulok_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(branch)
    }

    pub async fn detail(&self, ulok_id: Uuid) -> Result<Option<Value>, AppError> {
        sqlx::query_scalar::<_, Option<Value>>("SELECT fn_ulok_detail($1)")
            .bind(ulok_id)
            .fetch_one(&self.pool)
            .await
            .map_err(classify_procedure_error)
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        branch_id: Uuid,
        payload: Value,
    ) -> Result<Value, AppError> {
        sqlx::query_scalar::<_, Value>("SELECT fn_ulok_create($1, $2, $3)")
            .bind(user_id)
            .bind(branch_id)
            .bind(payload)
            .fetch_one(&self.pool)
            .await
            .map_err(classify_procedure_error)
    }

    pub async fn update(
        &self,
        ulok_id: Uuid,
        user_id: Uuid,
        payload: Value,
    ) -> Result<Value, AppError> {
        sqlx::query_scalar::<_, Value>("SELECT fn_ulok_update($1, $2, $3)")
            .bind(ulok_id)
            .bind(user_id)
            .bind(payload)
            .fetch_one(&self.pool)
            .await
            .map_err(classify_procedure_error)
    }

    pub async fn approve(
        &self,
        ulok_id: Uuid,
        user_id: Uuid,
        branch_id: Uuid,
        status: &str,
        alasan_nok: Option<&str>,
    ) -> Result<Value, AppError> {
        sqlx::query_scalar::<_, Value>("SELECT fn_ulok_approve($1, $2, $3, $4, $5)")
            .bind(ulok_id)
            .bind(user_id)
            .bind(branch_id)
            .bind(status)
            .bind(alasan_nok)
            .fetch_one(&self.pool)
            .await
            .map_err(classify_procedure_error)
    }
}
