// src/db/kplt_repo.rs

use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::cursor::Cursor;
use crate::common::error::{AppError, classify_procedure_error};

#[derive(Debug, Clone, Default)]
pub struct KpltListFilter {
    pub branch: Option<Uuid>,
    pub search: Option<String>,
    pub month: Option<i32>,
    pub year: Option<i32>,
    pub after: Option<Cursor>,
    pub limit: i64,
}

#[derive(Clone)]
pub struct KpltRepository {
    pool: PgPool,
}

impl KpltRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, filter: &KpltListFilter) -> Result<Value, AppError> {
        sqlx::query_scalar::<_, Value>("SELECT fn_kplt_list($1, $2, $3, $4, $5, $6, $7)")
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

    pub async fn branch_of(&self, kplt_id: Uuid) -> Result<Option<Uuid>, AppError> {
        let branch = sqlx::query_scalar::<_, Uuid>("SELECT branch_id FROM kplt WHERE id = $1")
            .bind(kplt_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(branch)
    }

    pub async fn detail(&self, kplt_id: Uuid) -> Result<Option<Value>, AppError> {
        sqlx::query_scalar::<_, Option<Value>>("SELECT fn_kplt_detail($1)")
            .bind(kplt_id)
            .fetch_one(&self.pool)
            .await
            .map_err(classify_procedure_error)
    }

    /// Membuat KPLT dari ULOK yang sudah OK. Fungsi database menolak
    /// induk yang belum OK (PREREQUISITE) dan ULOK yang sudah punya
    /// KPLT (unique violation).
    pub async fn create(
        &self,
        user_id: Uuid,
        branch_id: Uuid,
        ulok_id: Uuid,
        payload: Value,
    ) -> Result<Value, AppError> {
        sqlx::query_scalar::<_, Value>("SELECT fn_kplt_create($1, $2, $3, $4)")
            .bind(user_id)
            .bind(branch_id)
            .bind(ulok_id)
            .bind(payload)
            .fetch_one(&self.pool)
            .await
            .map_err(classify_procedure_error)
    }
}
