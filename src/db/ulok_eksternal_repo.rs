// src/db/ulok_eksternal_repo.rs

use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::cursor::Cursor;
use crate::common::error::{AppError, classify_procedure_error};
use crate::models::ulok_eksternal::UlokEksternalOwner;

/// Arah pagination listing eksternal: satu-satunya listing yang juga
/// mendukung mundur (`before`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    After,
    Before,
}

#[derive(Debug, Clone)]
pub struct UlokEksternalListFilter {
    pub branch: Option<Uuid>,
    pub search: Option<String>,
    pub cursor: Option<Cursor>,
    pub direction: PageDirection,
    pub limit: i64,
}

#[derive(Clone)]
pub struct UlokEksternalRepository {
    pool: PgPool,
}

impl UlokEksternalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, filter: &UlokEksternalListFilter) -> Result<Value, AppError> {
        let direction = match filter.direction {
            PageDirection::After => "after",
            PageDirection::Before => "before",
        };
        sqlx::query_scalar::<_, Value>("SELECT fn_ulok_eksternal_list($1, $2, $3, $4, $5, $6)")
            .bind(filter.branch)
            .bind(filter.search.as_deref())
            .bind(filter.cursor.as_ref().map(|c| c.sort_value.clone()))
            .bind(filter.cursor.as_ref().map(|c| c.id))
            .bind(direction)
            .bind(filter.limit)
            .fetch_one(&self.pool)
            .await
            .map_err(classify_procedure_error)
    }

    /// Pemilik scoping record; branch bisa NULL selama belum ditugaskan.
    pub async fn owner_of(&self, id: Uuid) -> Result<Option<UlokEksternalOwner>, AppError> {
        let owner = sqlx::query_as::<_, UlokEksternalOwner>(
            "SELECT id, branch_id FROM ulok_eksternal WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(owner)
    }

    pub async fn detail(&self, id: Uuid) -> Result<Option<Value>, AppError> {
        sqlx::query_scalar::<_, Option<Value>>("SELECT fn_ulok_eksternal_detail($1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(classify_procedure_error)
    }

    pub async fn assign_branch(
        &self,
        id: Uuid,
        user_id: Uuid,
        branch_id: Uuid,
    ) -> Result<Value, AppError> {
        sqlx::query_scalar::<_, Value>("SELECT fn_ulok_eksternal_assign_branch($1, $2, $3)")
            .bind(id)
            .bind(user_id)
            .bind(branch_id)
            .fetch_one(&self.pool)
            .await
            .map_err(classify_procedure_error)
    }

    pub async fn assign_penanggungjawab(
        &self,
        id: Uuid,
        user_id: Uuid,
        penanggungjawab: Uuid,
    ) -> Result<Value, AppError> {
        sqlx::query_scalar::<_, Value>("SELECT fn_ulok_eksternal_assign_pj($1, $2, $3)")
            .bind(id)
            .bind(user_id)
            .bind(penanggungjawab)
            .fetch_one(&self.pool)
            .await
            .map_err(classify_procedure_error)
    }

    /// Approval intake oleh Location Specialist. Mencapai OK memicu
    /// pembuatan ULOK internal di dalam fungsi database.
    pub async fn approve(&self, id: Uuid, user_id: Uuid, status: &str) -> Result<Value, AppError> {
        sqlx::query_scalar::<_, Value>("SELECT fn_ulok_eksternal_approve($1, $2, $3)")
            .bind(id)
            .bind(user_id)
            .bind(status)
            .fetch_one(&self.pool)
            .await
            .map_err(classify_procedure_error)
    }
}
