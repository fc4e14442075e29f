// src/db/dashboard_repo.rs

use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::error::{AppError, classify_procedure_error};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Rekap jumlah ULOK/KPLT/progress per status untuk satu branch
    /// (None = seluruh branch, untuk role regional ke atas).
    pub async fn summary(&self, branch: Option<Uuid>) -> Result<Value, AppError> {
        sqlx::query_scalar::<_, Value>("SELECT fn_dashboard_summary($1)")
            .bind(branch)
            .fetch_one(&self.pool)
            .await
            .map_err(classify_procedure_error)
    }
}
