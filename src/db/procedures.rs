// src/db/procedures.rs

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::error::{AppError, classify_procedure_error};
use crate::models::progress::{StageApproveArgs, StageKind};

/// Gateway ke fungsi-fungsi database yang memegang logika bisnis progress
/// (`fn_progress_*`, `fn_<stage>_*`). Invarian transisi (sudah final,
/// prasyarat tahap) ditegakkan di sisi fungsi; layer ini hanya
/// menerjemahkan kode errornya. Trait supaya test bisa menyuntik stub.
#[async_trait]
pub trait ProgressProcedures: Send + Sync {
    /// Listing progress per branch (None = semua branch), paged.
    async fn progress_list(
        &self,
        branch: Option<Uuid>,
        page: i64,
        per_page: i64,
    ) -> Result<Value, AppError>;

    /// Branch pemilik sebuah progress, lewat join ke KPLT induk.
    /// None jika progress tidak ditemukan.
    async fn progress_branch(&self, progress_id: Uuid) -> Result<Option<Uuid>, AppError>;

    async fn progress_detail(&self, progress_id: Uuid) -> Result<Option<Value>, AppError>;

    async fn progress_timeline(&self, progress_id: Uuid) -> Result<Value, AppError>;

    /// Update field bisnis tahap yang masih berjalan (`fn_<stage>_update`).
    async fn stage_update(
        &self,
        stage: StageKind,
        progress_id: Uuid,
        user_id: Uuid,
        payload: Value,
    ) -> Result<Value, AppError>;

    /// Transisi approval tahap (`fn_<stage>_approve`). Timestamp
    /// `tgl_selesai_<stage>` di-set oleh fungsi, tidak pernah oleh client.
    async fn stage_approve(
        &self,
        stage: StageKind,
        args: StageApproveArgs,
    ) -> Result<Value, AppError>;

    async fn stage_history(&self, stage: StageKind, progress_id: Uuid)
    -> Result<Value, AppError>;
}

/// Implementasi produksi di atas PgPool. Nama fungsi dirakit dari
/// `StageKind` (enum tertutup), tidak pernah dari input request.
#[derive(Clone)]
pub struct PgProcedures {
    pool: PgPool,
}

impl PgProcedures {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProgressProcedures for PgProcedures {
    async fn progress_list(
        &self,
        branch: Option<Uuid>,
        page: i64,
        per_page: i64,
    ) -> Result<Value, AppError> {
        sqlx::query_scalar::<_, Value>("SELECT fn_progress_list($1, $2, $3)")
            .bind(branch)
            .bind(page)
            .bind(per_page)
            .fetch_one(&self.pool)
            .await
            .map_err(classify_procedure_error)
    }

    async fn progress_branch(&self, progress_id: Uuid) -> Result<Option<Uuid>, AppError> {
        let branch = sqlx::query_scalar::<_, Uuid>(
            "SELECT k.branch_id FROM progress_kplt p JOIN kplt k ON k.id = p.kplt_id WHERE p.id = $1",
        )
        .bind(progress_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(branch)
    }

    async fn progress_detail(&self, progress_id: Uuid) -> Result<Option<Value>, AppError> {
        sqlx::query_scalar::<_, Option<Value>>("SELECT fn_progress_detail($1)")
            .bind(progress_id)
            .fetch_one(&self.pool)
            .await
            .map_err(classify_procedure_error)
    }

    async fn progress_timeline(&self, progress_id: Uuid) -> Result<Value, AppError> {
        sqlx::query_scalar::<_, Value>("SELECT fn_progress_timeline($1)")
            .bind(progress_id)
            .fetch_one(&self.pool)
            .await
            .map_err(classify_procedure_error)
    }

    async fn stage_update(
        &self,
        stage: StageKind,
        progress_id: Uuid,
        user_id: Uuid,
        payload: Value,
    ) -> Result<Value, AppError> {
        let sql = format!("SELECT fn_{}_update($1, $2, $3)", stage.as_str());
        sqlx::query_scalar::<_, Value>(&sql)
            .bind(progress_id)
            .bind(user_id)
            .bind(payload)
            .fetch_one(&self.pool)
            .await
            .map_err(classify_procedure_error)
    }

    async fn stage_approve(
        &self,
        stage: StageKind,
        args: StageApproveArgs,
    ) -> Result<Value, AppError> {
        let sql = format!("SELECT fn_{}_approve($1, $2, $3, $4)", stage.as_str());
        sqlx::query_scalar::<_, Value>(&sql)
            .bind(args.user_id)
            .bind(args.branch_id)
            .bind(args.progress_kplt_id)
            .bind(args.final_status.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match classify_procedure_error(e) {
                // fungsi lama mengirim PREREQUISITE tanpa detail; nama tahap
                // yang kurang masih bisa diturunkan dari urutan tahapan
                AppError::PreconditionFailed(detail) if detail == "tahap sebelumnya" => {
                    let nama = stage
                        .prerequisite()
                        .map(|s| s.display_name())
                        .unwrap_or("tahap sebelumnya");
                    AppError::PreconditionFailed(nama.to_string())
                }
                other => other,
            })
    }

    async fn stage_history(
        &self,
        stage: StageKind,
        progress_id: Uuid,
    ) -> Result<Value, AppError> {
        let sql = format!("SELECT fn_{}_history($1)", stage.as_str());
        sqlx::query_scalar::<_, Value>(&sql)
            .bind(progress_id)
            .fetch_one(&self.pool)
            .await
            .map_err(classify_procedure_error)
    }
}
