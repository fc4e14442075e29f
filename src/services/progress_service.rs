// src/services/progress_service.rs

use std::sync::Arc;

use serde_json::{Value, json};
use uuid::Uuid;

use crate::common::error::AppError;
use crate::common::scope::check_branch_scope;
use crate::db::ProgressProcedures;
use crate::models::auth::CurrentUser;
use crate::models::progress::{ApprovalDecision, StageApproveArgs, StageKind};

/// Orkestrasi workflow progress: pemeriksaan scoping branch lalu delegasi
/// ke fungsi database lewat gateway. Service ini stateless; semua state
/// workflow hidup di database.
#[derive(Clone)]
pub struct ProgressService {
    procedures: Arc<dyn ProgressProcedures>,
}

impl ProgressService {
    pub fn new(procedures: Arc<dyn ProgressProcedures>) -> Self {
        Self { procedures }
    }

    /// Fetch branch pemilik progress lalu terapkan scoping. Mengembalikan
    /// branch pemilik untuk diteruskan ke fungsi database.
    async fn validate_access(
        &self,
        user: &CurrentUser,
        progress_id: Uuid,
    ) -> Result<Uuid, AppError> {
        let owner = self.procedures.progress_branch(progress_id).await?;
        check_branch_scope(user, owner)
    }

    pub async fn list(
        &self,
        user: &CurrentUser,
        page: i64,
        per_page: i64,
    ) -> Result<Value, AppError> {
        let branch = if user.role.is_regional_or_above() {
            None
        } else {
            Some(user.branch_id.ok_or(AppError::NoBranch)?)
        };
        self.procedures.progress_list(branch, page, per_page).await
    }

    pub async fn detail(&self, user: &CurrentUser, progress_id: Uuid) -> Result<Value, AppError> {
        self.validate_access(user, progress_id).await?;
        let progress = self
            .procedures
            .progress_detail(progress_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Progress".into()))?;
        let timeline = self.procedures.progress_timeline(progress_id).await?;
        Ok(json!({ "progress": progress, "timeline": timeline }))
    }

    pub async fn stage_update(
        &self,
        user: &CurrentUser,
        stage: StageKind,
        progress_id: Uuid,
        payload: Value,
    ) -> Result<Value, AppError> {
        self.validate_access(user, progress_id).await?;
        self.procedures
            .stage_update(stage, progress_id, user.id, payload)
            .await
    }

    pub async fn stage_approve(
        &self,
        user: &CurrentUser,
        stage: StageKind,
        progress_id: Uuid,
        decision: ApprovalDecision,
    ) -> Result<Value, AppError> {
        let branch_id = self.validate_access(user, progress_id).await?;
        let args = StageApproveArgs {
            user_id: user.id,
            branch_id,
            progress_kplt_id: progress_id,
            final_status: decision,
        };
        self.procedures.stage_approve(stage, args).await
    }

    pub async fn stage_history(
        &self,
        user: &CurrentUser,
        stage: StageKind,
        progress_id: Uuid,
    ) -> Result<Value, AppError> {
        self.validate_access(user, progress_id).await?;
        let items = self.procedures.stage_history(stage, progress_id).await?;
        let count = items.as_array().map(|a| a.len()).unwrap_or(0);
        Ok(json!({ "count": count, "items": items }))
    }
}
