// src/services/ulok_eksternal_service.rs

use serde_json::{Value, json};
use uuid::Uuid;

use crate::common::cursor::next_cursor_from_rows;
use crate::common::error::AppError;
use crate::common::scope::check_branch_scope_assigned;
use crate::db::ulok_eksternal_repo::{UlokEksternalListFilter, UlokEksternalRepository};
use crate::models::auth::CurrentUser;
use crate::models::ulok_eksternal::UlokEksternalStatus;

#[derive(Clone)]
pub struct UlokEksternalService {
    repo: UlokEksternalRepository,
}

impl UlokEksternalService {
    pub fn new(repo: UlokEksternalRepository) -> Self {
        Self { repo }
    }

    pub async fn list(
        &self,
        user: &CurrentUser,
        mut filter: UlokEksternalListFilter,
    ) -> Result<Value, AppError> {
        filter.branch = if user.role.is_regional_or_above() {
            None
        } else {
            Some(user.branch_id.ok_or(AppError::NoBranch)?)
        };
        let rows = self.repo.list(&filter).await?;
        let next_cursor = next_cursor_from_rows(&rows, filter.limit);
        Ok(json!({ "data": rows, "next_cursor": next_cursor }))
    }

    pub async fn detail(&self, user: &CurrentUser, id: Uuid) -> Result<Value, AppError> {
        let owner = self
            .repo
            .owner_of(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Data".into()))?;
        check_branch_scope_assigned(user, owner.branch_id)?;
        self.repo
            .detail(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Data".into()))
    }

    /// Regional Manager menugaskan branch penindak lanjut.
    pub async fn assign_branch(
        &self,
        user: &CurrentUser,
        id: Uuid,
        branch_id: Uuid,
    ) -> Result<Value, AppError> {
        self.repo
            .owner_of(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Data".into()))?;
        self.repo.assign_branch(id, user.id, branch_id).await
    }

    /// Location Manager menunjuk specialist sebagai penanggung jawab.
    /// Record harus sudah ditugaskan ke branch si manager.
    pub async fn assign_penanggungjawab(
        &self,
        user: &CurrentUser,
        id: Uuid,
        penanggungjawab: Uuid,
    ) -> Result<Value, AppError> {
        let owner = self
            .repo
            .owner_of(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Data".into()))?;
        check_branch_scope_assigned(user, owner.branch_id)?;
        self.repo
            .assign_penanggungjawab(id, user.id, penanggungjawab)
            .await
    }

    /// Location Specialist memutus OK/NOK. OK memicu pembuatan ULOK
    /// internal di sisi database.
    pub async fn approve(
        &self,
        user: &CurrentUser,
        id: Uuid,
        status: UlokEksternalStatus,
    ) -> Result<Value, AppError> {
        let owner = self
            .repo
            .owner_of(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Data".into()))?;
        check_branch_scope_assigned(user, owner.branch_id)?;
        self.repo.approve(id, user.id, status.as_str()).await
    }
}
