// src/services/ulok_service.rs

use serde_json::{Value, json};
use uuid::Uuid;

use crate::common::cursor::next_cursor_from_rows;
use crate::common::error::AppError;
use crate::common::scope::check_branch_scope;
use crate::db::ulok_repo::{UlokListFilter, UlokRepository};
use crate::models::auth::CurrentUser;
use crate::models::ulok::UlokDecision;

#[derive(Clone)]
pub struct UlokService {
    repo: UlokRepository,
}

impl UlokService {
    pub fn new(repo: UlokRepository) -> Self {
        Self { repo }
    }

    /// Listing dengan scoping branch: role non-regional hanya melihat
    /// branch-nya sendiri.
    pub async fn list(&self, user: &CurrentUser, mut filter: UlokListFilter) -> Result<Value, AppError> {
        filter.branch = if user.role.is_regional_or_above() {
            None
        } else {
            Some(user.branch_id.ok_or(AppError::NoBranch)?)
        };
        let rows = self.repo.list(&filter).await?;
        let next_cursor = next_cursor_from_rows(&rows, filter.limit);
        Ok(json!({ "data": rows, "next_cursor": next_cursor }))
    }

    pub async fn create(&self, user: &CurrentUser, payload: Value) -> Result<Value, AppError> {
        let branch_id = user.branch_id.ok_or(AppError::NoBranch)?;
        self.repo.create(user.id, branch_id, payload).await
    }

    pub async fn detail(&self, user: &CurrentUser, ulok_id: Uuid) -> Result<Value, AppError> {
        let owner = self.repo.branch_of(ulok_id).await?;
        check_branch_scope(user, owner)?;
        self.repo
            .detail(ulok_id)
            .await?
            .ok_or_else(|| AppError::NotFound("ULOK".into()))
    }

    pub async fn update(
        &self,
        user: &CurrentUser,
        ulok_id: Uuid,
        payload: Value,
    ) -> Result<Value, AppError> {
        let owner = self.repo.branch_of(ulok_id).await?;
        check_branch_scope(user, owner)?;
        self.repo.update(ulok_id, user.id, payload).await
    }

    /// Keputusan manajerial atas usulan. Status akhir (OK/NOK) dan
    /// timestamp-nya di-set oleh fungsi database.
    pub async fn approve(
        &self,
        user: &CurrentUser,
        ulok_id: Uuid,
        decision: UlokDecision,
        alasan_nok: Option<&str>,
    ) -> Result<Value, AppError> {
        let owner = self.repo.branch_of(ulok_id).await?;
        let branch_id = check_branch_scope(user, owner)?;
        self.repo
            .approve(ulok_id, user.id, branch_id, decision.as_str(), alasan_nok)
            .await
    }
}
