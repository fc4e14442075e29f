// src/services/kplt_service.rs

use serde_json::{Value, json};
use uuid::Uuid;

use crate::common::cursor::next_cursor_from_rows;
use crate::common::error::AppError;
use crate::common::scope::check_branch_scope;
use crate::db::kplt_repo::{KpltListFilter, KpltRepository};
use crate::db::ulok_repo::UlokRepository;
use crate::models::auth::CurrentUser;

#[derive(Clone)]
pub struct KpltService {
    repo: KpltRepository,
    ulok_repo: UlokRepository,
}

impl KpltService {
    pub fn new(repo: KpltRepository, ulok_repo: UlokRepository) -> Self {
        Self { repo, ulok_repo }
    }

    pub async fn list(&self, user: &CurrentUser, mut filter: KpltListFilter) -> Result<Value, AppError> {
        filter.branch = if user.role.is_regional_or_above() {
            None
        } else {
            Some(user.branch_id.ok_or(AppError::NoBranch)?)
        };
        let rows = self.repo.list(&filter).await?;
        let next_cursor = next_cursor_from_rows(&rows, filter.limit);
        Ok(json!({ "data": rows, "next_cursor": next_cursor }))
    }

    pub async fn detail(&self, user: &CurrentUser, kplt_id: Uuid) -> Result<Value, AppError> {
        let owner = self.repo.branch_of(kplt_id).await?;
        check_branch_scope(user, owner)?;
        self.repo
            .detail(kplt_id)
            .await?
            .ok_or_else(|| AppError::NotFound("KPLT".into()))
    }

    /// Membuat KPLT dari ULOK induk. Scoping dicek terhadap branch ULOK;
    /// syarat "ULOK sudah OK" ditegakkan fungsi database.
    pub async fn create(
        &self,
        user: &CurrentUser,
        ulok_id: Uuid,
        payload: Value,
    ) -> Result<Value, AppError> {
        let owner = self.ulok_repo.branch_of(ulok_id).await?;
        let branch_id = check_branch_scope(user, owner)?;
        self.repo.create(user.id, branch_id, ulok_id, payload).await
    }
}
