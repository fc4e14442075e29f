// src/services/dashboard_service.rs

use serde_json::Value;

use crate::common::error::AppError;
use crate::db::DashboardRepository;
use crate::models::auth::CurrentUser;

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository) -> Self {
        Self { repo }
    }

    pub async fn summary(&self, user: &CurrentUser) -> Result<Value, AppError> {
        let branch = if user.role.is_regional_or_above() {
            None
        } else {
            Some(user.branch_id.ok_or(AppError::NoBranch)?)
        };
        self.repo.summary(branch).await
    }
}
