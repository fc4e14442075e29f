// src/handlers/dashboard.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::{
    common::error::AppError, config::AppState, middleware::auth::AuthenticatedUser,
};

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Rekap jumlah ULOK/KPLT/progress per status"),
        (status = 401, description = "Tidak terautentikasi"),
        (status = 403, description = "User tidak memiliki branch")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.dashboard_service.summary(&user).await?;
    Ok((StatusCode::OK, Json(json!({ "data": summary }))))
}
