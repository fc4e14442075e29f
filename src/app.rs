// src/app.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, patch, post},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppState;
use crate::docs::ApiDoc;
use crate::handlers;
use crate::middleware::auth::auth_guard;

/// Rakit router lengkap. Dipisah dari main agar test integrasi bisa
/// menjalankan aplikasi yang sama di listener ephemeral.
pub fn build_router(app_state: AppState) -> Router {
    // Rute autentikasi (publik)
    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    // Rute user (dilindungi middleware)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let ulok_routes = Router::new()
        .route(
            "/",
            get(handlers::ulok::list_ulok).post(handlers::ulok::create_ulok),
        )
        .route(
            "/{ulok_id}",
            get(handlers::ulok::get_ulok).patch(handlers::ulok::update_ulok),
        )
        .route("/{ulok_id}/approval", patch(handlers::ulok::approve_ulok))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let kplt_routes = Router::new()
        .route(
            "/",
            get(handlers::kplt::list_kplt).post(handlers::kplt::create_kplt),
        )
        .route("/{kplt_id}", get(handlers::kplt::get_kplt))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let progress_routes = Router::new()
        .route("/", get(handlers::progress::list_progress))
        .route("/{progress_id}", get(handlers::progress::get_progress))
        .route(
            "/{progress_id}/{stage}",
            patch(handlers::stages::update_stage),
        )
        .route(
            "/{progress_id}/{stage}/approval",
            patch(handlers::stages::approve_stage),
        )
        .route(
            "/{progress_id}/{stage}/history",
            get(handlers::stages::stage_history),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let ulok_eksternal_routes = Router::new()
        .route("/", get(handlers::ulok_eksternal::list_ulok_eksternal))
        .route("/{id}", get(handlers::ulok_eksternal::get_ulok_eksternal))
        .route(
            "/{id}/assign-branch",
            patch(handlers::ulok_eksternal::assign_branch),
        )
        .route(
            "/{id}/assign-penanggungjawab",
            patch(handlers::ulok_eksternal::assign_penanggungjawab),
        )
        .route(
            "/{id}/approval",
            patch(handlers::ulok_eksternal::approve_ulok_eksternal),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let ulok_eksisting_routes = Router::new()
        .route("/", get(handlers::ulok_eksisting::list_ulok_eksisting))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let dashboard_routes = Router::new()
        .route("/summary", get(handlers::dashboard::get_summary))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/ulok", ulok_routes)
        .nest("/api/kplt", kplt_routes)
        .nest("/api/progress", progress_routes)
        .nest("/api/ulok_eksternal", ulok_eksternal_routes)
        .nest("/api/ulok_eksisting", ulok_eksisting_routes)
        .nest("/api/dashboard", dashboard_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
}
