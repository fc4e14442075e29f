// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::get_me,

        // --- ULOK ---
        handlers::ulok::list_ulok,
        handlers::ulok::create_ulok,
        handlers::ulok::get_ulok,
        handlers::ulok::update_ulok,
        handlers::ulok::approve_ulok,

        // --- KPLT ---
        handlers::kplt::list_kplt,
        handlers::kplt::create_kplt,
        handlers::kplt::get_kplt,

        // --- Progress & Tahapan ---
        handlers::progress::list_progress,
        handlers::progress::get_progress,
        handlers::stages::update_stage,
        handlers::stages::approve_stage,
        handlers::stages::stage_history,

        // --- ULOK Eksternal ---
        handlers::ulok_eksternal::list_ulok_eksternal,
        handlers::ulok_eksternal::get_ulok_eksternal,
        handlers::ulok_eksternal::assign_branch,
        handlers::ulok_eksternal::assign_penanggungjawab,
        handlers::ulok_eksternal::approve_ulok_eksternal,

        // --- ULOK Eksisting ---
        handlers::ulok_eksisting::list_ulok_eksisting,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::CurrentUser,
            models::auth::LoginPayload,
            models::auth::AuthResponse,
            models::rbac::Role,

            // --- Status domain ---
            models::ulok::UlokApprovalStatus,
            models::kplt::KpltApprovalStatus,
            models::ulok_eksternal::UlokEksternalStatus,
            models::progress::FinalStatus,
            models::progress::StageKind,

            // --- Payloads ---
            handlers::ulok::CreateUlokPayload,
            handlers::ulok::UpdateUlokPayload,
            handlers::ulok::UlokApprovalPayload,
            handlers::kplt::CreateKpltPayload,
            handlers::stages::MouUpdatePayload,
            handlers::stages::IzinTetanggaUpdatePayload,
            handlers::stages::PerizinanUpdatePayload,
            handlers::stages::NotarisUpdatePayload,
            handlers::stages::RenovasiUpdatePayload,
            handlers::stages::GrandOpeningUpdatePayload,
            handlers::ulok_eksternal::AssignBranchPayload,
            handlers::ulok_eksternal::AssignPenanggungjawabPayload,
            handlers::ulok_eksternal::UlokEksternalApprovalPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autentikasi"),
        (name = "Users", description = "Profil user"),
        (name = "Ulok", description = "Usulan lokasi"),
        (name = "Kplt", description = "Komitmen lokasi"),
        (name = "Progress", description = "Workflow tahapan pembangunan/legal"),
        (name = "UlokEksternal", description = "Intake usulan eksternal"),
        (name = "UlokEksisting", description = "Toko eksisting"),
        (name = "Dashboard", description = "Rekap dan indikator")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
