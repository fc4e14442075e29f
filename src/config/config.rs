// src/config/config.rs

use std::sync::Arc;
use std::{env, time::Duration};

use anyhow::Context;
use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::db::{
    DashboardRepository, KpltRepository, PgProcedures, ProgressProcedures,
    UlokEksistingRepository, UlokEksternalRepository, UlokRepository, UserRepository,
};
use crate::services::auth::AuthService;
use crate::services::dashboard_service::DashboardService;
use crate::services::kplt_service::KpltService;
use crate::services::progress_service::ProgressService;
use crate::services::ulok_eksternal_service::UlokEksternalService;
use crate::services::ulok_service::UlokService;

/// State bersama seluruh aplikasi.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,
    pub auth_service: AuthService,
    pub ulok_service: UlokService,
    pub kplt_service: KpltService,
    pub progress_service: ProgressService,
    pub ulok_eksternal_service: UlokEksternalService,
    pub ulok_eksisting_repo: UlokEksistingRepository,
    pub dashboard_service: DashboardService,
}

impl AppState {
    /// Muat konfigurasi dari environment dan bangun state produksi.
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL harus di-set")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET harus di-set")?;

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await
            .context("Gagal terhubung ke database")?;
        tracing::info!("Koneksi database berhasil dibuat");

        let procedures: Arc<dyn ProgressProcedures> = Arc::new(PgProcedures::new(db_pool.clone()));
        Ok(Self::with_parts(db_pool, jwt_secret, procedures))
    }

    /// Perakitan state dari komponen. Test integrasi memakai jalur ini
    /// untuk menyuntik gateway stub sebagai pengganti fungsi database.
    pub fn with_parts(
        db_pool: PgPool,
        jwt_secret: String,
        procedures: Arc<dyn ProgressProcedures>,
    ) -> Self {
        let user_repo = UserRepository::new(db_pool.clone());
        let ulok_repo = UlokRepository::new(db_pool.clone());
        let kplt_repo = KpltRepository::new(db_pool.clone());
        let eksternal_repo = UlokEksternalRepository::new(db_pool.clone());
        let eksisting_repo = UlokEksistingRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        Self {
            auth_service: AuthService::new(user_repo, jwt_secret.clone()),
            ulok_service: UlokService::new(ulok_repo.clone()),
            kplt_service: KpltService::new(kplt_repo, ulok_repo),
            progress_service: ProgressService::new(procedures),
            ulok_eksternal_service: UlokEksternalService::new(eksternal_repo),
            ulok_eksisting_repo: eksisting_repo,
            dashboard_service: DashboardService::new(dashboard_repo),
            db_pool,
            jwt_secret,
        }
    }
}
