pub mod user_repo;
pub use user_repo::UserRepository;
pub mod procedures;
pub use procedures::{PgProcedures, ProgressProcedures};
pub mod ulok_repo;
pub use ulok_repo::UlokRepository;
pub mod kplt_repo;
pub use kplt_repo::KpltRepository;
pub mod ulok_eksternal_repo;
pub use ulok_eksternal_repo::UlokEksternalRepository;
pub mod ulok_eksisting_repo;
pub use ulok_eksisting_repo::UlokEksistingRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
