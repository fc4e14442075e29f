pub mod auth;
pub mod dashboard_service;
pub mod kplt_service;
pub mod progress_service;
pub mod ulok_eksternal_service;
pub mod ulok_service;
