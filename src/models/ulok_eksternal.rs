// src/models/ulok_eksternal.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Status intake ULOK eksternal. Mencapai OK memicu pembuatan ULOK
/// internal di sisi database (trigger), bukan di layer ini.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum UlokEksternalStatus {
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "NOK")]
    Nok,
}

impl UlokEksternalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UlokEksternalStatus::InProgress => "In Progress",
            UlokEksternalStatus::Ok => "OK",
            UlokEksternalStatus::Nok => "NOK",
        }
    }
}

/// Pemilik scoping sebuah record eksternal: branch bisa belum ditugaskan.
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct UlokEksternalOwner {
    pub id: Uuid,
    pub branch_id: Option<Uuid>,
}
