// src/models/kplt.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Status approval KPLT; terpisah dari status ULOK induknya.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum KpltApprovalStatus {
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "NOK")]
    Nok,
}

impl KpltApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            KpltApprovalStatus::InProgress => "In Progress",
            KpltApprovalStatus::Ok => "OK",
            KpltApprovalStatus::Nok => "NOK",
        }
    }
}
