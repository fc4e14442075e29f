// src/models/ulok.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Status approval ULOK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum UlokApprovalStatus {
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "NOK")]
    Nok,
}

impl UlokApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UlokApprovalStatus::InProgress => "In Progress",
            UlokApprovalStatus::Ok => "OK",
            UlokApprovalStatus::Nok => "NOK",
        }
    }
}

/// Keputusan approval ULOK yang boleh dikirim client (OK/NOK,
/// case-insensitive). "In Progress" adalah status awal, bukan keputusan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UlokDecision {
    Ok,
    Nok,
}

impl UlokDecision {
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("ok") {
            Some(UlokDecision::Ok)
        } else if trimmed.eq_ignore_ascii_case("nok") {
            Some(UlokDecision::Nok)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UlokDecision::Ok => "OK",
            UlokDecision::Nok => "NOK",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keputusan_ulok_case_insensitive() {
        assert_eq!(UlokDecision::parse("OK"), Some(UlokDecision::Ok));
        assert_eq!(UlokDecision::parse("ok"), Some(UlokDecision::Ok));
        assert_eq!(UlokDecision::parse(" nok "), Some(UlokDecision::Nok));
        assert_eq!(UlokDecision::parse("NOK"), Some(UlokDecision::Nok));
        assert_eq!(UlokDecision::parse("In Progress"), None);
        assert_eq!(UlokDecision::parse("selesai"), None);
    }
}
