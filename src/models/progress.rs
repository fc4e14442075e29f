// src/models/progress.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Enam tahap progress KPLT, berurutan secara bisnis:
/// MOU -> Izin Tetangga -> Perizinan -> Notaris -> Renovasi -> Grand Opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
pub enum StageKind {
    Mou,
    IzinTetangga,
    Perizinan,
    Notaris,
    Renovasi,
    GrandOpening,
}

impl StageKind {
    /// Segmen path URL, sekaligus suffix nama fungsi database.
    pub fn as_str(&self) -> &'static str {
        match self {
            StageKind::Mou => "mou",
            StageKind::IzinTetangga => "izin_tetangga",
            StageKind::Perizinan => "perizinan",
            StageKind::Notaris => "notaris",
            StageKind::Renovasi => "renovasi",
            StageKind::GrandOpening => "grand_opening",
        }
    }

    pub fn from_path(segment: &str) -> Option<Self> {
        match segment {
            "mou" => Some(StageKind::Mou),
            "izin_tetangga" => Some(StageKind::IzinTetangga),
            "perizinan" => Some(StageKind::Perizinan),
            "notaris" => Some(StageKind::Notaris),
            "renovasi" => Some(StageKind::Renovasi),
            "grand_opening" => Some(StageKind::GrandOpening),
            _ => None,
        }
    }

    /// Nama tampilan untuk pesan ke user.
    pub fn display_name(&self) -> &'static str {
        match self {
            StageKind::Mou => "MOU",
            StageKind::IzinTetangga => "Izin Tetangga",
            StageKind::Perizinan => "Perizinan",
            StageKind::Notaris => "Notaris",
            StageKind::Renovasi => "Renovasi",
            StageKind::GrandOpening => "Grand Opening",
        }
    }

    /// Nama field approval pada body request, mis. `final_status_notaris`.
    pub fn final_status_field(&self) -> &'static str {
        match self {
            StageKind::Mou => "final_status_mou",
            StageKind::IzinTetangga => "final_status_izin_tetangga",
            StageKind::Perizinan => "final_status_perizinan",
            StageKind::Notaris => "final_status_notaris",
            StageKind::Renovasi => "final_status_renovasi",
            StageKind::GrandOpening => "final_status_grand_opening",
        }
    }

    /// Tahap prasyarat yang harus Selesai lebih dulu. Penegakan urutan
    /// dilakukan di fungsi database; daftar di sini dipakai untuk pesan.
    pub fn prerequisite(&self) -> Option<StageKind> {
        match self {
            StageKind::Renovasi => Some(StageKind::Notaris),
            StageKind::GrandOpening => Some(StageKind::Renovasi),
            _ => None,
        }
    }

    pub const ALL: [StageKind; 6] = [
        StageKind::Mou,
        StageKind::IzinTetangga,
        StageKind::Perizinan,
        StageKind::Notaris,
        StageKind::Renovasi,
        StageKind::GrandOpening,
    ];
}

/// Status final sebuah tahap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum FinalStatus {
    Belum,
    Selesai,
    Batal,
}

impl FinalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinalStatus::Belum => "Belum",
            FinalStatus::Selesai => "Selesai",
            FinalStatus::Batal => "Batal",
        }
    }
}

/// Keputusan approval yang boleh dikirim client: hanya selesai/batal,
/// diterima case-insensitive lalu dinormalisasi sebelum dikirim ke
/// fungsi database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalDecision {
    Selesai,
    Batal,
}

impl ApprovalDecision {
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("selesai") {
            Some(ApprovalDecision::Selesai)
        } else if trimmed.eq_ignore_ascii_case("batal") {
            Some(ApprovalDecision::Batal)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalDecision::Selesai => "Selesai",
            ApprovalDecision::Batal => "Batal",
        }
    }
}

/// Argumen pemanggilan `fn_<stage>_approve`.
#[derive(Debug, Clone)]
pub struct StageApproveArgs {
    pub user_id: Uuid,
    pub branch_id: Uuid,
    pub progress_kplt_id: Uuid,
    pub final_status: ApprovalDecision,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_path_segment_bolak_balik() {
        for stage in StageKind::ALL {
            assert_eq!(StageKind::from_path(stage.as_str()), Some(stage));
        }
        assert_eq!(StageKind::from_path("mou2"), None);
        assert_eq!(StageKind::from_path(""), None);
    }

    #[test]
    fn keputusan_approval_case_insensitive() {
        assert_eq!(ApprovalDecision::parse("SELESAI"), Some(ApprovalDecision::Selesai));
        assert_eq!(ApprovalDecision::parse("Selesai"), Some(ApprovalDecision::Selesai));
        assert_eq!(ApprovalDecision::parse("  batal "), Some(ApprovalDecision::Batal));
        assert_eq!(ApprovalDecision::parse("BaTaL"), Some(ApprovalDecision::Batal));
        assert_eq!(ApprovalDecision::parse("ok"), None);
        assert_eq!(ApprovalDecision::parse("belum"), None);
        assert_eq!(ApprovalDecision::parse(""), None);
    }

    #[test]
    fn prasyarat_tahap() {
        assert_eq!(StageKind::Renovasi.prerequisite(), Some(StageKind::Notaris));
        assert_eq!(StageKind::GrandOpening.prerequisite(), Some(StageKind::Renovasi));
        assert_eq!(StageKind::Mou.prerequisite(), None);
        assert_eq!(StageKind::Perizinan.prerequisite(), None);
    }
}
