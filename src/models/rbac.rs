// src/models/rbac.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Jabatan (posisi) user, di-parse dari string kanonis lowercase
/// pada tabel `positions`. Enum tertutup: string yang tidak dikenal
/// tidak menghasilkan Role, dan user tersebut ditolak saat autentikasi.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
pub enum Role {
    LocationSpecialist,
    LocationManager,
    BranchManager,
    RegionalManager,
    GeneralManager,
    AdminBranch,
}

impl Role {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "location specialist" => Some(Role::LocationSpecialist),
            "location manager" => Some(Role::LocationManager),
            "branch manager" => Some(Role::BranchManager),
            "regional manager" => Some(Role::RegionalManager),
            "general manager" => Some(Role::GeneralManager),
            "admin branch" => Some(Role::AdminBranch),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::LocationSpecialist => "location specialist",
            Role::LocationManager => "location manager",
            Role::BranchManager => "branch manager",
            Role::RegionalManager => "regional manager",
            Role::GeneralManager => "general manager",
            Role::AdminBranch => "admin branch",
        }
    }

    /// Regional Manager ke atas tidak terikat scoping branch.
    pub fn is_regional_or_above(&self) -> bool {
        matches!(self, Role::RegionalManager | Role::GeneralManager)
    }

    pub const ALL: [Role; 6] = [
        Role::LocationSpecialist,
        Role::LocationManager,
        Role::BranchManager,
        Role::RegionalManager,
        Role::GeneralManager,
        Role::AdminBranch,
    ];
}

impl Serialize for Role {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Role::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("posisi tidak dikenal: {raw}")))
    }
}

// ---
// Aksi per resource (set tertutup)
// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UlokAction {
    Read,
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KpltAction {
    Read,
    Create,
    Update,
    Approve,
    FinalApprove,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressAction {
    Read,
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UlokEksternalAction {
    Read,
    Create,
    Update,
    Approve,
    FinalApprove,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UlokEksistingAction {
    Read,
}
