// src/common/acl.rs
//
// Tabel keputusan kapabilitas. Logika di sini adalah fungsi murni atas
// enum Role yang tertutup: flat match, bukan rules engine. Fungsi
// kapabilitas tidak pernah error; handler yang menggabungkan hasilnya
// dengan tiga pemeriksaan berurutan (tanpa user = 401, kapabilitas
// ditolak = 403, tanpa branch = 403 dengan pesan berbeda).

use crate::models::auth::CurrentUser;
use crate::models::rbac::{
    KpltAction, ProgressAction, Role, UlokAction, UlokEksistingAction, UlokEksternalAction,
};

/// Kapabilitas ULOK (usulan lokasi).
pub fn can_ulok(action: UlokAction, user: &CurrentUser) -> bool {
    use UlokAction::*;
    match user.role {
        Role::LocationSpecialist => true,
        Role::LocationManager => matches!(action, Read | Update),
        Role::BranchManager => matches!(action, Read),
        Role::RegionalManager => matches!(action, Read),
        Role::GeneralManager => matches!(action, Read),
        Role::AdminBranch => matches!(action, Read),
    }
}

/// Kapabilitas KPLT (komitmen lokasi).
///
/// Approve/FinalApprove tidak diberikan ke role mana pun lewat fungsi ini;
/// approval tahapan progress memakai `can_approve_stage`.
pub fn can_kplt(action: KpltAction, user: &CurrentUser) -> bool {
    use KpltAction::*;
    match user.role {
        Role::LocationSpecialist => matches!(action, Read | Create | Update | Delete),
        Role::LocationManager => matches!(action, Read | Update),
        Role::BranchManager => matches!(action, Read | Update | Create),
        Role::RegionalManager => matches!(action, Read | Update | Create),
        Role::GeneralManager => matches!(action, Read | Create | Update),
        Role::AdminBranch => matches!(action, Read),
    }
}

/// Kapabilitas progress KPLT. Admin Branch memegang akses penuh
/// (entry data tahapan); role lain hanya baca.
pub fn can_progress_kplt(action: ProgressAction, user: &CurrentUser) -> bool {
    use ProgressAction::*;
    match user.role {
        Role::AdminBranch => true,
        Role::LocationSpecialist
        | Role::LocationManager
        | Role::BranchManager
        | Role::RegionalManager
        | Role::GeneralManager => matches!(action, Read),
    }
}

/// Kapabilitas ULOK eksternal. Create/Delete tidak diberikan lewat fungsi
/// ini (intake berjalan lewat jalur lain); mutasi penugasan dan approval
/// di-gate per-role di handler masing-masing.
pub fn can_ulok_eksternal(action: UlokEksternalAction, user: &CurrentUser) -> bool {
    use UlokEksternalAction::*;
    match user.role {
        Role::GeneralManager | Role::AdminBranch => matches!(action, Read),
        Role::LocationSpecialist
        | Role::LocationManager
        | Role::BranchManager
        | Role::RegionalManager => matches!(action, Read | Update),
    }
}

/// Kapabilitas ULOK eksisting: semua role yang dikenal hanya baca.
pub fn can_ulok_eksisting(action: UlokEksistingAction, _user: &CurrentUser) -> bool {
    matches!(action, UlokEksistingAction::Read)
}

/// Kapabilitas approval tahapan progress, seragam untuk keenam tahap
/// (MOU, Izin Tetangga, Perizinan, Notaris, Renovasi, Grand Opening).
/// Admin Branch dikecualikan: perannya entry data, bukan approval.
pub fn can_approve_stage(user: &CurrentUser) -> bool {
    match user.role {
        Role::LocationSpecialist
        | Role::LocationManager
        | Role::BranchManager
        | Role::RegionalManager
        | Role::GeneralManager => true,
        Role::AdminBranch => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn user_with(role: Role) -> CurrentUser {
        CurrentUser {
            id: Uuid::new_v4(),
            email: "tester@contoh.co.id".into(),
            nama: "Tester".into(),
            branch_id: Some(Uuid::new_v4()),
            branch_nama: Some("Bekasi".into()),
            position_id: Uuid::new_v4(),
            role,
        }
    }

    #[test]
    fn tabel_can_ulok() {
        use Role::*;
        use UlokAction::*;
        let expected: [(Role, &[UlokAction]); 6] = [
            (LocationSpecialist, &[Read, Create, Update, Delete]),
            (LocationManager, &[Read, Update]),
            (BranchManager, &[Read]),
            (RegionalManager, &[Read]),
            (GeneralManager, &[Read]),
            (AdminBranch, &[Read]),
        ];
        for (role, allowed) in expected {
            let user = user_with(role);
            for action in [Read, Create, Update, Delete] {
                assert_eq!(
                    can_ulok(action, &user),
                    allowed.contains(&action),
                    "can_ulok({action:?}) untuk {role:?}"
                );
            }
        }
    }

    #[test]
    fn tabel_can_kplt() {
        use KpltAction::*;
        use Role::*;
        let expected: [(Role, &[KpltAction]); 6] = [
            (LocationSpecialist, &[Read, Create, Update, Delete]),
            (LocationManager, &[Read, Update]),
            (BranchManager, &[Read, Update, Create]),
            (RegionalManager, &[Read, Update, Create]),
            (GeneralManager, &[Read, Create, Update]),
            (AdminBranch, &[Read]),
        ];
        for (role, allowed) in expected {
            let user = user_with(role);
            for action in [Read, Create, Update, Approve, FinalApprove, Delete] {
                assert_eq!(
                    can_kplt(action, &user),
                    allowed.contains(&action),
                    "can_kplt({action:?}) untuk {role:?}"
                );
            }
        }
    }

    #[test]
    fn can_kplt_tidak_memberikan_approve_ke_role_mana_pun() {
        for role in Role::ALL {
            let user = user_with(role);
            assert!(!can_kplt(KpltAction::Approve, &user));
            assert!(!can_kplt(KpltAction::FinalApprove, &user));
        }
    }

    #[test]
    fn tabel_can_progress_kplt() {
        use ProgressAction::*;
        for role in Role::ALL {
            let user = user_with(role);
            for action in [Read, Create, Update, Delete] {
                let expected = role == Role::AdminBranch || action == Read;
                assert_eq!(
                    can_progress_kplt(action, &user),
                    expected,
                    "can_progress_kplt({action:?}) untuk {role:?}"
                );
            }
        }
    }

    #[test]
    fn tabel_can_ulok_eksternal() {
        use Role::*;
        use UlokEksternalAction::*;
        for role in Role::ALL {
            let user = user_with(role);
            let read_only = matches!(role, GeneralManager | AdminBranch);
            for action in [Read, Create, Update, Approve, FinalApprove, Delete] {
                let expected = match action {
                    Read => true,
                    Update => !read_only,
                    _ => false,
                };
                assert_eq!(
                    can_ulok_eksternal(action, &user),
                    expected,
                    "can_ulok_eksternal({action:?}) untuk {role:?}"
                );
            }
        }
    }

    #[test]
    fn tabel_can_ulok_eksisting() {
        for role in Role::ALL {
            let user = user_with(role);
            assert!(can_ulok_eksisting(UlokEksistingAction::Read, &user));
        }
    }

    #[test]
    fn tabel_can_approve_stage() {
        for role in Role::ALL {
            let user = user_with(role);
            assert_eq!(
                can_approve_stage(&user),
                role != Role::AdminBranch,
                "can_approve_stage untuk {role:?}"
            );
        }
    }
}
