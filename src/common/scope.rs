// src/common/scope.rs

use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::auth::CurrentUser;

/// Pemeriksaan scoping branch yang dipakai lintas resource (progress,
/// ULOK, KPLT). Record yang tidak ada dan record milik branch lain
/// sama-sama menjadi 404: keberadaan data di branch lain tidak boleh
/// bisa dibedakan dari ketiadaan data.
///
/// `owner` = branch pemilik record hasil fetch, None jika record tidak
/// ditemukan. Mengembalikan branch pemilik agar caller meneruskannya ke
/// fungsi database.
pub fn check_branch_scope(user: &CurrentUser, owner: Option<Uuid>) -> Result<Uuid, AppError> {
    let Some(owner) = owner else {
        return Err(AppError::NotFound("Data".into()));
    };
    if user.role.is_regional_or_above() {
        return Ok(owner);
    }
    if user.branch_id == Some(owner) {
        Ok(owner)
    } else {
        Err(AppError::NotFound("Data".into()))
    }
}

/// Varian untuk record yang branch-nya boleh kosong (ULOK eksternal
/// sebelum ditugaskan). Record tanpa branch hanya terlihat oleh role
/// regional ke atas.
pub fn check_branch_scope_assigned(
    user: &CurrentUser,
    owner: Option<Uuid>,
) -> Result<(), AppError> {
    if user.role.is_regional_or_above() {
        return Ok(());
    }
    match owner {
        Some(branch) if user.branch_id == Some(branch) => Ok(()),
        _ => Err(AppError::NotFound("Data".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::rbac::Role;
    use axum::http::StatusCode;

    fn user(role: Role, branch: Option<Uuid>) -> CurrentUser {
        CurrentUser {
            id: Uuid::new_v4(),
            email: "tester@contoh.co.id".into(),
            nama: "Tester".into(),
            branch_id: branch,
            branch_nama: branch.map(|_| "Cikarang".to_string()),
            position_id: Uuid::new_v4(),
            role,
        }
    }

    #[test]
    fn branch_lain_menjadi_404_bukan_403() {
        let b1 = Uuid::new_v4();
        let b2 = Uuid::new_v4();
        let u = user(Role::LocationSpecialist, Some(b1));
        let err = check_branch_scope(&u, Some(b2)).unwrap_err();
        assert_eq!(err.to_api_error().status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn record_tidak_ada_menjadi_404() {
        let u = user(Role::LocationSpecialist, Some(Uuid::new_v4()));
        let err = check_branch_scope(&u, None).unwrap_err();
        assert_eq!(err.to_api_error().status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn branch_sendiri_lolos() {
        let b = Uuid::new_v4();
        let u = user(Role::AdminBranch, Some(b));
        assert_eq!(check_branch_scope(&u, Some(b)).unwrap(), b);
    }

    #[test]
    fn regional_ke_atas_melewati_scoping() {
        let b = Uuid::new_v4();
        for role in [Role::RegionalManager, Role::GeneralManager] {
            let u = user(role, None);
            assert_eq!(check_branch_scope(&u, Some(b)).unwrap(), b);
        }
        // record yang benar-benar tidak ada tetap 404
        let u = user(Role::RegionalManager, None);
        assert!(check_branch_scope(&u, None).is_err());
    }

    #[test]
    fn record_tanpa_branch_hanya_untuk_regional() {
        let u = user(Role::LocationManager, Some(Uuid::new_v4()));
        assert!(check_branch_scope_assigned(&u, None).is_err());

        let rm = user(Role::RegionalManager, None);
        assert!(check_branch_scope_assigned(&rm, None).is_ok());
    }
}
