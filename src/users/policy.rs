//! Account-management invariants, separated from the handlers so they can be
//! checked without a database: the bootstrap/admin gate on registration and
//! the self-protection rules on promote/demote/delete.

use crate::error::ApiError;
use crate::users::repo::Role;

/// Registration gate. The first admin signs up unauthenticated; after that,
/// creating accounts requires an admin session and a second admin
/// registration is a conflict.
pub fn check_registration(
    requested: Role,
    have_admin: bool,
    caller: Option<Role>,
) -> Result<(), ApiError> {
    if requested == Role::Admin && have_admin {
        return Err(ApiError::Conflict("Admin already exists".into()));
    }
    if have_admin {
        match caller {
            Some(Role::Admin) => {}
            Some(_) => return Err(ApiError::Forbidden("Admin access required".into())),
            None => return Err(ApiError::Unauthorized("Login required".into())),
        }
    }
    Ok(())
}

pub fn check_promote(target: Role, is_self: bool) -> Result<(), ApiError> {
    if is_self {
        return Err(ApiError::Forbidden("You cannot change your own role".into()));
    }
    if target == Role::Admin {
        return Err(ApiError::InvalidInput("User already admin".into()));
    }
    Ok(())
}

/// Zero-admins refusal outranks the self-action rule: demoting the last
/// admin is a conflict even when it is a self-demotion.
pub fn check_demote(target: Role, admin_count: i64, is_self: bool) -> Result<(), ApiError> {
    if target != Role::Admin {
        return Err(ApiError::InvalidInput("User is not an admin".into()));
    }
    if admin_count <= 1 {
        return Err(ApiError::Conflict("At least one admin required".into()));
    }
    if is_self {
        return Err(ApiError::Forbidden("You cannot demote yourself".into()));
    }
    Ok(())
}

/// Admin accounts must be demoted before deletion.
pub fn check_delete(target: Role, is_self: bool) -> Result<(), ApiError> {
    if is_self {
        return Err(ApiError::Forbidden("You cannot delete yourself".into()));
    }
    if target == Role::Admin {
        return Err(ApiError::Forbidden("Cannot delete admin".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn bootstrap_admin_registers_unauthenticated() {
        assert!(check_registration(Role::Admin, false, None).is_ok());
    }

    #[test]
    fn second_admin_registration_conflicts() {
        let err = check_registration(Role::Admin, true, Some(Role::Admin)).unwrap_err();
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn employee_registration_is_admin_gated_once_admin_exists() {
        assert!(check_registration(Role::Employee, true, Some(Role::Admin)).is_ok());
        assert_eq!(
            check_registration(Role::Employee, true, Some(Role::Employee))
                .unwrap_err()
                .status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            check_registration(Role::Employee, true, None)
                .unwrap_err()
                .status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn promote_refuses_self_regardless_of_target_role() {
        assert_eq!(
            check_promote(Role::Employee, true).unwrap_err().status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn promote_of_existing_admin_is_invalid() {
        assert_eq!(
            check_promote(Role::Admin, false).unwrap_err().status(),
            StatusCode::BAD_REQUEST
        );
        assert!(check_promote(Role::Employee, false).is_ok());
    }

    #[test]
    fn demote_refused_when_only_one_admin() {
        // Conflict wins even for a self-demotion of the last admin.
        let err = check_demote(Role::Admin, 1, true).unwrap_err();
        assert_eq!(err.status(), StatusCode::CONFLICT);
        let err = check_demote(Role::Admin, 1, false).unwrap_err();
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn self_demotion_refused_even_with_spare_admins() {
        assert_eq!(
            check_demote(Role::Admin, 3, true).unwrap_err().status(),
            StatusCode::FORBIDDEN
        );
        assert!(check_demote(Role::Admin, 3, false).is_ok());
    }

    #[test]
    fn demote_of_non_admin_is_invalid() {
        assert_eq!(
            check_demote(Role::Employee, 5, false).unwrap_err().status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn delete_refuses_self_and_admin_targets() {
        assert_eq!(
            check_delete(Role::Employee, true).unwrap_err().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            check_delete(Role::Admin, false).unwrap_err().status(),
            StatusCode::FORBIDDEN
        );
        assert!(check_delete(Role::Employee, false).is_ok());
    }
}
