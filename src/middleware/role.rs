//! Role-based authorization rules.
//!
//! Pure decision functions, no I/O. Two shapes of decision:
//!
//! 1. Coarse role gates — the actor's role must be in an allowed set
//!    ([`check_any_role`]).
//! 2. The rank hierarchy — for modifying or removing *another* user's
//!    account, the actor must either be an admin or strictly outrank the
//!    target ([`hierarchy_allows`]). This is evaluated only after the coarse
//!    gate passes and the target record has been loaded, so an absent target
//!    surfaces as not-found rather than as a permission error.
//!
//! Independent of rank, nobody may delete the account bound to their own
//! session — admins outrank everyone including themselves, so without this
//! rule a naive hierarchy check would let an admin self-delete.

use uuid::Uuid;

use crate::middleware::auth::CurrentUser;
use crate::modules::users::model::UserRole;
use crate::utils::errors::AppError;

/// Hierarchy rank (higher = more privileges): `user < poweruser < admin`.
pub fn role_rank(role: &UserRole) -> u8 {
    match role {
        UserRole::Admin => 2,
        UserRole::PowerUser => 1,
        UserRole::User => 0,
    }
}

/// May `actor` act on an account with role `target`?
///
/// Admins may act on anyone (including other admins); everyone else must
/// strictly outrank the target.
pub fn hierarchy_allows(actor: &UserRole, target: &UserRole) -> bool {
    *actor == UserRole::Admin || role_rank(actor) > role_rank(target)
}

/// Coarse gate: the actor's role must be in `allowed_roles`.
pub fn check_any_role(user: &CurrentUser, allowed_roles: &[UserRole]) -> Result<(), AppError> {
    if !allowed_roles.contains(&user.role) {
        return Err(AppError::forbidden(format!(
            "Access denied. Required roles: {:?}, but user has role: {:?}",
            allowed_roles, user.role
        )));
    }

    Ok(())
}

/// Gate for modifying another user's account: coarse gate first, then rank.
pub fn check_can_modify_user(actor: &CurrentUser, target_role: &UserRole) -> Result<(), AppError> {
    check_any_role(actor, &[UserRole::Admin, UserRole::PowerUser])?;

    if !hierarchy_allows(&actor.role, target_role) {
        return Err(AppError::forbidden(
            "Access denied. You cannot modify a user at or above your own role.",
        ));
    }

    Ok(())
}

/// Gate for deleting a user account: self-protection, coarse gate, then rank.
pub fn check_can_delete_user(
    actor: &CurrentUser,
    target_id: Uuid,
    target_role: &UserRole,
) -> Result<(), AppError> {
    if actor.id == target_id {
        return Err(AppError::forbidden("You cannot delete your own account"));
    }

    check_any_role(actor, &[UserRole::Admin, UserRole::PowerUser])?;

    if !hierarchy_allows(&actor.role, target_role) {
        return Err(AppError::forbidden(
            "Access denied. You cannot delete a user at or above your own role.",
        ));
    }

    Ok(())
}
