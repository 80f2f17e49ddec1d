//! User status lifecycle helpers.
//!
//! The engine never stores a status; these functions tell the caller what a
//! new account starts as and which transitions are legal.

use crate::models::{User, UserStatus};
use crate::role::Role;
use error_common::{BudgetError, Result};

/// Status of a freshly created account.
///
/// `creator` is `None` for self-registration.
pub fn initial_status(creator: Option<&User>, requires_moderation: bool) -> UserStatus {
    if requires_moderation {
        return UserStatus::Pending;
    }

    match creator.map(|user| user.role) {
        None | Some(Role::SuperAdmin | Role::Admin | Role::Manager) => UserStatus::Approved,
        Some(Role::Member | Role::Translator) => UserStatus::Pending,
    }
}

/// Validate a status change. `REJECTED` is terminal.
pub fn transition(from: UserStatus, to: UserStatus) -> Result<UserStatus> {
    match (from, to) {
        (UserStatus::Pending, UserStatus::Approved | UserStatus::Rejected) => Ok(to),
        _ => Err(BudgetError::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        }),
    }
}
