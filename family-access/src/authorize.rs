//! Action authorization.
//!
//! Every rule is a pure function of the actor, the target and the reserved
//! tenant id. Rules for each action are evaluated top to bottom and the first
//! match decides.

use crate::models::{TenantId, User, UserStatus};
use crate::role::Role;
use crate::tenant::in_scope;
use error_common::{codes, BudgetError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mutating actions the engine can authorize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    EditProfile,
    DeleteUser,
    ResetPassword,
    ApproveUser,
    RejectUser,
    DeleteTenant,
    ChangeOwnPassword,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::EditProfile => "EDIT_PROFILE",
            Action::DeleteUser => "DELETE_USER",
            Action::ResetPassword => "RESET_PASSWORD",
            Action::ApproveUser => "APPROVE_USER",
            Action::RejectUser => "REJECT_USER",
            Action::DeleteTenant => "DELETE_TENANT",
            Action::ChangeOwnPassword => "CHANGE_OWN_PASSWORD",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An action paired with the kind of target it applies to
#[derive(Debug, Clone, Copy)]
pub enum AccessRequest<'a> {
    EditProfile { target: &'a User },
    DeleteUser { target: &'a User },
    ResetPassword { target: &'a User },
    ApproveUser { target: &'a User },
    RejectUser { target: &'a User },
    ChangeOwnPassword { target: &'a User },
    DeleteTenant { tenant: &'a TenantId },
}

impl<'a> AccessRequest<'a> {
    /// Pair a user-targeted action with its target. `None` for `DeleteTenant`.
    pub fn for_user(action: Action, target: &'a User) -> Option<Self> {
        let request = match action {
            Action::EditProfile => AccessRequest::EditProfile { target },
            Action::DeleteUser => AccessRequest::DeleteUser { target },
            Action::ResetPassword => AccessRequest::ResetPassword { target },
            Action::ApproveUser => AccessRequest::ApproveUser { target },
            Action::RejectUser => AccessRequest::RejectUser { target },
            Action::ChangeOwnPassword => AccessRequest::ChangeOwnPassword { target },
            Action::DeleteTenant => return None,
        };
        Some(request)
    }

    pub fn action(&self) -> Action {
        match self {
            AccessRequest::EditProfile { .. } => Action::EditProfile,
            AccessRequest::DeleteUser { .. } => Action::DeleteUser,
            AccessRequest::ResetPassword { .. } => Action::ResetPassword,
            AccessRequest::ApproveUser { .. } => Action::ApproveUser,
            AccessRequest::RejectUser { .. } => Action::RejectUser,
            AccessRequest::ChangeOwnPassword { .. } => Action::ChangeOwnPassword,
            AccessRequest::DeleteTenant { .. } => Action::DeleteTenant,
        }
    }

    /// Identifier of the target for logs
    pub fn target_label(&self) -> String {
        match self {
            AccessRequest::DeleteTenant { tenant } => format!("tenant:{tenant}"),
            AccessRequest::EditProfile { target }
            | AccessRequest::DeleteUser { target }
            | AccessRequest::ResetPassword { target }
            | AccessRequest::ApproveUser { target }
            | AccessRequest::RejectUser { target }
            | AccessRequest::ChangeOwnPassword { target } => format!("user:{}", target.id),
        }
    }
}

/// Machine-readable reason attached to a denial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DenyReason {
    SelfActionForbidden,
    OutOfScope,
    InsufficientRole,
    TargetNotPending,
    ProtectedTenant,
}

impl DenyReason {
    pub fn code(self) -> &'static str {
        match self {
            DenyReason::SelfActionForbidden => codes::authorization::SELF_ACTION_FORBIDDEN,
            DenyReason::OutOfScope => codes::authorization::OUT_OF_SCOPE,
            DenyReason::InsufficientRole => codes::authorization::INSUFFICIENT_ROLE,
            DenyReason::TargetNotPending => codes::authorization::TARGET_NOT_PENDING,
            DenyReason::ProtectedTenant => codes::authorization::PROTECTED_TENANT,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DenyReason::SelfActionForbidden => "SELF_ACTION_FORBIDDEN",
            DenyReason::OutOfScope => "OUT_OF_SCOPE",
            DenyReason::InsufficientRole => "INSUFFICIENT_ROLE",
            DenyReason::TargetNotPending => "TARGET_NOT_PENDING",
            DenyReason::ProtectedTenant => "PROTECTED_TENANT",
        }
    }

    /// Message suitable for showing to the end user
    pub fn message(self) -> &'static str {
        match self {
            DenyReason::SelfActionForbidden => "This action cannot be performed on your own account",
            DenyReason::OutOfScope => "This user does not belong to your family",
            DenyReason::InsufficientRole => "Your role does not allow this action",
            DenyReason::TargetNotPending => "This account is not awaiting approval",
            DenyReason::ProtectedTenant => "The default family cannot be deleted",
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict returned for every authorization request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", content = "reason", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn deny_reason(&self) -> Option<DenyReason> {
        match self {
            Decision::Allow => None,
            Decision::Deny(reason) => Some(*reason),
        }
    }

    /// Convert a denial into the workspace error so callers can `?` it
    pub fn into_result(self) -> error_common::Result<()> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => Err(BudgetError::access_denied(reason.code(), reason.message())),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Allow => f.write_str("ALLOW"),
            Decision::Deny(reason) => write!(f, "DENY({reason})"),
        }
    }
}

/// Evaluate an access request.
///
/// Two denials read differently from what callers may expect:
/// `CHANGE_OWN_PASSWORD` on someone else is `INSUFFICIENT_ROLE` even for a
/// super-admin, and administrators get `INSUFFICIENT_ROLE` when force-resetting
/// a plain member's password.
pub fn authorize(actor: &User, request: &AccessRequest<'_>, reserved_tenant: &TenantId) -> Decision {
    match *request {
        AccessRequest::ChangeOwnPassword { target } => change_own_password(actor, target),
        AccessRequest::EditProfile { target } => edit_profile(actor, target),
        AccessRequest::DeleteUser { target } => delete_user(actor, target),
        AccessRequest::ResetPassword { target } => reset_password(actor, target),
        AccessRequest::ApproveUser { target } | AccessRequest::RejectUser { target } => {
            moderate_user(actor, target)
        }
        AccessRequest::DeleteTenant { tenant } => delete_tenant(actor, tenant, reserved_tenant),
    }
}

// Only the attempt is authorized here; the current password is verified elsewhere.
// Another user's account is INSUFFICIENT_ROLE for every role, super-admins included:
// the action is self-only, so callers should point to RESET_PASSWORD rather than
// show the generic role message.
fn change_own_password(actor: &User, target: &User) -> Decision {
    if actor.is_same_user(target) {
        Decision::Allow
    } else {
        Decision::Deny(DenyReason::InsufficientRole)
    }
}

fn edit_profile(actor: &User, target: &User) -> Decision {
    if actor.is_same_user(target) || actor.role.is_administrator() {
        return Decision::Allow;
    }

    match actor.role {
        Role::Manager if in_scope(actor, target) => Decision::Allow,
        Role::Manager => Decision::Deny(DenyReason::OutOfScope),
        _ => Decision::Deny(DenyReason::InsufficientRole),
    }
}

fn delete_user(actor: &User, target: &User) -> Decision {
    if actor.is_same_user(target) {
        return Decision::Deny(DenyReason::SelfActionForbidden);
    }

    match actor.role {
        Role::SuperAdmin => Decision::Allow,
        Role::Admin if !target.role.is_administrator() => Decision::Allow,
        Role::Manager if target.role == Role::Member => manager_scope(actor, target),
        _ => Decision::Deny(DenyReason::InsufficientRole),
    }
}

// Administrators cannot force-reset plain members' passwords.
fn reset_password(actor: &User, target: &User) -> Decision {
    if actor.is_same_user(target) {
        return Decision::Deny(DenyReason::SelfActionForbidden);
    }

    match actor.role {
        Role::SuperAdmin | Role::Admin if target.role != Role::Member => Decision::Allow,
        Role::Manager if target.role == Role::Member => manager_scope(actor, target),
        _ => Decision::Deny(DenyReason::InsufficientRole),
    }
}

fn moderate_user(actor: &User, target: &User) -> Decision {
    if !actor.role.is_administrator() {
        return Decision::Deny(DenyReason::InsufficientRole);
    }
    if target.status != UserStatus::Pending {
        return Decision::Deny(DenyReason::TargetNotPending);
    }
    Decision::Allow
}

fn delete_tenant(actor: &User, tenant: &TenantId, reserved_tenant: &TenantId) -> Decision {
    if actor.role != Role::SuperAdmin {
        return Decision::Deny(DenyReason::InsufficientRole);
    }
    if tenant == reserved_tenant {
        return Decision::Deny(DenyReason::ProtectedTenant);
    }
    Decision::Allow
}

fn manager_scope(actor: &User, target: &User) -> Decision {
    if in_scope(actor, target) {
        Decision::Allow
    } else {
        Decision::Deny(DenyReason::OutOfScope)
    }
}

/// What happens to the role field of an authorized profile edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleChange {
    /// The requested role is written
    Applied { role: Role },
    /// The field is left untouched; the rest of the edit still goes through
    Ignored { kept: Role },
}

impl RoleChange {
    pub fn effective_role(&self) -> Role {
        match self {
            RoleChange::Applied { role } => *role,
            RoleChange::Ignored { kept } => *kept,
        }
    }
}

/// Only administrators may change roles. Anyone else gets the field silently preserved.
pub fn role_change_outcome(actor: &User, target: &User, requested: Role) -> RoleChange {
    if actor.role.is_administrator() {
        RoleChange::Applied { role: requested }
    } else {
        RoleChange::Ignored { kept: target.role }
    }
}
