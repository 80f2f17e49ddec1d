use crate::{
    authorize::{self, AccessRequest, Action, Decision, RoleChange},
    clock::{Clock, SystemClock},
    config::AccessConfig,
    masking::{self, LedgerView},
    models::*,
    role::Role,
    tenant,
    visibility::{self, AmountVisibility},
};
use chrono::NaiveDate;
use error_common::{log_error, BudgetError, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Single entry point for every access-control and visibility decision.
///
/// The engine holds configuration only. Every method is a pure function of
/// the snapshots passed in, so one instance can be shared freely across
/// requests and threads.
pub struct DecisionEngine {
    /// Reserved tenant and age threshold
    config: Arc<AccessConfig>,

    /// Source of "today" for age evaluation
    clock: Arc<dyn Clock>,

    /// Attach evaluation traces to batch responses
    debug_mode: bool,
}

impl DecisionEngine {
    /// Create an engine from a validated configuration
    pub fn new(config: AccessConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config: Arc::new(config),
            clock: Arc::new(SystemClock),
            debug_mode: false,
        })
    }

    /// Replace the wall clock, e.g. with a [`crate::clock::FixedClock`]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Enable debug traces on batch responses
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug_mode = enabled;
        self
    }

    pub fn config(&self) -> &AccessConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // =============================================================================
    // Tenant Scope
    // =============================================================================

    /// Whether `actor` may enumerate `candidate` at all
    pub fn in_scope(&self, actor: &User, candidate: &User) -> bool {
        tenant::in_scope(actor, candidate)
    }

    /// Users of the snapshot the actor may enumerate
    pub fn visible_users<'a>(&self, actor: &User, snapshot: &'a FamilySnapshot) -> Vec<&'a User> {
        let users = tenant::scope_of(actor, snapshot);
        debug!(
            actor = %actor.id,
            role = %actor.role,
            visible = users.len(),
            total = snapshot.len(),
            "Resolved user scope"
        );
        users
    }

    // =============================================================================
    // Amount Visibility
    // =============================================================================

    /// Whether `owner`'s amounts must be masked for `viewer`. Self-views are never masked.
    pub fn should_mask_amount(&self, viewer: &User, owner: &User) -> bool {
        if viewer.is_same_user(owner) {
            return false;
        }

        let masked =
            visibility::should_mask_amount(viewer, owner, self.today(), self.config.adult_age);
        debug!(viewer = %viewer.id, owner = %owner.id, masked, "Evaluated amount visibility");
        masked
    }

    /// Scope check and masking decision in one call
    pub fn amount_visibility(&self, viewer: &User, owner: &User) -> AmountVisibility {
        if !viewer.is_same_user(owner) && !self.in_scope(viewer, owner) {
            return AmountVisibility::OutOfScope;
        }

        if self.should_mask_amount(viewer, owner) {
            AmountVisibility::Masked
        } else {
            AmountVisibility::Visible
        }
    }

    /// Project records for display: out-of-scope records dropped, hidden amounts zeroed.
    ///
    /// Fails only when the visible totals overflow.
    pub fn project_records<'a>(
        &self,
        viewer: &User,
        snapshot: &FamilySnapshot,
        records: impl IntoIterator<Item = &'a FinancialRecord>,
    ) -> Result<LedgerView> {
        let view = masking::build_ledger(
            viewer,
            snapshot,
            records,
            self.today(),
            self.config.adult_age,
        )
        .map_err(|err| {
            let context = ErrorContext::new()
                .with_user_id(viewer.id.to_string())
                .add_context("operation", "project_records");
            log_error(&context, &err);
            err
        })?;
        debug!(
            viewer = %viewer.id,
            records = view.records.len(),
            masked = view.masked_count(),
            "Projected ledger"
        );
        Ok(view)
    }

    // =============================================================================
    // Action Authorization
    // =============================================================================

    /// Authorize a mutating action. Never fails; denials carry a reason.
    pub fn authorize(&self, actor: &User, request: &AccessRequest<'_>) -> Decision {
        let decision = authorize::authorize(actor, request, &self.config.reserved_tenant_id);

        debug!(
            actor = %actor.id,
            role = %actor.role,
            action = %request.action(),
            target = %request.target_label(),
            decision = %decision,
            "Authorization decision"
        );
        if let Decision::Deny(reason) = decision {
            info!(
                actor = %actor.id,
                action = %request.action(),
                reason = %reason,
                "Action denied"
            );
        }

        decision
    }

    /// Authorize one of the user-targeted actions.
    ///
    /// `DELETE_TENANT` targets a family and is rejected as a malformed request;
    /// use [`DecisionEngine::authorize_tenant_deletion`].
    pub fn authorize_user_action(&self, actor: &User, target: &User, action: Action) -> Result<Decision> {
        let request = AccessRequest::for_user(action, target).ok_or_else(|| {
            BudgetError::ValidationError(format!("{action} does not target a user"))
        })?;
        Ok(self.authorize(actor, &request))
    }

    pub fn authorize_tenant_deletion(&self, actor: &User, tenant: &TenantId) -> Decision {
        self.authorize(actor, &AccessRequest::DeleteTenant { tenant })
    }

    /// Authorize several requests for the same actor
    pub fn batch_authorize(&self, actor: &User, requests: &[AccessRequest<'_>]) -> Vec<DecisionResponse> {
        requests
            .iter()
            .map(|request| {
                let decision = self.authorize(actor, request);
                DecisionResponse {
                    action: request.action(),
                    target: request.target_label(),
                    decision,
                    debug_trace: if self.debug_mode {
                        Some(self.trace(actor, request, decision))
                    } else {
                        None
                    },
                }
            })
            .collect()
    }

    /// Effect of a profile edit on the role field
    pub fn role_change_outcome(&self, actor: &User, target: &User, requested: Role) -> RoleChange {
        let outcome = authorize::role_change_outcome(actor, target, requested);
        if let RoleChange::Ignored { kept } = outcome {
            if requested != kept {
                debug!(actor = %actor.id, target = %target.id, requested = %requested, "Role change ignored");
            }
        }
        outcome
    }

    /// Access to the translation editor is granted by the translator role only
    pub fn can_access_translations(&self, actor: &User) -> bool {
        actor.role.is_translator()
    }

    fn trace(&self, actor: &User, request: &AccessRequest<'_>, decision: Decision) -> Vec<String> {
        let mut trace = vec![format!(
            "actor={} role={} family={}",
            actor.id,
            actor.role,
            actor.family_id.as_ref().map_or("-", TenantId::as_str)
        )];

        match request {
            AccessRequest::DeleteTenant { tenant } => trace.push(format!(
                "tenant={} reserved={}",
                tenant,
                *tenant == &self.config.reserved_tenant_id
            )),
            AccessRequest::EditProfile { target }
            | AccessRequest::DeleteUser { target }
            | AccessRequest::ResetPassword { target }
            | AccessRequest::ApproveUser { target }
            | AccessRequest::RejectUser { target }
            | AccessRequest::ChangeOwnPassword { target } => {
                trace.push(format!(
                    "target={} role={} status={} self={} in_scope={}",
                    target.id,
                    target.role,
                    target.status,
                    actor.is_same_user(target),
                    self.in_scope(actor, target)
                ));
            }
        }

        trace.push(format!("{} -> {}", request.action(), decision));
        trace
    }
}

/// Authorization result as returned by [`DecisionEngine::batch_authorize`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionResponse {
    pub action: Action,
    pub target: String,
    pub decision: Decision,
    pub debug_trace: Option<Vec<String>>,
}
