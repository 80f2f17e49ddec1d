//! Family (tenant) isolation.
//!
//! Decides which users an actor may enumerate at all. Value-level hiding
//! inside that set is the job of [`crate::visibility`].

use crate::models::{FamilySnapshot, FinancialRecord, User};
use crate::role::Role;
use tracing::warn;

/// Whether `candidate` is in `actor`'s visible universe
pub fn in_scope(actor: &User, candidate: &User) -> bool {
    match actor.role {
        Role::SuperAdmin | Role::Admin => true,
        Role::Manager => match (&actor.family_id, &candidate.family_id) {
            (Some(own), Some(theirs)) => own == theirs,
            _ => false,
        },
        Role::Member => actor.id == candidate.id,
        Role::Translator => false,
    }
}

/// In-scope users of a snapshot, ordered by id
pub fn scope_of<'a>(actor: &User, snapshot: &'a FamilySnapshot) -> Vec<&'a User> {
    let mut users: Vec<&User> = snapshot
        .users()
        .filter(|candidate| in_scope(actor, candidate))
        .collect();
    users.sort_by(|a, b| a.id.cmp(&b.id));
    users
}

/// Resolve the record's owner and check it against the actor's scope.
///
/// Returns the owner when in scope. Records whose owner is missing from the
/// snapshot are never in scope.
pub fn record_in_scope<'a>(
    actor: &User,
    record: &FinancialRecord,
    snapshot: &'a FamilySnapshot,
) -> Option<&'a User> {
    let Some(owner) = snapshot.get(&record.owner_id) else {
        warn!(
            record_id = %record.id,
            owner_id = %record.owner_id,
            "Record owner missing from snapshot, treating as out of scope"
        );
        return None;
    };

    if in_scope(actor, owner) {
        Some(owner)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family() -> FamilySnapshot {
        FamilySnapshot::new(vec![
            User::new("root", Role::SuperAdmin),
            User::new("admin", Role::Admin).in_family("default"),
            User::new("m1", Role::Manager).in_family("fam-a"),
            User::new("c1", Role::Member).in_family("fam-a"),
            User::new("m2", Role::Manager).in_family("fam-b"),
            User::new("c2", Role::Member).in_family("fam-b"),
            User::new("tr", Role::Translator).in_family("fam-a"),
        ])
        .unwrap()
    }

    fn ids(users: &[&User]) -> Vec<String> {
        users.iter().map(|u| u.id.to_string()).collect()
    }

    #[test]
    fn test_administrators_see_every_family() {
        let snapshot = family();
        let admin = snapshot.get(&"admin".into()).unwrap();
        assert_eq!(scope_of(admin, &snapshot).len(), snapshot.len());

        let root = snapshot.get(&"root".into()).unwrap();
        assert_eq!(scope_of(root, &snapshot).len(), snapshot.len());
    }

    #[test]
    fn test_manager_sees_own_family_only() {
        let snapshot = family();
        let m1 = snapshot.get(&"m1".into()).unwrap();
        assert_eq!(ids(&scope_of(m1, &snapshot)), vec!["c1", "m1", "tr"]);
    }

    #[test]
    fn test_manager_without_family_sees_nothing() {
        let orphan = User::new("lost", Role::Manager);
        let root = User::new("root", Role::SuperAdmin);
        assert!(!in_scope(&orphan, &root));
        assert!(!in_scope(&orphan, &orphan));
    }

    #[test]
    fn test_member_sees_only_themself() {
        let snapshot = family();
        let c1 = snapshot.get(&"c1".into()).unwrap();
        assert_eq!(ids(&scope_of(c1, &snapshot)), vec!["c1"]);
    }

    #[test]
    fn test_translator_has_no_financial_scope() {
        let snapshot = family();
        let tr = snapshot.get(&"tr".into()).unwrap();
        assert!(scope_of(tr, &snapshot).is_empty());
        assert!(!in_scope(tr, tr));
    }

    #[test]
    fn test_record_with_unknown_owner_is_out_of_scope() {
        let snapshot = family();
        let root = snapshot.get(&"root".into()).unwrap();
        let record = FinancialRecord {
            id: "t1".to_string(),
            owner_id: "ghost".into(),
            amount: rust_decimal::Decimal::ONE,
            category: "Misc".to_string(),
            kind: crate::models::RecordKind::Expense,
            date: chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            description: None,
        };
        assert!(record_in_scope(root, &record, &snapshot).is_none());
    }
}
