//! Amount visibility policy.
//!
//! Inside an actor's scope, an amount is either shown or masked:
//!
//! - a user always sees their own amounts;
//! - a minor's amounts are visible to every in-scope viewer;
//! - an adult's amounts are visible only to the account that created them,
//!   and only while the adult has `allow_parent_view` switched on.

use crate::age::is_minor;
use crate::models::User;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Outcome of an amount lookup through the façade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AmountVisibility {
    Visible,
    Masked,
    /// The viewer may not enumerate the owner at all
    OutOfScope,
}

/// Whether `owner`'s amounts must be hidden from `viewer`.
///
/// Callers are expected to have checked scope already. Self-views are
/// answered before the policy runs.
pub fn should_mask_amount(viewer: &User, owner: &User, today: NaiveDate, adult_age: u32) -> bool {
    if viewer.is_same_user(owner) {
        return false;
    }

    if is_minor(owner, today, adult_age) {
        return false;
    }

    let viewer_is_creator = owner.created_by.as_ref() == Some(&viewer.id);
    !(viewer_is_creator && owner.allow_parent_view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;

    const ADULT_AGE: u32 = 18;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn parent() -> User {
        User::new("parent", Role::Manager).in_family("fam")
    }

    fn child(birth_year: i32, allow_parent_view: bool) -> User {
        User::new("child", Role::Member)
            .in_family("fam")
            .created_by(&"parent".into())
            .born_on(NaiveDate::from_ymd_opt(birth_year, 1, 1).unwrap())
            .allowing_parent_view(allow_parent_view)
    }

    #[test]
    fn test_self_is_never_masked() {
        let adult = child(1990, false);
        assert!(!should_mask_amount(&adult, &adult, today(), ADULT_AGE));
    }

    #[test]
    fn test_minor_is_visible_regardless_of_consent() {
        let sibling = User::new("sibling", Role::Manager).in_family("fam");
        for allow in [true, false] {
            let kid = child(2011, allow);
            assert!(!should_mask_amount(&parent(), &kid, today(), ADULT_AGE));
            assert!(!should_mask_amount(&sibling, &kid, today(), ADULT_AGE));
        }
    }

    #[test]
    fn test_adult_child_masked_from_creator_without_consent() {
        assert!(should_mask_amount(&parent(), &child(2004, false), today(), ADULT_AGE));
        assert!(!should_mask_amount(&parent(), &child(2004, true), today(), ADULT_AGE));
    }

    #[test]
    fn test_adult_masked_from_non_creator_even_with_consent() {
        let admin = User::new("admin", Role::Admin);
        assert!(should_mask_amount(&admin, &child(2004, true), today(), ADULT_AGE));
        assert!(should_mask_amount(&admin, &child(2004, false), today(), ADULT_AGE));
    }

    #[test]
    fn test_owner_without_birth_date_is_treated_as_adult() {
        let grown = User::new("grown", Role::Member)
            .in_family("fam")
            .created_by(&"parent".into());
        assert!(should_mask_amount(&parent(), &grown, today(), ADULT_AGE));
    }
}
