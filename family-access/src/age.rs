//! Age derivation for the visibility policy.

use crate::models::User;
use chrono::NaiveDate;

/// Whole years between `birth_date` and `today`, as `floor(days / 365.25)`.
///
/// Computed as `floor(days * 4 / 1461)` so no float rounding is involved.
/// A birth date after `today` gives a negative age.
pub fn age_in_years(birth_date: NaiveDate, today: NaiveDate) -> i64 {
    let days = today.signed_duration_since(birth_date).num_days();
    days.saturating_mul(4).div_euclid(1461)
}

/// Users without a birth date count as adults.
pub fn is_minor(user: &User, today: NaiveDate, adult_age: u32) -> bool {
    match user.birth_date {
        Some(birth_date) => age_in_years(birth_date, today) < i64::from(adult_age),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_matches_quarter_day_year() {
        assert_eq!(age_in_years(date(2000, 1, 1), date(2000, 1, 1)), 0);
        assert_eq!(age_in_years(date(2000, 1, 1), date(2018, 1, 1)), 18);
        assert_eq!(age_in_years(date(1990, 6, 15), date(2026, 10, 19)), 36);
    }

    #[test]
    fn test_day_before_eighteenth_birthday_is_minor() {
        let user = User::new("kid", Role::Member).born_on(date(2008, 10, 20));
        assert!(is_minor(&user, date(2026, 10, 19), 18));
        assert!(!is_minor(&user, date(2026, 10, 21), 18));
    }

    #[test]
    fn test_future_birth_date_is_minor() {
        assert_eq!(age_in_years(date(2030, 1, 1), date(2026, 1, 1)), -4);
        let user = User::new("odd", Role::Member).born_on(date(2030, 1, 1));
        assert!(is_minor(&user, date(2026, 1, 1), 18));
    }

    #[test]
    fn test_missing_birth_date_is_adult() {
        let user = User::new("u", Role::Member);
        assert!(!is_minor(&user, date(2026, 1, 1), 18));
    }
}
