//! Record projection with amount masking applied.

use crate::models::{FamilySnapshot, FinancialRecord, RecordKind, User, UserId};
use crate::tenant::record_in_scope;
use crate::visibility::should_mask_amount;
use chrono::NaiveDate;
use error_common::{BudgetError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A record as it may be returned to the viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaskedRecord {
    pub id: String,
    pub owner_id: UserId,
    /// Zero when masked
    pub amount: Decimal,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub is_masked: bool,
}

impl MaskedRecord {
    fn from_record(record: &FinancialRecord, is_masked: bool) -> Self {
        Self {
            id: record.id.clone(),
            owner_id: record.owner_id.clone(),
            amount: if is_masked { Decimal::ZERO } else { record.amount },
            category: record.category.clone(),
            kind: record.kind,
            date: record.date,
            description: record.description.clone(),
            is_masked,
        }
    }
}

/// In-scope records for one viewer plus totals that never include hidden amounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerView {
    pub records: Vec<MaskedRecord>,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    /// The UI shows a "some data is hidden" indicator when set
    pub has_hidden_data: bool,
}

impl LedgerView {
    pub fn masked_count(&self) -> usize {
        self.records.iter().filter(|record| record.is_masked).count()
    }
}

/// Drop out-of-scope records, mask the rest per policy and total what is visible.
///
/// Fails with a validation error when the visible totals overflow `Decimal`.
pub fn build_ledger<'a>(
    viewer: &User,
    snapshot: &FamilySnapshot,
    records: impl IntoIterator<Item = &'a FinancialRecord>,
    today: NaiveDate,
    adult_age: u32,
) -> Result<LedgerView> {
    let mut view = LedgerView {
        records: Vec::new(),
        total_income: Decimal::ZERO,
        total_expense: Decimal::ZERO,
        balance: Decimal::ZERO,
        has_hidden_data: false,
    };

    for record in records {
        let Some(owner) = record_in_scope(viewer, record, snapshot) else {
            continue;
        };

        let masked = should_mask_amount(viewer, owner, today, adult_age);
        let projected = MaskedRecord::from_record(record, masked);

        let total = match projected.kind {
            RecordKind::Income => &mut view.total_income,
            RecordKind::Expense => &mut view.total_expense,
        };
        *total = total
            .checked_add(projected.amount)
            .ok_or_else(|| overflow(&projected.id))?;
        view.has_hidden_data |= masked;
        view.records.push(projected);
    }

    view.balance = view
        .total_income
        .checked_sub(view.total_expense)
        .ok_or_else(|| BudgetError::ValidationError("ledger balance overflows".to_string()))?;
    Ok(view)
}

fn overflow(record_id: &str) -> BudgetError {
    BudgetError::ValidationError(format!("ledger totals overflow at record {record_id}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn record(id: &str, owner: &str, amount: i64, kind: RecordKind) -> FinancialRecord {
        FinancialRecord {
            id: id.to_string(),
            owner_id: owner.into(),
            amount: Decimal::new(amount, 0),
            category: "General".to_string(),
            kind,
            date: today(),
            description: Some(format!("{id} note")),
        }
    }

    fn snapshot() -> FamilySnapshot {
        FamilySnapshot::new(vec![
            User::new("mom", Role::Manager).in_family("fam"),
            User::new("adult", Role::Member)
                .in_family("fam")
                .created_by(&"mom".into())
                .born_on(NaiveDate::from_ymd_opt(2000, 2, 2).unwrap()),
            User::new("kid", Role::Member)
                .in_family("fam")
                .created_by(&"mom".into())
                .born_on(NaiveDate::from_ymd_opt(2014, 2, 2).unwrap()),
            User::new("stranger", Role::Member).in_family("other"),
        ])
        .unwrap()
    }

    #[test]
    fn test_masked_amounts_are_zeroed_and_excluded_from_totals() {
        let snapshot = snapshot();
        let mom = snapshot.get(&"mom".into()).unwrap();
        let records = vec![
            record("t1", "mom", 1000, RecordKind::Income),
            record("t2", "adult", 500, RecordKind::Expense),
            record("t3", "kid", 20, RecordKind::Expense),
            record("t4", "stranger", 999, RecordKind::Income),
        ];

        let view = build_ledger(mom, &snapshot, &records, today(), 18).unwrap();

        assert_eq!(view.records.len(), 3);
        assert!(view.has_hidden_data);
        assert_eq!(view.masked_count(), 1);
        assert_eq!(view.total_income, Decimal::new(1000, 0));
        assert_eq!(view.total_expense, Decimal::new(20, 0));
        assert_eq!(view.balance, Decimal::new(980, 0));

        let hidden = view.records.iter().find(|r| r.id == "t2").unwrap();
        assert!(hidden.is_masked);
        assert_eq!(hidden.amount, Decimal::ZERO);
        assert_eq!(hidden.category, "General");
        assert_eq!(hidden.description.as_deref(), Some("t2 note"));
    }

    #[test]
    fn test_own_records_are_never_hidden() {
        let snapshot = snapshot();
        let adult = snapshot.get(&"adult".into()).unwrap();
        let records = vec![
            record("t1", "adult", 70, RecordKind::Income),
            record("t2", "mom", 10, RecordKind::Expense),
        ];

        let view = build_ledger(adult, &snapshot, &records, today(), 18).unwrap();

        assert_eq!(view.records.len(), 1);
        assert!(!view.has_hidden_data);
        assert_eq!(view.total_income, Decimal::new(70, 0));
    }

    #[test]
    fn test_overflowing_totals_are_rejected() {
        let snapshot = snapshot();
        let mom = snapshot.get(&"mom".into()).unwrap();
        let mut big = record("t1", "mom", 0, RecordKind::Income);
        big.amount = Decimal::MAX;
        let mut bigger = big.clone();
        bigger.id = "t2".to_string();

        let result = build_ledger(mom, &snapshot, [&big, &bigger], today(), 18);
        assert!(matches!(result, Err(BudgetError::ValidationError(_))));
    }

    #[test]
    fn test_balance_overflow_is_rejected() {
        let snapshot = snapshot();
        let mom = snapshot.get(&"mom".into()).unwrap();
        let mut income = record("t1", "mom", 0, RecordKind::Income);
        income.amount = Decimal::MAX;
        let mut expense = record("t2", "mom", 0, RecordKind::Expense);
        expense.amount = Decimal::MIN;

        let result = build_ledger(mom, &snapshot, [&income, &expense], today(), 18);
        assert!(matches!(result, Err(BudgetError::ValidationError(_))));
    }
}
