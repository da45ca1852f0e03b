use crate::core::member::MemberId;
use crate::core::money::Money;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How an expense's total is allocated across its participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMethod {
    /// Total divided evenly, remainder distributed one minor unit at a time.
    Equal,
    /// Each entry carries a percentage; percentages must sum to 100.
    Percentage,
    /// Each entry carries an explicit amount; amounts must sum to the total.
    Exact,
}

/// One raw allocation entry as supplied by the caller.
///
/// Which fields are required depends on the declared [`SplitMethod`]:
/// `Equal` needs only the member, `Percentage` needs `percentage`,
/// `Exact` needs `amount`. The split validator turns entries into
/// finalized [`Split`]s or rejects the expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitEntry {
    member: MemberId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    amount: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    percentage: Option<Decimal>,
}

impl SplitEntry {
    /// Entry for an equal split: just the participating member.
    pub fn for_member(member: impl Into<MemberId>) -> Self {
        Self {
            member: member.into(),
            amount: None,
            percentage: None,
        }
    }

    /// Entry carrying an explicit amount (for [`SplitMethod::Exact`]).
    pub fn with_amount(member: impl Into<MemberId>, amount: Money) -> Self {
        Self {
            member: member.into(),
            amount: Some(amount),
            percentage: None,
        }
    }

    /// Entry carrying a percentage of the total (for [`SplitMethod::Percentage`]).
    pub fn with_percentage(member: impl Into<MemberId>, percentage: Decimal) -> Self {
        Self {
            member: member.into(),
            amount: None,
            percentage: Some(percentage),
        }
    }

    pub fn member(&self) -> &MemberId {
        &self.member
    }

    pub fn amount(&self) -> Option<Money> {
        self.amount
    }

    pub fn percentage(&self) -> Option<Decimal> {
        self.percentage
    }
}

/// A finalized allocation: the share of one expense owed by one member.
///
/// Splits are only produced by the split validator, which guarantees that
/// the amounts of an expense's splits sum exactly to the expense total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    member: MemberId,
    amount: Money,
}

impl Split {
    pub(crate) fn new(member: MemberId, amount: Money) -> Self {
        Self { member, amount }
    }

    pub fn member(&self) -> &MemberId {
        &self.member
    }

    pub fn amount(&self) -> Money {
        self.amount
    }
}

/// A single shared expense: who paid, how much, and how it is divided.
///
/// Expenses are immutable once created. The ledger operates on collections
/// of expenses to compute per-member balances.
///
/// # Examples
///
/// ```
/// use split_ledger::core::expense::{Expense, SplitEntry, SplitMethod};
/// use split_ledger::core::member::MemberId;
/// use split_ledger::core::money::Money;
///
/// let dinner = Expense::new(
///     MemberId::new("alice"),
///     Money::from_minor_units(9_000),
///     SplitMethod::Equal,
///     vec![
///         SplitEntry::for_member("alice"),
///         SplitEntry::for_member("bob"),
///         SplitEntry::for_member("carol"),
///     ],
/// );
///
/// assert_eq!(dinner.amount(), Money::from_minor_units(9_000));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier for this expense.
    id: Uuid,
    /// The member who paid the full amount up front.
    payer: MemberId,
    /// Total amount in minor units. Must be non-negative.
    amount: Money,
    /// The declared split method.
    method: SplitMethod,
    /// Raw allocation entries, in caller order.
    splits: Vec<SplitEntry>,
    /// When this expense was recorded.
    created_at: DateTime<Utc>,
    /// Optional free-form note.
    note: Option<String>,
}

impl Expense {
    /// Create a new expense.
    ///
    /// # Panics
    ///
    /// Panics if `amount` is negative.
    pub fn new(
        payer: MemberId,
        amount: Money,
        method: SplitMethod,
        splits: Vec<SplitEntry>,
    ) -> Self {
        assert!(
            amount >= Money::ZERO,
            "Expense amount must be non-negative, got {}",
            amount
        );
        Self {
            id: Uuid::new_v4(),
            payer,
            amount,
            method,
            splits,
            created_at: Utc::now(),
            note: None,
        }
    }

    /// Create an expense with a specific id (useful for testing / determinism).
    pub fn with_id(
        id: Uuid,
        payer: MemberId,
        amount: Money,
        method: SplitMethod,
        splits: Vec<SplitEntry>,
    ) -> Self {
        assert!(amount >= Money::ZERO);
        Self {
            id,
            payer,
            amount,
            method,
            splits,
            created_at: Utc::now(),
            note: None,
        }
    }

    /// Set a note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn payer(&self) -> &MemberId {
        &self.payer
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn method(&self) -> SplitMethod {
        self.method
    }

    pub fn splits(&self) -> &[SplitEntry] {
        &self.splits
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_expense() -> Expense {
        Expense::new(
            MemberId::new("alice"),
            Money::from_minor_units(3_000),
            SplitMethod::Equal,
            vec![
                SplitEntry::for_member("alice"),
                SplitEntry::for_member("bob"),
            ],
        )
    }

    #[test]
    fn test_expense_creation() {
        let e = sample_expense();
        assert_eq!(e.payer().as_str(), "alice");
        assert_eq!(e.amount(), Money::from_minor_units(3_000));
        assert_eq!(e.method(), SplitMethod::Equal);
        assert_eq!(e.splits().len(), 2);
        assert!(e.note().is_none());
    }

    #[test]
    #[should_panic(expected = "must be non-negative")]
    fn test_expense_negative_amount() {
        Expense::new(
            MemberId::new("alice"),
            Money::from_minor_units(-100),
            SplitMethod::Equal,
            vec![SplitEntry::for_member("alice")],
        );
    }

    #[test]
    fn test_zero_amount_allowed() {
        let e = Expense::new(
            MemberId::new("alice"),
            Money::ZERO,
            SplitMethod::Equal,
            vec![SplitEntry::for_member("alice")],
        );
        assert!(e.amount().is_zero());
    }

    #[test]
    fn test_expense_note() {
        let e = sample_expense().with_note("dinner");
        assert_eq!(e.note(), Some("dinner"));
    }

    #[test]
    fn test_split_method_serde_names() {
        assert_eq!(
            serde_json::to_string(&SplitMethod::Percentage).unwrap(),
            "\"percentage\""
        );
        assert_eq!(
            serde_json::from_str::<SplitMethod>("\"equal\"").unwrap(),
            SplitMethod::Equal
        );
    }
}
