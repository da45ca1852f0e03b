use crate::core::balance::{Balance, BalanceSheet};
use crate::core::expense::Expense;
use crate::core::member::GroupSnapshot;
use crate::error::LedgerError;
use crate::ledger::split::SplitValidator;

/// Folds a set of expenses into one balance per group member.
///
/// Each expense is validated first; the first invalid expense (in input
/// order) aborts the computation and nothing partial is returned. For
/// well-formed input the fold is a single linear pass and cannot fail.
pub struct BalanceCalculator;

impl BalanceCalculator {
    /// Compute per-member balances for a group's expense history.
    ///
    /// Every group member appears in the result, inactive members with a
    /// zero balance. Results are ordered by ascending member id.
    ///
    /// # Examples
    ///
    /// ```
    /// use split_ledger::core::currency::CurrencyCode;
    /// use split_ledger::core::expense::{Expense, SplitEntry, SplitMethod};
    /// use split_ledger::core::member::{GroupSnapshot, Member, MemberId};
    /// use split_ledger::core::money::Money;
    /// use split_ledger::ledger::calculator::BalanceCalculator;
    ///
    /// let group = GroupSnapshot::new(
    ///     vec![Member::new("alice", "Alice"), Member::new("bob", "Bob")],
    ///     CurrencyCode::new("USD"),
    /// );
    /// let lunch = Expense::new(
    ///     MemberId::new("alice"),
    ///     Money::from_minor_units(2_000),
    ///     SplitMethod::Equal,
    ///     vec![SplitEntry::for_member("alice"), SplitEntry::for_member("bob")],
    /// );
    ///
    /// let balances = BalanceCalculator::compute(&group, &[lunch]).unwrap();
    /// assert_eq!(balances[0].net(), Money::from_minor_units(1_000));
    /// assert_eq!(balances[1].net(), Money::from_minor_units(-1_000));
    /// ```
    pub fn compute(
        group: &GroupSnapshot,
        expenses: &[Expense],
    ) -> Result<Vec<Balance>, LedgerError> {
        let mut sheet = BalanceSheet::for_group(group);
        for expense in expenses {
            let splits = SplitValidator::validate(group, expense)?;
            sheet.apply_expense(expense, &splits);
        }
        // Split sums equal expense totals, so conservation holds by construction.
        debug_assert!(sheet.is_balanced());
        Ok(sheet.into_balances())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::CurrencyCode;
    use crate::core::expense::{SplitEntry, SplitMethod};
    use crate::core::member::{Member, MemberId};
    use crate::core::money::Money;
    use rust_decimal_macros::dec;

    fn group() -> GroupSnapshot {
        GroupSnapshot::new(
            vec![
                Member::new("alice", "Alice"),
                Member::new("bob", "Bob"),
                Member::new("carol", "Carol"),
            ],
            CurrencyCode::new("USD"),
        )
    }

    #[test]
    fn test_single_equal_expense() {
        // $90 paid by alice, split three ways.
        let expense = Expense::new(
            MemberId::new("alice"),
            Money::from_minor_units(9_000),
            SplitMethod::Equal,
            vec![
                SplitEntry::for_member("alice"),
                SplitEntry::for_member("bob"),
                SplitEntry::for_member("carol"),
            ],
        );
        let balances = BalanceCalculator::compute(&group(), &[expense]).unwrap();

        assert_eq!(balances.len(), 3);
        assert_eq!(balances[0].net(), Money::from_minor_units(6_000));
        assert_eq!(balances[1].net(), Money::from_minor_units(-3_000));
        assert_eq!(balances[2].net(), Money::from_minor_units(-3_000));
        assert_eq!(balances[0].total_paid(), Money::from_minor_units(9_000));
        assert_eq!(balances[0].total_owed(), Money::from_minor_units(3_000));
    }

    #[test]
    fn test_mixed_methods_accumulate() {
        let dinner = Expense::new(
            MemberId::new("alice"),
            Money::from_minor_units(6_000),
            SplitMethod::Equal,
            vec![
                SplitEntry::for_member("alice"),
                SplitEntry::for_member("bob"),
                SplitEntry::for_member("carol"),
            ],
        );
        let taxi = Expense::new(
            MemberId::new("bob"),
            Money::from_minor_units(3_000),
            SplitMethod::Percentage,
            vec![
                SplitEntry::with_percentage("alice", dec!(50)),
                SplitEntry::with_percentage("bob", dec!(50)),
            ],
        );
        let tickets = Expense::new(
            MemberId::new("carol"),
            Money::from_minor_units(1_000),
            SplitMethod::Exact,
            vec![
                SplitEntry::with_amount("bob", Money::from_minor_units(400)),
                SplitEntry::with_amount("carol", Money::from_minor_units(600)),
            ],
        );

        let balances = BalanceCalculator::compute(&group(), &[dinner, taxi, tickets]).unwrap();

        // alice: paid 6000, owes 2000 + 1500          -> +2500
        // bob:   paid 3000, owes 2000 + 1500 + 400    -> - 900
        // carol: paid 1000, owes 2000 + 600           -> -1600
        assert_eq!(balances[0].net(), Money::from_minor_units(2_500));
        assert_eq!(balances[1].net(), Money::from_minor_units(-900));
        assert_eq!(balances[2].net(), Money::from_minor_units(-1_600));

        let sum: Money = balances.iter().map(|b| b.net()).sum();
        assert!(sum.is_zero());
    }

    #[test]
    fn test_first_invalid_expense_aborts() {
        let good = Expense::new(
            MemberId::new("alice"),
            Money::from_minor_units(1_000),
            SplitMethod::Equal,
            vec![SplitEntry::for_member("bob")],
        );
        let bad = Expense::new(
            MemberId::new("alice"),
            Money::from_minor_units(1_000),
            SplitMethod::Equal,
            vec![SplitEntry::for_member("mallory")],
        );
        let bad_id = bad.id();

        let err = BalanceCalculator::compute(&group(), &[good, bad]).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InvalidSplit { expense_id, .. } if expense_id == bad_id
        ));
    }

    #[test]
    fn test_no_expenses_all_zero() {
        let balances = BalanceCalculator::compute(&group(), &[]).unwrap();
        assert_eq!(balances.len(), 3);
        assert!(balances.iter().all(|b| b.net().is_zero()));
    }
}
