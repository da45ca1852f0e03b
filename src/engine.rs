use crate::core::balance::Balance;
use crate::core::currency::CurrencyCode;
use crate::core::expense::Expense;
use crate::core::member::GroupSnapshot;
use crate::error::LedgerError;
use crate::ledger::calculator::BalanceCalculator;
use crate::settlement::optimizer::SettlementOptimizer;
use crate::settlement::plan::SettlementPlan;

/// The ledger facade: the two operations the surrounding service calls.
///
/// Both are pure functions of their inputs; the engine holds no state and
/// can be invoked concurrently from independent callers. Callers own the
/// group snapshot and expense history; nothing is retained between calls.
pub struct LedgerEngine;

impl LedgerEngine {
    /// Validate every expense and fold them into per-member balances.
    ///
    /// Fails with [`LedgerError::InvalidSplit`] on the first invalid
    /// expense in input order; no partial result is returned.
    pub fn compute_balances(
        group: &GroupSnapshot,
        expenses: &[Expense],
    ) -> Result<Vec<Balance>, LedgerError> {
        BalanceCalculator::compute(group, expenses)
    }

    /// Turn net balances into a minimal transfer plan.
    ///
    /// `currency` is carried through for display only and never affects the
    /// amounts.
    ///
    /// # Examples
    ///
    /// ```
    /// use split_ledger::core::currency::CurrencyCode;
    /// use split_ledger::core::expense::{Expense, SplitEntry, SplitMethod};
    /// use split_ledger::core::member::{GroupSnapshot, Member, MemberId};
    /// use split_ledger::core::money::Money;
    /// use split_ledger::engine::LedgerEngine;
    ///
    /// let group = GroupSnapshot::new(
    ///     vec![
    ///         Member::new("alice", "Alice"),
    ///         Member::new("bob", "Bob"),
    ///         Member::new("carol", "Carol"),
    ///     ],
    ///     CurrencyCode::new("USD"),
    /// );
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
    /// let balances = LedgerEngine::compute_balances(&group, &[dinner]).unwrap();
    /// let plan = LedgerEngine::compute_settlement_plan(&balances, group.currency()).unwrap();
    ///
    /// assert_eq!(plan.transfer_count(), 2);
    /// assert!(plan.settles(&balances, Money::ZERO));
    /// ```
    pub fn compute_settlement_plan(
        balances: &[Balance],
        currency: &CurrencyCode,
    ) -> Result<SettlementPlan, LedgerError> {
        SettlementOptimizer::new().optimize(balances, currency)
    }
}
