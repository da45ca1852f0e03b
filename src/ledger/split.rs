use crate::core::expense::{Expense, Split, SplitEntry, SplitMethod};
use crate::core::member::{GroupSnapshot, MemberId};
use crate::core::money::Money;
use crate::error::{LedgerError, SplitViolation};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashSet;

/// Validates and normalizes one expense's split allocation.
///
/// The validator is the only producer of finalized [`Split`]s. Whatever the
/// declared method, the amounts of the returned splits sum exactly to the
/// expense total; rounding remainders are distributed one minor unit at a
/// time to members in ascending member-id order, so the result is identical
/// across runs and across input orderings.
pub struct SplitValidator;

impl SplitValidator {
    /// Validate an expense against its group and produce finalized splits.
    ///
    /// Fails with [`LedgerError::InvalidSplit`] if the splits reference a
    /// member outside the group, name a member twice, carry a negative or
    /// missing amount/percentage, or do not reconcile with the declared
    /// method and total.
    pub fn validate(group: &GroupSnapshot, expense: &Expense) -> Result<Vec<Split>, LedgerError> {
        let fail = |violation| Err(LedgerError::invalid_split(expense.id(), violation));

        if !group.contains(expense.payer()) {
            return fail(SplitViolation::UnknownMember(expense.payer().clone()));
        }

        let entries = expense.splits();
        if entries.is_empty() {
            if expense.amount().is_zero() {
                return Ok(Vec::new());
            }
            return fail(SplitViolation::Empty);
        }

        let mut seen: HashSet<&MemberId> = HashSet::with_capacity(entries.len());
        for entry in entries {
            if !group.contains(entry.member()) {
                return fail(SplitViolation::UnknownMember(entry.member().clone()));
            }
            if !seen.insert(entry.member()) {
                return fail(SplitViolation::DuplicateMember(entry.member().clone()));
            }
        }

        match expense.method() {
            SplitMethod::Equal => Self::equal_splits(expense),
            SplitMethod::Percentage => Self::percentage_splits(expense),
            SplitMethod::Exact => Self::exact_splits(expense),
        }
    }

    /// Equal division with deterministic remainder placement.
    fn equal_splits(expense: &Expense) -> Result<Vec<Split>, LedgerError> {
        let entries = expense.splits();
        let total = expense.amount().minor_units();
        let count = entries.len() as i64;

        let base = total / count;
        let remainder = (total % count) as usize;

        let mut amounts = vec![base; entries.len()];
        for &idx in id_order(entries).iter().take(remainder) {
            amounts[idx] += 1;
        }

        Ok(finalize(entries, &amounts))
    }

    /// Percentage shares, floored to minor units and reconciled to the total.
    fn percentage_splits(expense: &Expense) -> Result<Vec<Split>, LedgerError> {
        let fail = |violation| Err(LedgerError::invalid_split(expense.id(), violation));
        let entries = expense.splits();

        let mut percentages = Vec::with_capacity(entries.len());
        for entry in entries {
            let Some(pct) = entry.percentage() else {
                return fail(SplitViolation::MissingPercentage(entry.member().clone()));
            };
            if pct < Decimal::ZERO {
                return fail(SplitViolation::NegativePercentage {
                    member: entry.member().clone(),
                    percentage: pct,
                });
            }
            percentages.push(pct);
        }

        let sum: Decimal = percentages.iter().sum();
        if (sum - dec!(100)).abs() > dec!(0.01) {
            return fail(SplitViolation::PercentageSum { sum });
        }

        let total = expense.amount().minor_units();
        let mut amounts: Vec<i64> = percentages
            .iter()
            .map(|pct| {
                (Decimal::from(total) * pct / dec!(100))
                    .floor()
                    .to_i64()
                    .unwrap_or(0)
            })
            .collect();
        reconcile(&mut amounts, total, &id_order(entries));

        Ok(finalize(entries, &amounts))
    }

    /// Explicit amounts, which must already sum to the total.
    fn exact_splits(expense: &Expense) -> Result<Vec<Split>, LedgerError> {
        let fail = |violation| Err(LedgerError::invalid_split(expense.id(), violation));
        let entries = expense.splits();

        let mut amounts = Vec::with_capacity(entries.len());
        for entry in entries {
            let Some(amount) = entry.amount() else {
                return fail(SplitViolation::MissingAmount(entry.member().clone()));
            };
            if amount < Money::ZERO {
                return fail(SplitViolation::NegativeAmount {
                    member: entry.member().clone(),
                    amount,
                });
            }
            amounts.push(amount.minor_units());
        }

        let sum: i64 = amounts.iter().sum();
        if sum != expense.amount().minor_units() {
            return fail(SplitViolation::AmountSum {
                sum: Money::from_minor_units(sum),
                total: expense.amount(),
            });
        }

        Ok(finalize(entries, &amounts))
    }
}

/// Entry indices ranked by ascending member id.
fn id_order(entries: &[SplitEntry]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..entries.len()).collect();
    order.sort_by(|&a, &b| entries[a].member().cmp(entries[b].member()));
    order
}

/// Adjust floored shares one minor unit at a time, cycling members in
/// ascending-id order, until they sum exactly to `total`. Subtractions skip
/// members already at zero so no share goes negative.
fn reconcile(amounts: &mut [i64], total: i64, order: &[usize]) {
    let mut diff = total - amounts.iter().sum::<i64>();
    let mut cursor = 0;
    while diff != 0 {
        let idx = order[cursor % order.len()];
        if diff > 0 {
            amounts[idx] += 1;
            diff -= 1;
        } else if amounts[idx] > 0 {
            amounts[idx] -= 1;
            diff += 1;
        }
        cursor += 1;
    }
}

/// Pair entries with their finalized amounts, preserving caller order.
fn finalize(entries: &[SplitEntry], amounts: &[i64]) -> Vec<Split> {
    entries
        .iter()
        .zip(amounts)
        .map(|(entry, &amount)| Split::new(entry.member().clone(), Money::from_minor_units(amount)))
        .collect()
}
