//! Random group generation utilities.
//!
//! Produces synthetic groups and expense histories to exercise the ledger
//! and the optimizer at various sizes.

use crate::core::currency::CurrencyCode;
use crate::core::expense::{Expense, SplitEntry, SplitMethod};
use crate::core::member::{GroupSnapshot, Member, MemberId};
use crate::core::money::Money;
use rand::Rng;
use rust_decimal::Decimal;

/// Configuration for generating a random group with an expense history.
#[derive(Debug, Clone)]
pub struct GroupConfig {
    /// Number of members in the group.
    pub member_count: usize,
    /// Number of expenses to generate.
    pub expense_count: usize,
    /// Display currency for the group.
    pub currency: CurrencyCode,
    /// Minimum expense amount in minor units.
    pub min_amount: i64,
    /// Maximum expense amount in minor units.
    pub max_amount: i64,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            member_count: 10,
            expense_count: 30,
            currency: CurrencyCode::new("USD"),
            min_amount: 100,
            max_amount: 1_000_000,
        }
    }
}

/// Generate a random group snapshot and expense history.
///
/// Expenses cycle through the three split methods; every generated expense
/// passes validation by construction.
pub fn generate_random_group(config: &GroupConfig) -> (GroupSnapshot, Vec<Expense>) {
    let mut rng = rand::thread_rng();

    let members: Vec<Member> = (0..config.member_count)
        .map(|i| {
            let id = format!("member-{:03}", i);
            let name = format!("Member {}", i);
            Member::new(id, name)
        })
        .collect();
    let ids: Vec<MemberId> = members.iter().map(|m| m.id().clone()).collect();

    let mut expenses = Vec::with_capacity(config.expense_count);
    for n in 0..config.expense_count {
        let payer = ids[rng.gen_range(0..ids.len())].clone();
        let amount = rng.gen_range(config.min_amount..=config.max_amount);

        // Random participant subset of at least two members.
        let mut participants: Vec<MemberId> = ids.clone();
        while participants.len() > 2 && rng.gen_bool(0.3) {
            let drop = rng.gen_range(0..participants.len());
            participants.remove(drop);
        }

        let expense = match n % 3 {
            0 => equal_expense(payer, amount, &participants),
            1 => percentage_expense(payer, amount, &participants, &mut rng),
            _ => exact_expense(payer, amount, &participants, &mut rng),
        };
        expenses.push(expense);
    }

    (GroupSnapshot::new(members, config.currency.clone()), expenses)
}

fn equal_expense(payer: MemberId, amount: i64, participants: &[MemberId]) -> Expense {
    Expense::new(
        payer,
        Money::from_minor_units(amount),
        SplitMethod::Equal,
        participants
            .iter()
            .map(|m| SplitEntry::for_member(m.clone()))
            .collect(),
    )
}

fn percentage_expense(
    payer: MemberId,
    amount: i64,
    participants: &[MemberId],
    rng: &mut impl Rng,
) -> Expense {
    // Random weights, scaled to basis points so the percentages sum to
    // exactly 100.00.
    let weights: Vec<i64> = participants.iter().map(|_| rng.gen_range(1..=100)).collect();
    let total: i64 = weights.iter().sum();

    let mut bps: Vec<i64> = weights.iter().map(|w| w * 10_000 / total).collect();
    let mut leftover = 10_000 - bps.iter().sum::<i64>();
    for share in bps.iter_mut() {
        if leftover == 0 {
            break;
        }
        *share += 1;
        leftover -= 1;
    }

    let entries = participants
        .iter()
        .zip(&bps)
        .map(|(member, &share)| {
            SplitEntry::with_percentage(member.clone(), Decimal::new(share, 2))
        })
        .collect();

    Expense::new(
        payer,
        Money::from_minor_units(amount),
        SplitMethod::Percentage,
        entries,
    )
}

fn exact_expense(
    payer: MemberId,
    amount: i64,
    participants: &[MemberId],
    rng: &mut impl Rng,
) -> Expense {
    // Random shares; the last participant absorbs the remainder.
    let mut remaining = amount;
    let mut entries = Vec::with_capacity(participants.len());
    for (i, member) in participants.iter().enumerate() {
        let share = if i + 1 == participants.len() {
            remaining
        } else {
            rng.gen_range(0..=remaining / (participants.len() - i) as i64 * 2)
                .min(remaining)
        };
        remaining -= share;
        entries.push(SplitEntry::with_amount(
            member.clone(),
            Money::from_minor_units(share),
        ));
    }

    Expense::new(
        payer,
        Money::from_minor_units(amount),
        SplitMethod::Exact,
        entries,
    )
}
