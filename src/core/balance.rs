use crate::core::expense::{Expense, Split};
use crate::core::member::{GroupSnapshot, MemberId};
use crate::core::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate figures for one member across a set of expenses.
///
/// A positive net balance means the group owes the member money;
/// a negative net balance means the member owes the group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    member: MemberId,
    total_paid: Money,
    total_owed: Money,
    net: Money,
}

impl Balance {
    pub fn new(member: MemberId, total_paid: Money, total_owed: Money) -> Self {
        let net = total_paid - total_owed;
        Self {
            member,
            total_paid,
            total_owed,
            net,
        }
    }

    /// Build a balance from a bare net position.
    ///
    /// Convenience for callers that track only nets (e.g. when re-running
    /// the optimizer on stored positions): a positive net is recorded as
    /// paid, a negative net as owed.
    pub fn from_net(member: MemberId, net: Money) -> Self {
        if net >= Money::ZERO {
            Self::new(member, net, Money::ZERO)
        } else {
            Self::new(member, Money::ZERO, -net)
        }
    }

    pub fn member(&self) -> &MemberId {
        &self.member
    }

    /// Sum of expense totals where this member is the payer.
    pub fn total_paid(&self) -> Money {
        self.total_paid
    }

    /// Sum of this member's split amounts across all expenses.
    pub fn total_owed(&self) -> Money {
        self.total_owed
    }

    /// `total_paid - total_owed`.
    pub fn net(&self) -> Money {
        self.net
    }
}

/// Running (paid, owed) totals for one member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Position {
    paid: Money,
    owed: Money,
}

/// Accumulates expenses into per-member positions.
///
/// Every group member gets a row up front, so members with no activity
/// still emit a zero balance. The sheet is the working state of the
/// balance calculator; [`BalanceSheet::into_balances`] produces the final
/// records in ascending member-id order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceSheet {
    positions: BTreeMap<MemberId, Position>,
}

impl BalanceSheet {
    /// A sheet with a zero row for every member of the group.
    pub fn for_group(group: &GroupSnapshot) -> Self {
        let positions = group
            .members()
            .iter()
            .map(|m| (m.id().clone(), Position::default()))
            .collect();
        Self { positions }
    }

    /// Apply one expense: the payer's paid total grows by the expense
    /// amount, each split member's owed total grows by its share.
    ///
    /// The payer may appear in the splits; the two postings simply net out.
    pub fn apply_expense(&mut self, expense: &Expense, splits: &[Split]) {
        self.positions
            .entry(expense.payer().clone())
            .or_default()
            .paid += expense.amount();
        for split in splits {
            self.positions
                .entry(split.member().clone())
                .or_default()
                .owed += split.amount();
        }
    }

    /// Net position of a member (zero for unknown members).
    pub fn net(&self, member: &MemberId) -> Money {
        self.positions
            .get(member)
            .map(|p| p.paid - p.owed)
            .unwrap_or(Money::ZERO)
    }

    /// Verify conservation: the nets of all members sum to zero.
    pub fn is_balanced(&self) -> bool {
        let sum: Money = self.positions.values().map(|p| p.paid - p.owed).sum();
        sum.is_zero()
    }

    /// Sum of all positive nets. This is the total amount that has to
    /// move for the group to settle.
    pub fn total_outstanding(&self) -> Money {
        self.positions
            .values()
            .map(|p| p.paid - p.owed)
            .filter(|net| *net > Money::ZERO)
            .sum()
    }

    /// Final balance records in ascending member-id order.
    pub fn into_balances(self) -> Vec<Balance> {
        self.positions
            .into_iter()
            .map(|(member, p)| Balance::new(member, p.paid, p.owed))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::CurrencyCode;
    use crate::core::expense::{SplitEntry, SplitMethod};
    use crate::core::member::Member;

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

    fn equal_expense(payer: &str, amount: i64, members: &[&str]) -> (Expense, Vec<Split>) {
        let share = amount / members.len() as i64;
        let expense = Expense::new(
            MemberId::new(payer),
            Money::from_minor_units(amount),
            SplitMethod::Equal,
            members.iter().map(|m| SplitEntry::for_member(*m)).collect(),
        );
        let splits = members
            .iter()
            .map(|m| Split::new(MemberId::new(*m), Money::from_minor_units(share)))
            .collect();
        (expense, splits)
    }

    #[test]
    fn test_sheet_basic() {
        let mut sheet = BalanceSheet::for_group(&group());
        let (expense, splits) = equal_expense("alice", 9_000, &["alice", "bob", "carol"]);
        sheet.apply_expense(&expense, &splits);

        assert_eq!(sheet.net(&MemberId::new("alice")), Money::from_minor_units(6_000));
        assert_eq!(sheet.net(&MemberId::new("bob")), Money::from_minor_units(-3_000));
        assert!(sheet.is_balanced());
        assert_eq!(sheet.total_outstanding(), Money::from_minor_units(6_000));
    }

    #[test]
    fn test_inactive_member_gets_zero_row() {
        let mut sheet = BalanceSheet::for_group(&group());
        let (expense, splits) = equal_expense("alice", 1_000, &["alice", "bob"]);
        sheet.apply_expense(&expense, &splits);

        let balances = sheet.into_balances();
        assert_eq!(balances.len(), 3);
        let carol = &balances[2];
        assert_eq!(carol.member().as_str(), "carol");
        assert!(carol.net().is_zero());
    }

    #[test]
    fn test_balances_sorted_by_member_id() {
        let group = GroupSnapshot::new(
            vec![
                Member::new("carol", "Carol"),
                Member::new("alice", "Alice"),
                Member::new("bob", "Bob"),
            ],
            CurrencyCode::new("USD"),
        );
        let ids: Vec<String> = BalanceSheet::for_group(&group)
            .into_balances()
            .iter()
            .map(|b| b.member().as_str().to_owned())
            .collect();
        assert_eq!(ids, vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn test_payer_in_own_split_nets_out() {
        let mut sheet = BalanceSheet::for_group(&group());
        let (expense, splits) = equal_expense("alice", 3_000, &["alice", "bob", "carol"]);
        sheet.apply_expense(&expense, &splits);

        // Alice paid 3000 and owes her own 1000 share.
        assert_eq!(sheet.net(&MemberId::new("alice")), Money::from_minor_units(2_000));
    }

    #[test]
    fn test_balance_from_net() {
        let credit = Balance::from_net(MemberId::new("alice"), Money::from_minor_units(500));
        assert_eq!(credit.total_paid(), Money::from_minor_units(500));
        assert_eq!(credit.total_owed(), Money::ZERO);
        assert_eq!(credit.net(), Money::from_minor_units(500));

        let debit = Balance::from_net(MemberId::new("bob"), Money::from_minor_units(-500));
        assert_eq!(debit.total_owed(), Money::from_minor_units(500));
        assert_eq!(debit.net(), Money::from_minor_units(-500));
    }
}
