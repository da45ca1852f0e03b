use crate::core::member::MemberId;
use crate::core::money::Money;
use crate::settlement::plan::Transfer;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Heap entry for the largest-magnitude matcher.
///
/// Ordered by amount descending; ties broken by ascending member id so the
/// pop order (and therefore the emitted plan) is fully deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
struct HeapEntry {
    amount: Money,
    member: MemberId,
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.amount
            .cmp(&other.amount)
            .then_with(|| other.member.cmp(&self.member))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Match the largest creditor against the largest debtor until both sides
/// are exhausted.
///
/// `creditors` carry positive amounts owed to them, `debtors` the positive
/// magnitude of what they owe. Each round transfers
/// `min(credit, debit)` from the top debtor to the top creditor; residuals
/// above `epsilon` are pushed back. Integer comparisons only.
pub(crate) fn greedy_match(
    creditors: &[(MemberId, Money)],
    debtors: &[(MemberId, Money)],
    epsilon: Money,
) -> Vec<Transfer> {
    let mut credit_heap: BinaryHeap<HeapEntry> = creditors
        .iter()
        .map(|(member, amount)| HeapEntry {
            amount: *amount,
            member: member.clone(),
        })
        .collect();
    let mut debit_heap: BinaryHeap<HeapEntry> = debtors
        .iter()
        .map(|(member, amount)| HeapEntry {
            amount: *amount,
            member: member.clone(),
        })
        .collect();

    let mut transfers = Vec::new();

    loop {
        let (Some(credit), Some(debit)) = (credit_heap.pop(), debit_heap.pop()) else {
            break;
        };

        let amount = credit.amount.min(debit.amount);
        transfers.push(Transfer::new(
            debit.member.clone(),
            credit.member.clone(),
            amount,
        ));

        let credit_rest = credit.amount - amount;
        if credit_rest > epsilon {
            credit_heap.push(HeapEntry {
                amount: credit_rest,
                member: credit.member,
            });
        }
        let debit_rest = debit.amount - amount;
        if debit_rest > epsilon {
            debit_heap.push(HeapEntry {
                amount: debit_rest,
                member: debit.member,
            });
        }
    }

    transfers
}
