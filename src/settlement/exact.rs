use crate::core::member::MemberId;
use crate::core::money::Money;
use crate::settlement::greedy::greedy_match;
use crate::settlement::plan::Transfer;

/// Upper bound on non-settled members for the exact search.
///
/// The partition DP visits every submask of every mask (3^n states), which
/// is 6561 at n = 8 and cheap, but grows too fast to run unconditionally.
pub(crate) const MAX_EXACT_MEMBERS: usize = 8;

/// Exact minimal-transfer search over signed net positions.
///
/// A set of m members whose nets sum to zero can always settle internally
/// with m − 1 transfers, so the minimum for the whole group is
/// n − k, where k is the maximum number of disjoint zero-sum subsets the
/// nets can be partitioned into. The DP below computes that partition over
/// bitmasks; each mask is decomposed through the subset containing its
/// lowest set bit, which makes the enumeration canonical and the output
/// deterministic.
///
/// Returns `None` when no full partition exists (nets that do not sum to
/// exactly zero); the caller falls back to the greedy plan.
pub(crate) fn exact_plan(nets: &[(MemberId, Money)]) -> Option<Vec<Transfer>> {
    let n = nets.len();
    if n == 0 {
        return Some(Vec::new());
    }
    debug_assert!(n <= MAX_EXACT_MEMBERS);

    let full: usize = (1 << n) - 1;

    // Subset sums in minor units.
    let mut sums = vec![0i64; full + 1];
    for mask in 1..=full {
        let low = mask.trailing_zeros() as usize;
        sums[mask] = sums[mask & (mask - 1)] + nets[low].1.minor_units();
    }

    // dp[mask] = (parts, subset): the best zero-sum partition of `mask`,
    // where `subset` is the part containing the mask's lowest set bit.
    let mut dp: Vec<Option<(usize, usize)>> = vec![None; full + 1];
    dp[0] = Some((0, 0));
    for mask in 1..=full {
        let low_bit = mask & mask.wrapping_neg();
        let mut best: Option<(usize, usize)> = None;
        let mut sub = mask;
        while sub > 0 {
            if sub & low_bit != 0 && sums[sub] == 0 {
                if let Some((parts, _)) = dp[mask ^ sub] {
                    if best.map_or(true, |(b, _)| parts + 1 > b) {
                        best = Some((parts + 1, sub));
                    }
                }
            }
            sub = (sub - 1) & mask;
        }
        dp[mask] = best;
    }
    dp[full]?;

    // Walk the chosen partition and settle each zero-sum part on its own.
    let mut transfers = Vec::new();
    let mut mask = full;
    while mask != 0 {
        let (_, subset) = dp[mask]?;
        let mut creditors = Vec::new();
        let mut debtors = Vec::new();
        for (i, (member, net)) in nets.iter().enumerate() {
            if subset & (1 << i) != 0 {
                if *net > Money::ZERO {
                    creditors.push((member.clone(), *net));
                } else if *net < Money::ZERO {
                    debtors.push((member.clone(), -*net));
                }
            }
        }
        transfers.extend(greedy_match(&creditors, &debtors, Money::ZERO));
        mask ^= subset;
    }

    Some(transfers)
}
