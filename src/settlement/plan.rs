use crate::core::balance::Balance;
use crate::core::currency::CurrencyCode;
use crate::core::member::MemberId;
use crate::core::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One settlement payment: `from` pays `to` the given amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    from: MemberId,
    to: MemberId,
    amount: Money,
}

impl Transfer {
    /// Create a transfer.
    ///
    /// # Panics
    ///
    /// Panics if `amount` is not positive or the two parties are the same.
    pub fn new(from: MemberId, to: MemberId, amount: Money) -> Self {
        assert!(
            amount > Money::ZERO,
            "Transfer amount must be positive, got {}",
            amount
        );
        assert!(from != to, "Transfer endpoints must differ, got {}", from);
        Self { from, to, amount }
    }

    pub fn from(&self) -> &MemberId {
        &self.from
    }

    pub fn to(&self) -> &MemberId {
        &self.to
    }

    pub fn amount(&self) -> Money {
        self.amount
    }
}

/// An ordered sequence of transfers that clears a set of net balances.
///
/// Plans are produced by the settlement optimizer; executing every transfer
/// drives all source balances to (within ε of) zero. The currency is the
/// group's display label and has no effect on the amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementPlan {
    currency: CurrencyCode,
    transfers: Vec<Transfer>,
}

impl SettlementPlan {
    pub(crate) fn new(currency: CurrencyCode, transfers: Vec<Transfer>) -> Self {
        Self {
            currency,
            transfers,
        }
    }

    /// A plan with no transfers (already settled group).
    pub fn empty(currency: CurrencyCode) -> Self {
        Self::new(currency, Vec::new())
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    pub fn transfer_count(&self) -> usize {
        self.transfers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }

    /// Total amount moved by the plan.
    pub fn total_volume(&self) -> Money {
        self.transfers.iter().map(|t| t.amount()).sum()
    }

    /// Number of distinct members that appear in the plan.
    pub fn participant_count(&self) -> usize {
        let mut members: BTreeSet<&MemberId> = BTreeSet::new();
        for t in &self.transfers {
            members.insert(t.from());
            members.insert(t.to());
        }
        members.len()
    }

    /// How far below the n − 1 worst case the plan landed, as a percentage.
    ///
    /// A chain of n members settled with n − 1 transfers scores 0; a plan
    /// that splits into independent zero-sum components needs fewer
    /// transfers and scores higher.
    pub fn compression_percent(&self) -> f64 {
        let participants = self.participant_count();
        if participants <= 1 {
            return 0.0;
        }
        let worst = (participants - 1) as f64;
        (worst - self.transfer_count() as f64) / worst * 100.0
    }

    /// Verify the plan against the balances it was computed from: after
    /// applying every transfer, each member's net must be within `epsilon`
    /// of zero.
    pub fn settles(&self, balances: &[Balance], epsilon: Money) -> bool {
        let mut nets: BTreeMap<&MemberId, Money> =
            balances.iter().map(|b| (b.member(), b.net())).collect();

        for t in &self.transfers {
            let Some(from_net) = nets.get_mut(t.from()) else {
                return false;
            };
            *from_net += t.amount();
            let Some(to_net) = nets.get_mut(t.to()) else {
                return false;
            };
            *to_net -= t.amount();
        }

        nets.values().all(|net| net.abs() <= epsilon.abs())
    }
}

impl std::fmt::Display for SettlementPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Settlement Plan ({}) ===", self.currency)?;
        writeln!(f, "Transfers: {}", self.transfer_count())?;
        writeln!(f, "Volume:    {}", self.total_volume())?;
        for t in &self.transfers {
            writeln!(f, "  {} -> {}  {}", t.from(), t.to(), t.amount())?;
        }
        Ok(())
    }
}
