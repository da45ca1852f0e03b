//! # split-ledger
//!
//! Group expense ledger with deterministic settlement optimization.
//!
//! Given a group of members and their shared expenses, this crate computes
//! per-member net balances and a minimal set of peer-to-peer transfers that
//! settles everyone up. All amounts are integer minor currency units; every
//! operation is a pure function of its inputs.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: members, money, currency, expenses, balances
//! - **ledger** — Split validation and balance aggregation
//! - **settlement** — Greedy transfer matching plus exact search for small groups
//! - **engine** — The facade the surrounding service layer calls
//! - **simulation** — Random group generation for benches and testing

pub mod core;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod settlement;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::balance::Balance;
    pub use crate::core::currency::CurrencyCode;
    pub use crate::core::expense::{Expense, Split, SplitEntry, SplitMethod};
    pub use crate::core::member::{GroupSnapshot, Member, MemberId};
    pub use crate::core::money::Money;
    pub use crate::engine::LedgerEngine;
    pub use crate::error::LedgerError;
    pub use crate::settlement::optimizer::SettlementOptimizer;
    pub use crate::settlement::plan::{SettlementPlan, Transfer};
}
