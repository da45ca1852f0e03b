//! Basic balance and settlement example.
//!
//! Walks through the reference scenario: one $90 dinner paid by Alice,
//! split equally three ways, settled in two transfers.

use split_ledger::core::currency::CurrencyCode;
use split_ledger::core::expense::{Expense, SplitEntry, SplitMethod};
use split_ledger::core::member::{GroupSnapshot, Member, MemberId};
use split_ledger::core::money::Money;
use split_ledger::engine::LedgerEngine;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  split-ledger: Basic Settlement Example  ║");
    println!("╚══════════════════════════════════════════╝\n");

    let group = GroupSnapshot::new(
        vec![
            Member::new("alice", "Alice"),
            Member::new("bob", "Bob"),
            Member::new("carol", "Carol"),
        ],
        CurrencyCode::new("USD"),
    );

    let dinner = Expense::new(
        MemberId::new("alice"),
        Money::from_minor_units(9_000),
        SplitMethod::Equal,
        vec![
            SplitEntry::for_member("alice"),
            SplitEntry::for_member("bob"),
            SplitEntry::for_member("carol"),
        ],
    )
    .with_note("dinner");

    println!("━━━ Balances ━━━\n");

    let balances = LedgerEngine::compute_balances(&group, &[dinner]).unwrap();
    for balance in &balances {
        let status = if balance.net() > Money::ZERO {
            "CREDITOR"
        } else if balance.net() < Money::ZERO {
            "DEBTOR"
        } else {
            "FLAT"
        };
        println!(
            "  {:<8} paid {:>6}  owed {:>6}  net {:>6}  [{}]",
            balance.member(),
            balance.total_paid(),
            balance.total_owed(),
            balance.net(),
            status
        );
    }

    println!("\n━━━ Settlement ━━━\n");

    let plan = LedgerEngine::compute_settlement_plan(&balances, group.currency()).unwrap();
    println!("{}", plan);

    assert!(plan.settles(&balances, Money::ZERO));
    println!("Plan verified: all balances clear.");
}
