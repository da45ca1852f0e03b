//! Remainder distribution example.
//!
//! $10.01 split three ways cannot divide evenly; the validator hands the
//! two leftover cents to the lowest member ids, so the splits always sum
//! to the total and repeated runs agree to the cent.

use rust_decimal_macros::dec;
use split_ledger::core::currency::CurrencyCode;
use split_ledger::core::expense::{Expense, SplitEntry, SplitMethod};
use split_ledger::core::member::{GroupSnapshot, Member, MemberId};
use split_ledger::core::money::Money;
use split_ledger::ledger::split::SplitValidator;

fn main() {
    let group = GroupSnapshot::new(
        vec![
            Member::new("alice", "Alice"),
            Member::new("bob", "Bob"),
            Member::new("carol", "Carol"),
        ],
        CurrencyCode::new("USD"),
    );

    println!("━━━ Equal split, $10.01 three ways ━━━\n");

    let lunch = Expense::new(
        MemberId::new("alice"),
        Money::from_minor_units(1_001),
        SplitMethod::Equal,
        vec![
            SplitEntry::for_member("alice"),
            SplitEntry::for_member("bob"),
            SplitEntry::for_member("carol"),
        ],
    );

    let splits = SplitValidator::validate(&group, &lunch).unwrap();
    for split in &splits {
        println!("  {:<8} {:>5} cents", split.member(), split.amount());
    }
    let sum: Money = splits.iter().map(|s| s.amount()).sum();
    println!("  sum: {} (total {})\n", sum, lunch.amount());

    println!("━━━ Percentage split, one third each ━━━\n");

    let third = dec!(100) / dec!(3);
    let museum = Expense::new(
        MemberId::new("bob"),
        Money::from_minor_units(1_000),
        SplitMethod::Percentage,
        vec![
            SplitEntry::with_percentage("alice", third),
            SplitEntry::with_percentage("bob", third),
            SplitEntry::with_percentage("carol", third),
        ],
    );

    let splits = SplitValidator::validate(&group, &museum).unwrap();
    for split in &splits {
        println!("  {:<8} {:>5} cents", split.member(), split.amount());
    }
    let sum: Money = splits.iter().map(|s| s.amount()).sum();
    println!("  sum: {} (total {})", sum, museum.amount());
}
