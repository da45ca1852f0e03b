//! split-ledger CLI
//!
//! Compute balances and settlement plans from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Per-member balances for a group file
//! split-ledger balances --input group.json
//!
//! # Balances plus a minimal settlement plan, as JSON
//! split-ledger settle --input group.json --format json
//!
//! # Generate a random group for testing
//! split-ledger generate --members 10 --expenses 30
//! ```

use rust_decimal::Decimal;
use split_ledger::core::balance::Balance;
use split_ledger::core::currency::CurrencyCode;
use split_ledger::core::expense::{Expense, SplitEntry, SplitMethod};
use split_ledger::core::member::{GroupSnapshot, Member, MemberId};
use split_ledger::core::money::Money;
use split_ledger::engine::LedgerEngine;
use split_ledger::simulation::generator::{generate_random_group, GroupConfig};
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"split-ledger — group expense ledger with deterministic settlement optimization

USAGE:
    split-ledger <COMMAND> [OPTIONS]

COMMANDS:
    balances    Compute per-member balances for a group
    settle      Compute balances and a minimal settlement plan
    generate    Generate a random group file (for testing)
    help        Show this message

OPTIONS (balances, settle):
    --input <FILE>      Path to JSON group file
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (generate):
    --members <N>       Number of members (default: 10)
    --expenses <N>      Number of expenses (default: 30)
    --currency <CODE>   Display currency (default: USD)
    --output <FILE>     Write to file instead of stdout

EXAMPLES:
    split-ledger balances --input group.json
    split-ledger settle --input group.json --format json
    split-ledger generate --members 5 --expenses 20 --output group.json"#
    );
}

/// JSON schema for input group files. Amounts are integer minor units.
#[derive(serde::Deserialize)]
struct GroupFile {
    #[serde(default = "default_currency")]
    currency: String,
    members: Vec<MemberInput>,
    #[serde(default)]
    expenses: Vec<ExpenseInput>,
}

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(serde::Deserialize)]
struct MemberInput {
    id: String,
    #[serde(default)]
    name: Option<String>,
}

#[derive(serde::Deserialize)]
struct ExpenseInput {
    payer: String,
    amount: i64,
    method: String,
    splits: Vec<SplitInput>,
}

#[derive(serde::Deserialize)]
struct SplitInput {
    member: String,
    #[serde(default)]
    amount: Option<i64>,
    #[serde(default)]
    percentage: Option<String>,
}

/// JSON output schema for settlement runs.
#[derive(serde::Serialize)]
struct SettleOutput {
    currency: String,
    balances: Vec<BalanceOutput>,
    plan: PlanOutput,
}

#[derive(serde::Serialize)]
struct BalanceOutput {
    member: String,
    total_paid: i64,
    total_owed: i64,
    net: i64,
    status: String,
}

#[derive(serde::Serialize)]
struct PlanOutput {
    transfer_count: usize,
    total_volume: i64,
    transfers: Vec<TransferOutput>,
}

#[derive(serde::Serialize)]
struct TransferOutput {
    from: String,
    to: String,
    amount: i64,
}

fn parse_method(method: &str) -> SplitMethod {
    match method {
        "equal" => SplitMethod::Equal,
        "percentage" => SplitMethod::Percentage,
        "exact" => SplitMethod::Exact,
        other => {
            eprintln!("Unknown split method '{}': expected equal, percentage or exact", other);
            process::exit(1);
        }
    }
}

fn load_group(path: &str) -> (GroupSnapshot, Vec<Expense>) {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    let file: GroupFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "currency": "USD",
  "members": [ {{ "id": "alice", "name": "Alice" }} ],
  "expenses": [
    {{
      "payer": "alice", "amount": 9000, "method": "equal",
      "splits": [ {{ "member": "alice" }}, {{ "member": "bob" }} ]
    }}
  ]
}}"#
        );
        process::exit(1);
    });

    let members: Vec<Member> = file
        .members
        .into_iter()
        .map(|m| {
            let name = m.name.unwrap_or_else(|| m.id.clone());
            Member::new(m.id, name)
        })
        .collect();

    let mut expenses = Vec::with_capacity(file.expenses.len());
    for input in file.expenses {
        let method = parse_method(&input.method);
        let splits = input
            .splits
            .into_iter()
            .map(|s| {
                let member = MemberId::new(s.member);
                match (s.amount, s.percentage) {
                    (Some(amount), _) => {
                        SplitEntry::with_amount(member, Money::from_minor_units(amount))
                    }
                    (None, Some(pct)) => {
                        let percentage: Decimal = pct.parse().unwrap_or_else(|e| {
                            eprintln!("Invalid percentage '{}': {}", pct, e);
                            process::exit(1);
                        });
                        SplitEntry::with_percentage(member, percentage)
                    }
                    (None, None) => SplitEntry::for_member(member),
                }
            })
            .collect();

        if input.amount < 0 {
            eprintln!("Expense amount must be non-negative, got {}", input.amount);
            process::exit(1);
        }
        expenses.push(Expense::new(
            MemberId::new(input.payer),
            Money::from_minor_units(input.amount),
            method,
            splits,
        ));
    }

    let group = GroupSnapshot::new(members, CurrencyCode::new(file.currency));
    log::info!(
        "loaded group: {} members, {} expenses",
        group.len(),
        expenses.len()
    );
    (group, expenses)
}

fn parse_io_options(args: &[String]) -> (String, String) {
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });
    (path, format)
}

fn balance_outputs(balances: &[Balance]) -> Vec<BalanceOutput> {
    balances
        .iter()
        .map(|b| BalanceOutput {
            member: b.member().to_string(),
            total_paid: b.total_paid().minor_units(),
            total_owed: b.total_owed().minor_units(),
            net: b.net().minor_units(),
            status: if b.net() > Money::ZERO {
                "CREDITOR".to_string()
            } else if b.net() < Money::ZERO {
                "DEBTOR".to_string()
            } else {
                "SETTLED".to_string()
            },
        })
        .collect()
}

fn print_balances_text(currency: &CurrencyCode, balances: &[Balance]) {
    println!("=== Balances ({}) ===", currency);
    for b in balances {
        let status = if b.net() > Money::ZERO {
            "CREDITOR"
        } else if b.net() < Money::ZERO {
            "DEBTOR"
        } else {
            "SETTLED"
        };
        println!(
            "  {:<16} paid {:>10}  owed {:>10}  net {:>10}  [{}]",
            b.member(),
            b.total_paid(),
            b.total_owed(),
            b.net(),
            status
        );
    }
}

fn cmd_balances(args: &[String]) {
    let (path, format) = parse_io_options(args);
    let (group, expenses) = load_group(&path);

    let balances = LedgerEngine::compute_balances(&group, &expenses).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    if format == "json" {
        let output = balance_outputs(&balances);
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
    } else {
        print_balances_text(group.currency(), &balances);
    }
}

fn cmd_settle(args: &[String]) {
    let (path, format) = parse_io_options(args);
    let (group, expenses) = load_group(&path);

    let balances = LedgerEngine::compute_balances(&group, &expenses).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });
    let plan = LedgerEngine::compute_settlement_plan(&balances, group.currency())
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        });
    log::debug!(
        "plan: {} transfers, volume {}",
        plan.transfer_count(),
        plan.total_volume()
    );

    if format == "json" {
        let output = SettleOutput {
            currency: group.currency().to_string(),
            balances: balance_outputs(&balances),
            plan: PlanOutput {
                transfer_count: plan.transfer_count(),
                total_volume: plan.total_volume().minor_units(),
                transfers: plan
                    .transfers()
                    .iter()
                    .map(|t| TransferOutput {
                        from: t.from().to_string(),
                        to: t.to().to_string(),
                        amount: t.amount().minor_units(),
                    })
                    .collect(),
            },
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
    } else {
        print_balances_text(group.currency(), &balances);
        println!();
        println!("{}", plan);
    }
}

fn cmd_generate(args: &[String]) {
    let mut members = 10usize;
    let mut expenses = 30usize;
    let mut currency = "USD".to_string();
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--members" => {
                i += 1;
                members = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--members requires a number");
                    process::exit(1);
                });
            }
            "--expenses" => {
                i += 1;
                expenses = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--expenses requires a number");
                    process::exit(1);
                });
            }
            "--currency" => {
                i += 1;
                currency = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--currency requires a code");
                    process::exit(1);
                });
            }
            "--output" => {
                i += 1;
                output_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = GroupConfig {
        member_count: members,
        expense_count: expenses,
        currency: CurrencyCode::new(currency),
        ..Default::default()
    };
    let (group, generated) = generate_random_group(&config);

    #[derive(serde::Serialize)]
    struct OutputSplit {
        member: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        amount: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        percentage: Option<String>,
    }

    #[derive(serde::Serialize)]
    struct OutputExpense {
        payer: String,
        amount: i64,
        method: String,
        splits: Vec<OutputSplit>,
    }

    #[derive(serde::Serialize)]
    struct OutputMember {
        id: String,
        name: String,
    }

    #[derive(serde::Serialize)]
    struct OutputFile {
        currency: String,
        members: Vec<OutputMember>,
        expenses: Vec<OutputExpense>,
    }

    let output = OutputFile {
        currency: group.currency().to_string(),
        members: group
            .members()
            .iter()
            .map(|m| OutputMember {
                id: m.id().to_string(),
                name: m.name().to_string(),
            })
            .collect(),
        expenses: generated
            .iter()
            .map(|e| OutputExpense {
                payer: e.payer().to_string(),
                amount: e.amount().minor_units(),
                method: match e.method() {
                    SplitMethod::Equal => "equal".to_string(),
                    SplitMethod::Percentage => "percentage".to_string(),
                    SplitMethod::Exact => "exact".to_string(),
                },
                splits: e
                    .splits()
                    .iter()
                    .map(|s| OutputSplit {
                        member: s.member().to_string(),
                        amount: s.amount().map(|a| a.minor_units()),
                        percentage: s.percentage().map(|p| p.to_string()),
                    })
                    .collect(),
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&output).unwrap();

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!(
            "Generated {} expenses across {} members → {}",
            generated.len(),
            members,
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "balances" => cmd_balances(rest),
        "settle" => cmd_settle(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
