//! withdrawal-pricer CLI
//!
//! Price foreign-currency cash withdrawals from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Price a withdrawal from a session JSON file
//! withdrawal-pricer price --input session.json
//!
//! # Price directly from flags (single-lot usage)
//! withdrawal-pricer price --amount 250000 --cost 0.1989 \
//!     --spot 0.1993 --cash 0.2002 --compare 0.21
//!
//! # Quick-reference fee ladder
//! withdrawal-pricer table --cost 0.1989 --spot 0.1993 --cash 0.2002
//!
//! # Generate a random lot book for testing
//! withdrawal-pricer generate --lots 20
//! ```

use rust_decimal::Decimal;
use std::fs;
use std::process;
use withdrawal_pricer::core::currency::{CurrencyCode, CurrencyPair};
use withdrawal_pricer::core::lot::PurchaseLot;
use withdrawal_pricer::core::rates::RateSnapshot;
use withdrawal_pricer::fixtures::{generate_random_book, BookConfig};
use withdrawal_pricer::pricing::engine::PricingResult;
use withdrawal_pricer::pricing::quick_table::QuickTable;
use withdrawal_pricer::pricing::schedule::FeeSchedule;
use withdrawal_pricer::report::export::clipboard_text;
use withdrawal_pricer::report::text::{render_quick_table, render_result};
use withdrawal_pricer::session::PricingSession;

fn print_usage() {
    eprintln!(
        r#"withdrawal-pricer — fee and cost pricing for foreign-currency cash withdrawals

USAGE:
    withdrawal-pricer <COMMAND> [OPTIONS]

COMMANDS:
    price       Price a withdrawal (fee, total cost, savings vs external channel)
    table       Quick-reference fee ladder over standard amounts
    generate    Generate a random lot book (for testing)
    help        Show this message

OPTIONS (price):
    --input <FILE>      Path to session JSON file (lot book + rates)
    --amount <N>        Withdrawal amount in foreign units (overrides lot total)
    --cost <N>          Unit acquisition cost (instead of a lot book)
    --spot <N>          Spot-sell rate
    --cash <N>          Cash-sell rate
    --compare <N>       External channel comparison rate
    --format <FORMAT>   Output format: text (default), json, or export

OPTIONS (table):
    --cost --spot --cash as above; --compare optional (unused by the ladder)

OPTIONS (generate):
    --lots <N>          Number of lots (default: 10)
    --output <FILE>     Write to file instead of stdout

EXAMPLES:
    withdrawal-pricer price --input session.json --format json
    withdrawal-pricer price --amount 250000 --cost 0.1989 --spot 0.1993 --cash 0.2002 --compare 0.21
    withdrawal-pricer table --cost 0.1989 --spot 0.1993 --cash 0.2002
    withdrawal-pricer generate --lots 20 --output book.json"#
    );
}

/// JSON schema for session input files.
#[derive(serde::Deserialize)]
struct SessionFile {
    #[serde(default = "default_foreign")]
    foreign: String,
    #[serde(default = "default_home")]
    home: String,
    lots: Vec<LotInput>,
    /// Absent = withdraw the full valid-lot quantity.
    amount: Option<Decimal>,
    rates: RatesInput,
}

#[derive(serde::Deserialize)]
struct LotInput {
    quantity: Decimal,
    unit_cost: Decimal,
}

#[derive(serde::Deserialize)]
struct RatesInput {
    spot: Decimal,
    cash: Decimal,
    compare: Decimal,
}

fn default_foreign() -> String {
    "JPY".to_string()
}

fn default_home() -> String {
    "TWD".to_string()
}

fn load_session(path: &str) -> PricingSession {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    let file: SessionFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "foreign": "JPY",
  "home": "TWD",
  "lots": [ {{ "quantity": "250000", "unit_cost": "0.1989" }} ],
  "amount": "250000",
  "rates": {{ "spot": "0.1993", "cash": "0.2002", "compare": "0.21" }}
}}"#
        );
        process::exit(1);
    });

    let rates = RateSnapshot::new(file.rates.spot, file.rates.cash, file.rates.compare)
        .unwrap_or_else(|e| {
            eprintln!("Invalid rates: {}", e);
            process::exit(1);
        });

    let pair = CurrencyPair::new(CurrencyCode::new(file.foreign), CurrencyCode::new(file.home));
    let mut session = PricingSession::new(pair, rates);
    for lot in file.lots {
        session.push_lot(PurchaseLot::new(lot.quantity, lot.unit_cost));
    }
    if let Some(amount) = file.amount {
        session.set_amount(amount);
    }
    session
}

fn parse_decimal(args: &[String], i: usize, flag: &str) -> Decimal {
    args.get(i)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            eprintln!("{} requires a numeric value", flag);
            process::exit(1);
        })
}

fn cmd_price(args: &[String]) {
    let mut input_path: Option<String> = None;
    let mut amount: Option<Decimal> = None;
    let mut cost: Option<Decimal> = None;
    let mut spot: Option<Decimal> = None;
    let mut cash: Option<Decimal> = None;
    let mut compare: Option<Decimal> = None;
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
            "--amount" => {
                i += 1;
                amount = Some(parse_decimal(args, i, "--amount"));
            }
            "--cost" => {
                i += 1;
                cost = Some(parse_decimal(args, i, "--cost"));
            }
            "--spot" => {
                i += 1;
                spot = Some(parse_decimal(args, i, "--spot"));
            }
            "--cash" => {
                i += 1;
                cash = Some(parse_decimal(args, i, "--cash"));
            }
            "--compare" => {
                i += 1;
                compare = Some(parse_decimal(args, i, "--compare"));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text', 'json', or 'export'");
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

    let session = if let Some(path) = input_path {
        let mut session = load_session(&path);
        if let Some(amount) = amount {
            session.set_amount(amount);
        }
        session
    } else {
        // Flag-driven single-lot usage: --cost becomes the one lot.
        let (amount, cost) = match (amount, cost) {
            (Some(a), Some(c)) => (a, c),
            _ => {
                eprintln!("Error: either --input <FILE> or both --amount and --cost are required");
                process::exit(1);
            }
        };
        let (spot, cash, compare) = match (spot, cash, compare) {
            (Some(s), Some(h), Some(x)) => (s, h, x),
            _ => {
                eprintln!("Error: --spot, --cash, and --compare are required");
                process::exit(1);
            }
        };
        let rates = RateSnapshot::new(spot, cash, compare).unwrap_or_else(|e| {
            eprintln!("Invalid rates: {}", e);
            process::exit(1);
        });
        let pair = CurrencyPair::new(CurrencyCode::new("JPY"), CurrencyCode::new("TWD"));
        let mut session = PricingSession::new(pair, rates);
        session.push_lot(PurchaseLot::new(amount, cost));
        session.set_amount(amount);
        session
    };

    let result = session.recompute().unwrap_or_else(|e| {
        eprintln!("Invalid input: {}", e);
        process::exit(1);
    });

    match format.as_str() {
        "json" => print_json(&result),
        "export" => print!("{}", clipboard_text(&session, &result)),
        _ => print!("{}", render_result(&result, session.pair())),
    }
}

fn print_json(result: &PricingResult) {
    println!("{}", serde_json::to_string_pretty(result).unwrap());
}

fn cmd_table(args: &[String]) {
    let mut cost: Option<Decimal> = None;
    let mut spot: Option<Decimal> = None;
    let mut cash: Option<Decimal> = None;
    let mut compare: Option<Decimal> = None;
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--cost" => {
                i += 1;
                cost = Some(parse_decimal(args, i, "--cost"));
            }
            "--spot" => {
                i += 1;
                spot = Some(parse_decimal(args, i, "--spot"));
            }
            "--cash" => {
                i += 1;
                cash = Some(parse_decimal(args, i, "--cash"));
            }
            "--compare" => {
                i += 1;
                compare = Some(parse_decimal(args, i, "--compare"));
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

    let (cost, spot, cash) = match (cost, spot, cash) {
        (Some(c), Some(s), Some(h)) => (c, s, h),
        _ => {
            eprintln!("Error: --cost, --spot, and --cash are required");
            process::exit(1);
        }
    };

    // The ladder never reads the compare leg; default it to the cash rate.
    let rates = RateSnapshot::new(spot, cash, compare.unwrap_or(cash)).unwrap_or_else(|e| {
        eprintln!("Invalid rates: {}", e);
        process::exit(1);
    });

    let schedule = FeeSchedule::default();
    let table = QuickTable::compute(&schedule, cost, &rates).unwrap_or_else(|e| {
        eprintln!("Invalid input: {}", e);
        process::exit(1);
    });

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&table).unwrap());
    } else {
        let pair = CurrencyPair::new(CurrencyCode::new("JPY"), CurrencyCode::new("TWD"));
        print!("{}", render_quick_table(&table, &pair));
    }
}

fn cmd_generate(args: &[String]) {
    let mut lot_count = 10usize;
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--lots" => {
                i += 1;
                lot_count = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--lots requires a number");
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

    let config = BookConfig {
        lot_count,
        ..Default::default()
    };
    let book = generate_random_book(&config);

    #[derive(serde::Serialize)]
    struct OutputLot {
        quantity: Decimal,
        unit_cost: Decimal,
    }

    #[derive(serde::Serialize)]
    struct OutputFile {
        foreign: String,
        home: String,
        lots: Vec<OutputLot>,
        rates: OutputRates,
    }

    #[derive(serde::Serialize)]
    struct OutputRates {
        spot: Decimal,
        cash: Decimal,
        compare: Decimal,
    }

    let output = OutputFile {
        foreign: "JPY".to_string(),
        home: "TWD".to_string(),
        lots: book
            .lots()
            .iter()
            .map(|lot| OutputLot {
                quantity: lot.quantity(),
                unit_cost: lot.unit_cost(),
            })
            .collect(),
        rates: OutputRates {
            spot: Decimal::new(1993, 4),
            cash: Decimal::new(2002, 4),
            compare: Decimal::new(21, 2),
        },
    };

    let json = serde_json::to_string_pretty(&output).unwrap();

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!("Generated {} lots → {}", book.len(), path);
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
        "price" => cmd_price(rest),
        "table" => cmd_table(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
