//! Basic withdrawal pricing example.
//!
//! Demonstrates how the spread fee, minimum-fee floor, and external
//! channel comparison interact for a JPY cash withdrawal.

use rust_decimal_macros::dec;
use withdrawal_pricer::core::currency::{CurrencyCode, CurrencyPair};
use withdrawal_pricer::core::rates::RateSnapshot;
use withdrawal_pricer::report::text::{render_quick_table, render_result};
use withdrawal_pricer::session::PricingSession;

fn main() {
    println!("╔════════════════════════════════════════════╗");
    println!("║  withdrawal-pricer: Basic Pricing Example  ║");
    println!("╚════════════════════════════════════════════╝\n");

    // --- Scenario 1: a withdrawal large enough to clear the floor ---
    println!("━━━ Scenario 1: 250,000 JPY withdrawal ━━━\n");

    let pair = CurrencyPair::new(CurrencyCode::new("JPY"), CurrencyCode::new("TWD"));
    let rates = RateSnapshot::new(dec!(0.1993), dec!(0.2002), dec!(0.21)).unwrap();

    let mut session = PricingSession::new(pair, rates);
    session.add_lot(dec!(250_000), dec!(0.1989));

    let result = session.recompute().unwrap();
    print!("{}", render_result(&result, session.pair()));
    println!();

    // --- Scenario 2: small withdrawal, minimum fee binds ---
    println!("━━━ Scenario 2: 5,000 JPY withdrawal (floor binds) ━━━\n");

    session.set_amount(dec!(5_000));
    let small = session.recompute().unwrap();
    print!("{}", render_result(&small, session.pair()));
    println!();

    // --- Scenario 3: the quick-reference ladder ---
    println!("━━━ Scenario 3: Quick-reference ladder ━━━\n");

    let table = session.quick_table().unwrap();
    print!("{}", render_quick_table(&table, session.pair()));
}
