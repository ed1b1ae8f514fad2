//! Multi-lot weighted-average example.
//!
//! Builds a lot book from several purchases at different rates and
//! shows how the weighted-average cost basis (not a simple mean)
//! drives the final withdrawal price.

use rust_decimal_macros::dec;
use withdrawal_pricer::core::currency::{CurrencyCode, CurrencyPair};
use withdrawal_pricer::core::rates::RateSnapshot;
use withdrawal_pricer::report::export::clipboard_text;
use withdrawal_pricer::session::PricingSession;

fn main() {
    println!("╔══════════════════════════════════════════════╗");
    println!("║  withdrawal-pricer: Lot Averaging Example    ║");
    println!("╚══════════════════════════════════════════════╝\n");

    let pair = CurrencyPair::new(CurrencyCode::new("JPY"), CurrencyCode::new("TWD"));
    let rates = RateSnapshot::new(dec!(0.1993), dec!(0.2002), dec!(0.21)).unwrap();
    let mut session = PricingSession::new(pair, rates);

    // Purchases accumulated over time, cheapest first
    session.add_lot(dec!(100_000), dec!(0.1950));
    session.add_lot(dec!(200_000), dec!(0.1989));
    session.add_lot(dec!(50_000), dec!(0.2041));

    let aggregate = session.aggregate();
    println!(
        "Lots: {} valid, total {} JPY",
        aggregate.valid_count, aggregate.total_quantity
    );
    println!(
        "Weighted-average cost: {} TWD/JPY\n",
        aggregate.average_cost.unwrap().round_dp(6)
    );

    // Withdraw everything the lots cover
    session.use_lot_total();
    let result = session.recompute().unwrap();

    // Clipboard-ready record: inputs + results in one block
    print!("{}", clipboard_text(&session, &result));
}
