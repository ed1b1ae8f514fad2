//! Random lot-book generation for benchmarks and CLI testing.

use crate::core::lot::{LotBook, PurchaseLot};
use rand::Rng;
use rust_decimal::Decimal;

/// Configuration for generating a random lot book.
#[derive(Debug, Clone)]
pub struct BookConfig {
    /// Number of lots to generate.
    pub lot_count: usize,
    /// Minimum lot quantity (foreign units).
    pub min_quantity: Decimal,
    /// Maximum lot quantity.
    pub max_quantity: Decimal,
    /// Minimum unit cost (home per foreign unit).
    pub min_cost: Decimal,
    /// Maximum unit cost.
    pub max_cost: Decimal,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            lot_count: 10,
            min_quantity: Decimal::from(1_000),
            max_quantity: Decimal::from(1_000_000),
            min_cost: Decimal::new(15, 2),  // 0.15
            max_cost: Decimal::new(25, 2),  // 0.25
        }
    }
}

/// Generate a random lot book for testing.
pub fn generate_random_book(config: &BookConfig) -> LotBook {
    let mut rng = rand::thread_rng();
    let mut book = LotBook::new();

    let min_q: f64 = config.min_quantity.to_string().parse().unwrap_or(1_000.0);
    let max_q: f64 = config.max_quantity.to_string().parse().unwrap_or(1_000_000.0);
    let min_c: f64 = config.min_cost.to_string().parse().unwrap_or(0.15);
    let max_c: f64 = config.max_cost.to_string().parse().unwrap_or(0.25);

    for _ in 0..config.lot_count {
        let quantity = Decimal::from_f64_retain(rng.gen_range(min_q..max_q))
            .unwrap_or(Decimal::from(1_000))
            .round_dp(0);
        let unit_cost = Decimal::from_f64_retain(rng.gen_range(min_c..max_c))
            .unwrap_or(Decimal::new(2, 1))
            .round_dp(4);

        if quantity > Decimal::ZERO && unit_cost > Decimal::ZERO {
            book.push(PurchaseLot::new(quantity, unit_cost));
        }
    }

    book
}
