use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Fee parameters for the withdrawal channel.
///
/// The bank charges half the cash/spot spread on the withdrawn
/// amount, subject to a flat minimum in home currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Minimum fee in home currency, charged regardless of spread.
    pub min_fee: Decimal,
    /// Fraction of the spread passed on as fee.
    pub spread_ratio: Decimal,
    /// Withdrawal amounts used by the quick-reference ladder.
    pub ladder: Vec<Decimal>,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            min_fee: dec!(100),
            spread_ratio: dec!(0.5),
            ladder: vec![
                dec!(5_000),
                dec!(10_000),
                dec!(30_000),
                dec!(60_000),
                dec!(100_000),
                dec!(260_000),
                dec!(500_000),
                dec!(1_000_000),
            ],
        }
    }
}
