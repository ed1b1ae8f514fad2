use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors arising from rate snapshot construction.
#[derive(Debug, Error)]
pub enum RateError {
    #[error("{field} rate must be positive, got {value}")]
    NonPositiveRate { field: &'static str, value: Decimal },
}

/// A snapshot of the three sell rates a withdrawal is priced against,
/// all quoted home-currency per foreign-currency unit.
///
/// - `spot`: the bank's spot-sell rate (book-entry FX).
/// - `cash`: the bank's cash-sell rate (physical banknotes).
/// - `compare`: the rate offered by the external exchange channel the
///   withdrawal is compared to.
///
/// The cash/spot spread is the fee basis; `compare` only enters the
/// savings leg.
///
/// # Examples
///
/// ```
/// use withdrawal_pricer::core::rates::RateSnapshot;
/// use rust_decimal_macros::dec;
///
/// let rates = RateSnapshot::new(dec!(0.1993), dec!(0.2002), dec!(0.21)).unwrap();
/// assert_eq!(rates.spread(), dec!(0.0009));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSnapshot {
    spot: Decimal,
    cash: Decimal,
    compare: Decimal,
}

impl RateSnapshot {
    /// Build a snapshot, validating that every rate is strictly positive.
    pub fn new(spot: Decimal, cash: Decimal, compare: Decimal) -> Result<Self, RateError> {
        for (field, value) in [("spot", spot), ("cash", cash), ("compare", compare)] {
            if value <= Decimal::ZERO {
                return Err(RateError::NonPositiveRate { field, value });
            }
        }
        Ok(Self {
            spot,
            cash,
            compare,
        })
    }

    pub fn spot(&self) -> Decimal {
        self.spot
    }

    pub fn cash(&self) -> Decimal {
        self.cash
    }

    pub fn compare(&self) -> Decimal {
        self.compare
    }

    /// Cash-sell rate minus spot-sell rate.
    ///
    /// Negative when the spot rate exceeds the cash rate; the fee
    /// floor absorbs that case downstream.
    pub fn spread(&self) -> Decimal {
        self.cash - self.spot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_snapshot_valid() {
        let rates = RateSnapshot::new(dec!(0.1993), dec!(0.2002), dec!(0.21)).unwrap();
        assert_eq!(rates.spot(), dec!(0.1993));
        assert_eq!(rates.cash(), dec!(0.2002));
        assert_eq!(rates.compare(), dec!(0.21));
    }

    #[test]
    fn test_spread_positive() {
        let rates = RateSnapshot::new(dec!(0.1993), dec!(0.2002), dec!(0.21)).unwrap();
        assert_eq!(rates.spread(), dec!(0.0009));
    }

    #[test]
    fn test_spread_negative_allowed() {
        let rates = RateSnapshot::new(dec!(0.2002), dec!(0.1993), dec!(0.21)).unwrap();
        assert_eq!(rates.spread(), dec!(-0.0009));
    }

    #[test]
    fn test_zero_rate_rejected() {
        let err = RateSnapshot::new(Decimal::ZERO, dec!(0.2), dec!(0.21)).unwrap_err();
        assert!(err.to_string().contains("spot"));
    }

    #[test]
    fn test_negative_compare_rejected() {
        let err = RateSnapshot::new(dec!(0.1993), dec!(0.2002), dec!(-0.21)).unwrap_err();
        assert!(err.to_string().contains("compare"));
    }
}
