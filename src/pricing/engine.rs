use crate::core::rates::RateSnapshot;
use crate::pricing::aggregate::CostAggregate;
use crate::pricing::schedule::FeeSchedule;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid-input conditions detected before the pricing formula runs.
///
/// The formula itself never fails; every division and comparison is
/// guarded by these checks.
#[derive(Debug, Error)]
pub enum PricingError {
    #[error("withdrawal amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),
    #[error("no valid purchase lots to derive a cost basis from")]
    NoCostBasis,
    #[error("unit acquisition cost must be positive, got {0}")]
    NonPositiveCost(Decimal),
}

/// The priced outcome of a single withdrawal.
///
/// All home-currency figures (`fee`, `principal`, `total_expense`,
/// `external_cost`, `savings`) are in home currency; `unit_cost` is
/// home per foreign unit. Recomputed from scratch on every input
/// change; carries no lifecycle of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Foreign-currency amount withdrawn.
    pub amount: Decimal,
    /// Weighted-average acquisition cost used as the cost basis.
    pub average_cost: Decimal,
    /// Cash-sell minus spot-sell rate at pricing time.
    pub spread: Decimal,
    /// Service fee actually charged (floor applied).
    pub fee: Decimal,
    /// Whether the minimum fee was binding.
    pub fee_floored: bool,
    /// Home-currency originally spent acquiring the withdrawn amount.
    pub principal: Decimal,
    /// Principal plus fee.
    pub total_expense: Decimal,
    /// Total expense amortized per foreign unit.
    pub unit_cost: Decimal,
    /// What the external exchange channel would charge for the same amount.
    pub external_cost: Decimal,
    /// External cost minus total expense. Positive means the
    /// withdrawal channel is the cheaper one.
    pub savings: Decimal,
}

impl PricingResult {
    /// Whether the withdrawal channel beats the external channel.
    pub fn is_cheaper(&self) -> bool {
        self.savings > Decimal::ZERO
    }

    /// Savings as a fraction of the external channel cost.
    pub fn savings_ratio(&self) -> f64 {
        if self.external_cost == Decimal::ZERO {
            return 0.0;
        }
        let ratio = self.savings / self.external_cost;
        ratio.to_string().parse::<f64>().unwrap_or(0.0)
    }
}

/// The core pricing engine.
///
/// Pure functions from (amount, cost basis, rates, schedule) to a
/// [`PricingResult`]. No hidden state: identical inputs produce
/// identical outputs.
pub struct PricingEngine;

impl PricingEngine {
    /// Price a withdrawal of `amount` foreign units acquired at
    /// `average_cost` home per unit.
    ///
    /// # Formula
    ///
    /// ```text
    /// spread        = cash − spot
    /// fee           = max(min_fee, amount × spread × spread_ratio)
    /// principal     = amount × average_cost
    /// total_expense = principal + fee
    /// unit_cost     = total_expense / amount
    /// external_cost = amount × compare
    /// savings       = external_cost − total_expense
    /// ```
    ///
    /// A negative spread is absorbed by the floor. `amount > 0` is
    /// checked first, so the division is always defined.
    pub fn price(
        amount: Decimal,
        average_cost: Decimal,
        rates: &RateSnapshot,
        schedule: &FeeSchedule,
    ) -> Result<PricingResult, PricingError> {
        if amount <= Decimal::ZERO {
            return Err(PricingError::NonPositiveAmount(amount));
        }
        if average_cost <= Decimal::ZERO {
            return Err(PricingError::NonPositiveCost(average_cost));
        }

        let spread = rates.spread();
        let fee_raw = amount * spread * schedule.spread_ratio;
        let fee_floored = fee_raw <= schedule.min_fee;
        let fee = if fee_floored { schedule.min_fee } else { fee_raw };

        let principal = amount * average_cost;
        let total_expense = principal + fee;
        let unit_cost = total_expense / amount;
        let external_cost = amount * rates.compare();
        let savings = external_cost - total_expense;

        Ok(PricingResult {
            amount,
            average_cost,
            spread,
            fee,
            fee_floored,
            principal,
            total_expense,
            unit_cost,
            external_cost,
            savings,
        })
    }

    /// Price from an aggregate instead of a bare cost figure.
    ///
    /// An aggregate without a basis (no valid lots) maps to
    /// [`PricingError::NoCostBasis`].
    pub fn price_aggregate(
        amount: Decimal,
        aggregate: &CostAggregate,
        rates: &RateSnapshot,
        schedule: &FeeSchedule,
    ) -> Result<PricingResult, PricingError> {
        let average_cost = aggregate.average_cost.ok_or(PricingError::NoCostBasis)?;
        Self::price(amount, average_cost, rates, schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::aggregate::aggregate_lots;
    use rust_decimal_macros::dec;

    fn rates() -> RateSnapshot {
        RateSnapshot::new(dec!(0.1993), dec!(0.2002), dec!(0.21)).unwrap()
    }

    #[test]
    fn test_fee_floor_applies() {
        // 1000 × 0.0009 × 0.5 = 0.45 → floored to 100
        let result =
            PricingEngine::price(dec!(1000), dec!(0.1989), &rates(), &FeeSchedule::default())
                .unwrap();
        assert_eq!(result.fee, dec!(100));
        assert!(result.fee_floored);
    }

    #[test]
    fn test_fee_above_floor() {
        // 1_000_000 × 0.0009 × 0.5 = 450 → charged as-is
        let result = PricingEngine::price(
            dec!(1_000_000),
            dec!(0.1989),
            &rates(),
            &FeeSchedule::default(),
        )
        .unwrap();
        assert_eq!(result.fee, dec!(450));
        assert!(!result.fee_floored);
    }

    #[test]
    fn test_negative_spread_floors() {
        let inverted = RateSnapshot::new(dec!(0.2002), dec!(0.1993), dec!(0.21)).unwrap();
        let result = PricingEngine::price(
            dec!(1_000_000),
            dec!(0.1989),
            &inverted,
            &FeeSchedule::default(),
        )
        .unwrap();
        assert_eq!(result.spread, dec!(-0.0009));
        assert_eq!(result.fee, dec!(100));
        assert!(result.fee_floored);
    }

    #[test]
    fn test_reference_scenario() {
        let result = PricingEngine::price(
            dec!(250_000),
            dec!(0.1989),
            &rates(),
            &FeeSchedule::default(),
        )
        .unwrap();
        assert_eq!(result.spread, dec!(0.0009));
        assert_eq!(result.fee, dec!(112.5));
        assert!(!result.fee_floored);
        assert_eq!(result.principal, dec!(49_725));
        assert_eq!(result.total_expense, dec!(49_837.5));
        assert_eq!(result.unit_cost, dec!(0.19935));
        assert_eq!(result.external_cost, dec!(52_500));
        assert_eq!(result.savings, dec!(2_662.5));
        assert!(result.is_cheaper());
    }

    #[test]
    fn test_pricing_is_idempotent() {
        let a = PricingEngine::price(
            dec!(250_000),
            dec!(0.1989),
            &rates(),
            &FeeSchedule::default(),
        )
        .unwrap();
        let b = PricingEngine::price(
            dec!(250_000),
            dec!(0.1989),
            &rates(),
            &FeeSchedule::default(),
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_amount_rejected() {
        let err = PricingEngine::price(
            Decimal::ZERO,
            dec!(0.1989),
            &rates(),
            &FeeSchedule::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PricingError::NonPositiveAmount(_)));
    }

    #[test]
    fn test_negative_cost_rejected() {
        let err =
            PricingEngine::price(dec!(1000), dec!(-0.1), &rates(), &FeeSchedule::default())
                .unwrap_err();
        assert!(matches!(err, PricingError::NonPositiveCost(_)));
    }

    #[test]
    fn test_empty_aggregate_rejected() {
        let agg = aggregate_lots(&[]);
        let err =
            PricingEngine::price_aggregate(dec!(1000), &agg, &rates(), &FeeSchedule::default())
                .unwrap_err();
        assert!(matches!(err, PricingError::NoCostBasis));
    }
}
