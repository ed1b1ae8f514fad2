use crate::core::rates::RateSnapshot;
use crate::pricing::engine::{PricingEngine, PricingError};
use crate::pricing::schedule::FeeSchedule;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the quick-reference ladder: a candidate withdrawal
/// amount priced at the current cost basis and rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickRow {
    /// Candidate withdrawal amount in foreign units.
    pub amount: Decimal,
    /// Fee for this amount (floor applied).
    pub fee: Decimal,
    /// Whether the minimum fee was binding at this amount.
    pub fee_floored: bool,
    /// Amortized home-currency cost per foreign unit.
    pub unit_cost: Decimal,
}

/// A precomputed fee/unit-cost ladder over the schedule's candidate
/// amounts, so a holder can see at a glance where the minimum fee
/// stops binding.
///
/// The external-channel comparison is deliberately absent here: the
/// ladder answers "what does each withdrawal size cost me", not
/// "which channel is cheaper".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickTable {
    pub rows: Vec<QuickRow>,
    /// The withdrawal amount at which the spread fee equals the
    /// minimum fee. `None` when the spread is non-positive (the floor
    /// then binds at every amount).
    pub floor_crossover: Option<Decimal>,
}

impl QuickTable {
    /// Price every ladder amount in the schedule.
    pub fn compute(
        schedule: &FeeSchedule,
        average_cost: Decimal,
        rates: &RateSnapshot,
    ) -> Result<Self, PricingError> {
        let mut rows = Vec::with_capacity(schedule.ladder.len());
        for &amount in &schedule.ladder {
            let priced = PricingEngine::price(amount, average_cost, rates, schedule)?;
            rows.push(QuickRow {
                amount,
                fee: priced.fee,
                fee_floored: priced.fee_floored,
                unit_cost: priced.unit_cost,
            });
        }
        Ok(Self {
            rows,
            floor_crossover: floor_crossover(schedule, rates),
        })
    }
}

/// The withdrawal amount at which `amount × spread × ratio` equals the
/// minimum fee. Below it the floor binds; above it the spread fee
/// takes over. Undefined for a non-positive spread.
pub fn floor_crossover(schedule: &FeeSchedule, rates: &RateSnapshot) -> Option<Decimal> {
    let spread = rates.spread();
    if spread <= Decimal::ZERO {
        return None;
    }
    Some(schedule.min_fee / (spread * schedule.spread_ratio))
}
