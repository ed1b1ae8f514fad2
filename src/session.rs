//! The owned aggregate a caller mutates between recomputations.
//!
//! A [`PricingSession`] holds the lot book, the latest rate snapshot,
//! and the withdrawal mode. Computation never lives here: `recompute`
//! is a pure read over the current state, so a reactive UI layer can
//! call it on every edit without ordering concerns.

use crate::core::currency::CurrencyPair;
use crate::core::lot::{LotBook, LotBookError, PurchaseLot};
use crate::core::rates::RateSnapshot;
use crate::pricing::aggregate::{aggregate_lots, CostAggregate};
use crate::pricing::engine::{PricingEngine, PricingError, PricingResult};
use crate::pricing::quick_table::QuickTable;
use crate::pricing::schedule::FeeSchedule;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How the withdrawal amount is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "amount", rename_all = "snake_case")]
pub enum AmountMode {
    /// User-supplied amount (single-lot usage).
    Manual(Decimal),
    /// Amount forced equal to the summed valid-lot quantity
    /// (multi-lot usage: withdraw everything that was acquired).
    FromLots,
}

/// Owned state for one pricing conversation: currencies, lots, rates,
/// schedule, and the current withdrawal mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingSession {
    pair: CurrencyPair,
    lots: LotBook,
    rates: RateSnapshot,
    schedule: FeeSchedule,
    mode: AmountMode,
}

impl PricingSession {
    pub fn new(pair: CurrencyPair, rates: RateSnapshot) -> Self {
        Self {
            pair,
            lots: LotBook::new(),
            rates,
            schedule: FeeSchedule::default(),
            mode: AmountMode::FromLots,
        }
    }

    /// Replace the default fee schedule.
    pub fn with_schedule(mut self, schedule: FeeSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    // --- Accessors ---

    pub fn pair(&self) -> &CurrencyPair {
        &self.pair
    }

    pub fn lots(&self) -> &LotBook {
        &self.lots
    }

    pub fn rates(&self) -> &RateSnapshot {
        &self.rates
    }

    pub fn schedule(&self) -> &FeeSchedule {
        &self.schedule
    }

    pub fn mode(&self) -> AmountMode {
        self.mode
    }

    // --- Mutators ---

    /// Record a purchase lot and return its id.
    pub fn add_lot(&mut self, quantity: Decimal, unit_cost: Decimal) -> Uuid {
        let id = self.lots.add(quantity, unit_cost);
        debug!("added lot {id}: {quantity} @ {unit_cost}");
        id
    }

    /// Add an already-constructed lot.
    pub fn push_lot(&mut self, lot: PurchaseLot) {
        self.lots.push(lot);
    }

    /// Remove a lot; the book refuses to drop its last entry.
    pub fn remove_lot(&mut self, id: Uuid) -> Result<PurchaseLot, LotBookError> {
        let removed = self.lots.remove(id)?;
        debug!("removed lot {id}");
        Ok(removed)
    }

    /// Swap in a fresh rate snapshot.
    pub fn set_rates(&mut self, rates: RateSnapshot) {
        self.rates = rates;
    }

    /// Switch to a user-supplied withdrawal amount.
    pub fn set_amount(&mut self, amount: Decimal) {
        self.mode = AmountMode::Manual(amount);
    }

    /// Switch to withdrawing the full valid-lot quantity.
    pub fn use_lot_total(&mut self) {
        self.mode = AmountMode::FromLots;
    }

    // --- Computation (pure reads) ---

    /// Weighted-average cost basis over the current book.
    pub fn aggregate(&self) -> CostAggregate {
        aggregate_lots(self.lots.lots())
    }

    /// The withdrawal amount the current mode resolves to.
    pub fn amount(&self) -> Decimal {
        match self.mode {
            AmountMode::Manual(amount) => amount,
            AmountMode::FromLots => self.lots.total_quantity(),
        }
    }

    /// Re-derive the full pricing result from the current snapshot.
    ///
    /// Stateless between calls: the validity of each evaluation
    /// depends only on the inputs at that instant.
    pub fn recompute(&self) -> Result<PricingResult, PricingError> {
        let aggregate = self.aggregate();
        let amount = self.amount();
        debug!(
            "recompute: amount={amount}, valid_lots={}, skipped={}",
            aggregate.valid_count, aggregate.skipped
        );
        PricingEngine::price_aggregate(amount, &aggregate, &self.rates, &self.schedule)
    }

    /// Quick-reference ladder for the current cost basis and rates.
    pub fn quick_table(&self) -> Result<QuickTable, PricingError> {
        let aggregate = self.aggregate();
        let average_cost = aggregate.average_cost.ok_or(PricingError::NoCostBasis)?;
        QuickTable::compute(&self.schedule, average_cost, &self.rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::CurrencyCode;
    use rust_decimal_macros::dec;

    fn session() -> PricingSession {
        let pair = CurrencyPair::new(CurrencyCode::new("JPY"), CurrencyCode::new("TWD"));
        let rates = RateSnapshot::new(dec!(0.1993), dec!(0.2002), dec!(0.21)).unwrap();
        PricingSession::new(pair, rates)
    }

    #[test]
    fn test_from_lots_mode_prices_total_quantity() {
        let mut s = session();
        s.add_lot(dec!(100_000), dec!(0.20));
        s.add_lot(dec!(150_000), dec!(0.1989));
        let result = s.recompute().unwrap();
        assert_eq!(result.amount, dec!(250_000));
    }

    #[test]
    fn test_manual_mode_overrides_amount() {
        let mut s = session();
        s.add_lot(dec!(250_000), dec!(0.1989));
        s.set_amount(dec!(60_000));
        let result = s.recompute().unwrap();
        assert_eq!(result.amount, dec!(60_000));
    }

    #[test]
    fn test_invalid_lots_do_not_poison_session() {
        let mut s = session();
        s.add_lot(dec!(250_000), dec!(0.1989));
        s.add_lot(dec!(-10), dec!(0.2));
        let result = s.recompute().unwrap();
        assert_eq!(result.amount, dec!(250_000));
        assert_eq!(result.average_cost, dec!(0.1989));
    }

    #[test]
    fn test_empty_session_has_no_basis() {
        let s = session();
        let err = s.recompute().unwrap_err();
        assert!(matches!(err, PricingError::NoCostBasis));
    }

    #[test]
    fn test_zero_manual_amount_is_invalid() {
        let mut s = session();
        s.add_lot(dec!(100), dec!(0.19));
        s.set_amount(Decimal::ZERO);
        let err = s.recompute().unwrap_err();
        assert!(matches!(err, PricingError::NonPositiveAmount(_)));
    }

    #[test]
    fn test_remove_last_lot_refused() {
        let mut s = session();
        let id = s.add_lot(dec!(100), dec!(0.19));
        assert!(matches!(s.remove_lot(id), Err(LotBookError::LastLot)));
    }

    #[test]
    fn test_recompute_is_stateless() {
        let mut s = session();
        s.add_lot(dec!(250_000), dec!(0.1989));
        let a = s.recompute().unwrap();
        let b = s.recompute().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rate_update_changes_result() {
        let mut s = session();
        s.add_lot(dec!(250_000), dec!(0.1989));
        let before = s.recompute().unwrap();
        s.set_rates(RateSnapshot::new(dec!(0.1993), dec!(0.2010), dec!(0.21)).unwrap());
        let after = s.recompute().unwrap();
        assert!(after.fee > before.fee);
    }

    #[test]
    fn test_session_json_round_trip() {
        let mut s = session();
        s.add_lot(dec!(250_000), dec!(0.1989));
        let json = serde_json::to_string(&s).unwrap();
        let back: PricingSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back.recompute().unwrap(), s.recompute().unwrap());
    }
}
