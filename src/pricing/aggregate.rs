use crate::core::lot::PurchaseLot;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Weighted-average acquisition cost over a set of purchase lots.
///
/// `average_cost` is `None` when no lot in the input was valid —
/// absence of a cost basis is a signaled sentinel, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostAggregate {
    /// Total home-currency spend / total foreign quantity, over valid
    /// lots only. `None` when `valid_count == 0`.
    pub average_cost: Option<Decimal>,
    /// Sum of valid-lot quantities. Zero when no lot is valid.
    pub total_quantity: Decimal,
    /// Lots that participated.
    pub valid_count: usize,
    /// Lots skipped for non-positive quantity or cost.
    pub skipped: usize,
}

impl CostAggregate {
    /// Whether a usable cost basis exists.
    pub fn has_basis(&self) -> bool {
        self.average_cost.is_some()
    }
}

/// Aggregate a list of lots into a weighted-average unit cost.
///
/// Any lot with `quantity <= 0` or `unit_cost <= 0` is skipped; the
/// rest contribute `quantity × unit_cost` to the numerator and
/// `quantity` to the denominator. Never fails: an all-invalid input
/// yields `average_cost: None` and zero totals.
///
/// # Examples
///
/// ```
/// use withdrawal_pricer::core::lot::PurchaseLot;
/// use withdrawal_pricer::pricing::aggregate::aggregate_lots;
/// use rust_decimal_macros::dec;
///
/// let lots = vec![
///     PurchaseLot::new(dec!(100_000), dec!(0.1989)),
///     PurchaseLot::new(dec!(-5), dec!(0.2)),
/// ];
/// let agg = aggregate_lots(&lots);
/// assert_eq!(agg.average_cost, Some(dec!(0.1989)));
/// assert_eq!(agg.valid_count, 1);
/// assert_eq!(agg.skipped, 1);
/// ```
pub fn aggregate_lots(lots: &[PurchaseLot]) -> CostAggregate {
    let mut spend = Decimal::ZERO;
    let mut quantity = Decimal::ZERO;
    let mut valid_count = 0usize;

    for lot in lots {
        if !lot.is_valid() {
            continue;
        }
        spend += lot.spend();
        quantity += lot.quantity();
        valid_count += 1;
    }

    let average_cost = if valid_count == 0 {
        None
    } else {
        Some(spend / quantity)
    };

    CostAggregate {
        average_cost,
        total_quantity: quantity,
        valid_count,
        skipped: lots.len() - valid_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_single_lot() {
        let lots = vec![PurchaseLot::new(dec!(250_000), dec!(0.1989))];
        let agg = aggregate_lots(&lots);
        assert_eq!(agg.average_cost, Some(dec!(0.1989)));
        assert_eq!(agg.total_quantity, dec!(250_000));
        assert_eq!(agg.valid_count, 1);
        assert_eq!(agg.skipped, 0);
    }

    #[test]
    fn test_weighted_average() {
        // 100k @ 0.20 + 300k @ 0.24 → (20000 + 72000) / 400000 = 0.23
        let lots = vec![
            PurchaseLot::new(dec!(100_000), dec!(0.20)),
            PurchaseLot::new(dec!(300_000), dec!(0.24)),
        ];
        let agg = aggregate_lots(&lots);
        assert_eq!(agg.average_cost, Some(dec!(0.23)));
        assert_eq!(agg.total_quantity, dec!(400_000));
    }

    #[test]
    fn test_invalid_lots_skipped() {
        let with_junk = vec![
            PurchaseLot::new(dec!(-5), dec!(0.2)),
            PurchaseLot::new(dec!(100), dec!(0.19)),
        ];
        let clean = vec![PurchaseLot::new(dec!(100), dec!(0.19))];
        let a = aggregate_lots(&with_junk);
        let b = aggregate_lots(&clean);
        assert_eq!(a.average_cost, b.average_cost);
        assert_eq!(a.total_quantity, b.total_quantity);
        assert_eq!(a.skipped, 1);
    }

    #[test]
    fn test_no_valid_lots() {
        let lots = vec![
            PurchaseLot::new(Decimal::ZERO, dec!(0.2)),
            PurchaseLot::new(dec!(100), dec!(-0.19)),
        ];
        let agg = aggregate_lots(&lots);
        assert_eq!(agg.average_cost, None);
        assert_eq!(agg.total_quantity, Decimal::ZERO);
        assert_eq!(agg.valid_count, 0);
        assert_eq!(agg.skipped, 2);
        assert!(!agg.has_basis());
    }

    #[test]
    fn test_empty_input() {
        let agg = aggregate_lots(&[]);
        assert_eq!(agg.average_cost, None);
        assert_eq!(agg.valid_count, 0);
    }

    #[test]
    fn test_average_within_lot_bounds() {
        let lots = vec![
            PurchaseLot::new(dec!(10_000), dec!(0.1850)),
            PurchaseLot::new(dec!(90_000), dec!(0.2100)),
            PurchaseLot::new(dec!(40_000), dec!(0.1990)),
        ];
        let avg = aggregate_lots(&lots).average_cost.unwrap();
        assert!(avg >= dec!(0.1850));
        assert!(avg <= dec!(0.2100));
    }
}
