//! Human-readable rendering of pricing output.
//!
//! The engine produces typed results; everything string-shaped lives
//! here. Display precisions follow banking convention: home-currency
//! amounts to 2 places, rates to 4, amortized per-unit cost to 6.

use crate::core::currency::CurrencyPair;
use crate::pricing::engine::PricingResult;
use crate::pricing::quick_table::QuickTable;
use std::fmt;

/// A pricing result paired with its currencies, rendered as a short
/// report block.
pub struct ResultReport<'a> {
    result: &'a PricingResult,
    pair: &'a CurrencyPair,
}

impl<'a> ResultReport<'a> {
    pub fn new(result: &'a PricingResult, pair: &'a CurrencyPair) -> Self {
        Self { result, pair }
    }
}

impl fmt::Display for ResultReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.result;
        let home = &self.pair.home;
        let foreign = &self.pair.foreign;

        writeln!(f, "=== Withdrawal Pricing ===")?;
        writeln!(f, "Amount:          {} {}", r.amount.round_dp(0), foreign)?;
        writeln!(
            f,
            "Cost basis:      {} {}/{}",
            r.average_cost.round_dp(6),
            home,
            foreign
        )?;
        write!(f, "Service fee:     {} {}", r.fee.round_dp(2), home)?;
        if r.fee_floored {
            write!(f, " (minimum)")?;
        }
        writeln!(f)?;
        writeln!(f, "Total expense:   {} {}", r.total_expense.round_dp(2), home)?;
        writeln!(
            f,
            "Unit cost:       {} {}/{}",
            r.unit_cost.round_dp(6),
            home,
            foreign
        )?;
        writeln!(f, "---")?;
        writeln!(f, "External total:  {} {}", r.external_cost.round_dp(2), home)?;
        writeln!(
            f,
            "Savings:         {} {} ({})",
            r.savings.round_dp(2),
            home,
            if r.is_cheaper() {
                "withdrawal channel cheaper"
            } else {
                "external channel cheaper"
            }
        )
    }
}

/// Render a pricing result as a short report block.
pub fn render_result(result: &PricingResult, pair: &CurrencyPair) -> String {
    ResultReport::new(result, pair).to_string()
}

/// A quick-reference ladder rendered as an aligned text table.
pub struct QuickTableReport<'a> {
    table: &'a QuickTable,
    pair: &'a CurrencyPair,
}

impl<'a> QuickTableReport<'a> {
    pub fn new(table: &'a QuickTable, pair: &'a CurrencyPair) -> Self {
        Self { table, pair }
    }
}

impl fmt::Display for QuickTableReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let home = &self.pair.home;
        let foreign = &self.pair.foreign;

        writeln!(f, "=== Quick Reference ({}/{}) ===", home, foreign)?;
        writeln!(
            f,
            "{:>14}  {:>14}  {:>12}",
            format!("Amount {}", foreign),
            format!("Fee {}", home),
            "Unit cost"
        )?;
        for row in &self.table.rows {
            let fee = if row.fee_floored {
                format!("{} (min)", row.fee.round_dp(2))
            } else {
                row.fee.round_dp(2).to_string()
            };
            writeln!(
                f,
                "{:>14}  {:>14}  {:>12}",
                row.amount.round_dp(0).to_string(),
                fee,
                row.unit_cost.round_dp(6).to_string()
            )?;
        }
        match self.table.floor_crossover {
            Some(crossover) => writeln!(
                f,
                "Minimum fee binds below ~{} {}",
                crossover.round_dp(0),
                foreign
            ),
            None => writeln!(f, "Minimum fee binds at every amount (non-positive spread)"),
        }
    }
}

/// Render the quick-reference ladder as an aligned text table.
pub fn render_quick_table(table: &QuickTable, pair: &CurrencyPair) -> String {
    QuickTableReport::new(table, pair).to_string()
}
