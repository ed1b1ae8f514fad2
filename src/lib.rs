//! # withdrawal-pricer
//!
//! Fee and cost pricing engine for foreign-currency cash withdrawals.
//!
//! Given a book of purchase lots, a withdrawal amount, and the bank's
//! spot/cash sell rates, this engine computes the spread-based service
//! fee (with its minimum-fee floor), the amortized total cost per
//! foreign unit, and the savings against an external exchange channel.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: currencies, purchase lots, rate snapshots
//! - **pricing** — Weighted-average aggregation, fee formula, quick-reference ladder
//! - **session** — The owned state a caller mutates between recomputations
//! - **report** — Text rendering and clipboard export, kept out of the engine

pub mod core;
pub mod fixtures;
pub mod pricing;
pub mod report;
pub mod session;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::currency::{CurrencyCode, CurrencyPair};
    pub use crate::core::lot::{LotBook, PurchaseLot};
    pub use crate::core::rates::RateSnapshot;
    pub use crate::pricing::aggregate::{aggregate_lots, CostAggregate};
    pub use crate::pricing::engine::{PricingEngine, PricingError, PricingResult};
    pub use crate::pricing::quick_table::QuickTable;
    pub use crate::pricing::schedule::FeeSchedule;
    pub use crate::session::{AmountMode, PricingSession};
}
