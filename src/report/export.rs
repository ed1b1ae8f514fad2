//! Clipboard-ready serialization of a priced session.
//!
//! Produces a self-contained text record — raw inputs followed by the
//! rendered results — so a holder can paste the full context of a
//! quote somewhere else without losing the inputs it came from.

use crate::pricing::engine::PricingResult;
use crate::report::text::ResultReport;
use crate::session::PricingSession;
use std::fmt;

/// A session and its latest result, rendered as one pasteable block.
pub struct QuoteExport<'a> {
    session: &'a PricingSession,
    result: &'a PricingResult,
}

impl<'a> QuoteExport<'a> {
    pub fn new(session: &'a PricingSession, result: &'a PricingResult) -> Self {
        Self { session, result }
    }
}

impl fmt::Display for QuoteExport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pair = self.session.pair();
        let rates = self.session.rates();
        let r = self.result;

        writeln!(
            f,
            "--- {} withdrawal quote (withdrawal-pricer v{}) ---",
            pair.foreign,
            env!("CARGO_PKG_VERSION")
        )?;
        writeln!(f, "Withdrawal amount: {} {}", r.amount, pair.foreign)?;
        writeln!(
            f,
            "Cost basis: {} {}/{} over {} lot(s)",
            r.average_cost.round_dp(6),
            pair.home,
            pair.foreign,
            self.session.lots().len()
        )?;
        writeln!(
            f,
            "Spot rate: {} / Cash rate: {}",
            rates.spot().round_dp(4),
            rates.cash().round_dp(4)
        )?;
        writeln!(
            f,
            "External compare rate: {} {}/{}",
            rates.compare().round_dp(4),
            pair.home,
            pair.foreign
        )?;
        writeln!(f, "--------------------------")?;
        write!(f, "{}", ResultReport::new(r, pair))
    }
}

/// Serialize the latest result plus its raw inputs into one block.
pub fn clipboard_text(session: &PricingSession, result: &PricingResult) -> String {
    QuoteExport::new(session, result).to_string()
}
