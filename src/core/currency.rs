use serde::{Deserialize, Serialize};
use std::fmt;

/// ISO 4217-style currency code.
///
/// Supports standard fiat currencies (JPY, TWD, USD, etc.) as well as
/// arbitrary identifiers for non-standard settlement units.
///
/// # Examples
///
/// ```
/// use withdrawal_pricer::core::currency::CurrencyCode;
///
/// let jpy = CurrencyCode::new("JPY");
/// let twd = CurrencyCode::new("TWD");
/// assert_ne!(jpy, twd);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// The pair of currencies a withdrawal is priced in.
///
/// `foreign` is the currency being withdrawn in cash; `home` is the
/// currency the holder originally paid and in which fees and savings
/// are denominated. All rates are quoted home-per-foreign.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub foreign: CurrencyCode,
    pub home: CurrencyCode,
}

impl CurrencyPair {
    pub fn new(foreign: CurrencyCode, home: CurrencyCode) -> Self {
        Self { foreign, home }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.foreign, self.home)
    }
}
