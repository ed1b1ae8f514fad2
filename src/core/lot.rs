use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// One recorded purchase of foreign currency at a given unit cost.
///
/// `quantity` is in foreign-currency units; `unit_cost` is the
/// home-currency price paid per foreign unit. Lots are the raw input
/// to weighted-average cost aggregation.
///
/// A lot with non-positive quantity or cost is carried but treated as
/// invalid: the aggregator skips it rather than rejecting the book.
///
/// # Examples
///
/// ```
/// use withdrawal_pricer::core::lot::PurchaseLot;
/// use rust_decimal_macros::dec;
///
/// let lot = PurchaseLot::new(dec!(250_000), dec!(0.1989));
/// assert!(lot.is_valid());
/// assert_eq!(lot.spend(), dec!(49_725));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseLot {
    /// Unique identifier for this lot.
    id: Uuid,
    /// Foreign-currency units acquired.
    quantity: Decimal,
    /// Home-currency paid per foreign unit.
    unit_cost: Decimal,
    /// When this lot was recorded.
    acquired_at: DateTime<Utc>,
    /// Optional reference or memo.
    reference: Option<String>,
}

impl PurchaseLot {
    /// Create a new lot. Values are taken as-is; validity is a
    /// property queried later, not a construction precondition.
    pub fn new(quantity: Decimal, unit_cost: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            quantity,
            unit_cost,
            acquired_at: Utc::now(),
            reference: None,
        }
    }

    /// Create a lot with a specific ID (useful for testing / determinism).
    pub fn with_id(id: Uuid, quantity: Decimal, unit_cost: Decimal) -> Self {
        Self {
            id,
            quantity,
            unit_cost,
            acquired_at: Utc::now(),
            reference: None,
        }
    }

    /// Set a reference string.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn unit_cost(&self) -> Decimal {
        self.unit_cost
    }

    pub fn acquired_at(&self) -> DateTime<Utc> {
        self.acquired_at
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// Whether this lot participates in aggregation.
    /// Requires strictly positive quantity and unit cost.
    pub fn is_valid(&self) -> bool {
        self.quantity > Decimal::ZERO && self.unit_cost > Decimal::ZERO
    }

    /// Home-currency spent on this lot: quantity × unit cost.
    pub fn spend(&self) -> Decimal {
        self.quantity * self.unit_cost
    }
}

/// Errors arising from lot book mutations.
#[derive(Debug, Error)]
pub enum LotBookError {
    #[error("must keep at least one lot")]
    LastLot,
    #[error("no lot with id {0}")]
    UnknownLot(Uuid),
}

/// An ordered collection of purchase lots.
///
/// The book always holds at least one lot once populated: removal of
/// the final lot is refused so a session never loses its cost basis
/// entirely by accident.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LotBook {
    lots: Vec<PurchaseLot>,
}

impl LotBook {
    pub fn new() -> Self {
        Self { lots: Vec::new() }
    }

    /// Record a new lot and return its id.
    pub fn add(&mut self, quantity: Decimal, unit_cost: Decimal) -> Uuid {
        let lot = PurchaseLot::new(quantity, unit_cost);
        let id = lot.id();
        self.lots.push(lot);
        id
    }

    /// Add an already-constructed lot.
    pub fn push(&mut self, lot: PurchaseLot) {
        self.lots.push(lot);
    }

    /// Remove a lot by id, returning it.
    ///
    /// Fails with [`LotBookError::LastLot`] when the book holds a
    /// single lot, and [`LotBookError::UnknownLot`] for an id not in
    /// the book.
    pub fn remove(&mut self, id: Uuid) -> Result<PurchaseLot, LotBookError> {
        if self.lots.len() <= 1 {
            return Err(LotBookError::LastLot);
        }
        let idx = self
            .lots
            .iter()
            .position(|l| l.id() == id)
            .ok_or(LotBookError::UnknownLot(id))?;
        Ok(self.lots.remove(idx))
    }

    pub fn lots(&self) -> &[PurchaseLot] {
        &self.lots
    }

    pub fn len(&self) -> usize {
        self.lots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }

    /// Total foreign-currency quantity across valid lots.
    pub fn total_quantity(&self) -> Decimal {
        self.lots
            .iter()
            .filter(|l| l.is_valid())
            .map(|l| l.quantity())
            .sum()
    }

    /// Total home-currency spend across valid lots.
    pub fn total_spend(&self) -> Decimal {
        self.lots
            .iter()
            .filter(|l| l.is_valid())
            .map(|l| l.spend())
            .sum()
    }
}

impl FromIterator<PurchaseLot> for LotBook {
    fn from_iter<T: IntoIterator<Item = PurchaseLot>>(iter: T) -> Self {
        Self {
            lots: iter.into_iter().collect(),
        }
    }
}
