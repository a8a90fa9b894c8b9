//! Line Item View
//!
//! Transient view of one panel row, rebuilt from the DOM on every read.

use super::money::Money;
use super::product::{ProductId, Quantity};

/// One product row as currently displayed inside the panel fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItemView {
    pub product_id: ProductId,
    pub quantity: Quantity,
    pub unit_price: Option<Money>,
}

impl LineItemView {
    /// Build from the raw text nodes of a row.
    ///
    /// An unreadable quantity counts as one.
    pub fn from_texts(product_id: ProductId, quantity_text: Option<&str>, price_text: Option<&str>) -> Self {
        let quantity = quantity_text
            .and_then(|t| t.trim().parse::<i64>().ok())
            .map(Quantity::clamped)
            .unwrap_or(Quantity::ONE);
        Self {
            product_id,
            quantity,
            unit_price: price_text.and_then(Money::parse_localized),
        }
    }

    /// Same row with a +/- step applied.
    pub fn stepped(&self, delta: i32) -> Self {
        Self {
            quantity: self.quantity.step(delta),
            ..self.clone()
        }
    }

    /// Estimated line total, if the unit price was readable.
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price.and_then(|p| p.times(self.quantity.get()))
    }
}
