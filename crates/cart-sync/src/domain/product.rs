//! Product Identifiers and Quantities

use serde::{Deserialize, Serialize};

use super::error::{CartError, CartResult};

/// Opaque product identifier taken from a `data-product-id` attribute.
///
/// Restricted to ASCII alphanumerics, `-` and `_` so it can be spliced into
/// element ids (`quantity{id}`) and attribute selectors without escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    pub fn parse(raw: &str) -> CartResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(CartError::InvalidInput("empty product id".to_string()));
        }
        if !raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return Err(CartError::InvalidInput(format!("invalid product id: {}", raw)));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Id of the quantity display inside the panel fragment
    pub fn quantity_element_id(&self) -> String {
        format!("quantity{}", self.0)
    }

    /// Id of the line-total display inside the panel fragment
    pub fn total_element_id(&self) -> String {
        format!("total{}", self.0)
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ProductId {
    type Error = CartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

/// Line quantity, never below one
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(u32);

impl Quantity {
    pub const ONE: Quantity = Quantity(1);

    /// Floor-clamp any integer to a valid quantity.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(1, u32::MAX as i64) as u32)
    }

    /// Exact conversion; values below one are rejected.
    pub fn new(value: i64) -> CartResult<Self> {
        if value < 1 {
            return Err(CartError::InvalidInput(format!("quantity must be at least 1, got {}", value)));
        }
        Ok(Self::clamped(value))
    }

    /// Read a quantity from a numeric input box.
    ///
    /// Only the leading integer counts (`"2.5"` is 2, `"3abc"` is 3). Text
    /// without one falls back to one; an explicit number below one is
    /// rejected.
    pub fn from_input(raw: &str) -> CartResult<Self> {
        match leading_integer(raw) {
            Some(value) => Self::new(value),
            None => Ok(Self::ONE),
        }
    }

    /// Apply a +/- step without dropping below one.
    pub fn step(self, delta: i32) -> Self {
        Self::clamped(self.0 as i64 + delta as i64)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn is_minimum(self) -> bool {
        self.0 == 1
    }
}

/// Optional sign followed by at least one digit, after leading whitespace.
/// Digit runs too long for `i64` saturate.
fn leading_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (negative, rest) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let digits = &rest[..rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len())];
    if digits.is_empty() {
        return None;
    }
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
