//! Cart Summary
//!
//! The server's authoritative snapshot returned by every cart mutation.

use serde::{Deserialize, Serialize};

use super::error::{CartError, CartResult};

/// Cart totals after a successful mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSummary {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub cart_total_items: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart_total_price: Option<String>,
}

/// Wire shape: rejections omit the totals entirely
#[derive(Debug, Deserialize)]
struct RawSummary {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    cart_total_items: Option<u32>,
    #[serde(default)]
    cart_total_price: Option<PriceField>,
}

/// Decimal prices are normally sent as strings, but numbers are accepted too
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PriceField {
    Text(String),
    Number(serde_json::Number),
}

impl PriceField {
    fn into_text(self) -> String {
        match self {
            PriceField::Text(s) => s,
            PriceField::Number(n) => n.to_string(),
        }
    }
}

impl CartSummary {
    /// Interpret a 2xx response body.
    ///
    /// `success: false` becomes `ServerRejected`; anything that isn't the
    /// expected JSON object, or a success without a total, is malformed.
    pub fn from_response_body(body: &str) -> CartResult<Self> {
        let raw: RawSummary = serde_json::from_str(body)
            .map_err(|e| CartError::MalformedResponse(e.to_string()))?;

        if !raw.success {
            return Err(CartError::ServerRejected {
                message: raw.message.unwrap_or_default(),
            });
        }

        let cart_total_items = raw
            .cart_total_items
            .ok_or_else(|| CartError::MalformedResponse("missing cart_total_items".to_string()))?;

        Ok(Self {
            success: true,
            message: raw.message.unwrap_or_default(),
            cart_total_items,
            cart_total_price: raw.cart_total_price.map(PriceField::into_text).filter(|p| !p.is_empty()),
        })
    }

    /// Whether the server reports an empty cart.
    pub fn is_empty(&self) -> bool {
        self.cart_total_items == 0
    }
}
