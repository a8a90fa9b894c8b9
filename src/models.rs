//! Frontend Models
//!
//! Toasts held in the store and the payloads of the page-level
//! `CustomEvent`s the frontend listens to and dispatches.

use cart_sync::{CartSummary, ToastKind};
use serde::{Deserialize, Serialize};

/// One visible toast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
    /// In the exit transition, removed shortly after
    pub hiding: bool,
}

/// `detail` of a `storefront:notification` event
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NotificationDetail {
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: ToastKind,
    #[serde(default)]
    pub duration: Option<u32>,
}

/// `detail` of a `storefront:cart-update` event
#[derive(Debug, Clone, Serialize)]
pub struct CartUpdateDetail {
    #[serde(rename = "cartTotalItems")]
    pub cart_total_items: u32,
    #[serde(rename = "cartTotalPrice")]
    pub cart_total_price: Option<String>,
    pub message: String,
}

impl From<&CartSummary> for CartUpdateDetail {
    fn from(summary: &CartSummary) -> Self {
        Self {
            cart_total_items: summary.cart_total_items,
            cart_total_price: summary.cart_total_price.clone(),
            message: summary.message.clone(),
        }
    }
}
