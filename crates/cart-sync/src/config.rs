//! Storefront Configuration
//!
//! Endpoints, CSRF names, DOM selectors and timings. Every field has a
//! default matching the server templates, so a page may override only what
//! differs through a JSON blob.

use serde::{Deserialize, Serialize};

use crate::domain::{CartError, CartResult, ProductId};

/// Placeholder replaced by the percent-encoded product id in endpoint templates
pub const PRODUCT_ID_PLACEHOLDER: &str = "{id}";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Scheme + host prefix for endpoints; empty means relative URLs
    pub origin: String,
    pub endpoints: EndpointConfig,
    pub csrf: CsrfConfig,
    pub selectors: SelectorConfig,
    pub timings: TimingConfig,
    /// Query parameter rewritten by the sort control
    pub sort_param: String,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            origin: String::new(),
            endpoints: EndpointConfig::default(),
            csrf: CsrfConfig::default(),
            selectors: SelectorConfig::default(),
            timings: TimingConfig::default(),
            sort_param: "sort".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub add: String,
    pub update: String,
    pub remove: String,
    pub panel: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            add: "/carrito/agregar/{id}/".to_string(),
            update: "/carrito/actualizar/{id}/".to_string(),
            remove: "/carrito/remover/{id}/".to_string(),
            panel: "/carrito/api/panel/".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsrfConfig {
    /// Hidden form field name, also used as the body field
    pub field_name: String,
    pub cookie_name: String,
    pub header_name: String,
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            field_name: "csrfmiddlewaretoken".to_string(),
            cookie_name: "csrftoken".to_string(),
            header_name: "X-CSRFToken".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub cart_counter: String,
    pub panel_total: String,
    pub panel: String,
    pub overlay: String,
    pub panel_content: String,
    pub panel_open: String,
    pub panel_close: String,
    pub line_item: String,
    pub unit_price: String,
    pub increment: String,
    pub decrement: String,
    pub remove: String,
    pub quick_add: String,
    pub detail_add: String,
    pub detail_quantity: String,
    pub sort_select: String,
    pub products_grid: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            cart_counter: ".cart-badge, #cartPanelCount".to_string(),
            panel_total: "#cartPanelTotal".to_string(),
            panel: "#cartPanel".to_string(),
            overlay: ".panel-overlay".to_string(),
            panel_content: "#cartPanelContent".to_string(),
            panel_open: ".cart-toggle".to_string(),
            panel_close: ".panel-overlay, .cart-panel-close".to_string(),
            line_item: ".cart-panel-item".to_string(),
            unit_price: ".cart-item-price".to_string(),
            increment: ".cart-plus".to_string(),
            decrement: ".cart-minus".to_string(),
            remove: ".cart-remove".to_string(),
            quick_add: ".add-to-cart-btn".to_string(),
            detail_add: ".add-to-cart-btn-detail".to_string(),
            detail_quantity: "#quantity".to_string(),
            sort_select: "select[name=\"sort\"], .sort-select".to_string(),
            products_grid: ".products-grid".to_string(),
        }
    }
}

impl SelectorConfig {
    /// Decrement control of one line item
    pub fn decrement_for(&self, id: &ProductId) -> String {
        scoped_to_product(&self.decrement, id)
    }

    pub fn increment_for(&self, id: &ProductId) -> String {
        scoped_to_product(&self.increment, id)
    }

    pub fn remove_for(&self, id: &ProductId) -> String {
        scoped_to_product(&self.remove, id)
    }
}

/// Append a `[data-product-id="…"]` filter to every part of a selector list.
fn scoped_to_product(selector: &str, id: &ProductId) -> String {
    selector
        .split(',')
        .map(|part| format!("{}[data-product-id=\"{}\"]", part.trim(), id))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Delays in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Success state shown on an add button before it is restored
    pub success_restore_ms: u32,
    /// Refresh delay after a quantity update empties the cart
    pub empty_cart_refresh_ms: u32,
    /// Refresh delay after a successful removal
    pub remove_refresh_ms: u32,
    /// Refresh delay after an open-panel affordance is activated
    pub open_refresh_ms: u32,
    pub toast_ms: u32,
    pub toast_exit_ms: u32,
    pub badge_pulse_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            success_restore_ms: 1500,
            empty_cart_refresh_ms: 1000,
            remove_refresh_ms: 500,
            open_refresh_ms: 300,
            toast_ms: 5000,
            toast_exit_ms: 300,
            badge_pulse_ms: 300,
        }
    }
}

impl StorefrontConfig {
    /// Parse a (possibly partial) JSON override.
    pub fn from_json(json: &str) -> CartResult<Self> {
        serde_json::from_str(json).map_err(|e| CartError::Config(e.to_string()))
    }

    /// Resolve an endpoint template for a product.
    pub fn product_url(&self, template: &str, id: &ProductId) -> String {
        let encoded = percent_encoding::utf8_percent_encode(id.as_str(), percent_encoding::NON_ALPHANUMERIC);
        format!("{}{}", self.origin, template.replace(PRODUCT_ID_PLACEHOLDER, &encoded.to_string()))
    }

    pub fn panel_url(&self) -> String {
        format!("{}{}", self.origin, self.endpoints.panel)
    }
}
