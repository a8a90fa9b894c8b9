//! Cart Sync Client
//!
//! Wraps the four cart endpoints and normalizes every outcome into
//! [`CartResult`]. Never recovers locally: each failure kind is handed to the
//! caller untouched.

use std::rc::Rc;

use log::{debug, warn};

use crate::config::StorefrontConfig;
use crate::csrf::CsrfProvider;
use crate::domain::{CartError, CartResult, CartSummary, ProductId, Quantity};
use crate::traits::{HttpBackend, HttpReply};

/// Header marking script-initiated requests
pub const AJAX_HEADER: (&str, &str) = ("X-Requested-With", "XMLHttpRequest");

pub struct CartSyncClient {
    http: Rc<dyn HttpBackend>,
    csrf: CsrfProvider,
    config: Rc<StorefrontConfig>,
}

impl CartSyncClient {
    pub fn new(http: Rc<dyn HttpBackend>, csrf: CsrfProvider, config: Rc<StorefrontConfig>) -> Self {
        Self { http, csrf, config }
    }

    pub async fn add(&self, id: &ProductId, quantity: Quantity) -> CartResult<CartSummary> {
        let url = self.config.product_url(&self.config.endpoints.add, id);
        self.mutate(&url, Some(quantity)).await
    }

    pub async fn set_quantity(&self, id: &ProductId, quantity: Quantity) -> CartResult<CartSummary> {
        let url = self.config.product_url(&self.config.endpoints.update, id);
        self.mutate(&url, Some(quantity)).await
    }

    pub async fn remove(&self, id: &ProductId) -> CartResult<CartSummary> {
        let url = self.config.product_url(&self.config.endpoints.remove, id);
        self.mutate(&url, None).await
    }

    /// Server-rendered panel markup, returned unparsed.
    pub async fn fetch_panel_fragment(&self) -> CartResult<String> {
        let url = self.config.panel_url();
        debug!("[CART] GET {}", url);
        let reply = self
            .http
            .get(&url, &[])
            .await
            .map_err(CartError::Network)?;
        ensure_success(&reply)?;
        Ok(reply.body)
    }

    async fn mutate(&self, url: &str, quantity: Option<Quantity>) -> CartResult<CartSummary> {
        let token = self.csrf.token();
        if token.is_none() {
            warn!("[CART] No CSRF token on page, {} will likely be rejected", url);
        }

        let mut headers = vec![(AJAX_HEADER.0.to_string(), AJAX_HEADER.1.to_string())];
        let mut form = Vec::with_capacity(2);
        if let Some(q) = quantity {
            form.push(("quantity".to_string(), q.to_string()));
        }
        if let Some(token) = token {
            headers.push((self.csrf.header_name().to_string(), token.clone()));
            form.push((self.csrf.field_name().to_string(), token));
        }

        debug!("[CART] POST {} quantity={:?}", url, quantity.map(Quantity::get));
        let reply = self
            .http
            .post_form(url, &headers, &form)
            .await
            .map_err(CartError::Network)?;
        ensure_success(&reply)?;
        CartSummary::from_response_body(&reply.body)
    }
}

fn ensure_success(reply: &HttpReply) -> CartResult<()> {
    if reply.is_success() {
        Ok(())
    } else {
        Err(CartError::Transport { status: reply.status })
    }
}
