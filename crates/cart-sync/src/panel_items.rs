//! Panel Item Controller
//!
//! Quantity +/- and remove actions rendered inside the panel fragment. The
//! fragment is replaced on every refresh, so the page module binds one
//! delegated listener on the content region and turns clicks into
//! [`PanelAction`]s.
//!
//! Quantity changes are optimistic: the row is updated before the request
//! and, if the server does not confirm it, the whole panel is re-fetched
//! instead of patching the row back.
//!
//! While a request for a product is outstanding its controls are disabled
//! and further actions on that product are ignored.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use log::{debug, info, warn};

use crate::badge::CartBadgeProjector;
use crate::client::CartSyncClient;
use crate::config::{SelectorConfig, TimingConfig};
use crate::context::AppContext;
use crate::domain::{CartError, CartSummary, LineItemView, ProductId};
use crate::panel::CartPanelController;
use crate::traits::{Dom, Notifier};

pub const REMOVE_CONFIRM_MESSAGE: &str = "¿Estás seguro de que quieres eliminar este producto del carrito?";
pub const UPDATED_MESSAGE: &str = "Carrito actualizado";
pub const REMOVED_MESSAGE: &str = "Producto eliminado del carrito";

/// A click inside the panel, already resolved to its product
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelAction {
    Increment(ProductId),
    Decrement(ProductId),
    Remove(ProductId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Updated(CartSummary),
    /// Request failed; the panel was re-fetched from the server
    Resynced(CartError),
    /// The shopper declined the removal prompt
    Declined,
    /// Actions only apply while the panel is open
    PanelClosed,
    /// No quantity display for this product in the current fragment
    MissingItem,
    /// A request for this product is still outstanding
    Busy,
}

/// Marks a product as having a request in flight until dropped
struct InFlight<'a> {
    pending: &'a RefCell<HashSet<ProductId>>,
    id: ProductId,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.pending.borrow_mut().remove(&self.id);
    }
}

pub struct PanelItemController {
    client: Rc<CartSyncClient>,
    badges: Rc<CartBadgeProjector>,
    panel: Rc<CartPanelController>,
    dom: Rc<dyn Dom>,
    notifier: Rc<dyn Notifier>,
    selectors: SelectorConfig,
    timings: TimingConfig,
    pending: RefCell<HashSet<ProductId>>,
}

impl PanelItemController {
    pub fn new(ctx: &AppContext) -> Self {
        Self {
            client: Rc::clone(&ctx.client),
            badges: Rc::clone(&ctx.badges),
            panel: Rc::clone(&ctx.panel),
            dom: Rc::clone(&ctx.dom),
            notifier: Rc::clone(&ctx.notifier),
            selectors: ctx.config.selectors.clone(),
            timings: ctx.config.timings.clone(),
            pending: RefCell::new(HashSet::new()),
        }
    }

    pub fn is_pending(&self, id: &ProductId) -> bool {
        self.pending.borrow().contains(id)
    }

    fn claim(&self, id: &ProductId) -> Option<InFlight<'_>> {
        if !self.pending.borrow_mut().insert(id.clone()) {
            debug!("[ITEMS] Request for {} still in flight", id);
            return None;
        }
        Some(InFlight { pending: &self.pending, id: id.clone() })
    }

    pub async fn handle(&self, action: PanelAction) -> ItemOutcome {
        match action {
            PanelAction::Increment(id) => self.change_quantity(&id, 1).await,
            PanelAction::Decrement(id) => self.change_quantity(&id, -1).await,
            PanelAction::Remove(id) => self.remove(&id).await,
        }
    }

    pub async fn change_quantity(&self, id: &ProductId, delta: i32) -> ItemOutcome {
        if !self.panel.is_open() {
            return ItemOutcome::PanelClosed;
        }
        if self.is_pending(id) {
            return ItemOutcome::Busy;
        }

        let quantity_selector = format!("#{}", id.quantity_element_id());
        let total_selector = format!("#{}", id.total_element_id());
        let Some(quantity_text) = self.dom.text_of(&quantity_selector) else {
            warn!("[ITEMS] No quantity display for product {}", id);
            return ItemOutcome::MissingItem;
        };
        let price_text = self
            .dom
            .nearest_text(&total_selector, &self.selectors.line_item, &self.selectors.unit_price);

        let row = LineItemView::from_texts(id.clone(), Some(&quantity_text), price_text.as_deref());
        let next = row.stepped(delta);
        debug!("[ITEMS] {} quantity {} -> {}", id, row.quantity, next.quantity);

        let Some(_in_flight) = self.claim(id) else {
            return ItemOutcome::Busy;
        };
        let increment = self.selectors.increment_for(id);
        let decrement = self.selectors.decrement_for(id);
        self.dom.set_disabled(&increment, true);
        self.dom.set_disabled(&decrement, true);

        self.dom.set_text_all(&quantity_selector, &next.quantity.to_string());
        if let Some(total) = next.line_total() {
            self.dom.set_text_all(&total_selector, &total.to_string());
        }

        let result = self.client.set_quantity(id, next.quantity).await;
        self.dom.set_disabled(&increment, false);
        self.dom.set_disabled(&decrement, next.quantity.is_minimum());

        match result {
            Ok(summary) => {
                self.confirmed(&summary, UPDATED_MESSAGE);
                if summary.is_empty() {
                    self.panel.refresh_after(self.timings.empty_cart_refresh_ms);
                }
                ItemOutcome::Updated(summary)
            }
            Err(e) => self.resync(e).await,
        }
    }

    pub async fn remove(&self, id: &ProductId) -> ItemOutcome {
        if !self.panel.is_open() {
            return ItemOutcome::PanelClosed;
        }
        if self.is_pending(id) {
            return ItemOutcome::Busy;
        }
        if !self.dom.confirm(REMOVE_CONFIRM_MESSAGE) {
            return ItemOutcome::Declined;
        }
        let Some(_in_flight) = self.claim(id) else {
            return ItemOutcome::Busy;
        };

        let control = self.selectors.remove_for(id);
        self.dom.set_disabled(&control, true);
        let result = self.client.remove(id).await;
        self.dom.set_disabled(&control, false);

        match result {
            Ok(summary) => {
                info!("[ITEMS] Removed {}", id);
                self.confirmed(&summary, REMOVED_MESSAGE);
                self.panel.refresh_after(self.timings.remove_refresh_ms);
                ItemOutcome::Updated(summary)
            }
            Err(e) => self.resync(e).await,
        }
    }

    /// An open-panel affordance was activated; refresh once the transition
    /// has started.
    pub fn on_open_trigger(&self) {
        self.panel.refresh_after(self.timings.open_refresh_ms);
    }

    fn confirmed(&self, summary: &CartSummary, fallback: &str) {
        self.badges.project(summary);
        let message = if summary.message.is_empty() { fallback } else { summary.message.as_str() };
        self.notifier.success(message);
    }

    /// Discard the optimistic edit by re-fetching the authoritative panel.
    async fn resync(&self, error: CartError) -> ItemOutcome {
        self.badges.apply(&Err(error.clone()));
        self.panel.refresh().await;
        ItemOutcome::Resynced(error)
    }
}
