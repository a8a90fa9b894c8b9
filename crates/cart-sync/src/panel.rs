//! Cart Panel Controller
//!
//! Owns the slide-out panel: its open/closed state and the lifecycle of the
//! server-rendered fragment inside it.
//!
//! Refreshes are neither queued nor coalesced. Each one replaces the whole
//! content region, so whichever completes last wins.

use std::cell::Cell;
use std::rc::Rc;

use log::{debug, error, info};

use crate::client::CartSyncClient;
use crate::config::StorefrontConfig;
use crate::domain::{CartError, CartSummary};
use crate::traits::{Dom, Runtime};

/// Class toggled on the panel and its overlay
pub const VISIBLE_CLASS: &str = "active";

/// Shown in place of the fragment when it cannot be loaded
pub const LOAD_ERROR_MESSAGE: &str = "Error al cargar el carrito";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Closed,
    Opening,
    Open,
    /// Open with at least one fragment fetch outstanding
    Refreshing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Replaced,
    Failed(CartError),
}

pub struct CartPanelController {
    client: Rc<CartSyncClient>,
    dom: Rc<dyn Dom>,
    runtime: Rc<dyn Runtime>,
    panel_selector: String,
    overlay_selector: String,
    content_selector: String,
    state: Cell<PanelState>,
    in_flight: Cell<u32>,
}

impl CartPanelController {
    pub fn new(
        client: Rc<CartSyncClient>,
        dom: Rc<dyn Dom>,
        runtime: Rc<dyn Runtime>,
        config: &StorefrontConfig,
    ) -> Self {
        Self {
            client,
            dom,
            runtime,
            panel_selector: config.selectors.panel.clone(),
            overlay_selector: config.selectors.overlay.clone(),
            content_selector: config.selectors.panel_content.clone(),
            state: Cell::new(PanelState::Closed),
            in_flight: Cell::new(0),
        }
    }

    pub fn state(&self) -> PanelState {
        self.state.get()
    }

    pub fn is_open(&self) -> bool {
        self.state.get() != PanelState::Closed
    }

    /// Show the panel and start loading its content. No-op when already open.
    pub fn open(self: &Rc<Self>) {
        if self.is_open() {
            return;
        }
        self.state.set(PanelState::Opening);
        self.set_visible(true);
        self.state.set(PanelState::Open);
        info!("[PANEL] Opened");
        self.spawn_refresh();
    }

    /// Hide the panel. Outstanding fetches keep running but cannot reopen it.
    pub fn close(&self) {
        self.set_visible(false);
        self.state.set(PanelState::Closed);
        info!("[PANEL] Closed");
    }

    pub fn toggle(self: &Rc<Self>) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    fn set_visible(&self, visible: bool) {
        self.dom.toggle_class(&self.panel_selector, VISIBLE_CLASS, visible);
        self.dom.toggle_class(&self.overlay_selector, VISIBLE_CLASS, visible);
        self.dom.set_scroll_locked(visible);
    }

    /// Fetch the fragment and replace the content region wholesale.
    ///
    /// Failures are rendered in place with a retry action and never change
    /// the open/closed state.
    pub async fn refresh(self: &Rc<Self>) -> RefreshOutcome {
        self.begin_refresh();
        let outcome = match self.client.fetch_panel_fragment().await {
            Ok(html) => {
                if !self.dom.replace_html(&self.content_selector, &html) {
                    debug!("[PANEL] No content region on this page");
                }
                RefreshOutcome::Replaced
            }
            Err(e) => {
                error!("[PANEL] Refresh failed: {}", e);
                let this = Rc::clone(self);
                let retry: Rc<dyn Fn()> = Rc::new(move || this.spawn_refresh());
                self.dom.render_error(&self.content_selector, LOAD_ERROR_MESSAGE, retry);
                RefreshOutcome::Failed(e)
            }
        };
        self.end_refresh();
        outcome
    }

    /// Fire-and-forget refresh.
    pub fn spawn_refresh(self: &Rc<Self>) {
        let this = Rc::clone(self);
        self.runtime.spawn(Box::pin(async move {
            this.refresh().await;
        }));
    }

    /// Fire-and-forget refresh after `ms`.
    pub fn refresh_after(self: &Rc<Self>, ms: u32) {
        let this = Rc::clone(self);
        self.runtime.spawn(Box::pin(async move {
            this.runtime.sleep(ms).await;
            this.refresh().await;
        }));
    }

    /// Initial content load; the panel stays closed.
    pub fn preload(self: &Rc<Self>) {
        self.spawn_refresh();
    }

    /// `cartUpdate` subscriber: only an open panel re-fetches.
    pub fn on_cart_changed(self: &Rc<Self>, summary: &CartSummary) {
        if self.is_open() {
            debug!("[PANEL] Cart changed ({} items), refreshing", summary.cart_total_items);
            self.spawn_refresh();
        }
    }

    fn begin_refresh(&self) {
        self.in_flight.set(self.in_flight.get() + 1);
        if self.state.get() == PanelState::Open {
            self.state.set(PanelState::Refreshing);
        }
    }

    fn end_refresh(&self) {
        let remaining = self.in_flight.get().saturating_sub(1);
        self.in_flight.set(remaining);
        if remaining == 0 && self.state.get() == PanelState::Refreshing {
            self.state.set(PanelState::Open);
        }
    }
}
