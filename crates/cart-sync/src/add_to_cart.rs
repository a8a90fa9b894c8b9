//! Add-to-Cart Controller
//!
//! Single activation path for grid quick-add buttons and the detail-page
//! "add with quantity" button. A control stays disabled from the loading
//! state until it is restored, which is what keeps a second click out.

use std::rc::Rc;

use log::{debug, info};

use crate::badge::CartBadgeProjector;
use crate::client::CartSyncClient;
use crate::context::AppContext;
use crate::domain::{CartError, CartSummary, ProductId, Quantity};
use crate::events::CartEvents;
use crate::traits::{Control, Notifier, Runtime};

pub const INVALID_QUANTITY_MESSAGE: &str = "Cantidad no válida";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(CartSummary),
    Failed(CartError),
    /// Quantity rejected locally, nothing was sent
    Invalid,
    /// The control already has a request in flight
    Busy,
}

pub struct AddToCartController {
    client: Rc<CartSyncClient>,
    badges: Rc<CartBadgeProjector>,
    events: Rc<CartEvents>,
    notifier: Rc<dyn Notifier>,
    runtime: Rc<dyn Runtime>,
    restore_ms: u32,
}

impl AddToCartController {
    pub fn new(ctx: &AppContext) -> Self {
        Self {
            client: Rc::clone(&ctx.client),
            badges: Rc::clone(&ctx.badges),
            events: Rc::clone(&ctx.events),
            notifier: Rc::clone(&ctx.notifier),
            runtime: Rc::clone(&ctx.runtime),
            restore_ms: ctx.config.timings.success_restore_ms,
        }
    }

    /// Grid button: always one unit.
    pub async fn quick_add(&self, id: &ProductId, control: &dyn Control) -> AddOutcome {
        self.add(id, Quantity::ONE, control).await
    }

    /// Detail button: quantity comes from the sibling input's raw text.
    pub async fn add_with_quantity(&self, id: &ProductId, raw_quantity: &str, control: &dyn Control) -> AddOutcome {
        if control.is_disabled() {
            return AddOutcome::Busy;
        }
        match Quantity::from_input(raw_quantity) {
            Ok(quantity) => self.add(id, quantity, control).await,
            Err(e) => {
                debug!("[ADD] Rejected quantity for {}: {}", id, e);
                control.show_invalid(INVALID_QUANTITY_MESSAGE);
                AddOutcome::Invalid
            }
        }
    }

    async fn add(&self, id: &ProductId, quantity: Quantity, control: &dyn Control) -> AddOutcome {
        if control.is_disabled() {
            debug!("[ADD] Ignoring activation of busy control for {}", id);
            return AddOutcome::Busy;
        }

        let original = control.snapshot();
        control.show_loading();

        match self.client.add(id, quantity).await {
            Ok(summary) => {
                info!("[ADD] Added {} x{} ({} items in cart)", id, quantity, summary.cart_total_items);
                control.show_success();
                self.badges.project(&summary);
                if !summary.message.is_empty() {
                    self.notifier.success(&summary.message);
                }
                self.events.publish(&summary);

                self.runtime.sleep(self.restore_ms).await;
                control.restore(&original);
                AddOutcome::Added(summary)
            }
            Err(e) => {
                control.restore(&original);
                self.badges.apply(&Err(e.clone()));
                AddOutcome::Failed(e)
            }
        }
    }
}
