//! Cart Badge Projector
//!
//! Writes a server summary into every counter and total display on the page.

use std::rc::Rc;

use log::error;

use crate::config::StorefrontConfig;
use crate::domain::{CartResult, CartSummary};
use crate::traits::{Dom, Notifier};

/// Class briefly added to counters after they change
pub const PULSE_CLASS: &str = "badge-pulse";

pub struct CartBadgeProjector {
    dom: Rc<dyn Dom>,
    notifier: Rc<dyn Notifier>,
    counter_selector: String,
    total_selector: String,
    pulse_ms: u32,
}

impl CartBadgeProjector {
    pub fn new(dom: Rc<dyn Dom>, notifier: Rc<dyn Notifier>, config: &StorefrontConfig) -> Self {
        Self {
            dom,
            notifier,
            counter_selector: config.selectors.cart_counter.clone(),
            total_selector: config.selectors.panel_total.clone(),
            pulse_ms: config.timings.badge_pulse_ms,
        }
    }

    /// Project a summary. Absent targets are skipped; projecting the same
    /// summary twice leaves the same text behind.
    pub fn project(&self, summary: &CartSummary) {
        let count = summary.cart_total_items.to_string();
        let written = self.dom.set_text_all(&self.counter_selector, &count);
        if written > 0 {
            self.dom.flash_class(&self.counter_selector, PULSE_CLASS, self.pulse_ms);
        }

        if let Some(price) = &summary.cart_total_price {
            self.dom.set_text_all(&self.total_selector, &format!("${}", price));
        }
    }

    /// Project a successful result, or surface the failure as a toast.
    pub fn apply(&self, result: &CartResult<CartSummary>) {
        match result {
            Ok(summary) => self.project(summary),
            Err(e) => {
                error!("[BADGE] Cart update failed: {}", e);
                self.notifier.error(&e.user_message());
            }
        }
    }
}
