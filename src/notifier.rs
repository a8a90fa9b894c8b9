//! Toast Notifier
//!
//! [`Notifier`] backed by the toast store. Each toast dismisses itself after
//! its duration, then stays in the hide phase for `exit_ms` before removal.

use gloo_timers::callback::Timeout;

use cart_sync::config::TimingConfig;
use cart_sync::traits::Notifier;
use cart_sync::ToastKind;

use crate::store::{store_mark_hiding, store_push_toast, store_remove_toast, ToastStore};

pub struct LeptosNotifier {
    store: ToastStore,
    default_ms: u32,
    exit_ms: u32,
}

impl LeptosNotifier {
    pub fn new(store: ToastStore, timings: &TimingConfig) -> Self {
        Self {
            store,
            default_ms: timings.toast_ms,
            exit_ms: timings.toast_exit_ms,
        }
    }
}

impl Notifier for LeptosNotifier {
    fn notify(&self, message: &str, kind: ToastKind, duration_ms: Option<u32>) {
        let id = store_push_toast(&self.store, message, kind);
        let store = self.store;
        let exit_ms = self.exit_ms;
        Timeout::new(duration_ms.unwrap_or(self.default_ms), move || {
            dismiss_toast(store, id, exit_ms);
        })
        .forget();
    }
}

/// Hide a toast now and remove it once the exit transition is over.
pub fn dismiss_toast(store: ToastStore, id: u64, exit_ms: u32) {
    if !store_mark_hiding(&store, id) {
        return;
    }
    Timeout::new(exit_ms, move || store_remove_toast(&store, id)).forget();
}
