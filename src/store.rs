//! Toast Store
//!
//! Uses Leptos reactive_stores so the toast host re-renders per field.

use leptos::prelude::*;
use reactive_stores::Store;

use cart_sync::ToastKind;

use crate::models::Toast;

#[derive(Clone, Debug, Default, Store)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
    pub next_id: u64,
}

pub type ToastStore = Store<ToastState>;

// ========================
// Store Helper Functions
// ========================

/// Append a toast and return its id
pub fn store_push_toast(store: &ToastStore, message: &str, kind: ToastKind) -> u64 {
    let id = store.next_id().get_untracked();
    store.next_id().set(id + 1);
    store.toasts().write().push(Toast {
        id,
        message: message.to_string(),
        kind,
        hiding: false,
    });
    id
}

/// Start the exit transition; returns false if the toast is already gone
pub fn store_mark_hiding(store: &ToastStore, id: u64) -> bool {
    let field = store.toasts();
    let mut toasts = field.write();
    match toasts.iter_mut().find(|t| t.id == id) {
        Some(toast) => {
            toast.hiding = true;
            true
        }
        None => false,
    }
}

pub fn store_remove_toast(store: &ToastStore, id: u64) {
    store.toasts().write().retain(|t| t.id != id);
}

pub fn store_is_hiding(store: &ToastStore, id: u64) -> bool {
    store
        .toasts()
        .read()
        .iter()
        .find(|t| t.id == id)
        .map(|t| t.hiding)
        .unwrap_or(true)
}
