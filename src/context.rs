//! Application Context
//!
//! UI-side handles provided via Leptos Context API. The cart services are
//! `Rc`-based, so they stay with the bootstrapper in local storage and are
//! not part of this context.

use leptos::prelude::*;

use crate::store::ToastStore;

#[derive(Clone, Copy)]
pub struct UiContext {
    pub toasts: ToastStore,
    /// Length of the toast hide transition
    pub toast_exit_ms: u32,
}

impl UiContext {
    pub fn new(toasts: ToastStore, toast_exit_ms: u32) -> Self {
        Self { toasts, toast_exit_ms }
    }
}

pub fn use_ui_context() -> UiContext {
    expect_context::<UiContext>()
}
