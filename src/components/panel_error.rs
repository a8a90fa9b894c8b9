//! Panel Error Component
//!
//! Replaces the cart panel content when the fragment cannot be loaded.

use std::rc::Rc;

use leptos::prelude::*;

#[component]
pub fn PanelError(
    #[prop(into)] message: String,
    /// Re-fetch the panel fragment
    on_retry: Rc<dyn Fn()>,
) -> impl IntoView {
    view! {
        <div class="cart-panel-error text-center py-4">
            <i class="fas fa-exclamation-triangle fa-2x text-warning mb-2"></i>
            <p class="text-muted">{message}</p>
            <button
                class="btn btn-sm btn-outline-primary"
                on:click=move |ev| {
                    ev.prevent_default();
                    on_retry();
                }
            >
                "Reintentar"
            </button>
        </div>
    }
}
