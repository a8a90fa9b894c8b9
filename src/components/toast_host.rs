//! Toast Host Component
//!
//! Fixed container rendering every toast in the store.

use leptos::prelude::*;

use crate::context::use_ui_context;
use crate::notifier::dismiss_toast;
use crate::store::{store_is_hiding, ToastStateStoreFields};

#[component]
pub fn ToastHost() -> impl IntoView {
    let ui = use_ui_context();
    let store = ui.toasts;
    let exit_ms = ui.toast_exit_ms;

    view! {
        <div class="toast-container" aria-live="polite">
            <For
                each=move || store.toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let kind = toast.kind.as_str();
                    let toast_class = move || {
                        let phase = if store_is_hiding(&store, id) { "toast-hide" } else { "toast-show" };
                        format!("toast toast-{} {}", kind, phase)
                    };

                    view! {
                        <div class=toast_class role="status">
                            <div class="toast-content">
                                <i class=format!("fas fa-{} toast-icon", toast.kind.icon())></i>
                                <div class="toast-message">{toast.message.clone()}</div>
                                <button
                                    class="toast-close"
                                    aria-label="Cerrar"
                                    on:click=move |_| dismiss_toast(store, id, exit_ms)
                                >
                                    <i class="fas fa-times"></i>
                                </button>
                            </div>
                        </div>
                    }
                }
            />
        </div>
    }
}
