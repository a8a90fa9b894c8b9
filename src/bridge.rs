//! Page Event Bridge
//!
//! `CustomEvent` interop with scripts outside this bundle: they can raise a
//! toast with `storefront:notification`, and every cart change is
//! re-dispatched on `window` as `storefront:cart-update`.

use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, CustomEventInit, Event, Window};

use cart_sync::traits::Notifier;
use cart_sync::{CartEvents, CartSummary};

use crate::models::{CartUpdateDetail, NotificationDetail};

pub const NOTIFICATION_EVENT: &str = "storefront:notification";
pub const CART_UPDATE_EVENT: &str = "storefront:cart-update";

/// Show a toast for every `storefront:notification` event. Lives for the page.
pub fn listen_notifications(window: &Window, notifier: Rc<dyn Notifier>) -> Result<(), JsValue> {
    let on_notification = Closure::<dyn FnMut(Event)>::new(move |ev: Event| {
        let Some(ev) = ev.dyn_ref::<CustomEvent>() else { return };
        match serde_wasm_bindgen::from_value::<NotificationDetail>(ev.detail()) {
            Ok(detail) => notifier.notify(&detail.message, detail.kind, detail.duration),
            Err(e) => warn!("[BRIDGE] Bad notification detail: {}", e),
        }
    });
    window.add_event_listener_with_callback(NOTIFICATION_EVENT, on_notification.as_ref().unchecked_ref())?;
    on_notification.forget();
    Ok(())
}

pub fn forward_cart_updates(window: Window, events: &CartEvents) {
    events.subscribe(move |summary| {
        if let Err(e) = dispatch_cart_update(&window, summary) {
            warn!("[BRIDGE] Could not dispatch {}: {:?}", CART_UPDATE_EVENT, e);
        }
    });
}

fn dispatch_cart_update(window: &Window, summary: &CartSummary) -> Result<(), JsValue> {
    let detail = serde_wasm_bindgen::to_value(&CartUpdateDetail::from(summary))?;
    let init = CustomEventInit::new();
    init.set_detail(&detail);
    let event = CustomEvent::new_with_event_init_dict(CART_UPDATE_EVENT, &init)?;
    window.dispatch_event(&event)?;
    debug!("[BRIDGE] {} ({} items)", CART_UPDATE_EVENT, summary.cart_total_items);
    Ok(())
}
