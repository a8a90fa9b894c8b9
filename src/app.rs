//! Storefront Frontend App
//!
//! Wires the browser ports into the cart core, boots the page modules for
//! the current path and renders the toast host. The rest of the page is
//! server-rendered.

use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info};
use reactive_stores::Store;
use web_sys::{Document, Window};

use cart_sync::traits::Notifier;
use cart_sync::{AppBootstrapper, AppContext, CartError, CartResult, Ports, ReqwestBackend, StorefrontConfig};

use crate::bridge;
use crate::components::ToastHost;
use crate::context::UiContext;
use crate::dom::{WasmRuntime, WebCsrfSource, WebDom, WebNavigator};
use crate::modules;
use crate::notifier::LeptosNotifier;
use crate::store::{ToastState, ToastStore};

/// Optional `<script type="application/json">` overriding config defaults
pub const CONFIG_ELEMENT_ID: &str = "storefront-config";

#[component]
pub fn App() -> impl IntoView {
    let window = web_sys::window();
    let document = window.as_ref().and_then(|w| w.document());
    let config = match (&window, &document) {
        (Some(window), Some(document)) => load_config(window, document),
        _ => StorefrontConfig::default(),
    };

    let toasts: ToastStore = Store::new(ToastState::default());
    provide_context(UiContext::new(toasts, config.timings.toast_exit_ms));
    let notifier = Rc::new(LeptosNotifier::new(toasts, &config.timings));

    match (window, document) {
        (Some(window), Some(document)) => match start(window, document, config, notifier) {
            // owned by the app for the page lifetime
            Ok(boot) => {
                StoredValue::new_local(boot);
            }
            Err(e) => error!("[APP] Startup failed: {}", e),
        },
        _ => error!("[APP] No window/document, cart features disabled"),
    }

    view! { <ToastHost /> }
}

fn load_config(window: &Window, document: &Document) -> StorefrontConfig {
    let mut config = match document.get_element_by_id(CONFIG_ELEMENT_ID).and_then(|e| e.text_content()) {
        Some(json) => StorefrontConfig::from_json(&json).unwrap_or_else(|e| {
            error!("[APP] Ignoring #{}: {}", CONFIG_ELEMENT_ID, e);
            StorefrontConfig::default()
        }),
        None => StorefrontConfig::default(),
    };
    // fetch from wasm needs absolute URLs
    if config.origin.is_empty() {
        config.origin = window.location().origin().unwrap_or_default();
    }
    config
}

fn start(
    window: Window,
    document: Document,
    config: StorefrontConfig,
    notifier: Rc<dyn Notifier>,
) -> CartResult<AppBootstrapper> {
    let ctx = AppContext::build(
        config,
        Ports {
            http: Rc::new(ReqwestBackend::new()),
            csrf: Rc::new(WebCsrfSource::new(document.clone())),
            dom: Rc::new(WebDom::new(document.clone())),
            notifier,
            runtime: Rc::new(WasmRuntime),
            navigator: Rc::new(WebNavigator::new(window.clone())),
        },
    );

    bridge::forward_cart_updates(window.clone(), &ctx.events);
    bridge::listen_notifications(&window, Rc::clone(&ctx.notifier))
        .map_err(|e| CartError::Config(format!("notification listener: {:?}", e)))?;

    let mut boot = AppBootstrapper::new(ctx);
    modules::register_all(&mut boot, &document);

    let path = window.location().pathname().unwrap_or_default();
    let report = boot.boot(&path);
    info!("[APP] {} modules loaded, {} skipped on {}", report.loaded.len(), report.skipped.len(), path);
    Ok(boot)
}
