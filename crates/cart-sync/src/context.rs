//! Application Context
//!
//! Explicitly constructed services shared by all page modules, built leaves
//! first: notifier, CSRF provider, client, badge projector, panel, event
//! channel.

use std::rc::Rc;

use crate::badge::CartBadgeProjector;
use crate::client::CartSyncClient;
use crate::config::StorefrontConfig;
use crate::csrf::CsrfProvider;
use crate::events::CartEvents;
use crate::panel::CartPanelController;
use crate::traits::{CsrfSource, Dom, HttpBackend, Navigator, Notifier, Runtime};

/// Platform implementations handed to [`AppContext::build`]
pub struct Ports {
    pub http: Rc<dyn HttpBackend>,
    pub csrf: Rc<dyn CsrfSource>,
    pub dom: Rc<dyn Dom>,
    pub notifier: Rc<dyn Notifier>,
    pub runtime: Rc<dyn Runtime>,
    pub navigator: Rc<dyn Navigator>,
}

#[derive(Clone)]
pub struct AppContext {
    pub config: Rc<StorefrontConfig>,
    pub dom: Rc<dyn Dom>,
    pub notifier: Rc<dyn Notifier>,
    pub runtime: Rc<dyn Runtime>,
    pub navigator: Rc<dyn Navigator>,
    pub client: Rc<CartSyncClient>,
    pub badges: Rc<CartBadgeProjector>,
    pub panel: Rc<CartPanelController>,
    pub events: Rc<CartEvents>,
}

impl AppContext {
    pub fn build(config: StorefrontConfig, ports: Ports) -> Self {
        let config = Rc::new(config);

        let csrf = CsrfProvider::new(ports.csrf, config.csrf.clone());
        let client = Rc::new(CartSyncClient::new(ports.http, csrf, Rc::clone(&config)));
        let badges = Rc::new(CartBadgeProjector::new(Rc::clone(&ports.dom), Rc::clone(&ports.notifier), &config));
        let panel = Rc::new(CartPanelController::new(
            Rc::clone(&client),
            Rc::clone(&ports.dom),
            Rc::clone(&ports.runtime),
            &config,
        ));

        let events = Rc::new(CartEvents::new());
        let weak_panel = Rc::downgrade(&panel);
        events.subscribe(move |summary| {
            if let Some(panel) = weak_panel.upgrade() {
                panel.on_cart_changed(summary);
            }
        });

        Self {
            config,
            dom: ports.dom,
            notifier: ports.notifier,
            runtime: ports.runtime,
            navigator: ports.navigator,
            client,
            badges,
            panel,
            events,
        }
    }
}
