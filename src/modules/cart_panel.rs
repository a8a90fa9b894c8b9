//! Cart Panel Module
//!
//! Open/close affordances plus the quantity and remove buttons inside the
//! panel fragment. The item buttons are delegated to the panel element,
//! which outlives every fragment swap.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::task::spawn_local;
use log::info;
use web_sys::{Document, Element, Event};

use cart_sync::bootstrap::Module;
use cart_sync::{AppContext, CartError, CartResult, PanelAction, PanelItemController, ProductId};
use dom_delegate::ListenerSet;

use super::cart::product_id_of;

pub struct CartPanelModule {
    ctx: AppContext,
    document: Document,
    items: Rc<PanelItemController>,
    listeners: RefCell<ListenerSet>,
}

impl CartPanelModule {
    pub fn new(ctx: &AppContext, document: Document) -> Self {
        Self {
            ctx: ctx.clone(),
            document,
            items: Rc::new(PanelItemController::new(ctx)),
            listeners: RefCell::new(ListenerSet::new()),
        }
    }

    fn bind_action(
        &self,
        listeners: &mut ListenerSet,
        panel: &Element,
        selector: &str,
        action: fn(ProductId) -> PanelAction,
    ) -> CartResult<()> {
        let items = Rc::clone(&self.items);
        listeners
            .bind(panel, "click", selector, move |button: Element, ev: Event| {
                ev.prevent_default();
                let Some(id) = product_id_of(&button) else { return };
                let items = Rc::clone(&items);
                spawn_local(async move {
                    items.handle(action(id)).await;
                });
            })
            .map(|_| ())
            .map_err(|e| CartError::Config(format!("{} listener: {:?}", selector, e)))
    }
}

impl Module for CartPanelModule {
    fn init(&self) -> CartResult<()> {
        let selectors = &self.ctx.config.selectors;
        let panel = self
            .document
            .query_selector(&selectors.panel)
            .ok()
            .flatten()
            .ok_or_else(|| CartError::Config(format!("no {} on this page", selectors.panel)))?;
        let mut listeners = self.listeners.borrow_mut();

        let controller = Rc::clone(&self.ctx.panel);
        let items = Rc::clone(&self.items);
        listeners
            .bind(&self.document, "click", &selectors.panel_open, move |_: Element, ev: Event| {
                ev.prevent_default();
                controller.toggle();
                if controller.is_open() {
                    items.on_open_trigger();
                }
            })
            .map_err(|e| CartError::Config(format!("open listener: {:?}", e)))?;

        let controller = Rc::clone(&self.ctx.panel);
        listeners
            .bind(&self.document, "click", &selectors.panel_close, move |_: Element, ev: Event| {
                ev.prevent_default();
                controller.close();
            })
            .map_err(|e| CartError::Config(format!("close listener: {:?}", e)))?;

        self.bind_action(&mut listeners, &panel, &selectors.increment, PanelAction::Increment)?;
        self.bind_action(&mut listeners, &panel, &selectors.decrement, PanelAction::Decrement)?;
        self.bind_action(&mut listeners, &panel, &selectors.remove, PanelAction::Remove)?;

        self.ctx.panel.preload();
        info!("[PANEL] Bound {} listeners", listeners.len());
        Ok(())
    }
}
