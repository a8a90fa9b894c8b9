//! Cart Module
//!
//! Grid quick-add and detail-page add buttons. One delegated click listener
//! per button kind on the document, so buttons rendered later (pagination,
//! infinite scroll) work without rebinding.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::task::spawn_local;
use log::{info, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlInputElement};

use cart_sync::bootstrap::Module;
use cart_sync::{AddToCartController, AppContext, CartError, CartResult, ProductId};
use dom_delegate::{data_attribute, ListenerSet};

use crate::dom::ButtonControl;

pub struct CartModule {
    ctx: AppContext,
    document: Document,
    controller: Rc<AddToCartController>,
    listeners: RefCell<ListenerSet>,
}

impl CartModule {
    pub fn new(ctx: &AppContext, document: Document) -> Self {
        Self {
            ctx: ctx.clone(),
            document,
            controller: Rc::new(AddToCartController::new(ctx)),
            listeners: RefCell::new(ListenerSet::new()),
        }
    }
}

/// Product id of an activated button; buttons without one are ignored
pub(crate) fn product_id_of(element: &Element) -> Option<ProductId> {
    let raw = data_attribute(element, "product-id")?;
    match ProductId::parse(&raw) {
        Ok(id) => Some(id),
        Err(e) => {
            warn!("[CART] Ignoring button with bad product id: {}", e);
            None
        }
    }
}

impl Module for CartModule {
    fn init(&self) -> CartResult<()> {
        let selectors = &self.ctx.config.selectors;
        let mut listeners = self.listeners.borrow_mut();

        let controller = Rc::clone(&self.controller);
        listeners
            .bind(&self.document, "click", &selectors.quick_add, move |button: Element, ev: Event| {
                ev.prevent_default();
                let Some(id) = product_id_of(&button) else { return };
                let controller = Rc::clone(&controller);
                spawn_local(async move {
                    let control = ButtonControl::new(button);
                    controller.quick_add(&id, &control).await;
                });
            })
            .map_err(|e| CartError::Config(format!("quick-add listener: {:?}", e)))?;

        let controller = Rc::clone(&self.controller);
        let document = self.document.clone();
        let quantity_selector = selectors.detail_quantity.clone();
        listeners
            .bind(&self.document, "click", &selectors.detail_add, move |button: Element, ev: Event| {
                ev.prevent_default();
                let Some(id) = product_id_of(&button) else { return };
                let input = document
                    .query_selector(&quantity_selector)
                    .ok()
                    .flatten()
                    .and_then(|e| e.dyn_into::<HtmlInputElement>().ok());
                let raw = input.as_ref().map(|i| i.value()).unwrap_or_default();
                let controller = Rc::clone(&controller);
                spawn_local(async move {
                    let control = ButtonControl::new(button).with_quantity_input(input);
                    controller.add_with_quantity(&id, &raw, &control).await;
                });
            })
            .map_err(|e| CartError::Config(format!("detail-add listener: {:?}", e)))?;

        info!("[CART] Bound {} add-to-cart listeners", listeners.len());
        Ok(())
    }
}
