//! Sorting Module

use std::cell::RefCell;
use std::rc::Rc;

use log::error;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlSelectElement};

use cart_sync::bootstrap::Module;
use cart_sync::{AppContext, CartError, CartResult, SortController};
use dom_delegate::ListenerSet;

pub struct SortingModule {
    ctx: AppContext,
    document: Document,
    controller: Rc<SortController>,
    listeners: RefCell<ListenerSet>,
}

impl SortingModule {
    pub fn new(ctx: &AppContext, document: Document) -> Self {
        Self {
            ctx: ctx.clone(),
            document,
            controller: Rc::new(SortController::new(ctx)),
            listeners: RefCell::new(ListenerSet::new()),
        }
    }
}

impl Module for SortingModule {
    fn init(&self) -> CartResult<()> {
        let controller = Rc::clone(&self.controller);
        self.listeners
            .borrow_mut()
            .bind(&self.document, "change", &self.ctx.config.selectors.sort_select, move |select: Element, _: Event| {
                let Ok(select) = select.dyn_into::<HtmlSelectElement>() else { return };
                if let Err(e) = controller.apply(&select.value()) {
                    error!("[SORT] {}", e);
                }
            })
            .map(|_| ())
            .map_err(|e| CartError::Config(format!("sort listener: {:?}", e)))
    }
}
