//! Page Modules
//!
//! DOM bindings for each feature the bootstrapper can load. Offers and chat
//! are served by other bundles and have no factory here.

mod cart;
mod cart_panel;
mod sorting;

use std::rc::Rc;

use web_sys::Document;

use cart_sync::bootstrap::{AppBootstrapper, Module, ModuleName};

pub use cart::CartModule;
pub use cart_panel::CartPanelModule;
pub use sorting::SortingModule;

pub fn register_all(boot: &mut AppBootstrapper, document: &Document) {
    let doc = document.clone();
    boot.register(
        ModuleName::Cart,
        Box::new(move |ctx| Ok(Rc::new(CartModule::new(ctx, doc.clone())) as Rc<dyn Module>)),
    );
    let doc = document.clone();
    boot.register(
        ModuleName::CartPanel,
        Box::new(move |ctx| Ok(Rc::new(CartPanelModule::new(ctx, doc.clone())) as Rc<dyn Module>)),
    );
    let doc = document.clone();
    boot.register(
        ModuleName::Sorting,
        Box::new(move |ctx| Ok(Rc::new(SortingModule::new(ctx, doc.clone())) as Rc<dyn Module>)),
    );
}
