//! Cart Sync
//!
//! Platform-free core of the storefront frontend: the cart HTTP client,
//! badge projection, slide-out panel lifecycle, add-to-cart and panel item
//! controllers, sort navigation and the page bootstrapper.
//!
//! Everything that touches the browser goes through the ports in [`traits`],
//! so the whole flow runs natively under `tokio::test` with in-memory fakes.

pub mod add_to_cart;
pub mod badge;
pub mod bootstrap;
pub mod client;
pub mod config;
pub mod context;
pub mod csrf;
pub mod domain;
pub mod events;
pub mod http;
pub mod panel;
pub mod panel_items;
pub mod sort;
pub mod traits;

#[cfg(test)]
mod scenarios;
#[cfg(test)]
mod test_support;

pub use add_to_cart::{AddOutcome, AddToCartController};
pub use badge::CartBadgeProjector;
pub use bootstrap::{AppBootstrapper, BootReport, Module, ModuleFactory, ModuleName};
pub use client::CartSyncClient;
pub use config::StorefrontConfig;
pub use context::{AppContext, Ports};
pub use domain::{CartError, CartResult, CartSummary, LineItemView, Money, ProductId, Quantity, ToastKind};
pub use events::{CartEvents, SubscriptionId};
pub use http::ReqwestBackend;
pub use panel::{CartPanelController, PanelState, RefreshOutcome};
pub use panel_items::{ItemOutcome, PanelAction, PanelItemController};
pub use sort::SortController;
