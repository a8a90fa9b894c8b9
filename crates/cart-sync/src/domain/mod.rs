//! Domain Layer
//!
//! Cart value types and the error taxonomy.
//! No platform dependencies; everything here runs natively and on wasm32.

mod error;
mod line_item;
mod money;
mod product;
mod summary;
mod toast;

pub use error::{CartError, CartResult};
pub use line_item::LineItemView;
pub use money::Money;
pub use product::{ProductId, Quantity};
pub use summary::CartSummary;
pub use toast::ToastKind;
