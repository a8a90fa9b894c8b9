//! UI Components
//!
//! Leptos views owned by the frontend; everything else on the page is
//! server-rendered.

mod panel_error;
mod toast_host;

pub use panel_error::PanelError;
pub use toast_host::ToastHost;
