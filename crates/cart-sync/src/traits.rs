//! Ports - Core Traits
//!
//! Abstract interfaces to the platform: HTTP, the page DOM, timers,
//! notifications and navigation. The browser build implements them with
//! `web_sys`; tests use in-memory fakes.
//!
//! Everything is single-threaded, so async traits are `?Send`.

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use async_trait::async_trait;

use crate::domain::ToastKind;

/// A detached unit of work for the local executor
pub type LocalTask = Pin<Box<dyn Future<Output = ()> + 'static>>;

/// Status and body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Raw HTTP transport.
///
/// `Err` means the request never completed (DNS, abort, CORS, ...); any
/// status code, including 5xx, is an `Ok` reply.
#[async_trait(?Send)]
pub trait HttpBackend {
    /// POST an `application/x-www-form-urlencoded` body
    async fn post_form(
        &self,
        url: &str,
        headers: &[(String, String)],
        form: &[(String, String)],
    ) -> Result<HttpReply, String>;

    async fn get(&self, url: &str, headers: &[(String, String)]) -> Result<HttpReply, String>;
}

/// Where request-authentication tokens can be read from
pub trait CsrfSource {
    /// Value of a named form field, if one is on the page
    fn form_field(&self, name: &str) -> Option<String>;
    /// The raw `document.cookie` string
    fn cookie_string(&self) -> String;
}

/// Transient user-facing status messages
pub trait Notifier {
    /// `None` uses the notifier's default duration
    fn notify(&self, message: &str, kind: ToastKind, duration_ms: Option<u32>);

    fn success(&self, message: &str) {
        self.notify(message, ToastKind::Success, None);
    }

    fn error(&self, message: &str) {
        self.notify(message, ToastKind::Error, None);
    }

    fn warning(&self, message: &str) {
        self.notify(message, ToastKind::Warning, None);
    }

    fn info(&self, message: &str) {
        self.notify(message, ToastKind::Info, None);
    }
}

/// Page DOM, addressed by CSS selectors.
///
/// Every method tolerates missing targets: writes report how many elements
/// they touched, reads return `None`.
pub trait Dom {
    /// Set the text of every match; returns the number of elements written
    fn set_text_all(&self, selector: &str, text: &str) -> usize;

    /// Text of the first match
    fn text_of(&self, selector: &str) -> Option<String>;

    /// Add or remove a class on every match
    fn toggle_class(&self, selector: &str, class: &str, on: bool) -> usize;

    /// Add a class to every match and remove it again after `ms`
    fn flash_class(&self, selector: &str, class: &str, ms: u32);

    fn set_disabled(&self, selector: &str, disabled: bool) -> usize;

    /// Suspend or restore page scrolling
    fn set_scroll_locked(&self, locked: bool);

    /// Replace the whole markup of the first match
    fn replace_html(&self, selector: &str, html: &str) -> bool;

    /// Replace the first match with an error view whose retry action runs `retry`
    fn render_error(&self, selector: &str, message: &str, retry: Rc<dyn Fn()>) -> bool;

    /// Text of `target` inside the closest `ancestor` of the first `selector` match
    fn nearest_text(&self, selector: &str, ancestor: &str, target: &str) -> Option<String>;

    /// Blocking yes/no prompt
    fn confirm(&self, message: &str) -> bool;
}

/// Visual state of one physical control, captured before a request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ControlState {
    pub html: String,
    pub class_name: String,
    pub disabled: bool,
}

/// One activatable control (an add-to-cart button)
pub trait Control {
    fn snapshot(&self) -> ControlState;
    fn restore(&self, state: &ControlState);
    /// Loading label + disabled
    fn show_loading(&self);
    fn show_success(&self);
    /// Inline validation error, no request is made
    fn show_invalid(&self, message: &str);
    /// A disabled control has a request in flight
    fn is_disabled(&self) -> bool;
}

/// Local executor and timers
#[async_trait(?Send)]
pub trait Runtime {
    fn spawn(&self, task: LocalTask);
    async fn sleep(&self, ms: u32);
}

/// Browser location
pub trait Navigator {
    fn current_url(&self) -> String;
    /// Full-page navigation
    fn navigate(&self, url: &str);
}
