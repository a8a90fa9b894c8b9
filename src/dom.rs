//! Browser Ports
//!
//! `web_sys` implementations of the cart-sync ports: page DOM, CSRF
//! sources, navigation, the local executor and add-to-cart buttons.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use leptos::mount::mount_to;
use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlDocument, HtmlElement, HtmlInputElement, Window};

use cart_sync::traits::{Control, ControlState, CsrfSource, Dom, LocalTask, Navigator, Runtime};

use crate::components::PanelError;

// ========================
// DOM
// ========================

pub struct WebDom {
    document: Document,
    /// Mounted panel error view; dropping it unmounts the view
    error_view: RefCell<Option<Box<dyn Any>>>,
}

impl WebDom {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            error_view: RefCell::new(None),
        }
    }

    fn all(&self, selector: &str) -> Vec<Element> {
        match self.document.query_selector_all(selector) {
            Ok(list) => (0..list.length())
                .filter_map(|i| list.get(i))
                .filter_map(|node| node.dyn_into::<Element>().ok())
                .collect(),
            Err(_) => {
                warn!("[DOM] Invalid selector {}", selector);
                Vec::new()
            }
        }
    }

    fn first(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn drop_error_view(&self) {
        self.error_view.borrow_mut().take();
    }
}

impl Dom for WebDom {
    fn set_text_all(&self, selector: &str, text: &str) -> usize {
        let elements = self.all(selector);
        for element in &elements {
            element.set_text_content(Some(text));
        }
        elements.len()
    }

    fn text_of(&self, selector: &str) -> Option<String> {
        self.first(selector).and_then(|e| e.text_content())
    }

    fn toggle_class(&self, selector: &str, class: &str, on: bool) -> usize {
        let elements = self.all(selector);
        for element in &elements {
            let list = element.class_list();
            let _ = if on { list.add_1(class) } else { list.remove_1(class) };
        }
        elements.len()
    }

    fn flash_class(&self, selector: &str, class: &str, ms: u32) {
        let elements = self.all(selector);
        for element in &elements {
            let _ = element.class_list().add_1(class);
        }
        let class = class.to_string();
        Timeout::new(ms, move || {
            for element in &elements {
                let _ = element.class_list().remove_1(&class);
            }
        })
        .forget();
    }

    fn set_disabled(&self, selector: &str, disabled: bool) -> usize {
        let elements = self.all(selector);
        for element in &elements {
            let _ = if disabled {
                element.set_attribute("disabled", "")
            } else {
                element.remove_attribute("disabled")
            };
        }
        elements.len()
    }

    fn set_scroll_locked(&self, locked: bool) {
        let Some(body) = self.document.body() else { return };
        let style = body.style();
        let _ = if locked {
            style.set_property("overflow", "hidden")
        } else {
            style.remove_property("overflow").map(|_| ())
        };
    }

    fn replace_html(&self, selector: &str, html: &str) -> bool {
        let Some(host) = self.first(selector) else { return false };
        self.drop_error_view();
        host.set_inner_html(html);
        true
    }

    fn render_error(&self, selector: &str, message: &str, retry: Rc<dyn Fn()>) -> bool {
        let Some(host) = self.first(selector).and_then(|e| e.dyn_into::<HtmlElement>().ok()) else {
            return false;
        };
        self.drop_error_view();
        host.set_inner_html("");
        let message = message.to_string();
        let handle = mount_to(host, move || view! { <PanelError message=message on_retry=retry /> });
        *self.error_view.borrow_mut() = Some(Box::new(handle));
        true
    }

    fn nearest_text(&self, selector: &str, ancestor: &str, target: &str) -> Option<String> {
        self.first(selector)?
            .closest(ancestor)
            .ok()
            .flatten()?
            .query_selector(target)
            .ok()
            .flatten()?
            .text_content()
    }

    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}

// ========================
// CSRF / Navigation / Runtime
// ========================

pub struct WebCsrfSource {
    document: Document,
}

impl WebCsrfSource {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn first_input(&self, name: &str) -> Option<HtmlInputElement> {
        self.document
            .query_selector(&format!("[name=\"{}\"]", name))
            .ok()
            .flatten()?
            .dyn_into::<HtmlInputElement>()
            .ok()
    }
}

impl CsrfSource for WebCsrfSource {
    fn form_field(&self, name: &str) -> Option<String> {
        self.first_input(name).map(|input| input.value())
    }

    fn cookie_string(&self) -> String {
        self.document
            .dyn_ref::<HtmlDocument>()
            .and_then(|d| d.cookie().ok())
            .unwrap_or_default()
    }
}

pub struct WebNavigator {
    window: Window,
}

impl WebNavigator {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Navigator for WebNavigator {
    fn current_url(&self) -> String {
        self.window.location().href().unwrap_or_default()
    }

    fn navigate(&self, url: &str) {
        if self.window.location().set_href(url).is_err() {
            warn!("[NAV] Could not navigate to {}", url);
        }
    }
}

/// `spawn_local` + `gloo-timers`
pub struct WasmRuntime;

#[async_trait(?Send)]
impl Runtime for WasmRuntime {
    fn spawn(&self, task: LocalTask) {
        leptos::task::spawn_local(task);
    }

    async fn sleep(&self, ms: u32) {
        TimeoutFuture::new(ms).await;
    }
}

// ========================
// Buttons
// ========================

const LOADING_HTML: &str = r#"<i class="fas fa-spinner fa-spin me-2"></i>Agregando..."#;
const SUCCESS_HTML: &str = r#"<i class="fas fa-check me-2"></i>¡Agregado!"#;
const INVALID_CLASS: &str = "is-invalid";
const LOADING_CLASS: &str = "btn-loading";
const SUCCESS_CLASS: &str = "btn-success";

/// `class_name` with `class` appended unless already present
fn with_class(class_name: &str, class: &str) -> String {
    if class_name.split_whitespace().any(|c| c == class) {
        return class_name.to_string();
    }
    class_name
        .split_whitespace()
        .chain(std::iter::once(class))
        .collect::<Vec<_>>()
        .join(" ")
}

fn without_class(class_name: &str, class: &str) -> String {
    class_name
        .split_whitespace()
        .filter(|c| *c != class)
        .collect::<Vec<_>>()
        .join(" ")
}

/// An add-to-cart button, optionally paired with its quantity input
pub struct ButtonControl {
    button: Element,
    quantity_input: Option<HtmlInputElement>,
}

impl ButtonControl {
    pub fn new(button: Element) -> Self {
        Self { button, quantity_input: None }
    }

    pub fn with_quantity_input(mut self, input: Option<HtmlInputElement>) -> Self {
        self.quantity_input = input;
        self
    }
}

impl Control for ButtonControl {
    fn snapshot(&self) -> ControlState {
        ControlState {
            html: self.button.inner_html(),
            class_name: self.button.class_name(),
            disabled: self.button.has_attribute("disabled"),
        }
    }

    fn restore(&self, state: &ControlState) {
        self.button.set_inner_html(&state.html);
        self.button.set_class_name(&state.class_name);
        let _ = if state.disabled {
            self.button.set_attribute("disabled", "")
        } else {
            self.button.remove_attribute("disabled")
        };
    }

    fn show_loading(&self) {
        if let Some(input) = &self.quantity_input {
            let _ = input.class_list().remove_1(INVALID_CLASS);
            input.set_custom_validity("");
        }
        self.button.set_inner_html(LOADING_HTML);
        self.button.set_class_name(&with_class(&self.button.class_name(), LOADING_CLASS));
        let _ = self.button.set_attribute("disabled", "");
    }

    fn show_success(&self) {
        self.button.set_inner_html(SUCCESS_HTML);
        let class_name = without_class(&self.button.class_name(), LOADING_CLASS);
        self.button.set_class_name(&with_class(&class_name, SUCCESS_CLASS));
    }

    fn show_invalid(&self, message: &str) {
        debug!("[ADD] {}", message);
        match &self.quantity_input {
            Some(input) => {
                let _ = input.class_list().add_1(INVALID_CLASS);
                input.set_custom_validity(message);
                input.report_validity();
            }
            None => warn!("[ADD] {}", message),
        }
    }

    fn is_disabled(&self) -> bool {
        self.button.has_attribute("disabled")
    }
}
