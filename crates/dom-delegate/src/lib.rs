//! DOM Event Delegation
//!
//! One listener on a stable ancestor serves every current and future
//! descendant matching a selector, so handlers keep working after the
//! markup under the ancestor is replaced wholesale.
//!
//! Listeners are owned values: dropping a [`DelegatedListener`] removes it
//! from the DOM, and a [`ListenerSet`] never binds the same
//! (event, selector) pair twice.

use std::collections::HashSet;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, EventTarget};

/// Identity of a delegated binding
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DelegationKey {
    pub event: String,
    pub selector: String,
}

impl DelegationKey {
    /// Whitespace around selector-list commas is not significant.
    pub fn new(event: &str, selector: &str) -> Self {
        let selector = selector
            .split(',')
            .map(|part| part.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            event: event.trim().to_string(),
            selector,
        }
    }
}

/// Closest ancestor-or-self of the event target matching `selector`
pub fn closest_match(event: &Event, selector: &str) -> Option<Element> {
    let target = event.target()?;
    let element = target.dyn_into::<Element>().ok()?;
    element.closest(selector).ok().flatten()
}

/// Value of `data-{name}` on the element, if present and non-blank
pub fn data_attribute(element: &Element, name: &str) -> Option<String> {
    element
        .get_attribute(&format!("data-{}", name))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub struct DelegatedListener {
    root: EventTarget,
    key: DelegationKey,
    callback: Closure<dyn FnMut(Event)>,
}

impl DelegatedListener {
    /// Listen for `event` on `root`; `handler` receives the matched element.
    pub fn bind(
        root: &EventTarget,
        event: &str,
        selector: &str,
        mut handler: impl FnMut(Element, Event) + 'static,
    ) -> Result<Self, JsValue> {
        let key = DelegationKey::new(event, selector);
        let match_selector = key.selector.clone();
        let callback = Closure::<dyn FnMut(Event)>::new(move |ev: Event| {
            if let Some(element) = closest_match(&ev, &match_selector) {
                handler(element, ev);
            }
        });
        root.add_event_listener_with_callback(&key.event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            root: root.clone(),
            key,
            callback,
        })
    }
}

impl Drop for DelegatedListener {
    fn drop(&mut self) {
        let _ = self
            .root
            .remove_event_listener_with_callback(&self.key.event, self.callback.as_ref().unchecked_ref());
    }
}

/// A module's listeners. Binding an already-bound key is a no-op.
#[derive(Default)]
pub struct ListenerSet {
    keys: HashSet<DelegationKey>,
    listeners: Vec<DelegatedListener>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `Ok(false)` when the pair was already bound.
    pub fn bind(
        &mut self,
        root: &EventTarget,
        event: &str,
        selector: &str,
        handler: impl FnMut(Element, Event) + 'static,
    ) -> Result<bool, JsValue> {
        if !self.reserve(DelegationKey::new(event, selector)) {
            return Ok(false);
        }
        match DelegatedListener::bind(root, event, selector, handler) {
            Ok(listener) => {
                self.listeners.push(listener);
                Ok(true)
            }
            Err(e) => {
                self.keys.remove(&DelegationKey::new(event, selector));
                Err(e)
            }
        }
    }

    fn reserve(&mut self, key: DelegationKey) -> bool {
        self.keys.insert(key)
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
