//! In-memory fakes for every port, plus a harness wiring them into an
//! [`AppContext`].

use std::cell::{Cell, RefCell};
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use tokio::sync::Semaphore;

use crate::config::StorefrontConfig;
use crate::context::{AppContext, Ports};
use crate::domain::ToastKind;
use crate::traits::{
    Control, ControlState, CsrfSource, Dom, HttpBackend, HttpReply, LocalTask, Navigator, Notifier, Runtime,
};

// ========================
// HTTP
// ========================

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub form: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn has_header(&self, name: &str, value: &str) -> bool {
        self.headers.iter().any(|(k, v)| k == name && v == value)
    }

    pub fn form_value(&self, name: &str) -> Option<&str> {
        self.form.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }
}

/// Scripted replies are consumed in order by any method. With the script
/// empty, GETs return the sticky panel fragment and POSTs fail.
pub struct FakeHttp {
    script: RefCell<VecDeque<Result<HttpReply, String>>>,
    fragment: RefCell<HttpReply>,
    requests: RefCell<Vec<RecordedRequest>>,
    on_request: RefCell<Option<Box<dyn Fn()>>>,
    gate: RefCell<Option<Rc<Semaphore>>>,
}

impl FakeHttp {
    pub fn new() -> Self {
        Self {
            script: RefCell::new(VecDeque::new()),
            fragment: RefCell::new(HttpReply { status: 200, body: "<div class=\"cart-panel-empty\"></div>".into() }),
            requests: RefCell::new(Vec::new()),
            on_request: RefCell::new(None),
            gate: RefCell::new(None),
        }
    }

    pub fn reply_json(&self, status: u16, body: &str) {
        self.script.borrow_mut().push_back(Ok(HttpReply { status, body: body.to_string() }));
    }

    pub fn fail_network(&self, message: &str) {
        self.script.borrow_mut().push_back(Err(message.to_string()));
    }

    pub fn set_fragment(&self, status: u16, body: &str) {
        *self.fragment.borrow_mut() = HttpReply { status, body: body.to_string() };
    }

    pub fn on_request(&self, hook: impl Fn() + 'static) {
        *self.on_request.borrow_mut() = Some(Box::new(hook));
    }

    /// Hold every later request after it is recorded until the returned
    /// semaphore is given a permit.
    pub fn gate(&self) -> Rc<Semaphore> {
        let gate = Rc::new(Semaphore::new(0));
        *self.gate.borrow_mut() = Some(gate.clone());
        gate
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    pub fn clear_requests(&self) {
        self.requests.borrow_mut().clear();
    }

    pub fn count(&self, method: &str) -> usize {
        self.requests.borrow().iter().filter(|r| r.method == method).count()
    }

    fn record(&self, request: RecordedRequest) {
        self.requests.borrow_mut().push(request);
        if let Some(hook) = self.on_request.borrow().as_ref() {
            hook();
        }
    }

    async fn wait_for_gate(&self) {
        let gate = self.gate.borrow().clone();
        if let Some(gate) = gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
    }
}

#[async_trait(?Send)]
impl HttpBackend for FakeHttp {
    async fn post_form(
        &self,
        url: &str,
        headers: &[(String, String)],
        form: &[(String, String)],
    ) -> Result<HttpReply, String> {
        self.record(RecordedRequest { method: "POST", url: url.into(), headers: headers.to_vec(), form: form.to_vec() });
        self.wait_for_gate().await;
        self.script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err("no reply scripted".to_string()))
    }

    async fn get(&self, url: &str, headers: &[(String, String)]) -> Result<HttpReply, String> {
        self.record(RecordedRequest { method: "GET", url: url.into(), headers: headers.to_vec(), form: Vec::new() });
        let scripted = self.script.borrow_mut().pop_front();
        scripted.unwrap_or_else(|| Ok(self.fragment.borrow().clone()))
    }
}

// ========================
// CSRF
// ========================

#[derive(Default)]
pub struct FakeCsrf {
    field: Option<String>,
    cookies: String,
}

impl FakeCsrf {
    pub fn with_field(token: Option<&str>) -> Self {
        Self { field: token.map(str::to_string), cookies: String::new() }
    }
}

impl CsrfSource for FakeCsrf {
    fn form_field(&self, _name: &str) -> Option<String> {
        self.field.clone()
    }

    fn cookie_string(&self) -> String {
        self.cookies.clone()
    }
}

// ========================
// DOM
// ========================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedContent {
    Empty,
    Html(String),
    Error(String),
}

#[derive(Debug, Clone)]
struct FakeNode {
    selector: String,
    text: String,
    classes: HashSet<String>,
    disabled: bool,
    /// Nodes sharing a row belong to the panel fragment
    row: Option<usize>,
}

/// Flat list of nodes, each addressed by exactly one simple selector.
/// Selector lists (`a, b`) match a node when any part equals its selector.
pub struct FakeDom {
    nodes: RefCell<Vec<FakeNode>>,
    rows: Cell<usize>,
    content: RefCell<RenderedContent>,
    retry: RefCell<Option<Rc<dyn Fn()>>>,
    confirm_answer: Cell<bool>,
    prompts: RefCell<Vec<String>>,
    flashes: RefCell<Vec<(String, String, u32)>>,
    scroll_locked: Cell<bool>,
}

fn matches(list: &str, selector: &str) -> bool {
    list.split(',').any(|part| part.trim() == selector)
}

impl FakeDom {
    pub fn new() -> Self {
        Self {
            nodes: RefCell::new(Vec::new()),
            rows: Cell::new(0),
            content: RefCell::new(RenderedContent::Empty),
            retry: RefCell::new(None),
            confirm_answer: Cell::new(true),
            prompts: RefCell::new(Vec::new()),
            flashes: RefCell::new(Vec::new()),
            scroll_locked: Cell::new(false),
        }
    }

    pub fn add(&self, selector: &str, text: &str) {
        self.push(selector, text, None);
    }

    fn push(&self, selector: &str, text: &str, row: Option<usize>) {
        self.nodes.borrow_mut().push(FakeNode {
            selector: selector.to_string(),
            text: text.to_string(),
            classes: HashSet::new(),
            disabled: false,
            row,
        });
    }

    /// One panel row as the server fragment renders it
    pub fn add_row(&self, id: &str, quantity: &str, unit_price: &str, total: &str) {
        let row = self.rows.get();
        self.rows.set(row + 1);
        self.push(&format!("#quantity{}", id), quantity, Some(row));
        self.push(&format!("#total{}", id), total, Some(row));
        self.push(".cart-item-price", unit_price, Some(row));
        self.push(&format!(".cart-minus[data-product-id=\"{}\"]", id), "-", Some(row));
        self.push(&format!(".cart-plus[data-product-id=\"{}\"]", id), "+", Some(row));
        self.push(&format!(".cart-remove[data-product-id=\"{}\"]", id), "x", Some(row));
    }

    pub fn texts(&self, selector: &str) -> Vec<String> {
        self.nodes
            .borrow()
            .iter()
            .filter(|n| matches(selector, &n.selector))
            .map(|n| n.text.clone())
            .collect()
    }

    pub fn snapshot_texts(&self) -> Vec<(String, String)> {
        self.nodes.borrow().iter().map(|n| (n.selector.clone(), n.text.clone())).collect()
    }

    pub fn has_class(&self, selector: &str, class: &str) -> bool {
        self.nodes
            .borrow()
            .iter()
            .any(|n| matches(selector, &n.selector) && n.classes.contains(class))
    }

    pub fn is_disabled(&self, selector: &str) -> bool {
        self.nodes.borrow().iter().any(|n| matches(selector, &n.selector) && n.disabled)
    }

    pub fn content(&self) -> RenderedContent {
        self.content.borrow().clone()
    }

    pub fn click_retry(&self) {
        let retry = self.retry.borrow().clone();
        if let Some(retry) = retry {
            retry();
        }
    }

    pub fn set_confirm(&self, answer: bool) {
        self.confirm_answer.set(answer);
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }

    pub fn flashes(&self) -> Vec<(String, String, u32)> {
        self.flashes.borrow().clone()
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked.get()
    }

    fn drop_fragment_rows(&self) {
        self.nodes.borrow_mut().retain(|n| n.row.is_none());
    }
}

impl Dom for FakeDom {
    fn set_text_all(&self, selector: &str, text: &str) -> usize {
        let mut written = 0;
        for node in self.nodes.borrow_mut().iter_mut().filter(|n| matches(selector, &n.selector)) {
            node.text = text.to_string();
            written += 1;
        }
        written
    }

    fn text_of(&self, selector: &str) -> Option<String> {
        self.texts(selector).into_iter().next()
    }

    fn toggle_class(&self, selector: &str, class: &str, on: bool) -> usize {
        let mut touched = 0;
        for node in self.nodes.borrow_mut().iter_mut().filter(|n| matches(selector, &n.selector)) {
            if on {
                node.classes.insert(class.to_string());
            } else {
                node.classes.remove(class);
            }
            touched += 1;
        }
        touched
    }

    fn flash_class(&self, selector: &str, class: &str, ms: u32) {
        self.flashes.borrow_mut().push((selector.to_string(), class.to_string(), ms));
    }

    fn set_disabled(&self, selector: &str, disabled: bool) -> usize {
        let mut touched = 0;
        for node in self.nodes.borrow_mut().iter_mut().filter(|n| matches(selector, &n.selector)) {
            node.disabled = disabled;
            touched += 1;
        }
        touched
    }

    fn set_scroll_locked(&self, locked: bool) {
        self.scroll_locked.set(locked);
    }

    fn replace_html(&self, _selector: &str, html: &str) -> bool {
        self.drop_fragment_rows();
        *self.content.borrow_mut() = RenderedContent::Html(html.to_string());
        true
    }

    fn render_error(&self, _selector: &str, message: &str, retry: Rc<dyn Fn()>) -> bool {
        self.drop_fragment_rows();
        *self.content.borrow_mut() = RenderedContent::Error(message.to_string());
        *self.retry.borrow_mut() = Some(retry);
        true
    }

    fn nearest_text(&self, selector: &str, _ancestor: &str, target: &str) -> Option<String> {
        let nodes = self.nodes.borrow();
        let row = nodes.iter().find(|n| matches(selector, &n.selector))?.row?;
        nodes
            .iter()
            .find(|n| n.row == Some(row) && matches(target, &n.selector))
            .map(|n| n.text.clone())
    }

    fn confirm(&self, message: &str) -> bool {
        self.prompts.borrow_mut().push(message.to_string());
        self.confirm_answer.get()
    }
}

// ========================
// Notifier / Runtime / Navigator / Control
// ========================

#[derive(Default)]
pub struct RecordingNotifier {
    toasts: RefCell<Vec<(ToastKind, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(ToastKind, String)> {
        self.toasts.borrow().clone()
    }

    pub fn kinds(&self) -> Vec<ToastKind> {
        self.toasts.borrow().iter().map(|(k, _)| *k).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, kind: ToastKind, _duration_ms: Option<u32>) {
        self.toasts.borrow_mut().push((kind, message.to_string()));
    }
}

/// Spawned tasks wait in a queue until [`QueuedRuntime::run_pending`];
/// sleeps complete immediately and are recorded.
#[derive(Default)]
pub struct QueuedRuntime {
    queue: RefCell<VecDeque<LocalTask>>,
    sleeps: RefCell<Vec<u32>>,
}

impl QueuedRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the queue, including tasks spawned while draining.
    pub async fn run_pending(&self) {
        loop {
            let next = self.queue.borrow_mut().pop_front();
            match next {
                Some(task) => task.await,
                None => break,
            }
        }
    }

    pub fn sleeps(&self) -> Vec<u32> {
        self.sleeps.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Runtime for QueuedRuntime {
    fn spawn(&self, task: LocalTask) {
        self.queue.borrow_mut().push_back(task);
    }

    async fn sleep(&self, ms: u32) {
        self.sleeps.borrow_mut().push(ms);
    }
}

#[derive(Default)]
pub struct FakeNavigator {
    current: RefCell<String>,
    visited: RefCell<Vec<String>>,
}

impl FakeNavigator {
    pub fn set_current(&self, url: &str) {
        *self.current.borrow_mut() = url.to_string();
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.borrow().clone()
    }
}

impl Navigator for FakeNavigator {
    fn current_url(&self) -> String {
        self.current.borrow().clone()
    }

    fn navigate(&self, url: &str) {
        self.visited.borrow_mut().push(url.to_string());
    }
}

pub struct FakeControl {
    state: RefCell<ControlState>,
    history: RefCell<Vec<&'static str>>,
}

impl FakeControl {
    pub fn new(label: &str) -> Self {
        Self {
            state: RefCell::new(ControlState { html: label.to_string(), class_name: "btn btn-primary".into(), disabled: false }),
            history: RefCell::new(Vec::new()),
        }
    }

    pub fn history(&self) -> Vec<&'static str> {
        self.history.borrow().clone()
    }

    pub fn current(&self) -> ControlState {
        self.state.borrow().clone()
    }
}

impl Control for FakeControl {
    fn snapshot(&self) -> ControlState {
        self.current()
    }

    fn restore(&self, state: &ControlState) {
        *self.state.borrow_mut() = state.clone();
        self.history.borrow_mut().push("restore");
    }

    fn show_loading(&self) {
        let mut state = self.state.borrow_mut();
        state.html = "Agregando...".into();
        state.disabled = true;
        self.history.borrow_mut().push("loading");
    }

    fn show_success(&self) {
        self.state.borrow_mut().html = "¡Agregado!".into();
        self.history.borrow_mut().push("success");
    }

    fn show_invalid(&self, _message: &str) {
        self.history.borrow_mut().push("invalid");
    }

    fn is_disabled(&self) -> bool {
        self.state.borrow().disabled
    }
}

// ========================
// Harness
// ========================

pub struct Harness {
    pub http: Rc<FakeHttp>,
    pub dom: Rc<FakeDom>,
    pub notifier: Rc<RecordingNotifier>,
    pub runtime: Rc<QueuedRuntime>,
    pub navigator: Rc<FakeNavigator>,
    pub ctx: AppContext,
    pub panel: Rc<crate::panel::CartPanelController>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(StorefrontConfig::default())
    }

    pub fn with_config(config: StorefrontConfig) -> Self {
        let http = Rc::new(FakeHttp::new());
        let dom = Rc::new(FakeDom::new());
        dom.add("#cartPanel", "");
        dom.add(".panel-overlay", "");
        let notifier = Rc::new(RecordingNotifier::new());
        let runtime = Rc::new(QueuedRuntime::new());
        let navigator = Rc::new(FakeNavigator::default());

        let ctx = AppContext::build(
            config,
            Ports {
                http: http.clone(),
                csrf: Rc::new(FakeCsrf::with_field(Some("test-token"))),
                dom: dom.clone(),
                notifier: notifier.clone(),
                runtime: runtime.clone(),
                navigator: navigator.clone(),
            },
        );
        let panel = Rc::clone(&ctx.panel);
        Self { http, dom, notifier, runtime, navigator, ctx, panel }
    }

    /// Record the text of `selector` at the moment each request is issued.
    pub fn capture_on_request(&self, selector: &str) -> Rc<RefCell<Vec<String>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let dom = self.dom.clone();
        let selector = selector.to_string();
        let sink = seen.clone();
        self.http.on_request(move || sink.borrow_mut().push(dom.texts(&selector).join(",")));
        seen
    }
}
