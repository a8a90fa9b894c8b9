//! Storefront Frontend Entry Point

mod app;
mod bridge;
mod components;
mod context;
mod dom;
mod models;
mod modules;
mod notifier;
mod store;

use app::App;
use console_logger::{ConsoleLogger, LogEntry};
use leptos::prelude::*;
use log::LevelFilter;

fn main() {
    let level = if cfg!(debug_assertions) { LevelFilter::Debug } else { LevelFilter::Info };
    match console_logger::init(level, console_logger::DEFAULT_CAPACITY) {
        Ok(logger) => install_panic_hook(logger),
        Err(e) => {
            console_error_panic_hook::set_once();
            web_sys::console::warn_1(&format!("[APP] Logger not installed: {}", e).into());
        }
    }

    mount_to_body(App);
}

/// Panics also print the buffered log lines leading up to them.
fn install_panic_hook(logger: &'static ConsoleLogger) {
    std::panic::set_hook(Box::new(move |info| {
        console_error_panic_hook::hook(info);
        let lines: Vec<String> = logger.recent().iter().map(LogEntry::format_line).collect();
        web_sys::console::error_1(
            &format!("[APP] Last {} log lines before panic:\n{}", lines.len(), lines.join("\n")).into(),
        );
    }));
}
