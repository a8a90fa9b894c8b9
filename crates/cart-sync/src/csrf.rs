//! CSRF Token Resolution

use std::rc::Rc;

use crate::config::CsrfConfig;
use crate::traits::CsrfSource;

/// Resolves the request-authentication token for mutating calls
pub struct CsrfProvider {
    source: Rc<dyn CsrfSource>,
    config: CsrfConfig,
}

impl CsrfProvider {
    pub fn new(source: Rc<dyn CsrfSource>, config: CsrfConfig) -> Self {
        Self { source, config }
    }

    /// Hidden form field first, then the cookie.
    ///
    /// `None` is not fatal: the server will reject the write and that
    /// rejection is reported like any other.
    pub fn token(&self) -> Option<String> {
        self.source
            .form_field(&self.config.field_name)
            .filter(|v| !v.trim().is_empty())
            .or_else(|| cookie_value(&self.source.cookie_string(), &self.config.cookie_name))
    }

    pub fn field_name(&self) -> &str {
        &self.config.field_name
    }

    pub fn header_name(&self) -> &str {
        &self.config.header_name
    }
}

/// Look up one cookie in a `document.cookie` string.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
