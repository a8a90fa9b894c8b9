//! Toast Kinds

use serde::{Deserialize, Serialize};

/// Visual category of a toast notification. Page scripts may send any
/// name; unknown ones render as `Info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Warning => "warning",
            ToastKind::Info => "info",
        }
    }

    /// Unknown names fall back to `Info`.
    pub fn from_name(s: &str) -> Self {
        match s {
            "success" => ToastKind::Success,
            "error" => ToastKind::Error,
            "warning" => ToastKind::Warning,
            _ => ToastKind::Info,
        }
    }

    /// Font Awesome icon name used by the toast host
    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "check-circle",
            ToastKind::Error => "exclamation-triangle",
            ToastKind::Warning => "exclamation-circle",
            ToastKind::Info => "info-circle",
        }
    }
}

impl From<String> for ToastKind {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}
