//! Shared test utilities for unit tests
//!
//! Integration tests in `tests/` cannot see this module; they carry their
//! own helpers in `tests/common/mod.rs`.

use crate::types::Span;
use chrono::DateTime;
use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;

// Serializes environment variable modifications across tests
pub static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// RAII guard for environment variable manipulation in tests
///
/// Restores every touched variable on drop, including after a panic.
pub struct EnvVarGuard {
    vars: Vec<(String, Option<String>)>,
}

impl EnvVarGuard {
    pub fn new() -> Self {
        Self { vars: Vec::new() }
    }

    /// Set an environment variable and remember its original value
    pub fn set(&mut self, key: &str, value: &str) {
        let original = env::var(key).ok();
        self.vars.push((key.to_string(), original));
        // env::set_var is unsafe on edition 2024
        unsafe {
            env::set_var(key, value);
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (key, value) in self.vars.iter().rev() {
            unsafe {
                match value {
                    Some(v) => env::set_var(key, v),
                    None => env::remove_var(key),
                }
            }
        }
    }
}

impl Default for EnvVarGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a span from two RFC 3339 instants and an explicit duration
pub fn span_between(start: &str, end: &str, duration: f64) -> Span {
    let start = DateTime::parse_from_rfc3339(start).unwrap().timestamp();
    let end = DateTime::parse_from_rfc3339(end).unwrap().timestamp();
    Span::new(start, end, duration)
}
