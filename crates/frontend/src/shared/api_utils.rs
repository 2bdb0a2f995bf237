//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs and reading the page query.

use std::collections::HashMap;

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using port 3000 for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Параметры строки запроса текущей страницы (`?active=...&demo=1`)
pub fn query_params() -> HashMap<String, String> {
    let search = web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default()
}

/// Демо-режим: данные берутся из встроенного набора, бэкенд не нужен
pub fn is_demo_mode() -> bool {
    query_params()
        .get("demo")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false)
}
