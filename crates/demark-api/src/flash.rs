//! Flash-style messages.
//!
//! The upload/select flow surfaces validation problems as a redirect with
//! a `message` query parameter, which the target page renders.

use axum::response::Redirect;
use serde::Deserialize;

/// Query parameters carrying an optional flash message.
#[derive(Debug, Deserialize, Default)]
pub struct MessageParams {
    pub message: Option<String>,
}

/// Redirect to `path` with a user-visible message.
pub fn redirect_with_message(path: &str, message: &str) -> Redirect {
    let encoded: String = url::form_urlencoded::byte_serialize(message.as_bytes()).collect();
    Redirect::to(&format!("{path}?message={encoded}"))
}

/// Escape text for interpolation into HTML.
pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
