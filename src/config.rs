//! Widget configuration read from the mount element's `data-*` attributes.
//!
//! ```html
//! <div id="book-chat"
//!      data-base-url="https://books.example.com"
//!      data-greeting="Ask me about chapter one."
//!      data-show-clear="false"
//!      data-copy='{"failure": "Something went wrong."}'></div>
//! ```
//!
//! Missing or unparseable attributes fall back to the defaults; a bad
//! attribute never prevents the widget from mounting.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use chat_core::{ChatCopy, Endpoint};

/// Hosted book assistant service.
pub const DEFAULT_BASE_URL: &str = "https://seashell-app-794qt.ondigitalocean.app";

/// Id of the element the widget mounts into.
pub const MOUNT_ELEMENT_ID: &str = "book-chat";

pub const ATTR_BASE_URL: &str = "data-base-url";
pub const ATTR_GREETING: &str = "data-greeting";
pub const ATTR_SHOW_CLEAR: &str = "data-show-clear";
pub const ATTR_COPY: &str = "data-copy";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidgetConfig {
    pub endpoint: Endpoint,
    pub copy: ChatCopy,
    /// Render the "clear chat" control.
    pub show_clear: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self { endpoint: Endpoint::new(DEFAULT_BASE_URL), copy: ChatCopy::default(), show_clear: true }
    }
}

impl WidgetConfig {
    /// Build config from an attribute lookup.
    ///
    /// `data-copy` is applied first so `data-greeting` can override it.
    pub fn from_attributes(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(base_url) = non_blank(lookup(ATTR_BASE_URL)) {
            config.endpoint = Endpoint::new(&base_url);
        }
        if let Some(raw) = non_blank(lookup(ATTR_COPY)) {
            if let Ok(copy) = serde_json::from_str::<ChatCopy>(&raw) {
                config.copy = copy;
            }
        }
        if let Some(greeting) = non_blank(lookup(ATTR_GREETING)) {
            config.copy.greeting = greeting;
        }
        if let Some(flag) = lookup(ATTR_SHOW_CLEAR).as_deref().and_then(parse_flag) {
            config.show_clear = flag;
        }

        config
    }

    #[cfg(feature = "csr")]
    pub fn from_element(element: &web_sys::Element) -> Self {
        Self::from_attributes(|name| element.get_attribute(name))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

/// Parse an HTML-style boolean attribute. A present but empty attribute is
/// `true`.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
