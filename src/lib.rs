//! # book-chat
//!
//! Leptos + WASM chat widget for the book assistant service.
//!
//! The widget renders a message list, a typing indicator, and an input form,
//! and forwards each submission to the service's `/query/` endpoint through
//! the `chat-core` send pipeline. Browser-only code (DOM access, `fetch`,
//! console logging) is gated behind the `csr` feature; without it the crate
//! still compiles natively so the pure helpers can be unit tested.

pub mod config;
pub mod connectivity;
pub mod net;
pub mod view;
pub mod widget;

#[cfg(feature = "csr")]
use leptos::prelude::*;

/// WASM entry point: install logging and mount the widget.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    mount();
}

/// Mount the widget into the `#book-chat` element.
///
/// Configuration is read from the element's `data-*` attributes. A page
/// without the element is left untouched.
#[cfg(feature = "csr")]
pub fn mount() {
    use wasm_bindgen::JsCast;
    use widget::ChatWidget;

    let Some(host) = document().get_element_by_id(config::MOUNT_ELEMENT_ID) else {
        log::warn!("no #{} element on the page; chat widget not mounted", config::MOUNT_ELEMENT_ID);
        return;
    };
    let settings = config::WidgetConfig::from_element(&host);
    let Ok(host) = host.dyn_into::<web_sys::HtmlElement>() else {
        log::warn!("#{} is not an HTML element", config::MOUNT_ELEMENT_ID);
        return;
    };

    log::info!("mounting chat widget for {}", settings.endpoint.query_url());
    leptos::mount::mount_to(host, move || view! { <ChatWidget config=settings/> }).forget();
}
