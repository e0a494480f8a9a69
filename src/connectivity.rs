//! Browser connectivity and page visibility.
//!
//! Outside the browser the page is treated as online and visible so native
//! builds never trip the offline guard.

use chat_core::Connectivity;

/// Reads `navigator.onLine` on every check.
#[derive(Clone, Copy, Debug, Default)]
pub struct NavigatorConnectivity;

impl Connectivity for NavigatorConnectivity {
    fn is_online(&self) -> bool {
        #[cfg(feature = "csr")]
        {
            web_sys::window().map_or(true, |w| w.navigator().on_line())
        }
        #[cfg(not(feature = "csr"))]
        {
            true
        }
    }
}

/// Whether the document is currently visible.
pub fn page_visible() -> bool {
    #[cfg(feature = "csr")]
    {
        web_sys::window()
            .and_then(|w| w.document())
            .map_or(true, |doc| !doc.hidden())
    }
    #[cfg(not(feature = "csr"))]
    {
        true
    }
}
