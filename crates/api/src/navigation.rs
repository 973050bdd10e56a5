//! Request-scoped navigation target.

use std::sync::Mutex;

use invoicedesk_invoicing::Navigator;

/// Captures the navigation requested during one request so the handler can
/// turn it into a redirect.
#[derive(Debug, Default)]
pub struct RedirectSlot {
    target: Mutex<Option<String>>,
}

impl RedirectSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// The requested path, if any. Clears the slot.
    pub fn take(&self) -> Option<String> {
        self.target.lock().ok().and_then(|mut target| target.take())
    }
}

impl Navigator for RedirectSlot {
    fn navigate(&self, path: &str) {
        if let Ok(mut target) = self.target.lock() {
            *target = Some(path.to_string());
        }
    }
}
