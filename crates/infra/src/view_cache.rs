//! View invalidation target.
//!
//! Renderers cache a view together with the revision they rendered at; a bumped
//! revision means the cached copy is stale and must be rebuilt.

use std::collections::HashMap;
use std::sync::RwLock;

use invoicedesk_invoicing::ViewInvalidator;

/// Per-path revision counters.
#[derive(Debug, Default)]
pub struct ViewRevisions {
    inner: RwLock<HashMap<String, u64>>,
}

impl ViewRevisions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current revision of `path`; 0 if it was never invalidated.
    pub fn revision(&self, path: &str) -> u64 {
        self.inner
            .read()
            .ok()
            .and_then(|map| map.get(path).copied())
            .unwrap_or(0)
    }

    /// Whether a copy rendered at `rendered_at` is still current.
    pub fn is_fresh(&self, path: &str, rendered_at: u64) -> bool {
        self.revision(path) == rendered_at
    }
}

impl ViewInvalidator for ViewRevisions {
    fn invalidate(&self, path: &str) {
        if let Ok(mut map) = self.inner.write() {
            let revision = map.entry(path.to_string()).or_insert(0);
            *revision += 1;
            tracing::debug!(path, revision = *revision, "view invalidated");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalidation_bumps_only_the_named_path() {
        let views = ViewRevisions::new();
        assert_eq!(views.revision("/dashboard/invoices"), 0);

        views.invalidate("/dashboard/invoices");
        views.invalidate("/dashboard/invoices");

        assert_eq!(views.revision("/dashboard/invoices"), 2);
        assert_eq!(views.revision("/dashboard"), 0);
    }

    #[test]
    fn rendered_copies_go_stale_after_invalidation() {
        let views = ViewRevisions::new();
        let rendered_at = views.revision("/dashboard/invoices");
        assert!(views.is_fresh("/dashboard/invoices", rendered_at));

        views.invalidate("/dashboard/invoices");
        assert!(!views.is_fresh("/dashboard/invoices", rendered_at));
    }
}
