//! Scan configuration consulted by the filter factories.

use std::sync::atomic::{AtomicBool, Ordering};

/// Per-filter enable flags.
///
/// Flags are atomics so a settings surface can flip them between scans
/// without locking; factories read the value current at `is_enabled` time.
#[derive(Debug)]
pub struct ScanSettings {
    filter_code_cache_enabled: AtomicBool,
    filter_default_caches_enabled: AtomicBool,
}

impl ScanSettings {
    /// All filters enabled.
    pub fn new() -> Self {
        Self {
            filter_code_cache_enabled: AtomicBool::new(true),
            filter_default_caches_enabled: AtomicBool::new(true),
        }
    }

    /// Whether the compiled-code-cache filter participates in scans.
    pub fn filter_code_cache_enabled(&self) -> bool {
        self.filter_code_cache_enabled.load(Ordering::Relaxed)
    }

    /// Toggle the compiled-code-cache filter.
    pub fn set_filter_code_cache_enabled(&self, enabled: bool) {
        self.filter_code_cache_enabled.store(enabled, Ordering::Relaxed);
    }

    /// Whether the default-caches filter participates in scans.
    pub fn filter_default_caches_enabled(&self) -> bool {
        self.filter_default_caches_enabled.load(Ordering::Relaxed)
    }

    /// Toggle the default-caches filter.
    pub fn set_filter_default_caches_enabled(&self, enabled: bool) {
        self.filter_default_caches_enabled
            .store(enabled, Ordering::Relaxed);
    }
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_default_to_enabled() {
        let settings = ScanSettings::new();
        assert!(settings.filter_code_cache_enabled());
        assert!(settings.filter_default_caches_enabled());
    }

    #[test]
    fn toggles_are_independent() {
        let settings = ScanSettings::new();
        settings.set_filter_code_cache_enabled(false);
        assert!(!settings.filter_code_cache_enabled());
        assert!(settings.filter_default_caches_enabled());
    }
}
