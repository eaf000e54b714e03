//! Conventional app-cache classification.
//!
//! Same segment rule as the compiled-code variant, applied to the
//! environment's general `cache` directories.

use std::collections::HashSet;
use std::sync::Arc;

use crate::filter::{ExpendablesFilter, ExpendablesFilterFactory};
use crate::{DataAreaType, LocalPath, PkgId, ScanSettings, StorageEnvironment, SweepError};

/// Flags content inside a package's conventional cache directories.
pub struct DefaultCachesFilter {
    cache_folder_prefixes: HashSet<String>,
}

impl DefaultCachesFilter {
    /// Create the filter against the environment's cache directories.
    pub fn new(environment: &StorageEnvironment) -> Self {
        Self {
            cache_folder_prefixes: environment
                .cache_dirs()
                .iter()
                .filter_map(LocalPath::name)
                .collect(),
        }
    }
}

#[async_trait::async_trait]
impl ExpendablesFilter for DefaultCachesFilter {
    async fn initialize(&self) -> Result<(), SweepError> {
        tracing::debug!(prefixes = ?self.cache_folder_prefixes, "initialize()");
        Ok(())
    }

    async fn is_expendable(
        &self,
        _pkg_id: &PkgId,
        _area_type: DataAreaType,
        segments: &[String],
    ) -> bool {
        // Content strictly inside a recognized cache directory; the directory
        // entry itself stays.
        segments.len() >= 3 && self.cache_folder_prefixes.contains(&segments[1])
    }
}

/// Enumeration/instantiation companion for [`DefaultCachesFilter`].
pub struct DefaultCachesFilterFactory {
    settings: Arc<ScanSettings>,
    environment: Arc<StorageEnvironment>,
}

impl DefaultCachesFilterFactory {
    /// Create the factory over shared settings and environment.
    pub fn new(settings: Arc<ScanSettings>, environment: Arc<StorageEnvironment>) -> Self {
        Self {
            settings,
            environment,
        }
    }
}

#[async_trait::async_trait]
impl ExpendablesFilterFactory for DefaultCachesFilterFactory {
    async fn is_enabled(&self) -> Result<bool, SweepError> {
        Ok(self.settings.filter_default_caches_enabled())
    }

    async fn create(&self) -> Arc<dyn ExpendablesFilter> {
        Arc::new(DefaultCachesFilter::new(&self.environment))
    }
}
