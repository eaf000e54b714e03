//! # Expendables Filter Protocol
//!
//! The extensible classification protocol that decides, from a path's
//! segments alone, whether a file under a package's data area is disposable
//! cache content.
//!
//! ## Lifecycle
//!
//! ```text
//! Factory::is_enabled() ──▶ Factory::create() ──▶ Filter::initialize()
//!                                                       │
//!                                                       ▼
//!                                      Filter::is_expendable()  (repeated)
//! ```
//!
//! A filter moves from uninitialized to initialized exactly once and is never
//! reset; a new scan gets a fresh instance (or reuses a stateless one). The
//! host guarantees `initialize` completes before the first `is_expendable`
//! call.
//!
//! ## Concurrency
//!
//! Both operations are async and may suspend on I/O. A filter instance must
//! be safe for concurrent `is_expendable` calls across paths, which falls out
//! of holding no call-scoped mutable state: configuration is resolved up
//! front and read-only afterwards. Cancellation is cooperative at `.await`
//! points; classification is read-only, so unwinding has no side effects.

mod code_cache;
mod default_caches;

use std::sync::Arc;

use crate::{DataAreaType, PkgId, SweepError};

pub use code_cache::{CodeCacheFilter, CodeCacheFilterFactory};
pub use default_caches::{DefaultCachesFilter, DefaultCachesFilterFactory};

/// One classification rule over path segments.
///
/// Implementations must not perform destructive actions: `is_expendable` is a
/// pure decision function over its inputs, and any I/O it does (existence
/// probes, configuration reads) is read-only and bounded.
#[async_trait::async_trait]
pub trait ExpendablesFilter: Send + Sync {
    /// One-time setup before the first classification call.
    ///
    /// Idempotent. Failures propagate to the host; they are never swallowed
    /// into a `false` classification. Calling [`is_expendable`] before this
    /// completes violates the protocol; implementations that defer setup
    /// here should fail fast with [`SweepError::NotInitialized`] rather than
    /// guess.
    ///
    /// [`is_expendable`]: ExpendablesFilter::is_expendable
    async fn initialize(&self) -> Result<(), SweepError>;

    /// Decide whether the path named by `segments` is disposable.
    ///
    /// `segments` are the path components relative to the storage area root;
    /// by convention `segments[0]` is the package's own directory.
    async fn is_expendable(
        &self,
        pkg_id: &PkgId,
        area_type: DataAreaType,
        segments: &[String],
    ) -> bool;
}

/// Companion that lets the host enumerate and lazily instantiate a filter.
#[async_trait::async_trait]
pub trait ExpendablesFilterFactory: Send + Sync {
    /// Whether the filter participates at all, per current configuration.
    ///
    /// An unreadable configuration is an error, not `false`: the host decides
    /// what an unavailable filter means for the scan.
    async fn is_enabled(&self) -> Result<bool, SweepError>;

    /// Instantiate the filter.
    ///
    /// The protocol does not mandate a lifetime; a filter with no per-call
    /// mutable state is safe to share across scans.
    async fn create(&self) -> Arc<dyn ExpendablesFilter>;
}

/// Host-owned list of filter factories, assembled explicitly at startup.
///
/// There is no runtime discovery: the host enumerates its factories once and
/// hands them over.
pub struct FilterRegistry {
    factories: Vec<Arc<dyn ExpendablesFilterFactory>>,
}

impl FilterRegistry {
    /// Create a registry over the given factories.
    pub fn new(factories: Vec<Arc<dyn ExpendablesFilterFactory>>) -> Self {
        Self { factories }
    }

    /// The registered factories, in registration order.
    pub fn factories(&self) -> &[Arc<dyn ExpendablesFilterFactory>] {
        &self.factories
    }

    /// Build the active filter set for one scan.
    ///
    /// Each factory is consulted for enablement, then its filter is created
    /// and initialized. A factory whose `is_enabled` fails, or a filter whose
    /// `initialize` fails, is sidelined for this scan with a warning; the
    /// scan itself proceeds with the remaining filters.
    pub async fn activate(&self) -> ActiveFilters {
        let mut filters = Vec::new();
        for factory in &self.factories {
            match factory.is_enabled().await {
                Ok(true) => {
                    let filter = factory.create().await;
                    match filter.initialize().await {
                        Ok(()) => filters.push(filter),
                        Err(error) => {
                            tracing::warn!(%error, "filter failed to initialize, sidelined for this scan");
                        }
                    }
                }
                Ok(false) => {}
                Err(error) => {
                    tracing::warn!(%error, "filter enablement unreadable, sidelined for this scan");
                }
            }
        }
        ActiveFilters { filters }
    }
}

/// The filters participating in one scan.
pub struct ActiveFilters {
    filters: Vec<Arc<dyn ExpendablesFilter>>,
}

impl ActiveFilters {
    /// Number of active filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// `true` when no filter is active.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Classify one candidate path: expendable if **any** active filter says
    /// so.
    ///
    /// Filters are consulted in registration order with short-circuiting, but
    /// no ordering between their answers is significant; each is a pure
    /// function of the inputs.
    pub async fn is_expendable(
        &self,
        pkg_id: &PkgId,
        area_type: DataAreaType,
        segments: &[String],
    ) -> bool {
        for filter in &self.filters {
            if filter.is_expendable(pkg_id, area_type, segments).await {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segs;

    struct FixedFilter {
        verdict: bool,
    }

    #[async_trait::async_trait]
    impl ExpendablesFilter for FixedFilter {
        async fn initialize(&self) -> Result<(), SweepError> {
            Ok(())
        }

        async fn is_expendable(&self, _: &PkgId, _: DataAreaType, _: &[String]) -> bool {
            self.verdict
        }
    }

    enum FactoryMode {
        Enabled(bool),
        Disabled,
        Broken,
        InitFails,
    }

    struct FixedFactory {
        mode: FactoryMode,
    }

    struct FailingInitFilter;

    #[async_trait::async_trait]
    impl ExpendablesFilter for FailingInitFilter {
        async fn initialize(&self) -> Result<(), SweepError> {
            Err(SweepError::NotInitialized { filter: "failing" })
        }

        async fn is_expendable(&self, _: &PkgId, _: DataAreaType, _: &[String]) -> bool {
            true
        }
    }

    #[async_trait::async_trait]
    impl ExpendablesFilterFactory for FixedFactory {
        async fn is_enabled(&self) -> Result<bool, SweepError> {
            match self.mode {
                FactoryMode::Enabled(_) | FactoryMode::InitFails => Ok(true),
                FactoryMode::Disabled => Ok(false),
                FactoryMode::Broken => Err(SweepError::Config {
                    setting: "test".into(),
                    reason: "store unreachable".into(),
                }),
            }
        }

        async fn create(&self) -> Arc<dyn ExpendablesFilter> {
            match self.mode {
                FactoryMode::Enabled(verdict) => Arc::new(FixedFilter { verdict }),
                FactoryMode::InitFails => Arc::new(FailingInitFilter),
                _ => unreachable!("create is only called for enabled factories"),
            }
        }
    }

    fn registry(modes: Vec<FactoryMode>) -> FilterRegistry {
        FilterRegistry::new(
            modes
                .into_iter()
                .map(|mode| Arc::new(FixedFactory { mode }) as Arc<dyn ExpendablesFilterFactory>)
                .collect(),
        )
    }

    #[test]
    fn traits_are_object_safe() {
        let _: Option<Box<dyn ExpendablesFilter>> = None;
        let _: Option<Box<dyn ExpendablesFilterFactory>> = None;
    }

    #[tokio::test]
    async fn any_yes_wins() {
        let active = registry(vec![
            FactoryMode::Enabled(false),
            FactoryMode::Enabled(true),
        ])
        .activate()
        .await;
        assert_eq!(active.len(), 2);

        let pkg = PkgId::new("pkg.name");
        let segments = segs(["pkg.name", "cache", "file"]);
        assert!(
            active
                .is_expendable(&pkg, DataAreaType::PrivateData, &segments)
                .await
        );
    }

    #[tokio::test]
    async fn all_no_means_no() {
        let active = registry(vec![
            FactoryMode::Enabled(false),
            FactoryMode::Enabled(false),
        ])
        .activate()
        .await;

        let pkg = PkgId::new("pkg.name");
        let segments = segs(["pkg.name", "cache", "file"]);
        assert!(
            !active
                .is_expendable(&pkg, DataAreaType::PrivateData, &segments)
                .await
        );
    }

    #[tokio::test]
    async fn disabled_factories_are_excluded() {
        let active = registry(vec![FactoryMode::Disabled, FactoryMode::Enabled(true)])
            .activate()
            .await;
        assert_eq!(active.len(), 1);
    }

    #[tokio::test]
    async fn broken_enablement_sidelines_only_that_filter() {
        let active = registry(vec![FactoryMode::Broken, FactoryMode::Enabled(true)])
            .activate()
            .await;
        assert_eq!(active.len(), 1);
    }

    #[tokio::test]
    async fn failed_initialize_sidelines_only_that_filter() {
        let active = registry(vec![FactoryMode::InitFails, FactoryMode::Enabled(false)])
            .activate()
            .await;
        assert_eq!(active.len(), 1);
    }

    #[tokio::test]
    async fn empty_registry_classifies_nothing() {
        let active = registry(vec![]).activate().await;
        assert!(active.is_empty());

        let pkg = PkgId::new("pkg.name");
        assert!(
            !active
                .is_expendable(&pkg, DataAreaType::PrivateData, &[])
                .await
        );
    }
}
