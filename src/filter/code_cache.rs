//! Compiled-code-cache classification.

use std::collections::HashSet;
use std::sync::Arc;

use crate::filter::{ExpendablesFilter, ExpendablesFilterFactory};
use crate::{DataAreaType, LocalPath, PkgId, ScanSettings, StorageEnvironment, SweepError};

/// Filenames never swept by this filter, even inside a recognized cache
/// directory.
const IGNORED_FILES: &[&str] = &[];

/// Flags content inside a package's compiled-code cache directories.
///
/// The recognized directory names are resolved once from the storage
/// environment at construction and immutable thereafter, so instances are
/// safe to share across concurrent classification calls.
pub struct CodeCacheFilter {
    cache_folder_prefixes: HashSet<String>,
    ignored_files: HashSet<String>,
}

impl CodeCacheFilter {
    /// Create the filter against the environment's compiled-code cache
    /// directories.
    pub fn new(environment: &StorageEnvironment) -> Self {
        Self::with_ignored_files(environment, IGNORED_FILES.iter().copied())
    }

    /// Like [`new`](Self::new), with filenames the host wants protected from
    /// sweeping regardless of where they live.
    pub fn with_ignored_files<I>(environment: &StorageEnvironment, ignored: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            cache_folder_prefixes: environment
                .code_cache_dirs()
                .iter()
                .filter_map(LocalPath::name)
                .collect(),
            ignored_files: ignored.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait::async_trait]
impl ExpendablesFilter for CodeCacheFilter {
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
        if let Some(last) = segments.last() {
            if self.ignored_files.contains(last) {
                return false;
            }
        }

        // segments[0] is the package's own directory; a match needs the cache
        // directory name at [1] plus at least one entry inside it. The cache
        // directory itself is not an individually expendable target.
        segments.len() >= 3 && self.cache_folder_prefixes.contains(&segments[1])
    }
}

/// Enumeration/instantiation companion for [`CodeCacheFilter`].
pub struct CodeCacheFilterFactory {
    settings: Arc<ScanSettings>,
    environment: Arc<StorageEnvironment>,
}

impl CodeCacheFilterFactory {
    /// Create the factory over shared settings and environment.
    pub fn new(settings: Arc<ScanSettings>, environment: Arc<StorageEnvironment>) -> Self {
        Self {
            settings,
            environment,
        }
    }
}

#[async_trait::async_trait]
impl ExpendablesFilterFactory for CodeCacheFilterFactory {
    async fn is_enabled(&self) -> Result<bool, SweepError> {
        Ok(self.settings.filter_code_cache_enabled())
    }

    async fn create(&self) -> Arc<dyn ExpendablesFilter> {
        Arc::new(CodeCacheFilter::new(&self.environment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segs;

    fn env() -> StorageEnvironment {
        StorageEnvironment::new(vec![LocalPath::build(["code_cache"])], vec![])
    }

    async fn check(filter: &CodeCacheFilter, segments: &[String]) -> bool {
        filter
            .is_expendable(&PkgId::new("pkg.name"), DataAreaType::PrivateData, segments)
            .await
    }

    #[tokio::test]
    async fn file_inside_code_cache_is_expendable() {
        let filter = CodeCacheFilter::new(&env());
        assert!(check(&filter, &segs(["pkg.name", "code_cache", "file.bin"])).await);
    }

    #[tokio::test]
    async fn the_cache_dir_itself_is_not_expendable() {
        let filter = CodeCacheFilter::new(&env());
        assert!(!check(&filter, &segs(["pkg.name", "code_cache"])).await);
    }

    #[tokio::test]
    async fn unrecognized_dir_is_not_expendable() {
        let filter = CodeCacheFilter::new(&env());
        assert!(!check(&filter, &segs(["pkg.name", "other_dir", "file.bin"])).await);
    }

    #[tokio::test]
    async fn ignored_filename_wins_over_cache_match() {
        let filter = CodeCacheFilter::with_ignored_files(&env(), ["keep.me"]);
        assert!(!check(&filter, &segs(["pkg.name", "code_cache", "keep.me"])).await);
        // other names in the same directory still match
        assert!(check(&filter, &segs(["pkg.name", "code_cache", "drop.me"])).await);
    }

    #[tokio::test]
    async fn empty_segments_are_not_expendable() {
        let filter = CodeCacheFilter::new(&env());
        assert!(!check(&filter, &[]).await);
    }

    #[tokio::test]
    async fn nested_content_is_expendable() {
        let filter = CodeCacheFilter::new(&env());
        assert!(check(&filter, &segs(["pkg.name", "code_cache", "sub", "deep.bin"])).await);
    }

    #[tokio::test]
    async fn prefixes_come_from_the_environment() {
        let environment = StorageEnvironment::new(
            vec![LocalPath::build(["data", "user_de", "0", "compiled"])],
            vec![],
        );
        let filter = CodeCacheFilter::new(&environment);
        assert!(check(&filter, &segs(["pkg.name", "compiled", "file.bin"])).await);
        assert!(!check(&filter, &segs(["pkg.name", "code_cache", "file.bin"])).await);
    }

    #[tokio::test]
    async fn factory_reads_current_settings() {
        let settings = Arc::new(ScanSettings::new());
        let factory = CodeCacheFilterFactory::new(settings.clone(), Arc::new(env()));

        assert!(factory.is_enabled().await.unwrap());
        settings.set_filter_code_cache_enabled(false);
        assert!(!factory.is_enabled().await.unwrap());
    }

    #[tokio::test]
    async fn created_filter_initializes_cleanly() {
        let factory =
            CodeCacheFilterFactory::new(Arc::new(ScanSettings::new()), Arc::new(env()));
        let filter = factory.create().await;
        filter.initialize().await.unwrap();
        assert!(
            filter
                .is_expendable(
                    &PkgId::new("pkg.name"),
                    DataAreaType::PrivateData,
                    &segs(["pkg.name", "code_cache", "file.bin"]),
                )
                .await
        );
    }
}
