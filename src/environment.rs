//! Resolved storage-environment facts consumed by the filters.

use crate::LocalPath;

/// Directory lists resolved by the host's storage collaborator.
///
/// Built once at startup and read-only afterwards; the filters only ever look
/// at the directory names, so the lists can point anywhere the device keeps
/// its per-app data.
#[derive(Debug, Clone)]
pub struct StorageEnvironment {
    code_cache_dirs: Vec<LocalPath>,
    cache_dirs: Vec<LocalPath>,
}

impl StorageEnvironment {
    /// Create an environment from resolved directory lists.
    pub fn new(code_cache_dirs: Vec<LocalPath>, cache_dirs: Vec<LocalPath>) -> Self {
        Self {
            code_cache_dirs,
            cache_dirs,
        }
    }

    /// Directories holding compiled-code caches.
    pub fn code_cache_dirs(&self) -> &[LocalPath] {
        &self.code_cache_dirs
    }

    /// Directories holding general app caches.
    pub fn cache_dirs(&self) -> &[LocalPath] {
        &self.cache_dirs
    }
}

impl Default for StorageEnvironment {
    /// The conventional per-app layout: `code_cache` and `cache`.
    fn default() -> Self {
        Self::new(
            vec![LocalPath::build(["code_cache"])],
            vec![LocalPath::build(["cache"])],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_environment_uses_conventional_names() {
        let env = StorageEnvironment::default();
        let names: Vec<_> = env
            .code_cache_dirs()
            .iter()
            .filter_map(LocalPath::name)
            .collect();
        assert_eq!(names, vec!["code_cache"]);

        let names: Vec<_> = env.cache_dirs().iter().filter_map(LocalPath::name).collect();
        assert_eq!(names, vec!["cache"]);
    }

    #[test]
    fn custom_dirs_are_preserved() {
        let env = StorageEnvironment::new(
            vec![LocalPath::build(["data", "user_de", "0", "code_cache"])],
            vec![],
        );
        assert_eq!(env.code_cache_dirs().len(), 1);
        assert!(env.cache_dirs().is_empty());
    }
}
