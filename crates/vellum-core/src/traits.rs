//! Core traits for Vellum domain abstraction.
//!
//! The primary trait is [`ConfigProvider`], which abstracts where a
//! deployment keeps its content and how large query result caps are.

use std::path::PathBuf;

use crate::Result;

/// Default cap for collection listings.
pub const DEFAULT_LIST_LIMIT: usize = 100;

/// Default cap for city listings.
pub const DEFAULT_CITY_LIMIT: usize = 500;

/// Trait for deployment-specific configuration.
///
/// # Bounds
///
/// - `Send + Sync`: Configuration must be shareable across threads
/// - `Clone`: Configuration can be duplicated for passing to subsystems
/// - `'static`: Configuration lifetime is not borrowed
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use vellum_core::traits::ConfigProvider;
/// use vellum_core::Result;
///
/// #[derive(Clone)]
/// struct SiteConfig {
///     data_dir: PathBuf,
/// }
///
/// impl ConfigProvider for SiteConfig {
///     fn project_name(&self) -> &str {
///         "title-loans"
///     }
///
///     fn base_path(&self) -> Result<PathBuf> {
///         Ok(self.data_dir.clone())
///     }
///
///     fn content_path(&self, collection: &str) -> Result<PathBuf> {
///         Ok(self.data_dir.join(format!("{collection}.json")))
///     }
/// }
///
/// let config = SiteConfig { data_dir: PathBuf::from("/srv/site") };
/// assert_eq!(config.list_limit(), 100);
/// ```
pub trait ConfigProvider: Send + Sync + Clone + 'static {
    /// The project name, used for env var prefixes and default paths.
    fn project_name(&self) -> &str;

    /// Base path for all project data.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined.
    fn base_path(&self) -> Result<PathBuf>;

    /// Path of the seed file for a collection or global.
    ///
    /// `collection` is a registry name such as `"pages"` or `"settings"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be resolved.
    fn content_path(&self, collection: &str) -> Result<PathBuf>;

    /// Cap applied to collection listings.
    fn list_limit(&self) -> usize {
        DEFAULT_LIST_LIMIT
    }

    /// Cap applied to city listings.
    fn city_limit(&self) -> usize {
        DEFAULT_CITY_LIMIT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct TestConfig {
        name: String,
        base: PathBuf,
    }

    impl ConfigProvider for TestConfig {
        fn project_name(&self) -> &str {
            &self.name
        }

        fn base_path(&self) -> Result<PathBuf> {
            Ok(self.base.clone())
        }

        fn content_path(&self, collection: &str) -> Result<PathBuf> {
            Ok(self.base.join(format!("{collection}.json")))
        }
    }

    fn test_config() -> TestConfig {
        TestConfig {
            name: "test-site".into(),
            base: PathBuf::from("/data"),
        }
    }

    #[test]
    fn test_config_provider_project_name() {
        assert_eq!(test_config().project_name(), "test-site");
    }

    #[test]
    fn test_config_provider_content_path() {
        let config = test_config();
        assert_eq!(
            config.content_path("city-pages").unwrap(),
            PathBuf::from("/data/city-pages.json")
        );
    }

    #[test]
    fn test_config_provider_default_limits() {
        let config = test_config();
        assert_eq!(config.list_limit(), DEFAULT_LIST_LIMIT);
        assert_eq!(config.city_limit(), DEFAULT_CITY_LIMIT);
    }

    #[test]
    fn test_config_provider_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TestConfig>();
    }
}
