//! Handler functions for content CLI commands.
//!
//! These functions implement `health`, `validate` and `query`. Content is
//! loaded from the configured JSON files into an in-memory store on each
//! run.

use std::sync::Arc;

use serde::Serialize;
use vellum_core::traits::ConfigProvider;
use vellum_core::{Error, Result};
use vellum_query::SiteQueries;
use vellum_schema::SchemaRegistry;
use vellum_store::{ContentService, MemoryStore, SeedReport, load_seed};

use crate::cli::QueryAction;

// ============================================================================
// Helper: load content
// ============================================================================

/// Load all content files into a fresh store.
async fn load_content<C: ConfigProvider>(
    config: &C,
) -> Result<(ContentService<MemoryStore>, SeedReport)> {
    let registry = Arc::new(SchemaRegistry::standard());
    let store = Arc::new(MemoryStore::new(Arc::clone(&registry)));
    let service = ContentService::new(store, registry);
    let report = load_seed(&service, config).await?;
    if !report.is_clean() {
        log::warn!(
            "{} content record(s) rejected; run `vellum validate` for details",
            report.failures.len()
        );
    }
    Ok((service, report))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ============================================================================
// Handlers
// ============================================================================

/// Show where each collection's content file is expected.
pub fn handle_health<C: ConfigProvider>(name: &str, config: &C) -> Result<()> {
    let registry = SchemaRegistry::standard();
    let mut missing = 0;
    for schema in registry.iter() {
        let path = config.content_path(schema.name)?;
        let state = if path.exists() {
            "ok"
        } else {
            missing += 1;
            "missing"
        };
        println!("  {:<12} {} ({state})", schema.name, path.display());
    }
    println!(
        "{name}: healthy ({} collection(s), {missing} without content)",
        registry.iter().count()
    );
    Ok(())
}

/// Load every content file and report rejected records.
///
/// Fails when any record was rejected.
pub async fn handle_validate<C: ConfigProvider>(config: &C) -> Result<()> {
    let (_, report) = load_content(config).await?;

    for (collection, count) in &report.loaded {
        println!("  {collection:<12} {count} loaded");
    }
    for failure in &report.failures {
        println!(
            "  ERROR [{}#{}]: {}",
            failure.collection, failure.index, failure.message
        );
    }
    println!(
        "\nSummary: {} loaded, {} rejected",
        report.total(),
        report.failures.len()
    );

    if report.is_clean() {
        Ok(())
    } else {
        Err(Error::invalid_data(format!(
            "{} content record(s) failed validation",
            report.failures.len()
        )))
    }
}

/// Run one site query and print the result as JSON.
pub async fn handle_query<C: ConfigProvider>(config: &C, action: QueryAction) -> Result<()> {
    let (service, _) = load_content(config).await?;
    let site = SiteQueries::from_config(service, config);

    match action {
        QueryAction::Services => print_json(&site.list_services().await?),
        QueryAction::Service { slug } => print_json(&site.get_service_by_slug(&slug).await?),
        QueryAction::States => print_json(&site.list_state_pages().await?),
        QueryAction::State { slug } => print_json(&site.get_state_page_by_slug(&slug).await?),
        QueryAction::StateCode { code } => {
            print_json(&site.get_state_page_by_code(&code).await?)
        }
        QueryAction::Cities { state } => {
            print_json(&site.list_city_pages(state.as_deref()).await?)
        }
        QueryAction::City { slug } => print_json(&site.get_city_page_by_slug(&slug).await?),
        QueryAction::Settings => print_json(&site.get_settings().await?),
        QueryAction::Pages => print_json(&site.list_pages().await?),
        QueryAction::Page { slug } => print_json(&site.get_page_by_slug(&slug).await?),
        QueryAction::Nav => print_json(&site.list_nav_pages().await?),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[derive(Clone)]
    struct TestConfig {
        dir: PathBuf,
    }

    impl ConfigProvider for TestConfig {
        fn project_name(&self) -> &str {
            "test-site"
        }

        fn base_path(&self) -> Result<PathBuf> {
            Ok(self.dir.clone())
        }

        fn content_path(&self, collection: &str) -> Result<PathBuf> {
            Ok(self.dir.join(format!("{collection}.json")))
        }
    }

    fn content_dir(files: &[(&str, serde_json::Value)]) -> (TempDir, TestConfig) {
        let dir = TempDir::new().unwrap();
        for (name, value) in files {
            std::fs::write(dir.path().join(format!("{name}.json")), value.to_string()).unwrap();
        }
        let config = TestConfig {
            dir: dir.path().to_path_buf(),
        };
        (dir, config)
    }

    #[test]
    fn test_health_with_no_content() {
        let (_dir, config) = content_dir(&[]);
        assert!(handle_health("vellum", &config).is_ok());
    }

    #[tokio::test]
    async fn test_validate_clean_content() {
        let (_dir, config) = content_dir(&[(
            "services",
            json!([{"title": "Car Title Loans", "status": "published"}]),
        )]);
        assert!(handle_validate(&config).await.is_ok());
    }

    #[tokio::test]
    async fn test_validate_reports_rejections() {
        let (_dir, config) = content_dir(&[(
            "state-pages",
            json!([{"state": "Texas", "stateCode": "TEX"}]),
        )]);
        let err = handle_validate(&config).await.unwrap_err();
        assert!(err.to_string().contains("1 content record(s)"));
    }

    #[tokio::test]
    async fn test_query_commands() {
        let (_dir, config) = content_dir(&[
            (
                "city-pages",
                json!([{"city": "Austin", "state": "Texas", "stateCode": "TX", "status": "published"}]),
            ),
            ("settings", json!({"siteName": "Loans"})),
        ]);
        for action in [
            QueryAction::Cities {
                state: Some("tx".into()),
            },
            QueryAction::City {
                slug: "austin-texas".into(),
            },
            QueryAction::Settings,
            QueryAction::Nav,
            QueryAction::Page {
                slug: "missing".into(),
            },
        ] {
            assert!(handle_query(&config, action).await.is_ok());
        }
    }

    #[tokio::test]
    async fn test_query_malformed_content_fails() {
        let (dir, config) = content_dir(&[]);
        std::fs::write(dir.path().join("pages.json"), "not json").unwrap();
        assert!(handle_query(&config, QueryAction::Pages).await.is_err());
    }
}
