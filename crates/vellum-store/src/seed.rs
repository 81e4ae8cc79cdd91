//! Loading site content from JSON seed files.
//!
//! Each registered collection reads `<content dir>/<name>.json` (a JSON
//! array of records) and each global reads an object from the same place.
//! Records go through the normal [`ContentService`] write pipeline as the
//! system caller, so slugs are derived and constraints are checked exactly
//! as for editor writes.
//!
//! A missing file is not an error. A record that fails validation is
//! recorded in the [`SeedReport`] and the rest keep loading.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tokio::fs;

use vellum_acl::Caller;
use vellum_core::{ConfigProvider, Document, Error, Result};

use crate::service::ContentService;
use crate::store::ContentStore;

/// One record that could not be loaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SeedFailure {
    pub collection: String,
    /// Position in the seed file; `0` for globals.
    pub index: usize,
    pub message: String,
}

/// Outcome of [`load_seed`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    /// Records written per collection or global.
    pub loaded: BTreeMap<String, usize>,
    pub failures: Vec<SeedFailure>,
}

impl SeedReport {
    /// Total records written.
    pub fn total(&self) -> usize {
        self.loaded.values().sum()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn fail(&mut self, collection: &str, index: usize, err: &Error) {
        log::warn!("seed {collection}[{index}] rejected: {err}");
        self.failures.push(SeedFailure {
            collection: collection.to_string(),
            index,
            message: err.to_string(),
        });
    }
}

async fn read_json(path: &Path) -> Result<Option<Value>> {
    let exists = fs::try_exists(path)
        .await
        .map_err(|e| Error::io_with_path(e, path))?;
    if !exists {
        log::debug!("no seed file at {}", path.display());
        return Ok(None);
    }
    let text = fs::read_to_string(path)
        .await
        .map_err(|e| Error::io_with_path(e, path))?;
    let value = serde_json::from_str(&text)
        .map_err(|e| Error::invalid_data(format!("{}: {e}", path.display())))?;
    Ok(Some(value))
}

fn into_document(value: Value, path: &Path) -> Result<Document> {
    match value {
        Value::Object(doc) => Ok(doc),
        other => Err(Error::invalid_data(format!(
            "{}: expected an object, found {}",
            path.display(),
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Load every registered collection and global from its seed file.
///
/// # Errors
///
/// Unreadable or malformed files and storage failures abort the load.
/// Validation failures do not; they are listed in the report.
pub async fn load_seed<S, C>(service: &ContentService<S>, config: &C) -> Result<SeedReport>
where
    S: ContentStore,
    C: ConfigProvider,
{
    let caller = Caller::system();
    let mut report = SeedReport::default();
    let schemas: Vec<(&'static str, bool)> = service
        .registry()
        .iter()
        .map(|s| (s.name, s.is_global()))
        .collect();

    for (name, is_global) in schemas {
        let path = config.content_path(name)?;
        let Some(value) = read_json(&path).await? else {
            continue;
        };

        if is_global {
            let doc = into_document(value, &path)?;
            match service.update_global(&caller, name, doc).await {
                Ok(_) => {
                    report.loaded.insert(name.to_string(), 1);
                }
                Err(e) if e.is_validation() => report.fail(name, 0, &e),
                Err(e) => return Err(e),
            }
            continue;
        }

        let records = match value {
            Value::Array(records) => records,
            other => {
                return Err(Error::invalid_data(format!(
                    "{}: expected an array of records, found {}",
                    path.display(),
                    json_kind(&other)
                )));
            }
        };

        let mut count = 0;
        for (index, record) in records.into_iter().enumerate() {
            let doc = into_document(record, &path)?;
            match service.create(&caller, name, doc).await {
                Ok(_) => count += 1,
                Err(e) if e.is_validation() => report.fail(name, index, &e),
                Err(e) => return Err(e),
            }
        }
        log::info!("seeded {count} {name} from {}", path.display());
        report.loaded.insert(name.to_string(), count);
    }

    Ok(report)
}
