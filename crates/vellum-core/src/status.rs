//! Content lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Name of the status field on every collection.
pub const STATUS_FIELD: &str = "status";

/// Lifecycle status gating anonymous visibility.
///
/// New records start as [`Status::Draft`]; only [`Status::Published`]
/// records are visible to anonymous callers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Work in progress, visible to authenticated callers only.
    #[default]
    Draft,
    /// Publicly visible.
    Published,
}

impl Status {
    /// All statuses, in the order the select field lists them.
    pub const ALL: [Status; 2] = [Status::Draft, Status::Published];

    /// Wire value stored in documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Draft => "draft",
            Status::Published => "published",
        }
    }

    /// Whether anonymous callers may see records with this status.
    pub fn is_public(&self) -> bool {
        matches!(self, Status::Published)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Status::Draft),
            "published" => Ok(Status::Published),
            other => Err(Error::invalid_data(format!("Unknown status: {other}"))),
        }
    }
}
