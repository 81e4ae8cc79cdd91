//! Query predicates and find options.
//!
//! A [`Where`] is a conjunction of [`Condition`]s evaluated against a
//! [`Document`]. [`FindOptions`] carries the limit, sort and relationship
//! depth a caller hands to the store alongside the predicate.
//!
//! # Example
//!
//! ```
//! use vellum_core::{Condition, Direction, FindOptions, Where};
//!
//! let filter = Where::new()
//!     .and(Condition::equals("status", "published"))
//!     .and(Condition::equals_ignore_case("stateCode", "tx"));
//!
//! let options = FindOptions::default()
//!     .with_limit(500)
//!     .with_sort("navOrder", Direction::Asc);
//! # let _ = (filter, options);
//! ```

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Document;

/// A single field predicate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Condition {
    /// Field equals the value exactly.
    Equals { field: String, value: Value },
    /// Text field equals the value after upper-casing both sides.
    EqualsIgnoreCase { field: String, value: String },
}

impl Condition {
    /// Exact equality.
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Case-insensitive text equality.
    pub fn equals_ignore_case(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::EqualsIgnoreCase {
            field: field.into(),
            value: value.into(),
        }
    }

    /// The field this condition tests.
    pub fn field(&self) -> &str {
        match self {
            Self::Equals { field, .. } | Self::EqualsIgnoreCase { field, .. } => field,
        }
    }

    /// Evaluate against a document. Missing fields never match.
    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Self::Equals { field, value } => doc.get(field) == Some(value),
            Self::EqualsIgnoreCase { field, value } => doc
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|s| s.to_uppercase() == value.to_uppercase()),
        }
    }
}

/// Conjunction of conditions. An empty `Where` matches everything.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Where {
    /// Conditions that must all hold.
    pub conditions: Vec<Condition>,
}

impl Where {
    /// Create an empty (match-all) predicate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition.
    pub fn and(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Add a condition if present.
    pub fn and_maybe(self, condition: Option<Condition>) -> Self {
        match condition {
            Some(c) => self.and(c),
            None => self,
        }
    }

    /// Whether every condition holds for the document.
    pub fn matches(&self, doc: &Document) -> bool {
        self.conditions.iter().all(|c| c.matches(doc))
    }

    /// Whether no conditions are set.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// Sort key for a find.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    /// Field to sort by.
    pub field: String,
    /// Direction.
    pub direction: Direction,
}

impl Sort {
    /// Compare two documents by this key.
    ///
    /// Documents missing the field (or holding null) sort after every
    /// document that has it, in both directions. The ordering is total, so
    /// a stable sort keeps ties in input order.
    pub fn compare(&self, a: &Document, b: &Document) -> Ordering {
        let left = a.get(&self.field).filter(|v| !v.is_null());
        let right = b.get(&self.field).filter(|v| !v.is_null());
        match (left, right) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(l), Some(r)) => {
                let ord = compare_values(l, r);
                match self.direction {
                    Direction::Asc => ord,
                    Direction::Desc => ord.reverse(),
                }
            }
        }
    }
}

/// Ordering between two non-null JSON scalars.
///
/// Numbers compare numerically, strings lexically, booleans false < true.
/// Across kinds: numbers < strings < booleans < arrays < objects.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.total_cmp(&y)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Number(_) => 0,
        Value::String(_) => 1,
        Value::Bool(_) => 2,
        Value::Array(_) => 3,
        Value::Object(_) => 4,
        Value::Null => 5,
    }
}

/// Options accompanying a find.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindOptions {
    /// Maximum number of records returned (None = store default).
    pub limit: Option<usize>,
    /// Sort applied before the limit.
    pub sort: Option<Sort>,
    /// How many levels of references the store should populate.
    pub depth: u8,
}

impl FindOptions {
    /// Set the result cap.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the sort key.
    pub fn with_sort(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.sort = Some(Sort {
            field: field.into(),
            direction,
        });
        self
    }

    /// Set the reference population depth.
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }
}
