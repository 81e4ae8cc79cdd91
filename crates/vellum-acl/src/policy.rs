//! Visibility and mutation policy.
//!
//! Every decision is a pure function of the caller and, for reads, the
//! record's status. Reads never fail: an anonymous query is narrowed with
//! [`read_constraint`] instead of being rejected.

use vellum_core::status::STATUS_FIELD;
use vellum_core::{Condition, Error, Operation, Result, Status};

use crate::caller::Caller;

/// What an operation is aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target<'a> {
    /// A collection with draft/published records.
    Collection(&'a str),
    /// A singleton without status.
    Global(&'a str),
}

impl Target<'_> {
    pub fn name(&self) -> &str {
        match *self {
            Target::Collection(name) | Target::Global(name) => name,
        }
    }
}

/// Whether a caller may see a record with this status.
pub fn can_read(caller: &Caller, status: Status) -> bool {
    caller.is_authenticated() || status.is_public()
}

/// Globals are readable by everyone.
pub fn can_read_global(_caller: &Caller) -> bool {
    true
}

/// Whether a caller may create, update or delete content.
pub fn can_mutate(caller: &Caller) -> bool {
    caller.is_authenticated()
}

/// Predicate injected into a collection query for this caller.
///
/// `Some(status == published)` for anonymous callers, `None` (no
/// narrowing) for authenticated ones.
pub fn read_constraint(caller: &Caller) -> Option<Condition> {
    if caller.is_authenticated() {
        None
    } else {
        Some(Condition::equals(STATUS_FIELD, Status::Published.as_str()))
    }
}

/// Check an operation, returning [`Error::Forbidden`] on denial.
///
/// Reads always pass; collection reads are narrowed separately.
pub fn authorize(caller: &Caller, operation: Operation, target: Target<'_>) -> Result<()> {
    let allowed = match (operation, target) {
        (Operation::Read, Target::Global(_)) => can_read_global(caller),
        (Operation::Read, Target::Collection(_)) => true,
        _ => can_mutate(caller),
    };

    if allowed {
        Ok(())
    } else {
        log::debug!("denied {} on {} for anonymous caller", operation, target.name());
        Err(Error::forbidden(operation.as_str(), target.name()))
    }
}
