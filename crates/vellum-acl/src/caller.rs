//! Caller identity.

use serde::{Deserialize, Serialize};

/// The identity a request is made under.
///
/// Identity is passed explicitly to every operation; there is no ambient
/// request context. Session issuance happens elsewhere.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Caller {
    /// A public visitor.
    #[default]
    Anonymous,
    /// A signed-in editor.
    Authenticated {
        /// Opaque user identifier (typically an email).
        user: String,
    },
}

impl Caller {
    /// An authenticated caller.
    pub fn authenticated(user: impl Into<String>) -> Self {
        Self::Authenticated { user: user.into() }
    }

    /// The caller used for bulk content imports.
    pub fn system() -> Self {
        Self::authenticated("system")
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// User identifier, if any.
    pub fn user(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { user } => Some(user),
        }
    }
}
