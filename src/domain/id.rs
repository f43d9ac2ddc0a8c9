//! Domain identifier types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Store-assigned persona identifier.
///
/// Wraps the integer primary key so identifiers cannot be confused with
/// other integers flowing through handlers and stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonaId(i64);

impl PersonaId {
    /// Create a new `PersonaId` from its raw value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw integer value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PersonaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for PersonaId {
    fn from(id: i64) -> Self {
        Self::new(id)
    }
}
