//! RAM module representation.

use serde::{Deserialize, Serialize};

/// A RAM module that can be installed in disks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ram {
    /// Unique positive identifier.
    pub id: i64,
    /// Module size (positive).
    pub size: i64,
    /// Producing company, compared against disk manufacturers.
    pub company: String,
}

impl Ram {
    /// Creates a new RAM module.
    #[must_use]
    pub fn new(id: i64, size: i64, company: impl Into<String>) -> Self {
        Self {
            id,
            size,
            company: company.into(),
        }
    }
}
