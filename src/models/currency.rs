//! Currency data model.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

/// Represents a currency record from the `currencies` table.
///
/// Profiles point at a currency; deleting the currency clears that pointer
/// instead of removing the profile.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct Currency {
    pub id: Uuid,

    /// Short code such as "USD" (at most 10 characters)
    pub code: String,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}
