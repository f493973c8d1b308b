//! IMF verification data model.
//!
//! Each user has at most one verification row. The code is issued by staff
//! and must be entered back by the user before the row is marked verified.

use serde::Serialize;
use uuid::Uuid;

use crate::models::user::User;

/// Maximum length of an IMF code.
pub const IMF_CODE_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct ImfVerification {
    pub id: Uuid,

    /// Owning user (one row per user)
    pub user_id: Uuid,

    /// Unique across all users; `None` until a code is issued
    pub imf_code: Option<String>,

    pub is_verified: bool,
}

impl ImfVerification {
    /// Display form, e.g. "IMF Code for Ada Obi".
    pub fn label(&self, owner: &User) -> String {
        debug_assert_eq!(self.user_id, owner.id);
        format!("IMF Code for {}", owner.full_name())
    }

    /// Whether `submitted` matches the issued code.
    ///
    /// Surrounding whitespace is ignored; a row without a code never matches.
    pub fn matches(&self, submitted: &str) -> bool {
        self.imf_code
            .as_deref()
            .is_some_and(|code| code == submitted.trim())
    }
}
