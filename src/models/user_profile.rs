//! User PIN profile data model.

use serde::Serialize;
use uuid::Uuid;

use crate::models::user::User;

/// Secondary per-user profile that only stores a short PIN code.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct UserProfile {
    pub id: Uuid,

    /// Owning user (one row per user)
    pub user_id: Uuid,

    /// At most 6 characters; unset until the user picks one
    pub pin_code: Option<String>,
}

impl UserProfile {
    /// Display form: the owner's email address.
    pub fn label(&self, owner: &User) -> String {
        debug_assert_eq!(self.user_id, owner.id);
        owner.email.clone()
    }
}
