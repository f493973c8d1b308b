//! Profile data models.
//!
//! This module defines:
//! - `Profile`: a user's banking profile (balance, currency, avatar, PIN)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::User;

/// Avatar every profile starts with, relative to the media root.
pub const DEFAULT_AVATAR: &str = "default.jpg";

/// Media folder that avatar uploads are stored under.
pub const AVATAR_UPLOAD_DIR: &str = "profile_pics";

/// PIN assigned to profiles that never set one.
pub const DEFAULT_PROFILE_PIN: i32 = 2002;

/// Represents a profile record from the database.
///
/// # Database Table
///
/// Maps to the `profiles` table. Each profile:
/// - Belongs to exactly one user (one profile per user)
/// - Holds a balance as `NUMERIC(12, 2)`, decoded into a `Decimal`
/// - Optionally references a currency (cleared if the currency is deleted)
///
/// # Avatar
///
/// `image` is a path relative to the media root. After every save the file
/// is shrunk to fit within 300x300 pixels.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Current balance
    pub amount: Decimal,

    pub currency_id: Option<Uuid>,

    /// Avatar path relative to the media root
    pub image: String,

    pub profile_pin: i32,
}

impl Profile {
    /// A fresh profile for `user_id` with the column defaults applied.
    ///
    /// The id is provisional until the store has saved the record.
    pub fn new(user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            amount: Decimal::new(0, 2),
            currency_id: None,
            image: DEFAULT_AVATAR.to_string(),
            profile_pin: DEFAULT_PROFILE_PIN,
        }
    }

    /// Display form, e.g. "Ada Obi profile".
    ///
    /// Takes the owner because the profile row only carries its id.
    pub fn label(&self, owner: &User) -> String {
        debug_assert_eq!(self.user_id, owner.id);
        format!("{} profile", owner.full_name())
    }
}
