//! Persistence gateway for every record kind.
//!
//! Services never issue SQL themselves; they are handed a `RecordStore` and
//! call the operation they need. `PgStore` is the production implementation.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        chat::{ChatMessage, NewChatMessage},
        currency::Currency,
        imf_verification::ImfVerification,
        profile::Profile,
        transfer::{NewTransfer, Transfer, TransactionInfo},
        user::{NewUser, User},
        user_profile::UserProfile,
    },
};

#[cfg(test)]
pub mod memory;
/// PostgreSQL-backed store
pub mod postgres;

pub use postgres::PgStore;

/// Storage operations the record layer relies on.
///
/// # Ownership
///
/// Every record except `Currency` belongs to a user. Deleting the user
/// deletes those records with it.
///
/// # Errors
///
/// Lookups that miss return `Ok(None)`. Updates of a missing row return
/// `AppError::NotFound`. Constraint violations surface as
/// `AppError::Database`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert_user(&self, user: NewUser) -> Result<User, AppError>;

    /// Delete a user and, by cascade, everything the user owns.
    async fn delete_user(&self, user_id: Uuid) -> Result<(), AppError>;

    async fn insert_currency(&self, code: &str) -> Result<Currency, AppError>;

    async fn list_currencies(&self) -> Result<Vec<Currency>, AppError>;

    /// Insert the profile, or overwrite the one already owned by `profile.user_id`.
    ///
    /// Returns the row as stored, including its database id.
    async fn save_profile(&self, profile: &Profile) -> Result<Profile, AppError>;

    async fn profile_for_user(&self, user_id: Uuid) -> Result<Option<Profile>, AppError>;

    /// Insert a transfer, rejecting it with `AppError::Validation` if its PIN
    /// does not have exactly four digits.
    async fn insert_transfer(&self, transfer: NewTransfer) -> Result<Transfer, AppError>;

    /// Transfers owned by `user_id`, newest first.
    async fn transfers_for_user(&self, user_id: Uuid) -> Result<Vec<Transfer>, AppError>;

    async fn set_transfer_status(
        &self,
        transfer_id: Uuid,
        status: TransactionInfo,
    ) -> Result<Transfer, AppError>;

    async fn insert_chat_message(&self, message: NewChatMessage)
    -> Result<ChatMessage, AppError>;

    /// Messages written by `user_id`, oldest first.
    async fn chat_messages_for_user(&self, user_id: Uuid) -> Result<Vec<ChatMessage>, AppError>;

    async fn mark_chat_seen(&self, message_id: Uuid) -> Result<ChatMessage, AppError>;

    /// Set the user's IMF code, creating the row if needed. Resets `is_verified`.
    async fn upsert_imf_code(&self, user_id: Uuid, code: &str)
    -> Result<ImfVerification, AppError>;

    async fn imf_for_user(&self, user_id: Uuid) -> Result<Option<ImfVerification>, AppError>;

    async fn mark_imf_verified(&self, user_id: Uuid) -> Result<ImfVerification, AppError>;

    /// Set the user's PIN code, creating the row if needed.
    async fn save_user_profile(
        &self,
        user_id: Uuid,
        pin_code: Option<&str>,
    ) -> Result<UserProfile, AppError>;

    async fn user_profile_for_user(&self, user_id: Uuid)
    -> Result<Option<UserProfile>, AppError>;
}
