//! In-memory `RecordStore` used by service tests.
//!
//! Mirrors the schema's ownership rules (one profile, IMF row and user
//! profile per user, cascade on user delete, unique IMF codes) closely
//! enough for the services to be exercised without PostgreSQL.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
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
    store::RecordStore,
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    currencies: Vec<Currency>,
    profiles: Vec<Profile>,
    transfers: Vec<Transfer>,
    chat_messages: Vec<ChatMessage>,
    imf_verifications: Vec<ImfVerification>,
    user_profiles: Vec<UserProfile>,
    /// Monotonic clock so ordering by timestamp is deterministic
    ticks: i64,
}

impl Tables {
    fn require_user(&self, user_id: Uuid) -> Result<(), AppError> {
        if self.users.iter().any(|user| user.id == user_id) {
            Ok(())
        } else {
            Err(AppError::Database(sqlx::Error::RowNotFound))
        }
    }

    fn tick(&mut self) -> chrono::DateTime<Utc> {
        self.ticks += 1;
        Utc::now() + Duration::milliseconds(self.ticks)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of transfers stored for any user.
    pub fn transfer_count(&self) -> usize {
        self.tables.lock().unwrap().transfers.len()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let user = User {
            id: Uuid::new_v4(),
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<(), AppError> {
        let mut tables = self.tables.lock().unwrap();
        tables.require_user(user_id).map_err(|_| AppError::NotFound("User"))?;

        tables.users.retain(|user| user.id != user_id);
        tables.profiles.retain(|row| row.user_id != user_id);
        tables.transfers.retain(|row| row.user_id != user_id);
        tables.chat_messages.retain(|row| row.user_id != user_id);
        tables.imf_verifications.retain(|row| row.user_id != user_id);
        tables.user_profiles.retain(|row| row.user_id != user_id);
        Ok(())
    }

    async fn insert_currency(&self, code: &str) -> Result<Currency, AppError> {
        let currency = Currency {
            id: Uuid::new_v4(),
            code: code.to_string(),
        };
        self.tables.lock().unwrap().currencies.push(currency.clone());
        Ok(currency)
    }

    async fn list_currencies(&self) -> Result<Vec<Currency>, AppError> {
        let mut currencies = self.tables.lock().unwrap().currencies.clone();
        currencies.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(currencies)
    }

    async fn save_profile(&self, profile: &Profile) -> Result<Profile, AppError> {
        let mut tables = self.tables.lock().unwrap();
        tables.require_user(profile.user_id)?;

        if let Some(existing) = tables
            .profiles
            .iter_mut()
            .find(|row| row.user_id == profile.user_id)
        {
            let id = existing.id;
            *existing = Profile {
                id,
                ..profile.clone()
            };
            return Ok(existing.clone());
        }

        tables.profiles.push(profile.clone());
        Ok(profile.clone())
    }

    async fn profile_for_user(&self, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.profiles.iter().find(|row| row.user_id == user_id).cloned())
    }

    async fn insert_transfer(&self, transfer: NewTransfer) -> Result<Transfer, AppError> {
        transfer.validate()?;

        let mut tables = self.tables.lock().unwrap();
        tables.require_user(transfer.user_id)?;

        let transfer = Transfer {
            id: Uuid::new_v4(),
            user_id: transfer.user_id,
            account_number: transfer.account_number,
            holder_name: transfer.holder_name,
            amount: transfer.amount,
            bank_name: transfer.bank_name,
            description: transfer.description,
            date_created: tables.tick(),
            transaction_pin: transfer.transaction_pin,
            transfer_date: transfer.transfer_date,
            transaction_type: transfer.transaction_type,
            transaction_info: transfer.transaction_info,
            transaction_scope: transfer.transaction_scope,
        };
        tables.transfers.push(transfer.clone());
        Ok(transfer)
    }

    async fn transfers_for_user(&self, user_id: Uuid) -> Result<Vec<Transfer>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut transfers: Vec<Transfer> = tables
            .transfers
            .iter()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect();
        transfers.sort_by(|a, b| b.date_created.cmp(&a.date_created));
        Ok(transfers)
    }

    async fn set_transfer_status(
        &self,
        transfer_id: Uuid,
        status: TransactionInfo,
    ) -> Result<Transfer, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let transfer = tables
            .transfers
            .iter_mut()
            .find(|row| row.id == transfer_id)
            .ok_or(AppError::NotFound("Transfer"))?;
        transfer.transaction_info = status;
        Ok(transfer.clone())
    }

    async fn insert_chat_message(
        &self,
        message: NewChatMessage,
    ) -> Result<ChatMessage, AppError> {
        let mut tables = self.tables.lock().unwrap();
        tables.require_user(message.user_id)?;

        let message = ChatMessage {
            id: Uuid::new_v4(),
            user_id: message.user_id,
            message: message.message,
            message_image: message.message_image,
            seen: false,
            created_at: tables.tick(),
        };
        tables.chat_messages.push(message.clone());
        Ok(message)
    }

    async fn chat_messages_for_user(&self, user_id: Uuid) -> Result<Vec<ChatMessage>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .chat_messages
            .iter()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn mark_chat_seen(&self, message_id: Uuid) -> Result<ChatMessage, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let message = tables
            .chat_messages
            .iter_mut()
            .find(|row| row.id == message_id)
            .ok_or(AppError::NotFound("Chat message"))?;
        message.seen = true;
        Ok(message.clone())
    }

    async fn upsert_imf_code(
        &self,
        user_id: Uuid,
        code: &str,
    ) -> Result<ImfVerification, AppError> {
        let mut tables = self.tables.lock().unwrap();
        tables.require_user(user_id)?;

        let taken = tables
            .imf_verifications
            .iter()
            .any(|row| row.user_id != user_id && row.imf_code.as_deref() == Some(code));
        if taken {
            return Err(AppError::Database(sqlx::Error::Protocol(
                "duplicate imf_code".to_string(),
            )));
        }

        if let Some(row) = tables
            .imf_verifications
            .iter_mut()
            .find(|row| row.user_id == user_id)
        {
            row.imf_code = Some(code.to_string());
            row.is_verified = false;
            return Ok(row.clone());
        }

        let row = ImfVerification {
            id: Uuid::new_v4(),
            user_id,
            imf_code: Some(code.to_string()),
            is_verified: false,
        };
        tables.imf_verifications.push(row.clone());
        Ok(row)
    }

    async fn imf_for_user(&self, user_id: Uuid) -> Result<Option<ImfVerification>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .imf_verifications
            .iter()
            .find(|row| row.user_id == user_id)
            .cloned())
    }

    async fn mark_imf_verified(&self, user_id: Uuid) -> Result<ImfVerification, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let row = tables
            .imf_verifications
            .iter_mut()
            .find(|row| row.user_id == user_id)
            .ok_or(AppError::NotFound("IMF verification"))?;
        row.is_verified = true;
        Ok(row.clone())
    }

    async fn save_user_profile(
        &self,
        user_id: Uuid,
        pin_code: Option<&str>,
    ) -> Result<UserProfile, AppError> {
        let mut tables = self.tables.lock().unwrap();
        tables.require_user(user_id)?;

        if let Some(row) = tables
            .user_profiles
            .iter_mut()
            .find(|row| row.user_id == user_id)
        {
            row.pin_code = pin_code.map(str::to_string);
            return Ok(row.clone());
        }

        let row = UserProfile {
            id: Uuid::new_v4(),
            user_id,
            pin_code: pin_code.map(str::to_string),
        };
        tables.user_profiles.push(row.clone());
        Ok(row)
    }

    async fn user_profile_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<UserProfile>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .user_profiles
            .iter()
            .find(|row| row.user_id == user_id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn user(store: &MemoryStore) -> User {
        store
            .insert_user(NewUser {
                username: "ada".to_string(),
                first_name: "Ada".to_string(),
                last_name: "Obi".to_string(),
                email: "ada@example.com".to_string(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn deleting_a_user_cascades() {
        let store = MemoryStore::new();
        let owner = user(&store).await;

        store.save_profile(&Profile::new(owner.id)).await.unwrap();
        store.upsert_imf_code(owner.id, "AB12CD34EF").await.unwrap();
        store.save_user_profile(owner.id, Some("1234")).await.unwrap();

        store.delete_user(owner.id).await.unwrap();

        assert!(store.profile_for_user(owner.id).await.unwrap().is_none());
        assert!(store.imf_for_user(owner.id).await.unwrap().is_none());
        assert!(store.user_profile_for_user(owner.id).await.unwrap().is_none());
        assert!(matches!(
            store.delete_user(owner.id).await,
            Err(AppError::NotFound("User"))
        ));
    }

    #[tokio::test]
    async fn second_profile_save_updates_in_place() {
        let store = MemoryStore::new();
        let owner = user(&store).await;

        let first = store.save_profile(&Profile::new(owner.id)).await.unwrap();
        let mut changed = Profile::new(owner.id);
        changed.profile_pin = 4321;
        let second = store.save_profile(&changed).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.profile_pin, 4321);
    }

    #[tokio::test]
    async fn direct_transfer_insert_still_checks_the_pin() {
        let store = MemoryStore::new();
        let owner = user(&store).await;
        let transfer = NewTransfer {
            user_id: owner.id,
            account_number: "0123456789".to_string(),
            holder_name: "Ada Obi".to_string(),
            amount: 100,
            bank_name: "First Bank".to_string(),
            description: None,
            transaction_pin: 12,
            transfer_date: Utc::now().date_naive(),
            transaction_type: Default::default(),
            transaction_info: Default::default(),
            transaction_scope: Default::default(),
        };

        let result = store.insert_transfer(transfer.clone()).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(store.transfer_count(), 0);

        let stored = store
            .insert_transfer(NewTransfer {
                transaction_pin: 4821,
                ..transfer
            })
            .await
            .unwrap();
        assert_eq!(stored.transaction_pin, 4821);
    }
}
