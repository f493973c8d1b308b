//! `RecordStore` backed by PostgreSQL through sqlx.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::DbPool,
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

/// Store that runs every operation against the migrated schema.
///
/// Cloning is cheap; clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, first_name, last_name, email)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, first_name, last_name, email
            "#,
        )
        .bind(user.username)
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(user.email)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<(), AppError> {
        // ON DELETE CASCADE removes everything the user owns
        let deleted = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(AppError::NotFound("User"));
        }
        Ok(())
    }

    async fn insert_currency(&self, code: &str) -> Result<Currency, AppError> {
        let currency = sqlx::query_as::<_, Currency>(
            "INSERT INTO currencies (code) VALUES ($1) RETURNING id, code",
        )
        .bind(code)
        .fetch_one(&self.pool)
        .await?;

        Ok(currency)
    }

    async fn list_currencies(&self) -> Result<Vec<Currency>, AppError> {
        let currencies =
            sqlx::query_as::<_, Currency>("SELECT id, code FROM currencies ORDER BY code")
                .fetch_all(&self.pool)
                .await?;

        Ok(currencies)
    }

    async fn save_profile(&self, profile: &Profile) -> Result<Profile, AppError> {
        // One profile per user: a second save for the same user updates in place
        let saved = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (user_id, amount, currency_id, image, profile_pin)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) DO UPDATE
            SET amount = EXCLUDED.amount,
                currency_id = EXCLUDED.currency_id,
                image = EXCLUDED.image,
                profile_pin = EXCLUDED.profile_pin
            RETURNING id, user_id, amount, currency_id, image, profile_pin
            "#,
        )
        .bind(profile.user_id)
        .bind(profile.amount)
        .bind(profile.currency_id)
        .bind(&profile.image)
        .bind(profile.profile_pin)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn profile_for_user(&self, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, user_id, amount, currency_id, image, profile_pin
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    async fn insert_transfer(&self, transfer: NewTransfer) -> Result<Transfer, AppError> {
        transfer.validate()?;

        let transfer = sqlx::query_as::<_, Transfer>(
            r#"
            INSERT INTO transfers (
                user_id,
                account_number,
                holder_name,
                amount,
                bank_name,
                description,
                transaction_pin,
                transfer_date,
                transaction_type,
                transaction_info,
                transaction_scope
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(transfer.user_id)
        .bind(transfer.account_number)
        .bind(transfer.holder_name)
        .bind(transfer.amount)
        .bind(transfer.bank_name)
        .bind(transfer.description)
        .bind(transfer.transaction_pin)
        .bind(transfer.transfer_date)
        .bind(transfer.transaction_type.as_str())
        .bind(transfer.transaction_info.as_str())
        .bind(transfer.transaction_scope.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(transfer)
    }

    async fn transfers_for_user(&self, user_id: Uuid) -> Result<Vec<Transfer>, AppError> {
        let transfers = sqlx::query_as::<_, Transfer>(
            r#"
            SELECT *
            FROM transfers
            WHERE user_id = $1
            ORDER BY date_created DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(transfers)
    }

    async fn set_transfer_status(
        &self,
        transfer_id: Uuid,
        status: TransactionInfo,
    ) -> Result<Transfer, AppError> {
        sqlx::query_as::<_, Transfer>(
            "UPDATE transfers SET transaction_info = $1 WHERE id = $2 RETURNING *",
        )
        .bind(status.as_str())
        .bind(transfer_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Transfer"))
    }

    async fn insert_chat_message(
        &self,
        message: NewChatMessage,
    ) -> Result<ChatMessage, AppError> {
        let message = sqlx::query_as::<_, ChatMessage>(
            r#"
            INSERT INTO chat_messages (user_id, message, message_image)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, message, message_image, seen, created_at
            "#,
        )
        .bind(message.user_id)
        .bind(message.message)
        .bind(message.message_image)
        .fetch_one(&self.pool)
        .await?;

        Ok(message)
    }

    async fn chat_messages_for_user(&self, user_id: Uuid) -> Result<Vec<ChatMessage>, AppError> {
        let messages = sqlx::query_as::<_, ChatMessage>(
            r#"
            SELECT id, user_id, message, message_image, seen, created_at
            FROM chat_messages
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    async fn mark_chat_seen(&self, message_id: Uuid) -> Result<ChatMessage, AppError> {
        sqlx::query_as::<_, ChatMessage>(
            r#"
            UPDATE chat_messages
            SET seen = TRUE
            WHERE id = $1
            RETURNING id, user_id, message, message_image, seen, created_at
            "#,
        )
        .bind(message_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Chat message"))
    }

    async fn upsert_imf_code(
        &self,
        user_id: Uuid,
        code: &str,
    ) -> Result<ImfVerification, AppError> {
        let verification = sqlx::query_as::<_, ImfVerification>(
            r#"
            INSERT INTO imf_verifications (user_id, imf_code, is_verified)
            VALUES ($1, $2, FALSE)
            ON CONFLICT (user_id) DO UPDATE
            SET imf_code = EXCLUDED.imf_code,
                is_verified = FALSE
            RETURNING id, user_id, imf_code, is_verified
            "#,
        )
        .bind(user_id)
        .bind(code)
        .fetch_one(&self.pool)
        .await?;

        Ok(verification)
    }

    async fn imf_for_user(&self, user_id: Uuid) -> Result<Option<ImfVerification>, AppError> {
        let verification = sqlx::query_as::<_, ImfVerification>(
            "SELECT id, user_id, imf_code, is_verified FROM imf_verifications WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(verification)
    }

    async fn mark_imf_verified(&self, user_id: Uuid) -> Result<ImfVerification, AppError> {
        sqlx::query_as::<_, ImfVerification>(
            r#"
            UPDATE imf_verifications
            SET is_verified = TRUE
            WHERE user_id = $1
            RETURNING id, user_id, imf_code, is_verified
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("IMF verification"))
    }

    async fn save_user_profile(
        &self,
        user_id: Uuid,
        pin_code: Option<&str>,
    ) -> Result<UserProfile, AppError> {
        let profile = sqlx::query_as::<_, UserProfile>(
            r#"
            INSERT INTO user_profiles (user_id, pin_code)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE
            SET pin_code = EXCLUDED.pin_code
            RETURNING id, user_id, pin_code
            "#,
        )
        .bind(user_id)
        .bind(pin_code)
        .fetch_one(&self.pool)
        .await?;

        Ok(profile)
    }

    async fn user_profile_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<UserProfile>, AppError> {
        let profile = sqlx::query_as::<_, UserProfile>(
            "SELECT id, user_id, pin_code FROM user_profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }
}
