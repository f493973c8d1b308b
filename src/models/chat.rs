//! Chat message data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::User;

/// Media folder that chat image uploads are stored under.
pub const CHAT_IMAGE_DIR: &str = "chat_images";

/// Represents a chat message from the `chat_messages` table.
///
/// A message may be text only, image only, or both; `message` is stored as
/// an empty string when the user only sent an image.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct ChatMessage {
    pub id: Uuid,

    /// Author of the message
    pub user_id: Uuid,

    /// Message text (at most 999 characters, may be empty)
    pub message: String,

    /// Attached image path relative to the media root
    pub message_image: Option<String>,

    /// Whether the other side has read the message
    pub seen: bool,

    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Display form: the author's full name.
    pub fn label(&self, author: &User) -> String {
        debug_assert_eq!(self.user_id, author.id);
        author.full_name()
    }
}

/// A chat message that has not been persisted yet. Always stored unseen.
#[derive(Debug, Clone, Deserialize)]
pub struct NewChatMessage {
    pub user_id: Uuid,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub message_image: Option<String>,
}
