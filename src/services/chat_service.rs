//! Chat service - posting messages and tracking read state.

use std::path::Path;

use uuid::Uuid;

use crate::{
    error::AppError,
    media,
    models::chat::{CHAT_IMAGE_DIR, ChatMessage, NewChatMessage},
    store::RecordStore,
};

/// An image attached to a chat message, as received from the client.
#[derive(Debug, Clone, Copy)]
pub struct Attachment<'a> {
    pub file_name: &'a str,
    pub bytes: &'a [u8],
}

/// Post a chat message, storing the attachment first if there is one.
///
/// The message is stored unseen. Chat images are kept at their original
/// size. If the message cannot be stored the attachment is removed again.
pub async fn post_message<S: RecordStore + ?Sized>(
    store: &S,
    media_root: &Path,
    user_id: Uuid,
    message: &str,
    attachment: Option<Attachment<'_>>,
) -> Result<ChatMessage, AppError> {
    let message_image = match attachment {
        Some(attachment) => Some(
            media::store_upload(
                media_root,
                CHAT_IMAGE_DIR,
                attachment.file_name,
                attachment.bytes,
            )
            .await?,
        ),
        None => None,
    };

    let message = match store
        .insert_chat_message(NewChatMessage {
            user_id,
            message: message.to_string(),
            message_image: message_image.clone(),
        })
        .await
    {
        Ok(message) => message,
        Err(err) => {
            if let Some(path) = &message_image {
                media::discard_upload(media_root, path).await;
            }
            return Err(err);
        }
    };
    tracing::info!(
        message_id = %message.id,
        user_id = %message.user_id,
        has_image = message.message_image.is_some(),
        "Chat message posted"
    );

    Ok(message)
}

/// Flag a message as read.
pub async fn mark_seen<S: RecordStore + ?Sized>(
    store: &S,
    message_id: Uuid,
) -> Result<ChatMessage, AppError> {
    let message = store.mark_chat_seen(message_id).await?;
    tracing::debug!(message_id = %message.id, "Chat message seen");
    Ok(message)
}

/// Number of messages from `user_id` nobody has read yet.
pub async fn unseen_count<S: RecordStore + ?Sized>(
    store: &S,
    user_id: Uuid,
) -> Result<usize, AppError> {
    let messages = store.chat_messages_for_user(user_id).await?;
    Ok(messages.iter().filter(|message| !message.seen).count())
}
