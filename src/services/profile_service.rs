//! Profile service - saving profiles and keeping avatars within bounds.
//!
//! # Save Semantics
//!
//! The record is written first and the avatar is normalized afterwards.
//! The two steps are not atomic: if resizing fails the record stays
//! committed, the original file stays in place and the error is returned.

use std::path::Path;

use uuid::Uuid;

use crate::{
    error::AppError,
    media,
    models::profile::{AVATAR_UPLOAD_DIR, Profile},
    store::RecordStore,
};

/// Persist a profile, then shrink its avatar if it is larger than 300x300.
///
/// # Arguments
///
/// * `store` - Record store
/// * `media_root` - Directory the profile's `image` path is relative to
/// * `profile` - Profile to insert, or to overwrite the owner's existing one
///
/// # Errors
///
/// - `Database`: the record could not be saved (nothing else happens)
/// - `Io` / `Image`: the record was saved but the avatar could not be
///   read or rewritten
pub async fn save_profile<S: RecordStore + ?Sized>(
    store: &S,
    media_root: &Path,
    profile: &Profile,
) -> Result<Profile, AppError> {
    let saved = store.save_profile(profile).await?;
    normalize_saved(media_root, saved).await
}

/// Post-commit half of a save: shrink the stored avatar.
async fn normalize_saved(media_root: &Path, saved: Profile) -> Result<Profile, AppError> {
    let avatar = media::resolve(media_root, &saved.image);
    let resized = tokio::task::spawn_blocking(move || media::normalize_avatar(&avatar))
        .await
        .map_err(|err| AppError::Io(std::io::Error::other(err)))?;

    match resized {
        Ok(resized) => {
            tracing::info!(
                profile_id = %saved.id,
                user_id = %saved.user_id,
                avatar_resized = resized,
                "Profile saved"
            );
            Ok(saved)
        }
        Err(err) => {
            tracing::warn!(
                profile_id = %saved.id,
                image = %saved.image,
                "Profile saved but avatar was not normalized: {}",
                err
            );
            Err(err)
        }
    }
}

/// Store a new avatar upload and point the user's profile at it.
///
/// Creates the profile with default values if the user has none yet. The
/// previous avatar file is left on disk. If the record cannot be written the
/// new upload is removed again.
pub async fn upload_avatar<S: RecordStore + ?Sized>(
    store: &S,
    media_root: &Path,
    user_id: Uuid,
    file_name: &str,
    bytes: &[u8],
) -> Result<Profile, AppError> {
    let mut profile = store
        .profile_for_user(user_id)
        .await?
        .unwrap_or_else(|| Profile::new(user_id));

    profile.image = media::store_upload(media_root, AVATAR_UPLOAD_DIR, file_name, bytes).await?;

    let saved = match store.save_profile(&profile).await {
        Ok(saved) => saved,
        Err(err) => {
            media::discard_upload(media_root, &profile.image).await;
            return Err(err);
        }
    };
    normalize_saved(media_root, saved).await
}
