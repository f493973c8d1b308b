//! Verification service - IMF codes and user PIN codes.

use rand::Rng;
use rand::distr::Alphanumeric;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        imf_verification::{IMF_CODE_LEN, ImfVerification},
        user_profile::UserProfile,
    },
    store::RecordStore,
};

/// Longest PIN code a `UserProfile` can hold.
pub const USER_PIN_MAX_LEN: usize = 6;

/// Issue a fresh IMF code for `user_id`, replacing any previous one.
///
/// The new code is upper-case alphanumeric, `IMF_CODE_LEN` characters long,
/// and the row goes back to unverified.
pub async fn issue_code<S: RecordStore + ?Sized>(
    store: &S,
    user_id: Uuid,
) -> Result<ImfVerification, AppError> {
    let code: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(IMF_CODE_LEN)
        .map(|byte| char::from(byte).to_ascii_uppercase())
        .collect();

    let verification = store.upsert_imf_code(user_id, &code).await?;
    tracing::info!(user_id = %user_id, "IMF code issued");

    Ok(verification)
}

/// Check a code submitted by the user.
///
/// # Returns
///
/// `true` if the code matches; the row is then marked verified. A wrong code
/// leaves the row unchanged.
///
/// # Errors
///
/// - `NotFound`: no code was ever issued for this user
pub async fn verify_code<S: RecordStore + ?Sized>(
    store: &S,
    user_id: Uuid,
    submitted: &str,
) -> Result<bool, AppError> {
    let verification = store
        .imf_for_user(user_id)
        .await?
        .ok_or(AppError::NotFound("IMF verification"))?;

    if !verification.matches(submitted) {
        tracing::warn!(user_id = %user_id, "IMF code mismatch");
        return Ok(false);
    }

    if !verification.is_verified {
        store.mark_imf_verified(user_id).await?;
        tracing::info!(user_id = %user_id, "IMF code verified");
    }
    Ok(true)
}

/// Set or clear the user's short PIN code.
///
/// # Errors
///
/// - `Validation`: the code is longer than `USER_PIN_MAX_LEN` characters
pub async fn set_pin_code<S: RecordStore + ?Sized>(
    store: &S,
    user_id: Uuid,
    pin_code: Option<&str>,
) -> Result<UserProfile, AppError> {
    if pin_code.is_some_and(|pin| pin.chars().count() > USER_PIN_MAX_LEN) {
        return Err(AppError::Validation(format!(
            "PIN code must be at most {USER_PIN_MAX_LEN} characters."
        )));
    }

    store.save_user_profile(user_id, pin_code).await
}
