//! Transfer service - validation and status changes for transfers.
//!
//! # Validation Guarantee
//!
//! No transfer reaches the store unless its transaction PIN has exactly
//! four decimal digits.

use uuid::Uuid;

use crate::{
    error::AppError,
    models::transfer::{NewTransfer, TransactionInfo, Transfer},
    store::RecordStore,
};

/// Validate and record a new transfer.
///
/// # Process
///
/// 1. Check the transaction PIN
/// 2. Insert the transfer (status as given, `Pending` by default)
///
/// # Errors
///
/// - `Validation`: PIN does not have exactly four digits; nothing is stored
/// - `Database`: the store rejected the row (e.g. a field is too long)
pub async fn create_transfer<S: RecordStore + ?Sized>(
    store: &S,
    transfer: NewTransfer,
) -> Result<Transfer, AppError> {
    if let Err(err) = transfer.validate() {
        tracing::warn!(user_id = %transfer.user_id, "Rejected transfer: {}", err);
        return Err(err);
    }

    let transfer = store.insert_transfer(transfer).await?;
    tracing::info!(
        transfer_id = %transfer.id,
        user_id = %transfer.user_id,
        amount = transfer.amount,
        scope = %transfer.transaction_scope,
        "Transfer recorded"
    );

    Ok(transfer)
}

/// Mark a transfer as `Completed`.
pub async fn complete_transfer<S: RecordStore + ?Sized>(
    store: &S,
    transfer_id: Uuid,
) -> Result<Transfer, AppError> {
    let transfer = store
        .set_transfer_status(transfer_id, TransactionInfo::Completed)
        .await?;
    tracing::info!(transfer_id = %transfer.id, "Transfer completed");

    Ok(transfer)
}

/// Transfers owned by `user_id`, newest first.
pub async fn history<S: RecordStore + ?Sized>(
    store: &S,
    user_id: Uuid,
) -> Result<Vec<Transfer>, AppError> {
    store.transfers_for_user(user_id).await
}
