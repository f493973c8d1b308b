//! Currency service - seeding the currency table.

use crate::{error::AppError, models::currency::Currency, store::RecordStore};

/// Longest code the `currencies.code` column holds.
pub const CURRENCY_CODE_MAX_LEN: usize = 10;

/// Make sure every code in `codes` exists, inserting the missing ones.
///
/// Codes are trimmed and upper-cased; blanks and duplicates are skipped.
///
/// # Returns
///
/// The currencies that were inserted by this call.
///
/// # Errors
///
/// - `Validation`: a code is longer than `CURRENCY_CODE_MAX_LEN`; nothing
///   is inserted
pub async fn ensure_currencies<S: RecordStore + ?Sized>(
    store: &S,
    codes: &[String],
) -> Result<Vec<Currency>, AppError> {
    let mut wanted: Vec<String> = Vec::new();
    for code in codes {
        let code = code.trim().to_ascii_uppercase();
        if code.is_empty() || wanted.contains(&code) {
            continue;
        }
        if code.chars().count() > CURRENCY_CODE_MAX_LEN {
            return Err(AppError::Validation(format!(
                "Currency code {code:?} is longer than {CURRENCY_CODE_MAX_LEN} characters."
            )));
        }
        wanted.push(code);
    }

    let existing = store.list_currencies().await?;
    let mut inserted = Vec::new();
    for code in wanted {
        if existing.iter().any(|currency| currency.code == code) {
            continue;
        }
        let currency = store.insert_currency(&code).await?;
        tracing::info!(code = %currency, "Currency added");
        inserted.push(currency);
    }

    Ok(inserted)
}
