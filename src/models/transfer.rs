//! Transfer data models.
//!
//! This module defines:
//! - `Transfer`: a persisted transfer record
//! - `NewTransfer`: the insert form, validated before it reaches the store
//! - The three enumerated classifiers stored alongside each transfer

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Number of decimal digits a transaction PIN must have.
pub const TRANSACTION_PIN_DIGITS: u32 = 4;

/// Represents a transfer record from the database.
///
/// # Database Table
///
/// Maps to the `transfers` table. Each transfer:
/// - Belongs to one user (many transfers per user, cascade-deleted with it)
/// - Stores a whole-unit integer amount
/// - Carries a type, a status and a scope, persisted as their literal labels
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Transfer {
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Beneficiary account number (at most 20 characters)
    pub account_number: String,

    /// Beneficiary account holder (at most 250 characters)
    pub holder_name: String,

    pub amount: i32,

    /// Beneficiary bank (at most 100 characters)
    pub bank_name: String,

    pub description: Option<String>,

    /// Set by the database on insert
    pub date_created: DateTime<Utc>,

    /// Must have exactly four decimal digits
    pub transaction_pin: i32,

    pub transfer_date: NaiveDate,

    #[sqlx(try_from = "String")]
    pub transaction_type: TransactionType,

    /// Transfer status
    #[sqlx(try_from = "String")]
    pub transaction_info: TransactionInfo,

    #[sqlx(try_from = "String")]
    pub transaction_scope: TransactionScope,
}

impl Transfer {
    /// Check the record before it is written back to the store.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_transaction_pin(self.transaction_pin)
    }
}

impl fmt::Display for Transfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.bank_name, self.account_number, self.amount)
    }
}

/// A transfer that has not been persisted yet.
///
/// # JSON Example
///
/// ```json
/// {
///   "user_id": "550e8400-e29b-41d4-a716-446655440000",
///   "account_number": "0123456789",
///   "holder_name": "Ada Obi",
///   "amount": 2500,
///   "bank_name": "First Bank",
///   "transaction_pin": 4821,
///   "transaction_scope": "International Transfer"
/// }
/// ```
///
/// Omitted classifiers default to `Debit`, `Pending` and `Local Transfer`;
/// an omitted transfer date defaults to today.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTransfer {
    pub user_id: Uuid,
    pub account_number: String,
    pub holder_name: String,
    pub amount: i32,
    pub bank_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub transaction_pin: i32,
    #[serde(default = "today")]
    pub transfer_date: NaiveDate,
    #[serde(default)]
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub transaction_info: TransactionInfo,
    #[serde(default)]
    pub transaction_scope: TransactionScope,
}

impl NewTransfer {
    /// Reject the transfer unless its PIN has exactly four digits.
    ///
    /// # Errors
    ///
    /// `AppError::Validation` when the PIN is negative or does not have
    /// four decimal digits.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_transaction_pin(self.transaction_pin)
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn validate_transaction_pin(pin: i32) -> Result<(), AppError> {
    // Leading zeros do not survive an integer column, so 0123 counts as 3 digits
    let digits = u32::try_from(pin).ok().map(|pin| pin.checked_ilog10().unwrap_or(0) + 1);
    if digits != Some(TRANSACTION_PIN_DIGITS) {
        return Err(AppError::Validation(
            "Transaction PIN must be exactly 4 digits.".to_string(),
        ));
    }
    Ok(())
}

/// Declares a string-backed classifier whose persisted form is its label.
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident default $default:ident {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                #[doc = $label]
                $variant,
            )+
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl $name {
            /// Every declared value, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The literal stored in the database.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok($name::$variant),)+
                    other => Err(AppError::Validation(format!(
                        "{:?} is not a valid {}",
                        other,
                        stringify!($name)
                    ))),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = AppError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

labelled_enum! {
    /// Direction of a transfer.
    TransactionType default Debit {
        Debit => "Debit",
        Credit => "Credit",
    }
}

labelled_enum! {
    /// Processing status of a transfer.
    TransactionInfo default Pending {
        Pending => "Pending",
        Completed => "Completed",
    }
}

labelled_enum! {
    /// Where the money is going.
    TransactionScope default Local {
        International => "International Transfer",
        Local => "Local Transfer",
        Check => "Check Deposite",
    }
}
