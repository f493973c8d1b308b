//! Error types shared by the record layer.
//!
//! Validation failures are the only domain error; everything else wraps an
//! infrastructure failure from the database, the migration runner, the image
//! codecs or the filesystem.

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Validation Errors**: record data rejected before persistence
/// - **Resource Errors**: a referenced record does not exist
/// - **Database Errors**: any sqlx::Error from store operations
/// - **Media Errors**: image decoding/encoding or file I/O failures
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Record data failed validation and was not persisted.
    ///
    /// The String is the human-readable reason, e.g.
    /// "Transaction PIN must be exactly 4 digits."
    #[error("Validation error: {0}")]
    Validation(String),

    /// The named record does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Database operation failed (e.g., connection error, constraint violation).
    ///
    /// Column length limits surface here, not as validation errors.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Stored image could not be decoded or re-encoded.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Media file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Stable machine-readable code for the error variant.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation_error",
            AppError::NotFound(_) => "not_found",
            AppError::Database(_) | AppError::Migration(_) => "internal_error",
            AppError::Image(_) | AppError::Io(_) => "media_error",
        }
    }
}
