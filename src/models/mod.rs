//! Data models representing database entities.
//!
//! This module contains all data structures that map to database tables.

/// Chat messages between a user and the bank
pub mod chat;
/// Currency codes
pub mod currency;
/// IMF verification codes
pub mod imf_verification;
/// Banking profile (balance, avatar, PIN)
pub mod profile;
/// Outgoing and incoming transfers
pub mod transfer;
/// Owning user rows
pub mod user;
/// Short PIN code profile
pub mod user_profile;
