//! Record layer for the banking/chat application.
//!
//! Defines the persisted records (profiles, currencies, transfers, chat
//! messages, IMF verifications, PIN profiles), the rules applied to them
//! before and after they are stored, and the gateway they are stored through.
//!
//! # Architecture
//!
//! - **Database**: PostgreSQL with sqlx, schema from embedded migrations
//! - **Gateway**: `store::RecordStore`, implemented by `store::PgStore`
//! - **Media**: uploads on local disk, avatars shrunk with the `image` crate
//!
//! # Rules
//!
//! - A transfer is only stored if its transaction PIN has exactly 4 digits
//! - After a profile is saved its avatar fits within 300x300 pixels

pub mod config;
pub mod db;
pub mod error;
pub mod media;
pub mod models;
pub mod services;
pub mod store;
