//! Business logic services.
//!
//! Services combine validation, persistence and media handling. They take
//! any `RecordStore`, so the same code runs against PostgreSQL and the
//! in-memory test store.

pub mod chat_service;
pub mod currency_service;
pub mod profile_service;
pub mod transfer_service;
pub mod verification_service;
