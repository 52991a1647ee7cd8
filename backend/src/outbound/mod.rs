//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed order and item repositories using
//!   Diesel.
//!
//! Adapters translate between domain types and storage representations and
//! hold no business logic.

pub mod persistence;
