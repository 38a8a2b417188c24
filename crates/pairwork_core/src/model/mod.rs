//! Domain model for the pairwork relationship core.
//!
//! # Responsibility
//! - Define the canonical records shared by repositories and services.
//! - Keep business-invariant validation next to the data it protects.
//!
//! # Invariants
//! - Every record is identified by a stable UUID.
//! - A meeting always names two distinct parties.
//! - A note is a directed annotation: owner about contact, never the
//!   reverse.

pub mod meeting;
pub mod note;
pub mod profile;
