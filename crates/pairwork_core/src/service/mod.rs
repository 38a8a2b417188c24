//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Enforce actor authorization (organizer-only, owner-only) that the
//!   repositories deliberately leave to callers.
//! - Keep UI layers decoupled from storage details.

pub mod meeting_service;
pub mod note_service;
pub mod relationship_service;
