//! Domain model for college events, students and registrations.
//!
//! # Responsibility
//! - Define the records persisted by the storage engine and their write-side
//!   inputs.
//! - Own field-level validation that must pass before any write.
//!
//! # Invariants
//! - Ids are store-generated surrogate integers and never reused.
//! - Serialized field names match the JSON payloads consumed by clients.

pub mod event;
pub mod registration;
pub mod report;
pub mod student;
pub mod validation;
