//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the catalog, registration lifecycle
//!   and reporting use-cases.
//! - Keep request/transport layers decoupled from storage details.
//! - Emit metadata-only log events for every state change.

pub mod event_service;
pub mod registration_service;
pub mod report_service;
pub mod student_service;
