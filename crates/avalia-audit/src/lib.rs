//! avalia-audit
//!
//! Structured audit events for mutating operations on clinical records.

pub mod events;

pub use events::AuditEvent;
