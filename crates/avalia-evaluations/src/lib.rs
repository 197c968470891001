//! avalia-evaluations
//!
//! The evaluation engine: protocol catalog, copy-on-link snapshotting,
//! response recording, and the evaluation lifecycle. Every operation takes
//! an explicit [`avalia_core::doc_keys::TenantScope`] next to the store
//! handle — there is no ambient tenant anywhere in this crate.

pub mod catalog;
pub mod error;
pub mod lifecycle;
pub mod patients;
pub mod responses;
pub mod snapshot;

pub use error::EvaluationError;
