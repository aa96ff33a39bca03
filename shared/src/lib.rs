//! Shared types for the arrival-card filing service
//!
//! Contains the domain records (itineraries, submissions, users), their
//! status state machines, and the logging setup used by the scheduler
//! binary. Engine-internal types (sweep reports, collaborator traits) are
//! kept in the scheduler crate.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;
