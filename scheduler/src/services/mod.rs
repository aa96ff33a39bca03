//! Service implementations
//!
//! This module contains real implementations of the collaborator traits.
//! These are the production implementations wired up by the binary.

pub mod filing;
pub mod memory_store;
pub mod notifications;

#[cfg(test)]
mod tests;

// Re-export all service implementations
pub use filing::SimulatedFilingClient;
pub use memory_store::{MemoryStore, StoreSnapshot};
pub use notifications::HttpNotificationGateway;
