//! Services module
//!
//! This module contains the persistence seam used by the dialog

pub mod persistence;

// Re-export commonly used services
pub use persistence::{Durability, DurableWriter, PersistenceGateway, RetryPolicy};
