//! Shared module - Common types and utilities
//!
//! Types shared across all features: identifiers, detector elements,
//! particles, kinematics and the element lookup port.

pub mod constants;
pub mod models;
pub mod ports;

// Re-exports for convenience
pub use models::*;
pub use ports::{ElementRef, ElementResolver};
