//! Error types for papas-reco
//!
//! Provides unified error handling across the crate.
//!
//! Only upstream contract failures are errors. A cluster whose energy is below
//! the rest mass of the hypothesised particle is a legitimate outcome and is
//! reported as `Ok(None)` by the builders.

use thiserror::Error;

use crate::config::ConfigError;
use crate::shared::models::Identifier;

/// Main error type for reconstruction operations
#[derive(Debug, Error)]
pub enum PapasError {
    /// Cluster builder called with a layer other than `ecal_in` / `hcal_in`
    #[error("Invalid layer '{layer}': must be ecal_in or hcal_in")]
    InvalidLayer { layer: String },

    /// Graph handed over by the block builder breaks a reconstruction invariant
    #[error("Contract violation in block {block}: {message}")]
    ContractViolation { block: Identifier, message: String },

    /// Block references an element absent from the element store
    #[error("Unknown element: {0}")]
    UnknownElement(Identifier),

    /// Particle data table has no entry for this code
    #[error("Unknown particle type: pdgid {0}")]
    UnknownParticleType(i32),

    /// Edge joins identifiers that are not detector elements
    #[error("Invalid edge between {id1} and {id2}")]
    InvalidEdge { id1: Identifier, id2: Identifier },

    /// Textual identifier could not be parsed
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PapasError {
    /// Create a contract violation for a block
    pub fn contract(block: Identifier, message: impl Into<String>) -> Self {
        PapasError::ContractViolation {
            block,
            message: message.into(),
        }
    }

    /// True for errors that indicate an upstream graph-construction bug
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            PapasError::ContractViolation { .. } | PapasError::InvalidLayer { .. }
        )
    }
}

/// Result type alias for reconstruction operations
pub type Result<T> = std::result::Result<T, PapasError>;
