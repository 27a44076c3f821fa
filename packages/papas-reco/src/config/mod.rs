//! Configuration System
//!
//! - [`ReconstructionConfig`]: hcal resolution model, history recording and
//!   event-level parallelism
//! - YAML schema v1 (`version: 1`) with range validation on load
//!
//! # Examples
//!
//! ```rust,ignore
//! use papas_reco::config::ReconstructionConfig;
//!
//! let config = ReconstructionConfig::default().with_history(false);
//! let config = ReconstructionConfig::from_yaml_file("reco.yaml")?;
//! ```

pub mod error;
pub mod reco_config;
pub mod validation;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use reco_config::{HcalResolutionConfig, ReconstructionConfig, ResolutionTerms};
pub use validation::Validatable;
