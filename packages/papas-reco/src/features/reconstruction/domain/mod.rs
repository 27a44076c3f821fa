//! Reconstruction domain types

mod locks;
mod output;
mod resolution;

pub use locks::LockMap;
pub use output::{BlockOutcome, ReconstructionOutput, UnhandledReason, UnhandledTopology};
pub use resolution::HcalResolutionModel;
