//! Reconstruction orchestration

mod reconstructor;

pub use reconstructor::PFReconstructor;
