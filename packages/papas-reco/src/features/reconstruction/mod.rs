//! Particle-Flow Reconstruction
//!
//! Turns normalized blocks into particle candidates:
//! - single element: track → charged hadron, hcal → neutral hadron,
//!   ecal → photon
//! - hcal with tracks: charged hadron per track, energy balance decides on an
//!   extra neutral hadron and/or photon
//! - hcal without tracks: neutral hadron
//! - leftover tracks: charged hadron, linked ecals absorbed
//! - ecal-only blocks and unreachable ecals: reported as unhandled
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ Application Layer                       │
//! │  - PFReconstructor (two-pass driver)    │
//! └─────────────────────────────────────────┘
//!                   │
//!                   ▼
//! ┌─────────────────────────────────────────┐
//! │ Infrastructure Layer                    │
//! │  - EnergyBalance (per hcal)             │
//! │  - ParticleBuilder (cluster / track)    │
//! └─────────────────────────────────────────┘
//!                   │
//!                   ▼
//! ┌─────────────────────────────────────────┐
//! │ Domain Layer                            │
//! │  - LockMap, HcalResolutionModel         │
//! │  - ReconstructionOutput, Unhandled...   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use papas_reco::features::reconstruction::PFReconstructor;
//!
//! let reconstructor = PFReconstructor::new(&config);
//! let output = reconstructor.reconstruct(&mut event)?;
//! println!("{output}");
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::PFReconstructor;
pub use domain::{
    BlockOutcome, HcalResolutionModel, LockMap, ReconstructionOutput, UnhandledReason,
    UnhandledTopology,
};
pub use infrastructure::{track_energy, EnergyBalance, ParticleBuilder};
