/*
 * PAPAS Reco - Particle-Flow Reconstruction Core
 *
 * Feature-First Architecture:
 * - shared/      : Identifiers, detector elements, particles, kinematics
 * - features/    : block_graph → block_splitting → reconstruction, plus history
 * - pipeline/    : Event input, per-event state, batch execution
 * - config/      : Resolution model and run settings (YAML v1)
 *
 * Performance:
 * - Events are independent and run on the rayon pool
 * - Per-block work is linear in block size
 */

// Crate-level lint configuration
#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and ports
pub mod shared;

/// Feature modules (block graph, splitting, history, reconstruction)
pub mod features;

/// Event input and batch orchestration
pub mod pipeline;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{ReconstructionConfig, Validatable};
pub use errors::{PapasError, Result};
pub use features::block_graph::{Block, Edge, EdgeKey, EdgeKind, ElementStore};
pub use features::block_splitting::{BlockSplitter, TopologyNormalizer};
pub use features::history::{Direction, HistoryGraph};
pub use features::reconstruction::{PFReconstructor, ReconstructionOutput, UnhandledTopology};
pub use pipeline::{reconstruct_events, EventInput, PapasEvent};
pub use shared::models::{
    Cluster, ElementKind, Identifier, Layer, Particle, ParticleKind, Subtype, Track, Vector3,
};
