//! Shared models

mod element;
mod identifier;
mod particle;
mod vector;

pub use element::{Cluster, Layer, Path, PathKind, Track};
pub use identifier::{ElementKind, Identifier, IdentifierFactory, Subtype};
pub use particle::{particle_data, Particle, ParticleData, ParticleKind};
pub use vector::{LorentzVector, Vector3};
