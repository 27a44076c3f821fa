//! Reconstructed particle candidates and the particle data table

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use super::element::{Layer, Path};
use super::identifier::Identifier;
use super::vector::{LorentzVector, Vector3};
use crate::errors::{PapasError, Result};
use crate::shared::constants::{mass, pdg};

/// Rest mass and electric charge for a particle type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleData {
    pub mass: f64,
    pub charge: i32,
}

static PARTICLE_TABLE: Lazy<HashMap<i32, ParticleData>> = Lazy::new(|| {
    let mut table = HashMap::new();
    table.insert(
        pdg::PHOTON,
        ParticleData {
            mass: mass::PHOTON,
            charge: 0,
        },
    );
    table.insert(
        pdg::K0_LONG,
        ParticleData {
            mass: mass::K0_LONG,
            charge: 0,
        },
    );
    table.insert(
        pdg::PION,
        ParticleData {
            mass: mass::CHARGED_PION,
            charge: 1,
        },
    );
    table.insert(
        -pdg::PION,
        ParticleData {
            mass: mass::CHARGED_PION,
            charge: -1,
        },
    );
    table
});

/// Look up mass and charge by particle type code
pub fn particle_data(pdgid: i32) -> Result<ParticleData> {
    PARTICLE_TABLE
        .get(&pdgid)
        .copied()
        .ok_or(PapasError::UnknownParticleType(pdgid))
}

/// Reconstructed particle category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleKind {
    Photon,
    NeutralHadron,
    ChargedHadron,
    Other,
}

impl ParticleKind {
    pub fn from_pdgid(pdgid: i32) -> Self {
        match pdgid.abs() {
            pdg::PHOTON => Self::Photon,
            pdg::K0_LONG => Self::NeutralHadron,
            pdg::PION => Self::ChargedHadron,
            _ => Self::Other,
        }
    }
}

/// Particle candidate
///
/// Built only by the particle builders; path and clusters are annotated right
/// after construction and never touched again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub id: Identifier,
    pub p4: LorentzVector,
    pub vertex: Vector3,
    pub charge: i32,
    pub pdgid: i32,
    pub path: Option<Path>,
    /// Contributing clusters per layer
    #[serde(default)]
    pub clusters: BTreeMap<Layer, Vec<Identifier>>,
}

impl Particle {
    pub fn new(id: Identifier, p4: LorentzVector, vertex: Vector3, charge: i32, pdgid: i32) -> Self {
        Self {
            id,
            p4,
            vertex,
            charge,
            pdgid,
            path: None,
            clusters: BTreeMap::new(),
        }
    }

    pub fn kind(&self) -> ParticleKind {
        ParticleKind::from_pdgid(self.pdgid)
    }

    pub fn energy(&self) -> f64 {
        self.p4.e
    }
}

impl fmt::Display for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>8} pdgid={:5} e={:7.2} pt={:7.2} theta={:5.2} phi={:5.2} m={:5.2} q={:+}",
            self.id.to_string(),
            self.pdgid,
            self.p4.e,
            self.p4.pt(),
            std::f64::consts::FRAC_PI_2 - self.p4.theta(),
            self.p4.phi(),
            self.p4.mass(),
            self.charge
        )
    }
}
