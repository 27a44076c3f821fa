//! Detector elements: tracks and calorimeter clusters

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::identifier::{ElementKind, Identifier};
use super::vector::{LorentzVector, Vector3};
use crate::errors::{PapasError, Result};

/// Detector layer / surface a path point or cluster belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Tracker,
    EcalIn,
    EcalOut,
    HcalIn,
    HcalOut,
}

impl Layer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tracker => "tracker",
            Self::EcalIn => "ecal_in",
            Self::EcalOut => "ecal_out",
            Self::HcalIn => "hcal_in",
            Self::HcalOut => "hcal_out",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Layer {
    type Err = PapasError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tracker" => Ok(Self::Tracker),
            "ecal_in" => Ok(Self::EcalIn),
            "ecal_out" => Ok(Self::EcalOut),
            "hcal_in" => Ok(Self::HcalIn),
            "hcal_out" => Ok(Self::HcalOut),
            other => Err(PapasError::InvalidLayer {
                layer: other.to_string(),
            }),
        }
    }
}

/// Trajectory shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathKind {
    StraightLine,
    Helix,
}

/// Trajectory: a vertex plus the points where it crosses detector layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub kind: PathKind,
    pub vertex: Vector3,
    #[serde(default)]
    pub points: BTreeMap<Layer, Vector3>,
}

impl Path {
    pub fn straight_line(vertex: Vector3) -> Self {
        Self {
            kind: PathKind::StraightLine,
            vertex,
            points: BTreeMap::new(),
        }
    }

    pub fn helix(vertex: Vector3) -> Self {
        Self {
            kind: PathKind::Helix,
            vertex,
            points: BTreeMap::new(),
        }
    }

    pub fn with_point(mut self, layer: Layer, point: Vector3) -> Self {
        self.points.insert(layer, point);
        self
    }
}

/// Reconstructed charged-particle trajectory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: Identifier,
    pub p3: Vector3,
    pub charge: i32,
    pub path: Path,
}

impl Track {
    pub fn new(id: Identifier, p3: Vector3, charge: i32, path: Path) -> Self {
        Self {
            id,
            p3,
            charge,
            path,
        }
    }

    /// Energy under a fixed mass hypothesis
    pub fn energy_for_mass(&self, mass: f64) -> f64 {
        LorentzVector::from_momentum_and_mass(self.p3, mass).e
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>8} p={:7.2} pt={:7.2} theta={:5.2} phi={:5.2} q={:+}",
            self.id.to_string(),
            self.p3.mag(),
            self.p3.perp(),
            std::f64::consts::FRAC_PI_2 - self.p3.theta(),
            self.p3.phi(),
            self.charge
        )
    }
}

/// Calorimeter energy deposit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: Identifier,
    pub energy: f64,
    pub position: Vector3,
    pub layer: Layer,
}

impl Cluster {
    pub fn new(id: Identifier, energy: f64, position: Vector3, layer: Layer) -> Self {
        Self {
            id,
            energy,
            position,
            layer,
        }
    }

    /// Layer implied by the identifier kind
    pub fn layer_for(kind: ElementKind) -> Option<Layer> {
        match kind {
            ElementKind::EcalCluster => Some(Layer::EcalIn),
            ElementKind::HcalCluster => Some(Layer::HcalIn),
            _ => None,
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>8} {:>8} e={:7.2} theta={:5.2} phi={:5.2}",
            self.id.to_string(),
            self.layer.as_str(),
            self.energy,
            std::f64::consts::FRAC_PI_2 - self.position.theta(),
            self.position.phi()
        )
    }
}
