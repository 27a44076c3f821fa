//! Typed, weighted links between detector elements

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{PapasError, Result};
use crate::shared::models::{ElementKind, Identifier};

/// Edge type, fixed by the kinds of its two ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    HcalTrack,
    EcalTrack,
    EcalHcal,
    HcalHcal,
    EcalEcal,
    TrackTrack,
}

impl EdgeKind {
    /// Edge type for a pair of element kinds (order-insensitive)
    pub fn between(a: ElementKind, b: ElementKind) -> Option<Self> {
        use ElementKind::*;
        match (a, b) {
            (HcalCluster, Track) | (Track, HcalCluster) => Some(Self::HcalTrack),
            (EcalCluster, Track) | (Track, EcalCluster) => Some(Self::EcalTrack),
            (EcalCluster, HcalCluster) | (HcalCluster, EcalCluster) => Some(Self::EcalHcal),
            (HcalCluster, HcalCluster) => Some(Self::HcalHcal),
            (EcalCluster, EcalCluster) => Some(Self::EcalEcal),
            (Track, Track) => Some(Self::TrackTrack),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HcalTrack => "hcal_track",
            Self::EcalTrack => "ecal_track",
            Self::EcalHcal => "ecal_hcal",
            Self::HcalHcal => "hcal_hcal",
            Self::EcalEcal => "ecal_ecal",
            Self::TrackTrack => "track_track",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Order-independent key of an element pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeKey(Identifier, Identifier);

impl EdgeKey {
    pub fn new(a: Identifier, b: Identifier) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    /// The end that is not `id`
    pub fn other(&self, id: Identifier) -> Option<Identifier> {
        if self.0 == id {
            Some(self.1)
        } else if self.1 == id {
            Some(self.0)
        } else {
            None
        }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.0, self.1)
    }
}

/// Undirected edge with a distance weight
///
/// Only edges with `linked == true` connect elements; unlinked pairs keep
/// their distance for inspection. Built through [`Edge::new`] only, so `kind`
/// always matches the two ends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub id1: Identifier,
    pub id2: Identifier,
    pub kind: EdgeKind,
    pub distance: f64,
    pub linked: bool,
}

impl Edge {
    /// Create an edge, deriving its kind from the two identifiers
    pub fn new(id1: Identifier, id2: Identifier, distance: f64, linked: bool) -> Result<Self> {
        let kind = EdgeKind::between(id1.kind(), id2.kind())
            .ok_or(PapasError::InvalidEdge { id1, id2 })?;
        Ok(Self {
            id1,
            id2,
            kind,
            distance,
            linked,
        })
    }

    /// Linked edge shorthand
    pub fn linked(id1: Identifier, id2: Identifier, distance: f64) -> Result<Self> {
        Self::new(id1, id2, distance, true)
    }

    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.id1, self.id2)
    }

    pub fn other(&self, id: Identifier) -> Option<Identifier> {
        self.key().other(id)
    }
}
