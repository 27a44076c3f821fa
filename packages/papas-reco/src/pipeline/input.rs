//! Serialized event input
//!
//! JSON shape handed over by the upstream event and block builder:
//!
//! ```json
//! {
//!   "tracks": [{"id": "st1", "p3": {"x": 10, "y": 0, "z": 0}, "charge": 1,
//!               "path": {"kind": "helix", "vertex": {"x": 0, "y": 0, "z": 0}}}],
//!   "ecal_clusters": [],
//!   "hcal_clusters": [{"id": "mh1", "energy": 20, "position": {"x": 1, "y": 0, "z": 0},
//!                      "layer": "hcal_in"}],
//!   "blocks": [{"element_ids": ["st1", "mh1"],
//!               "edges": [{"id1": "st1", "id2": "mh1", "distance": 0.1}]}]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use super::event::PapasEvent;
use crate::errors::{PapasError, Result};
use crate::features::block_graph::{Block, Edge, ElementStore};
use crate::shared::models::{Cluster, ElementKind, Identifier, Subtype, Track};
use crate::shared::ports::ElementResolver;

/// Edge as supplied; the edge type is inferred from its ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeInput {
    pub id1: Identifier,
    pub id2: Identifier,
    pub distance: f64,
    #[serde(default = "default_linked")]
    pub linked: bool,
}

fn default_linked() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockInput {
    /// Allocated by the factory when absent
    #[serde(default)]
    pub id: Option<Identifier>,
    pub element_ids: Vec<Identifier>,
    #[serde(default)]
    pub edges: Vec<EdgeInput>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventInput {
    #[serde(default)]
    pub tracks: Vec<Track>,
    #[serde(default)]
    pub ecal_clusters: Vec<Cluster>,
    #[serde(default)]
    pub hcal_clusters: Vec<Cluster>,
    #[serde(default)]
    pub blocks: Vec<BlockInput>,
}

impl EventInput {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// One event object or an array of them
    pub fn many_from_json(json: &str) -> Result<Vec<Self>> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if value.is_array() {
            Ok(serde_json::from_value(value)?)
        } else {
            Ok(vec![serde_json::from_value(value)?])
        }
    }

    pub fn many_from_json_file(path: impl AsRef<Path>) -> Result<Vec<Self>> {
        let content = std::fs::read_to_string(path)?;
        Self::many_from_json(&content)
    }
}

impl PapasEvent {
    /// Validate the input and build the event
    ///
    /// Every element id must have the kind of the collection it sits in, and
    /// every block member must be present in exactly one block. Edges to ids
    /// outside their block are dropped by the block itself.
    pub fn from_input(input: EventInput, record_history: bool) -> Result<Self> {
        let mut elements = ElementStore::new();
        for track in input.tracks {
            if !track.id.is_track() {
                return Err(PapasError::UnknownElement(track.id));
            }
            elements.add_track(track);
        }
        for cluster in input.ecal_clusters {
            if !cluster.id.is_ecal() {
                return Err(PapasError::UnknownElement(cluster.id));
            }
            elements.add_cluster(cluster);
        }
        for cluster in input.hcal_clusters {
            if !cluster.id.is_hcal() {
                return Err(PapasError::UnknownElement(cluster.id));
            }
            elements.add_cluster(cluster);
        }

        let mut event = PapasEvent::new(elements);
        if !record_history {
            event = event.without_history();
        }
        for block in &input.blocks {
            if let Some(id) = block.id {
                if id.kind() != ElementKind::Block {
                    return Err(PapasError::InvalidIdentifier(id.to_string()));
                }
                event.ids.observe(id);
            }
        }

        let mut claimed: BTreeSet<Identifier> = BTreeSet::new();
        for block in input.blocks {
            if let Some(missing) = block.element_ids.iter().find(|id| !event.elements.contains(**id)) {
                return Err(PapasError::UnknownElement(*missing));
            }
            let edges = block
                .edges
                .iter()
                .map(|e| Edge::new(e.id1, e.id2, e.distance, e.linked))
                .collect::<Result<Vec<_>>>()?;
            let id = match block.id {
                Some(id) => id,
                None => event.ids.next(ElementKind::Block, Subtype::Reconstructed),
            };
            let members: BTreeSet<Identifier> = block.element_ids.iter().copied().collect();
            if let Some(shared) = members.iter().find(|m| claimed.contains(*m)) {
                return Err(PapasError::contract(
                    id,
                    format!("{shared} already belongs to another block"),
                ));
            }
            claimed.extend(members);
            event.insert_block(Block::new(id, block.element_ids, edges));
        }
        Ok(event)
    }
}
