//! Topology Normalizer
//!
//! Finds the edges that must go so that every track links to at most one
//! hcal cluster (the closest), and no ecal-hcal link survives. An ecal linked
//! to an hcal ends up as a photon either way, so that link would only merge
//! unrelated elements.

use std::collections::BTreeSet;

use crate::features::block_graph::{Block, EdgeKey, EdgeKind};
use crate::shared::models::ElementKind;

pub struct TopologyNormalizer;

impl TopologyNormalizer {
    /// Edges to remove from `block`; empty when the block already conforms
    pub fn edges_to_unlink(block: &Block) -> Vec<EdgeKey> {
        if block.len() <= 1 {
            return Vec::new();
        }

        let mut unlink = BTreeSet::new();
        for &id in block.element_ids() {
            match id.kind() {
                ElementKind::Track => {
                    // closest hcal stays
                    unlink.extend(
                        block
                            .linked_edges(id, EdgeKind::HcalTrack)
                            .into_iter()
                            .skip(1)
                            .map(|e| e.key()),
                    );
                }
                ElementKind::EcalCluster => {
                    unlink.extend(
                        block
                            .linked_edges(id, EdgeKind::EcalHcal)
                            .into_iter()
                            .map(|e| e.key()),
                    );
                }
                ElementKind::HcalCluster | ElementKind::Particle | ElementKind::Block => {}
            }
        }
        unlink.into_iter().collect()
    }

    /// True when no track has two hcal links and no ecal-hcal link exists
    pub fn is_normalized(block: &Block) -> bool {
        block.ids_of(ElementKind::Track).all(|t| {
            block.linked_edges(t, EdgeKind::HcalTrack).len() <= 1
        }) && !block.edges().any(|e| e.linked && e.kind == EdgeKind::EcalHcal)
    }
}
