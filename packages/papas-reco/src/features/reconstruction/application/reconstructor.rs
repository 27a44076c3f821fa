//! Particle-flow reconstructor
//!
//! Two passes over an event:
//!
//! 1. Normalization: every original block is checked by the
//!    [`TopologyNormalizer`]; offending edges are removed and the block is
//!    split, the parts joining the working collection.
//! 2. Reconstruction: every active block is reconstructed on its own, with a
//!    fresh lock map. Elements still unlocked afterwards are reported unused.

use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::config::ReconstructionConfig;
use crate::errors::{PapasError, Result};
use crate::features::block_graph::{Block, EdgeKind};
use crate::features::block_splitting::{BlockSplitter, TopologyNormalizer};
use crate::features::history::HistoryGraph;
use crate::features::reconstruction::domain::{
    BlockOutcome, HcalResolutionModel, LockMap, ReconstructionOutput, UnhandledReason,
    UnhandledTopology,
};
use crate::features::reconstruction::infrastructure::{EnergyBalance, ParticleBuilder};
use crate::pipeline::PapasEvent;
use crate::shared::models::{ElementKind, Identifier, IdentifierFactory, Layer, Particle};
use crate::shared::ports::ElementResolver;

#[derive(Debug, Clone)]
pub struct PFReconstructor {
    model: HcalResolutionModel,
    record_history: bool,
}

impl PFReconstructor {
    pub fn new(config: &ReconstructionConfig) -> Self {
        Self {
            model: HcalResolutionModel::new(config.hcal_resolution.clone()),
            record_history: config.record_history,
        }
    }

    /// Reconstruct one event in place
    ///
    /// Split blocks and deactivated originals stay in `event.blocks`; the
    /// event's history graph, if any, gains the split and particle links.
    pub fn reconstruct(&self, event: &mut PapasEvent) -> Result<ReconstructionOutput> {
        let history = if self.record_history {
            event.history.as_mut()
        } else {
            None
        };
        self.reconstruct_blocks(&event.elements, &mut event.blocks, history, &mut event.ids)
    }

    pub fn reconstruct_blocks(
        &self,
        elements: &dyn ElementResolver,
        blocks: &mut BTreeMap<Identifier, Block>,
        mut history: Option<&mut HistoryGraph>,
        ids: &mut IdentifierFactory,
    ) -> Result<ReconstructionOutput> {
        let mut output = ReconstructionOutput {
            split_blocks: Self::normalize(blocks, history.as_deref_mut()),
            ..Default::default()
        };

        for block in blocks.values().filter(|b| b.is_active()) {
            let outcome = self.reconstruct_block(block, elements, history.as_deref_mut(), ids)?;
            if let Some(unhandled) = &outcome.unhandled {
                warn!("Unhandled topology: {}", unhandled);
            }
            output.absorb(outcome);
        }

        if !output.unused.is_empty() {
            warn!(
                "{} unused elements: {}",
                output.unused.len(),
                output
                    .unused
                    .iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        info!(
            "Reconstructed {} particles from {} active blocks ({} split, {} unused)",
            output.particles.len(),
            blocks.values().filter(|b| b.is_active()).count(),
            output.split_blocks,
            output.unused.len()
        );
        Ok(output)
    }

    /// Normalization pass; returns how many original blocks were split
    fn normalize(
        blocks: &mut BTreeMap<Identifier, Block>,
        mut history: Option<&mut HistoryGraph>,
    ) -> usize {
        let originals: Vec<Identifier> = blocks
            .iter()
            .filter(|(_, b)| b.is_active())
            .map(|(id, _)| *id)
            .collect();

        let mut created = BTreeMap::new();
        let mut split = 0;
        for id in originals {
            let Some(block) = blocks.get_mut(&id) else {
                continue;
            };
            let unlink = TopologyNormalizer::edges_to_unlink(block);
            if let Some(parts) = BlockSplitter::split(block, &unlink, history.as_deref_mut()) {
                split += 1;
                created.extend(parts);
            }
        }
        blocks.extend(created);
        split
    }

    /// Apply the per-shape rules to one active block
    pub fn reconstruct_block(
        &self,
        block: &Block,
        elements: &dyn ElementResolver,
        history: Option<&mut HistoryGraph>,
        ids: &mut IdentifierFactory,
    ) -> Result<BlockOutcome> {
        let mut locks = LockMap::new(block.element_ids());
        let mut builder = ParticleBuilder::new(&mut locks, history, ids);

        let (particles, unhandled) = match block.element_ids() {
            [] => (Vec::new(), None),
            [single] => (self.single_element(block, *single, elements, &mut builder)?, None),
            _ if block.ids_of(ElementKind::EcalCluster).count() == block.len() => (
                Vec::new(),
                Some(UnhandledTopology {
                    block: block.id(),
                    reason: UnhandledReason::EcalOnlyBlock,
                    element_ids: block.element_ids().to_vec(),
                }),
            ),
            _ => self.multi_element(block, elements, &mut builder)?,
        };
        drop(builder);

        debug!(
            "Block {} ({}): {} particles",
            block.id(),
            block.short_name(),
            particles.len()
        );
        Ok(BlockOutcome {
            particles,
            unused: locks.unlocked(),
            unhandled,
        })
    }

    fn single_element(
        &self,
        block: &Block,
        id: Identifier,
        elements: &dyn ElementResolver,
        builder: &mut ParticleBuilder<'_>,
    ) -> Result<Vec<Particle>> {
        let particle = match id.kind() {
            ElementKind::EcalCluster => {
                builder.build_from_cluster(elements.cluster(id)?, Layer::EcalIn, None, None)?
            }
            ElementKind::HcalCluster => {
                builder.build_from_cluster(elements.cluster(id)?, Layer::HcalIn, None, None)?
            }
            ElementKind::Track => Some(builder.build_from_track(elements.track(id)?, &[])?),
            ElementKind::Particle | ElementKind::Block => {
                return Err(PapasError::contract(
                    block.id(),
                    format!("{id} is not a detector element"),
                ))
            }
        };
        Ok(particle.into_iter().collect())
    }

    /// Hcals first (energy balance), then the tracks no hcal claimed
    fn multi_element(
        &self,
        block: &Block,
        elements: &dyn ElementResolver,
        builder: &mut ParticleBuilder<'_>,
    ) -> Result<(Vec<Particle>, Option<UnhandledTopology>)> {
        let mut particles = Vec::new();

        let balance = EnergyBalance::new(&self.model);
        for hcal_id in block.ids_of(ElementKind::HcalCluster) {
            particles.extend(balance.reconstruct_hcal(block, hcal_id, elements, builder)?);
        }

        for track_id in block.ids_of(ElementKind::Track) {
            if builder.is_locked(track_id) {
                continue;
            }
            particles.push(builder.build_from_track(elements.track(track_id)?, &[])?);
            // linked ecals are absorbed without a photon
            for ecal_id in block.linked_ids(track_id, EdgeKind::EcalTrack) {
                builder.lock(ecal_id);
            }
        }

        let stray_ecals: Vec<Identifier> = block
            .ids_of(ElementKind::EcalCluster)
            .filter(|id| !builder.is_locked(*id))
            .collect();
        let unhandled = (!stray_ecals.is_empty()).then(|| UnhandledTopology {
            block: block.id(),
            reason: UnhandledReason::UnlinkedEcal,
            element_ids: stray_ecals,
        });
        Ok((particles, unhandled))
    }
}

impl Default for PFReconstructor {
    fn default() -> Self {
        Self::new(&ReconstructionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::block_graph::{Edge, ElementStore};
    use crate::shared::models::{Cluster, ParticleKind, Path, Subtype, Track, Vector3};

    fn tid(i: u64) -> Identifier {
        Identifier::new(ElementKind::Track, Subtype::Smeared, i)
    }

    fn eid(i: u64) -> Identifier {
        Identifier::new(ElementKind::EcalCluster, Subtype::Merged, i)
    }

    fn hid(i: u64) -> Identifier {
        Identifier::new(ElementKind::HcalCluster, Subtype::Merged, i)
    }

    fn bid(i: u64) -> Identifier {
        Identifier::new(ElementKind::Block, Subtype::Reconstructed, i)
    }

    fn store() -> ElementStore {
        let mut store = ElementStore::new();
        for i in 1..=3 {
            store.add_track(Track::new(
                tid(i),
                Vector3::new(10.0, i as f64, 0.0),
                1,
                Path::helix(Vector3::origin()),
            ));
            store.add_cluster(Cluster::new(eid(i), 2.0, Vector3::new(1.0, 0.0, 0.1), Layer::EcalIn));
            store.add_cluster(Cluster::new(hid(i), 10.0, Vector3::new(1.0, 0.0, 0.1), Layer::HcalIn));
        }
        store
    }

    fn run(blocks: Vec<Block>) -> (ReconstructionOutput, BTreeMap<Identifier, Block>, HistoryGraph) {
        let store = store();
        let mut map: BTreeMap<Identifier, Block> = blocks.into_iter().map(|b| (b.id(), b)).collect();
        let mut history = HistoryGraph::new();
        let mut ids = IdentifierFactory::new();
        let output = PFReconstructor::default()
            .reconstruct_blocks(&store, &mut map, Some(&mut history), &mut ids)
            .unwrap();
        (output, map, history)
    }

    #[test]
    fn test_track_with_ecal_locks_ecal_without_photon() {
        let block = Block::new(
            bid(1),
            vec![tid(1), eid(1)],
            vec![Edge::linked(tid(1), eid(1), 0.1).unwrap()],
        );
        let (output, _, _) = run(vec![block]);
        assert_eq!(output.particles.len(), 1);
        assert_eq!(output.count(ParticleKind::ChargedHadron), 1);
        assert!(output.unused.is_empty());
        assert!(output.unhandled.is_empty());
    }

    #[test]
    fn test_ecal_only_block_is_reported() {
        let block = Block::new(
            bid(1),
            vec![eid(1), eid(2)],
            vec![Edge::linked(eid(1), eid(2), 0.1).unwrap()],
        );
        let (output, _, _) = run(vec![block]);
        assert!(output.particles.is_empty());
        assert_eq!(output.unused, vec![eid(1), eid(2)]);
        assert_eq!(output.unhandled.len(), 1);
        assert_eq!(output.unhandled[0].reason, UnhandledReason::EcalOnlyBlock);
    }

    #[test]
    fn test_ecal_behind_ecal_is_reported() {
        let block = Block::new(
            bid(1),
            vec![tid(1), eid(1), eid(2)],
            vec![
                Edge::linked(tid(1), eid(1), 0.1).unwrap(),
                Edge::linked(eid(1), eid(2), 0.1).unwrap(),
            ],
        );
        let (output, _, _) = run(vec![block]);
        assert_eq!(output.particles.len(), 1);
        assert_eq!(output.unused, vec![eid(2)]);
        assert_eq!(output.unhandled[0].reason, UnhandledReason::UnlinkedEcal);
        assert_eq!(output.unhandled[0].element_ids, vec![eid(2)]);
    }

    #[test]
    fn test_split_block_is_replaced() {
        // t1 reaches h1 (close) and h2 (far); the far link is dropped
        let block = Block::new(
            bid(1),
            vec![tid(1), hid(1), hid(2)],
            vec![
                Edge::linked(tid(1), hid(1), 0.1).unwrap(),
                Edge::linked(tid(1), hid(2), 0.5).unwrap(),
            ],
        );
        let (output, blocks, history) = run(vec![block]);
        assert_eq!(output.split_blocks, 1);
        assert!(!blocks[&bid(1)].is_active());
        assert_eq!(blocks.values().filter(|b| b.is_active()).count(), 2);
        assert!(output.unused.is_empty());
        assert_eq!(output.count(ParticleKind::ChargedHadron), 1);
        assert_eq!(output.count(ParticleKind::NeutralHadron), 1);
        assert!(history.is_acyclic());
        assert_eq!(history.children(bid(1)).len(), 2);
    }

    #[test]
    fn test_history_disabled() {
        let store = store();
        let block = Block::new(bid(1), vec![tid(1)], vec![]);
        let mut event = PapasEvent::new(store);
        event.insert_block(block);
        let config = ReconstructionConfig::default().with_history(false);
        let output = PFReconstructor::new(&config).reconstruct(&mut event).unwrap();
        assert_eq!(output.particles.len(), 1);
        let history = event.history.as_ref().unwrap();
        assert!(history.ids().all(|id| id.kind() != ElementKind::Particle));
        assert!(!history.contains(output.particles[0].id));
    }

    #[test]
    fn test_particle_node_in_history() {
        let block = Block::new(bid(1), vec![hid(1)], vec![]);
        let (output, _, history) = run(vec![block]);
        let particle = &output.particles[0];
        assert_eq!(history.parents(particle.id), vec![hid(1)]);
    }
}
