//! Domain assertions

use std::collections::BTreeSet;

use papas_reco::features::block_graph::Block;
use papas_reco::features::block_splitting::TopologyNormalizer;
use papas_reco::features::history::HistoryGraph;
use papas_reco::features::reconstruction::ReconstructionOutput;
use papas_reco::pipeline::PapasEvent;
use papas_reco::shared::models::{Identifier, ParticleKind};

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "Expected {expected} ± {tolerance}, got {actual}"
    );
}

/// Assert the number of charged hadrons, neutral hadrons and photons
pub fn assert_kinds(output: &ReconstructionOutput, charged: usize, neutral: usize, photons: usize) {
    let actual = (
        output.count(ParticleKind::ChargedHadron),
        output.count(ParticleKind::NeutralHadron),
        output.count(ParticleKind::Photon),
    );
    assert_eq!(
        actual,
        (charged, neutral, photons),
        "Expected (charged, neutral, photon) = {:?}, got {:?}.\n{}",
        (charged, neutral, photons),
        actual,
        output
    );
}

/// Element ids of every original block, before reconstruction
pub fn block_elements(event: &PapasEvent) -> BTreeSet<Identifier> {
    event
        .blocks
        .values()
        .flat_map(|b| b.element_ids().iter().copied())
        .collect()
}

/// Every element sits in exactly one active block
pub fn assert_active_partition(event: &PapasEvent, elements: &BTreeSet<Identifier>) {
    let mut seen = BTreeSet::new();
    for block in event.active_blocks() {
        for id in block.element_ids() {
            assert!(seen.insert(*id), "{id} appears in two active blocks");
        }
    }
    assert_eq!(&seen, elements, "Active blocks do not cover the input elements");
}

/// No track keeps two hcal links and no ecal-hcal link survives
pub fn assert_normalized(blocks: &[&Block]) {
    for block in blocks {
        assert!(
            TopologyNormalizer::is_normalized(block),
            "Block {} is not normalized",
            block.id()
        );
        assert!(TopologyNormalizer::edges_to_unlink(block).is_empty());
    }
}

/// Unused ids are distinct input elements and never feed a particle
pub fn assert_conserved(
    output: &ReconstructionOutput,
    history: &HistoryGraph,
    elements: &BTreeSet<Identifier>,
) {
    let unused: BTreeSet<Identifier> = output.unused.iter().copied().collect();
    assert_eq!(unused.len(), output.unused.len(), "Duplicate unused ids");
    assert!(unused.is_subset(elements), "Unused ids outside the input");

    for particle in &output.particles {
        for parent in history.parents(particle.id) {
            assert!(
                !unused.contains(&parent),
                "{parent} is both unused and an ancestor of {}",
                particle.id
            );
        }
        for ids in particle.clusters.values() {
            for id in ids {
                assert!(!unused.contains(id), "{id} is both unused and a cluster of {}", particle.id);
            }
        }
    }
}
