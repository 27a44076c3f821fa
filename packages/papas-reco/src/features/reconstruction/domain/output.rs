//! Reconstruction results

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::models::{Identifier, Particle, ParticleKind};

/// Why a block shape produced no rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnhandledReason {
    /// Several ecal clusters and nothing else
    EcalOnlyBlock,
    /// Ecal clusters reachable from neither a track nor an hcal
    UnlinkedEcal,
}

impl UnhandledReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EcalOnlyBlock => "ecal_only_block",
            Self::UnlinkedEcal => "unlinked_ecal",
        }
    }
}

/// Elements left untouched because no reconstruction rule covers them
///
/// The same ids are also reported as unused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnhandledTopology {
    pub block: Identifier,
    pub reason: UnhandledReason,
    pub element_ids: Vec<Identifier>,
}

impl fmt::Display for UnhandledTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self.element_ids.iter().map(|id| id.to_string()).collect();
        write!(f, "{} {}: {}", self.block, self.reason.as_str(), ids.join(", "))
    }
}

/// Result of reconstructing a single block
#[derive(Debug, Clone, Default)]
pub struct BlockOutcome {
    pub particles: Vec<Particle>,
    pub unused: Vec<Identifier>,
    pub unhandled: Option<UnhandledTopology>,
}

/// Result of reconstructing one event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconstructionOutput {
    /// Discovery order: active blocks by id, rule order within a block
    pub particles: Vec<Particle>,
    pub unused: Vec<Identifier>,
    pub unhandled: Vec<UnhandledTopology>,
    /// Original blocks replaced by the normalization pass
    pub split_blocks: usize,
}

impl ReconstructionOutput {
    pub(crate) fn absorb(&mut self, outcome: BlockOutcome) {
        self.particles.extend(outcome.particles);
        self.unused.extend(outcome.unused);
        self.unhandled.extend(outcome.unhandled);
    }

    pub fn count(&self, kind: ParticleKind) -> usize {
        self.particles.iter().filter(|p| p.kind() == kind).count()
    }

    pub fn total_energy(&self) -> f64 {
        self.particles.iter().map(Particle::energy).sum()
    }
}

impl fmt::Display for ReconstructionOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Particles:")?;
        for particle in &self.particles {
            writeln!(f, "{particle}")?;
        }
        write!(f, "Unused:")?;
        if self.unused.is_empty() {
            write!(f, "\nNone")?;
        }
        for id in &self.unused {
            write!(f, "\n{id}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{ElementKind, LorentzVector, Subtype, Vector3};

    fn photon(index: u64, e: f64) -> Particle {
        Particle::new(
            Identifier::new(ElementKind::Particle, Subtype::Reconstructed, index),
            LorentzVector::new(e, 0.0, 0.0, e),
            Vector3::origin(),
            0,
            22,
        )
    }

    #[test]
    fn test_display_without_unused() {
        let output = ReconstructionOutput {
            particles: vec![photon(1, 5.0)],
            ..Default::default()
        };
        let text = output.to_string();
        assert!(text.starts_with("Particles:\n"));
        assert!(text.contains("rp1"));
        assert!(text.ends_with("Unused:\nNone"));
    }

    #[test]
    fn test_display_lists_unused() {
        let h = Identifier::new(ElementKind::HcalCluster, Subtype::Merged, 4);
        let output = ReconstructionOutput {
            unused: vec![h],
            ..Default::default()
        };
        assert_eq!(output.to_string(), "Particles:\nUnused:\nmh4");
    }

    #[test]
    fn test_counts_and_energy() {
        let mut output = ReconstructionOutput::default();
        output.absorb(BlockOutcome {
            particles: vec![photon(1, 5.0), photon(2, 2.5)],
            unused: vec![],
            unhandled: None,
        });
        assert_eq!(output.count(ParticleKind::Photon), 2);
        assert_eq!(output.count(ParticleKind::NeutralHadron), 0);
        assert!((output.total_energy() - 7.5).abs() < 1e-12);
    }

    #[test]
    fn test_unhandled_display() {
        let block = Identifier::new(ElementKind::Block, Subtype::Reconstructed, 2);
        let e1 = Identifier::new(ElementKind::EcalCluster, Subtype::Merged, 1);
        let e2 = Identifier::new(ElementKind::EcalCluster, Subtype::Merged, 2);
        let unhandled = UnhandledTopology {
            block,
            reason: UnhandledReason::EcalOnlyBlock,
            element_ids: vec![e1, e2],
        };
        assert_eq!(unhandled.to_string(), "rb2 ecal_only_block: me1, me2");
    }
}
