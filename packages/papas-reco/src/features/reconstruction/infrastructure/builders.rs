//! Particle builders
//!
//! Turn a single track or cluster into a particle candidate, then annotate
//! it: provenance links, path, contributing clusters and the lock on the
//! source element.

use crate::errors::{PapasError, Result};
use crate::features::history::HistoryGraph;
use crate::features::reconstruction::domain::LockMap;
use crate::shared::constants::{mass, pdg};
use crate::shared::models::{
    particle_data, Cluster, ElementKind, Identifier, IdentifierFactory, Layer, LorentzVector,
    Particle, Path, Subtype, Track, Vector3,
};

/// Energy of a track under the charged pion hypothesis
pub fn track_energy(track: &Track) -> f64 {
    track.energy_for_mass(mass::CHARGED_PION)
}

/// Builds particles for one block
///
/// Borrows the block's lock map, the event's id factory and, when recording,
/// the event's history graph.
pub struct ParticleBuilder<'a> {
    locks: &'a mut LockMap,
    history: Option<&'a mut HistoryGraph>,
    ids: &'a mut IdentifierFactory,
}

impl<'a> ParticleBuilder<'a> {
    pub fn new(
        locks: &'a mut LockMap,
        history: Option<&'a mut HistoryGraph>,
        ids: &'a mut IdentifierFactory,
    ) -> Self {
        Self {
            locks,
            history,
            ids,
        }
    }

    pub fn lock(&mut self, id: Identifier) {
        self.locks.lock(id);
    }

    pub fn is_locked(&self, id: Identifier) -> bool {
        self.locks.is_locked(id)
    }

    /// Photon (`ecal_in`) or neutral hadron (`hcal_in`) from a cluster
    ///
    /// `energy` overrides the cluster energy. Returns `Ok(None)`, leaving the
    /// cluster unlocked, when the energy is below the rest mass.
    pub fn build_from_cluster(
        &mut self,
        cluster: &Cluster,
        layer: Layer,
        energy: Option<f64>,
        vertex: Option<Vector3>,
    ) -> Result<Option<Particle>> {
        let pdgid = match layer {
            Layer::EcalIn => pdg::PHOTON,
            Layer::HcalIn => pdg::K0_LONG,
            other => {
                return Err(PapasError::InvalidLayer {
                    layer: other.to_string(),
                })
            }
        };
        let data = particle_data(pdgid)?;
        let energy = energy.unwrap_or(cluster.energy);
        if energy < data.mass {
            return Ok(None);
        }

        let momentum = (energy * energy - data.mass * data.mass).sqrt();
        let p4 = LorentzVector::from_momentum_and_energy(cluster.position.unit() * momentum, energy);
        let vertex = vertex.unwrap_or_else(Vector3::origin);

        let mut particle = Particle::new(self.next_id(), p4, vertex, data.charge, pdgid);
        particle.path = Some(Path::straight_line(vertex).with_point(layer, cluster.position));
        particle.clusters.entry(layer).or_default().push(cluster.id);

        self.link_history(particle.id, &[cluster.id]);
        self.locks.lock(cluster.id);
        Ok(Some(particle))
    }

    /// Charged hadron from a track under the pion hypothesis
    ///
    /// The four-momentum comes from the track momentum and the pion mass, the
    /// path is the track's own. `clusters` are recorded on the particle and
    /// linked as extra ancestors.
    pub fn build_from_track(&mut self, track: &Track, clusters: &[&Cluster]) -> Result<Particle> {
        let data = particle_data(pdg::PION * track.charge)?;
        let p4 = LorentzVector::from_momentum_and_mass(track.p3, data.mass);

        let mut particle = Particle::new(
            self.next_id(),
            p4,
            track.path.vertex,
            data.charge,
            pdg::PION * track.charge,
        );
        particle.path = Some(track.path.clone());
        for cluster in clusters {
            particle
                .clusters
                .entry(cluster.layer)
                .or_default()
                .push(cluster.id);
        }

        let mut parents = vec![track.id];
        parents.extend(clusters.iter().map(|c| c.id));
        self.link_history(particle.id, &parents);
        self.locks.lock(track.id);
        Ok(particle)
    }

    fn next_id(&mut self) -> Identifier {
        self.ids.next(ElementKind::Particle, Subtype::Reconstructed)
    }

    fn link_history(&mut self, particle: Identifier, parents: &[Identifier]) {
        if let Some(history) = self.history.as_deref_mut() {
            history.ensure_node(particle);
            for &parent in parents {
                history.add_link(parent, particle);
            }
        }
    }
}
