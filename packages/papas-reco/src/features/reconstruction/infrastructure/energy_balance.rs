//! Energy balance around one hcal cluster
//!
//! Tracks pointing at the hcal become charged hadrons. The calorimeter
//! energy (hcal plus the ecals hanging off those tracks) is compared to the
//! summed track energy; a significant excess becomes a neutral hadron and/or
//! a photon, both pointing along the hcal position.

use tracing::debug;

use super::builders::{track_energy, ParticleBuilder};
use crate::errors::{PapasError, Result};
use crate::features::block_graph::{Block, EdgeKind};
use crate::features::reconstruction::domain::HcalResolutionModel;
use crate::shared::models::{Cluster, ElementKind, Identifier, Layer, Particle, Track};
use crate::shared::ports::ElementResolver;

pub struct EnergyBalance<'m> {
    model: &'m HcalResolutionModel,
}

impl<'m> EnergyBalance<'m> {
    pub fn new(model: &'m HcalResolutionModel) -> Self {
        Self { model }
    }

    /// Reconstruct everything attached to `hcal_id`; the hcal is locked on
    /// return
    pub fn reconstruct_hcal(
        &self,
        block: &Block,
        hcal_id: Identifier,
        elements: &dyn ElementResolver,
        builder: &mut ParticleBuilder<'_>,
    ) -> Result<Vec<Particle>> {
        let hcal = elements.cluster(hcal_id)?;
        let track_ids = block.linked_ids(hcal_id, EdgeKind::HcalTrack);

        if !track_ids.is_empty() && !block.linked_edges(hcal_id, EdgeKind::HcalHcal).is_empty() {
            return Err(PapasError::contract(
                block.id(),
                format!("{hcal_id} keeps hcal_hcal links next to hcal_track links"),
            ));
        }

        let mut tracks: Vec<&Track> = Vec::with_capacity(track_ids.len());
        let mut ecals: Vec<&Cluster> = Vec::new();
        for &track_id in &track_ids {
            tracks.push(elements.track(track_id)?);
            for ecal_id in block.linked_ids(track_id, EdgeKind::EcalTrack) {
                if !builder.is_locked(ecal_id) {
                    ecals.push(elements.cluster(ecal_id)?);
                    builder.lock(ecal_id);
                }
            }
        }
        debug!(
            "Reconstruct hcal {} e={:.2}: tracks [{}] ecals [{}]",
            hcal_id,
            hcal.energy,
            join_ids(tracks.iter().map(|t| t.id)),
            join_ids(ecals.iter().map(|e| e.id))
        );

        let particles = if tracks.is_empty() {
            self.neutral_only(block, hcal, builder)?
        } else {
            self.balance(hcal, &tracks, &ecals, builder)?
        };

        builder.lock(hcal_id);
        Ok(particles)
    }

    /// No tracks: the hcal alone makes one neutral hadron
    fn neutral_only(
        &self,
        block: &Block,
        hcal: &Cluster,
        builder: &mut ParticleBuilder<'_>,
    ) -> Result<Vec<Particle>> {
        if let Some(stray) = block
            .all_linked_edges(hcal.id)
            .into_iter()
            .filter_map(|e| e.other(hcal.id))
            .find(|other| other.kind() != ElementKind::HcalCluster)
        {
            return Err(PapasError::contract(
                block.id(),
                format!("{} without tracks is linked to {stray}", hcal.id),
            ));
        }
        Ok(builder
            .build_from_cluster(hcal, Layer::HcalIn, None, None)?
            .into_iter()
            .collect())
    }

    fn balance(
        &self,
        hcal: &Cluster,
        tracks: &[&Track],
        ecals: &[&Cluster],
        builder: &mut ParticleBuilder<'_>,
    ) -> Result<Vec<Particle>> {
        let ecal_energy: f64 = ecals.iter().map(|e| e.energy).sum();
        let track_sum: f64 = tracks.iter().map(|t| track_energy(t)).sum();

        let mut particles = Vec::with_capacity(tracks.len() + 2);
        for track in tracks {
            particles.push(builder.build_from_track(track, &[])?);
        }

        let delta = (hcal.energy + ecal_energy) / track_sum - 1.0;
        let threshold = self.model.threshold(hcal);
        debug!(
            "dE/p = {:.4}, resolution = {:.4}, threshold = {:.4}",
            delta,
            self.model.cluster_resolution(hcal),
            threshold
        );

        if delta <= threshold {
            return Ok(particles);
        }

        let excess = delta * track_sum;
        debug!(
            "excess = {:5.2}, ecal_E = {:5.2}, diff = {:5.2}",
            excess,
            ecal_energy,
            excess - ecal_energy
        );
        if excess <= ecal_energy {
            // one merged photon along the hcal direction
            particles.extend(builder.build_from_cluster(hcal, Layer::EcalIn, Some(excess), None)?);
        } else {
            particles.extend(builder.build_from_cluster(
                hcal,
                Layer::HcalIn,
                Some(excess - ecal_energy),
                None,
            )?);
            if ecal_energy > 0.0 {
                particles.extend(builder.build_from_cluster(
                    hcal,
                    Layer::EcalIn,
                    Some(ecal_energy),
                    None,
                )?);
            }
        }
        Ok(particles)
    }
}

fn join_ids(ids: impl Iterator<Item = Identifier>) -> String {
    ids.map(|id| id.to_string()).collect::<Vec<_>>().join(", ")
}
