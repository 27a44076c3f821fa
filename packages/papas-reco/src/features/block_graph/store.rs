//! In-memory element collections for one event

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::shared::models::{Cluster, Identifier, Track};
use crate::shared::ports::ElementResolver;

/// Tracks and merged clusters of one event, keyed by id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementStore {
    pub tracks: BTreeMap<Identifier, Track>,
    pub ecal_clusters: BTreeMap<Identifier, Cluster>,
    pub hcal_clusters: BTreeMap<Identifier, Cluster>,
}

impl ElementStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_track(&mut self, track: Track) {
        self.tracks.insert(track.id, track);
    }

    /// Insert a cluster into the collection matching its id kind
    ///
    /// Returns false (and drops the cluster) when the id is not a cluster id.
    pub fn add_cluster(&mut self, cluster: Cluster) -> bool {
        if cluster.id.is_ecal() {
            self.ecal_clusters.insert(cluster.id, cluster);
            true
        } else if cluster.id.is_hcal() {
            self.hcal_clusters.insert(cluster.id, cluster);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.tracks.len() + self.ecal_clusters.len() + self.hcal_clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every element id, tracks first
    pub fn ids(&self) -> impl Iterator<Item = Identifier> + '_ {
        self.tracks
            .keys()
            .chain(self.ecal_clusters.keys())
            .chain(self.hcal_clusters.keys())
            .copied()
    }
}

impl ElementResolver for ElementStore {
    fn find_track(&self, id: Identifier) -> Option<&Track> {
        self.tracks.get(&id)
    }

    fn find_ecal(&self, id: Identifier) -> Option<&Cluster> {
        self.ecal_clusters.get(&id)
    }

    fn find_hcal(&self, id: Identifier) -> Option<&Cluster> {
        self.hcal_clusters.get(&id)
    }
}
