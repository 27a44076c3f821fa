//! Test data builders

use papas_reco::features::block_graph::{Block, Edge, ElementStore};
use papas_reco::pipeline::PapasEvent;
use papas_reco::shared::constants::mass;
use papas_reco::shared::models::{
    Cluster, ElementKind, Identifier, Layer, Path, Subtype, Track, Vector3,
};

pub fn tid(i: u64) -> Identifier {
    Identifier::new(ElementKind::Track, Subtype::Smeared, i)
}

pub fn eid(i: u64) -> Identifier {
    Identifier::new(ElementKind::EcalCluster, Subtype::Merged, i)
}

pub fn hid(i: u64) -> Identifier {
    Identifier::new(ElementKind::HcalCluster, Subtype::Merged, i)
}

pub fn bid(i: u64) -> Identifier {
    Identifier::new(ElementKind::Block, Subtype::Reconstructed, i)
}

/// Momentum giving `energy` under the charged pion hypothesis
pub fn pion_momentum(energy: f64) -> f64 {
    (energy * energy - mass::CHARGED_PION * mass::CHARGED_PION).sqrt()
}

/// Builder for a single event
#[derive(Debug, Default)]
pub struct EventBuilder {
    store: ElementStore,
    blocks: Vec<(Vec<Identifier>, Vec<Edge>)>,
    without_history: bool,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track along `direction` whose pion-hypothesis energy is `energy`
    pub fn track(mut self, i: u64, energy: f64, charge: i32, direction: Vector3) -> Self {
        let p3 = direction.unit() * pion_momentum(energy);
        let path = Path::helix(Vector3::new(0.0, 0.0, 0.01 * i as f64));
        self.store.add_track(Track::new(tid(i), p3, charge, path));
        self
    }

    pub fn ecal(mut self, i: u64, energy: f64, position: Vector3) -> Self {
        self.store
            .add_cluster(Cluster::new(eid(i), energy, position, Layer::EcalIn));
        self
    }

    pub fn hcal(mut self, i: u64, energy: f64, position: Vector3) -> Self {
        self.store
            .add_cluster(Cluster::new(hid(i), energy, position, Layer::HcalIn));
        self
    }

    /// Block over `members` with linked edges `(a, b, distance)`
    pub fn block(mut self, members: &[Identifier], links: &[(Identifier, Identifier, f64)]) -> Self {
        let edges = links
            .iter()
            .map(|&(a, b, d)| Edge::linked(a, b, d).expect("element edge"))
            .collect();
        self.blocks.push((members.to_vec(), edges));
        self
    }

    pub fn without_history(mut self) -> Self {
        self.without_history = true;
        self
    }

    pub fn build(self) -> PapasEvent {
        let mut event = PapasEvent::new(self.store);
        if self.without_history {
            event = event.without_history();
        }
        for (index, (members, edges)) in self.blocks.into_iter().enumerate() {
            event.insert_block(Block::new(bid(index as u64 + 1), members, edges));
        }
        event
    }
}
