//! Element lookup
//!
//! Blocks only hold identifiers; the reconstruction resolves them to the
//! underlying tracks and clusters through this trait.

use crate::errors::{PapasError, Result};
use crate::shared::models::{Cluster, ElementKind, Identifier, Track};

/// Borrowed view of a resolved element
#[derive(Debug, Clone, Copy)]
pub enum ElementRef<'a> {
    Track(&'a Track),
    Cluster(&'a Cluster),
}

/// Resolves element identifiers to tracks and clusters
pub trait ElementResolver {
    fn find_track(&self, id: Identifier) -> Option<&Track>;

    fn find_ecal(&self, id: Identifier) -> Option<&Cluster>;

    fn find_hcal(&self, id: Identifier) -> Option<&Cluster>;

    fn track(&self, id: Identifier) -> Result<&Track> {
        self.find_track(id).ok_or(PapasError::UnknownElement(id))
    }

    /// Ecal or hcal cluster, dispatched on the identifier kind
    fn cluster(&self, id: Identifier) -> Result<&Cluster> {
        let found = match id.kind() {
            ElementKind::EcalCluster => self.find_ecal(id),
            ElementKind::HcalCluster => self.find_hcal(id),
            ElementKind::Track | ElementKind::Particle | ElementKind::Block => None,
        };
        found.ok_or(PapasError::UnknownElement(id))
    }

    fn resolve(&self, id: Identifier) -> Result<ElementRef<'_>> {
        match id.kind() {
            ElementKind::Track => self.track(id).map(ElementRef::Track),
            ElementKind::EcalCluster | ElementKind::HcalCluster => {
                self.cluster(id).map(ElementRef::Cluster)
            }
            ElementKind::Particle | ElementKind::Block => Err(PapasError::UnknownElement(id)),
        }
    }

    fn contains(&self, id: Identifier) -> bool {
        self.resolve(id).is_ok()
    }
}
