//! Blocks: connected groups of elements plus their induced edges

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::edge::{Edge, EdgeKey, EdgeKind};
use crate::shared::models::{ElementKind, Identifier};

/// Connected set of element ids with the edges between them
///
/// When a block is split it is deactivated, not removed, so the provenance
/// graph can still point at it.
#[derive(Debug, Clone)]
pub struct Block {
    id: Identifier,
    /// Sorted, deduplicated
    element_ids: Vec<Identifier>,
    edges: BTreeMap<EdgeKey, Edge>,
    /// Linked edges per element, closest first
    links: BTreeMap<Identifier, Vec<EdgeKey>>,
    active: bool,
}

impl Block {
    /// Create a block with an externally allocated id
    ///
    /// Edges with an end outside `element_ids` are dropped.
    pub fn new(
        id: Identifier,
        element_ids: impl IntoIterator<Item = Identifier>,
        edges: impl IntoIterator<Item = Edge>,
    ) -> Self {
        let element_ids: Vec<Identifier> = element_ids
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let members: BTreeSet<Identifier> = element_ids.iter().copied().collect();

        let edges: BTreeMap<EdgeKey, Edge> = edges
            .into_iter()
            .filter(|e| members.contains(&e.id1) && members.contains(&e.id2) && e.id1 != e.id2)
            .map(|e| (e.key(), e))
            .collect();

        let mut links: BTreeMap<Identifier, Vec<EdgeKey>> = BTreeMap::new();
        for edge in edges.values().filter(|e| e.linked) {
            links.entry(edge.id1).or_default().push(edge.key());
            links.entry(edge.id2).or_default().push(edge.key());
        }
        for (id, keys) in links.iter_mut() {
            keys.sort_by(|a, b| {
                let da = edges[a].distance;
                let db = edges[b].distance;
                da.total_cmp(&db).then_with(|| a.other(*id).cmp(&b.other(*id)))
            });
        }

        Self {
            id,
            element_ids,
            edges,
            links,
            active: true,
        }
    }

    /// Create a block split off `parent`, with an id derived from its members
    pub fn derived(
        parent: Identifier,
        element_ids: Vec<Identifier>,
        edges: impl IntoIterator<Item = Edge>,
    ) -> Self {
        let id = Identifier::derived_block(Some(parent), &element_ids);
        Self::new(id, element_ids, edges)
    }

    pub fn id(&self) -> Identifier {
        self.id
    }

    pub fn element_ids(&self) -> &[Identifier] {
        &self.element_ids
    }

    pub fn len(&self) -> usize {
        self.element_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.element_ids.is_empty()
    }

    pub fn contains(&self, id: Identifier) -> bool {
        self.element_ids.binary_search(&id).is_ok()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn edge(&self, a: Identifier, b: Identifier) -> Option<&Edge> {
        self.edges.get(&EdgeKey::new(a, b))
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Linked edges of `id` with the given type, ascending distance
    pub fn linked_edges(&self, id: Identifier, kind: EdgeKind) -> Vec<&Edge> {
        self.links
            .get(&id)
            .map(|keys| {
                keys.iter()
                    .filter_map(|k| self.edges.get(k))
                    .filter(|e| e.kind == kind)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// All linked edges of `id`, ascending distance
    pub fn all_linked_edges(&self, id: Identifier) -> Vec<&Edge> {
        self.links
            .get(&id)
            .map(|keys| keys.iter().filter_map(|k| self.edges.get(k)).collect())
            .unwrap_or_default()
    }

    /// Ids linked to `id` through edges of the given type, closest first
    pub fn linked_ids(&self, id: Identifier, kind: EdgeKind) -> Vec<Identifier> {
        self.linked_edges(id, kind)
            .into_iter()
            .filter_map(|e| e.other(id))
            .collect()
    }

    /// Element ids of one kind, in block order
    pub fn ids_of(&self, kind: ElementKind) -> impl Iterator<Item = Identifier> + '_ {
        self.element_ids.iter().copied().filter(move |id| id.kind() == kind)
    }

    pub fn count(&self, kind: ElementKind) -> usize {
        self.ids_of(kind).count()
    }

    /// Compact shape description, e.g. `T2E1H1`
    pub fn short_name(&self) -> String {
        let mut name = String::new();
        for (kind, letter) in [
            (ElementKind::Track, 'T'),
            (ElementKind::EcalCluster, 'E'),
            (ElementKind::HcalCluster, 'H'),
        ] {
            let count = self.count(kind);
            if count > 0 {
                name.push(letter);
                name.push_str(&count.to_string());
            }
        }
        name
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>10} {:>8} ids={} edges={}{}",
            self.id.to_string(),
            self.short_name(),
            self.element_ids.len(),
            self.edges.values().filter(|e| e.linked).count(),
            if self.active { "" } else { " (inactive)" }
        )
    }
}
