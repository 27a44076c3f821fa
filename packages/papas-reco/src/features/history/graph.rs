//! History nodes and graph queries

use petgraph::algo::{is_cyclic_directed, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use crate::shared::models::Identifier;

/// One entity in the provenance graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryNode {
    id: Identifier,
    children: BTreeSet<Identifier>,
    parents: BTreeSet<Identifier>,
}

impl HistoryNode {
    pub fn new(id: Identifier) -> Self {
        Self {
            id,
            children: BTreeSet::new(),
            parents: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> Identifier {
        self.id
    }

    pub fn children(&self) -> &BTreeSet<Identifier> {
        &self.children
    }

    pub fn parents(&self) -> &BTreeSet<Identifier> {
        &self.parents
    }
}

/// Traversal direction for [`HistoryGraph::linked_ids`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Follow parent → child links (descendants)
    Children,
    /// Follow child → parent links (ancestors)
    Parents,
    /// Both ways
    Undirected,
}

/// Provenance DAG for one event
///
/// Nodes are created lazily on first reference and never removed while the
/// event is processed.
#[derive(Debug, Clone, Default)]
pub struct HistoryGraph {
    nodes: BTreeMap<Identifier, HistoryNode>,
}

impl HistoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: Identifier) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: Identifier) -> Option<&HistoryNode> {
        self.nodes.get(&id)
    }

    /// Get or lazily create the node for `id`
    pub fn ensure_node(&mut self, id: Identifier) -> &mut HistoryNode {
        self.nodes.entry(id).or_insert_with(|| HistoryNode::new(id))
    }

    /// Record that `child` derives from `parent`
    ///
    /// Self links are ignored.
    pub fn add_link(&mut self, parent: Identifier, child: Identifier) {
        if parent == child {
            return;
        }
        self.ensure_node(parent).children.insert(child);
        self.ensure_node(child).parents.insert(parent);
    }

    pub fn children(&self, id: Identifier) -> Vec<Identifier> {
        self.nodes
            .get(&id)
            .map(|n| n.children.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn parents(&self, id: Identifier) -> Vec<Identifier> {
        self.nodes
            .get(&id)
            .map(|n| n.parents.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn ids(&self) -> impl Iterator<Item = Identifier> + '_ {
        self.nodes.keys().copied()
    }

    /// Breadth-first closure from `id` (inclusive) in the given direction
    pub fn linked_ids(&self, id: Identifier, direction: Direction) -> Vec<Identifier> {
        if !self.nodes.contains_key(&id) {
            return Vec::new();
        }
        let mut visited = BTreeSet::new();
        let mut order = Vec::new();
        let mut queue = VecDeque::new();
        visited.insert(id);
        queue.push_back(id);

        while let Some(current) = queue.pop_front() {
            order.push(current);
            let Some(node) = self.nodes.get(&current) else {
                continue;
            };
            let next: Box<dyn Iterator<Item = &Identifier>> = match direction {
                Direction::Children => Box::new(node.children.iter()),
                Direction::Parents => Box::new(node.parents.iter()),
                Direction::Undirected => Box::new(node.children.iter().chain(node.parents.iter())),
            };
            for &neighbor in next {
                if visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }
        order
    }

    /// Ids whose two-letter type code matches `type_code` (e.g. `rp`, `mh`)
    pub fn matched_ids(ids: &[Identifier], type_code: &str) -> Vec<Identifier> {
        ids.iter()
            .copied()
            .filter(|id| id.type_code() == type_code)
            .collect()
    }

    /// Weakly connected groups, largest first; members sorted descending
    pub fn subgroups(&self) -> Vec<Vec<Identifier>> {
        let mut seen = BTreeSet::new();
        let mut groups = Vec::new();
        for &id in self.nodes.keys() {
            if seen.contains(&id) {
                continue;
            }
            let mut group = self.linked_ids(id, Direction::Undirected);
            seen.extend(group.iter().copied());
            group.sort_by(|a, b| b.cmp(a));
            groups.push(group);
        }
        // stable sort keeps id order among equal sizes
        groups.sort_by(|a, b| b.len().cmp(&a.len()));
        groups
    }

    fn to_petgraph(&self) -> (DiGraph<Identifier, ()>, HashMap<NodeIndex, Identifier>) {
        let mut graph = DiGraph::new();
        let mut index = HashMap::new();
        let mut reverse = HashMap::new();
        for &id in self.nodes.keys() {
            let idx = graph.add_node(id);
            index.insert(id, idx);
            reverse.insert(idx, id);
        }
        for node in self.nodes.values() {
            for child in &node.children {
                if let (Some(&from), Some(&to)) = (index.get(&node.id), index.get(child)) {
                    graph.add_edge(from, to, ());
                }
            }
        }
        (graph, reverse)
    }

    pub fn is_acyclic(&self) -> bool {
        let (graph, _) = self.to_petgraph();
        !is_cyclic_directed(&graph)
    }

    /// Parents before children; `None` if a cycle slipped in
    pub fn topological_order(&self) -> Option<Vec<Identifier>> {
        let (graph, reverse) = self.to_petgraph();
        toposort(&graph, None)
            .ok()
            .map(|order| order.into_iter().filter_map(|idx| reverse.get(&idx).copied()).collect())
    }
}
