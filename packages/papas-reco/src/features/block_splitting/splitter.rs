//! Block Splitter
//!
//! Removes edges from a block and regroups the remaining elements into
//! connected components. Component membership alone decides the grouping.

use petgraph::unionfind::UnionFind;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

use crate::features::block_graph::{Block, EdgeKey};
use crate::features::history::HistoryGraph;
use crate::shared::models::Identifier;

pub struct BlockSplitter;

impl BlockSplitter {
    /// Split `block` after removing `unlink`
    ///
    /// Returns `None` when there is nothing to remove. Otherwise the original
    /// block is deactivated and every connected component becomes a new block
    /// whose id is derived from the original id and its members. With a
    /// history graph, each new block gets the original block and each of its
    /// elements as parents.
    pub fn split(
        block: &mut Block,
        unlink: &[EdgeKey],
        history: Option<&mut HistoryGraph>,
    ) -> Option<BTreeMap<Identifier, Block>> {
        if unlink.is_empty() {
            return None;
        }
        let removed: BTreeSet<EdgeKey> = unlink.iter().copied().collect();

        let ids = block.element_ids();
        let position: HashMap<Identifier, usize> =
            ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();

        let mut components = UnionFind::<usize>::new(ids.len());
        for edge in block.edges() {
            if !edge.linked || removed.contains(&edge.key()) {
                continue;
            }
            if let (Some(&a), Some(&b)) = (position.get(&edge.id1), position.get(&edge.id2)) {
                components.union(a, b);
            }
        }

        // ids are sorted, so groups come out ordered by their smallest member
        let mut groups: Vec<Vec<Identifier>> = Vec::new();
        let mut group_of_root: HashMap<usize, usize> = HashMap::new();
        for (i, id) in ids.iter().enumerate() {
            let root = components.find(i);
            let slot = *group_of_root.entry(root).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[slot].push(*id);
        }

        let parent_id = block.id();
        let mut new_blocks = BTreeMap::new();
        for members in groups {
            let member_set: BTreeSet<Identifier> = members.iter().copied().collect();
            let edges = block
                .edges()
                .filter(|e| !removed.contains(&e.key()))
                .filter(|e| member_set.contains(&e.id1) && member_set.contains(&e.id2))
                .cloned()
                .collect::<Vec<_>>();
            let new_block = Block::derived(parent_id, members, edges);
            new_blocks.insert(new_block.id(), new_block);
        }

        block.deactivate();
        debug!(
            "Split block {} into {} blocks ({} edges removed)",
            parent_id,
            new_blocks.len(),
            removed.len()
        );

        if let Some(history) = history {
            for new_block in new_blocks.values() {
                history.add_link(parent_id, new_block.id());
                for &element in new_block.element_ids() {
                    history.add_link(element, new_block.id());
                }
            }
        }

        Some(new_blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::block_graph::Edge;
    use crate::shared::models::{ElementKind, Subtype};

    fn id(kind: ElementKind, index: u64) -> Identifier {
        Identifier::new(kind, Subtype::Merged, index)
    }

    fn block_id() -> Identifier {
        Identifier::new(ElementKind::Block, Subtype::Reconstructed, 1)
    }

    /// t1 - h1, t1 - h2 (farther), e1 - t1
    fn fork() -> (Block, Identifier, Identifier, Identifier, Identifier) {
        let t1 = id(ElementKind::Track, 1);
        let h1 = id(ElementKind::HcalCluster, 1);
        let h2 = id(ElementKind::HcalCluster, 2);
        let e1 = id(ElementKind::EcalCluster, 1);
        let block = Block::new(
            block_id(),
            vec![t1, h1, h2, e1],
            vec![
                Edge::linked(t1, h1, 0.1).unwrap(),
                Edge::linked(t1, h2, 0.4).unwrap(),
                Edge::linked(e1, t1, 0.2).unwrap(),
            ],
        );
        (block, t1, h1, h2, e1)
    }

    #[test]
    fn test_empty_unlink_returns_none() {
        let (mut block, ..) = fork();
        assert!(BlockSplitter::split(&mut block, &[], None).is_none());
        assert!(block.is_active());
    }

    #[test]
    fn test_split_into_components() {
        let (mut block, t1, h1, h2, e1) = fork();
        let blocks = BlockSplitter::split(&mut block, &[EdgeKey::new(t1, h2)], None).unwrap();

        assert!(!block.is_active());
        assert_eq!(blocks.len(), 2);

        let mut memberships: Vec<Vec<Identifier>> =
            blocks.values().map(|b| b.element_ids().to_vec()).collect();
        memberships.sort();
        assert_eq!(memberships, vec![vec![t1, e1, h1], vec![h2]]);

        let main = blocks.values().find(|b| b.contains(t1)).unwrap();
        assert!(main.edge(t1, h1).is_some());
        assert!(main.edge(t1, h2).is_none());
        assert!(blocks.values().all(|b| b.is_active()));
    }

    #[test]
    fn test_removal_without_disconnect_keeps_one_block() {
        let t1 = id(ElementKind::Track, 1);
        let h1 = id(ElementKind::HcalCluster, 1);
        let e1 = id(ElementKind::EcalCluster, 1);
        let mut block = Block::new(
            block_id(),
            vec![t1, h1, e1],
            vec![
                Edge::linked(t1, h1, 0.1).unwrap(),
                Edge::linked(e1, t1, 0.2).unwrap(),
                Edge::linked(e1, h1, 0.3).unwrap(),
            ],
        );
        let blocks = BlockSplitter::split(&mut block, &[EdgeKey::new(e1, h1)], None).unwrap();
        assert_eq!(blocks.len(), 1);
        let only = blocks.values().next().unwrap();
        assert_ne!(only.id(), block_id());
        assert_eq!(only.element_ids(), &[t1, e1, h1]);
        assert!(only.edge(e1, h1).is_none());
    }

    #[test]
    fn test_split_ids_are_deterministic() {
        let (mut first, t1, _, h2, _) = fork();
        let (mut second, ..) = fork();
        let a = BlockSplitter::split(&mut first, &[EdgeKey::new(t1, h2)], None).unwrap();
        let b = BlockSplitter::split(&mut second, &[EdgeKey::new(h2, t1)], None).unwrap();
        assert_eq!(
            a.keys().collect::<Vec<_>>(),
            b.keys().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_history_records_parent_block_and_elements() {
        let (mut block, t1, h1, h2, e1) = fork();
        let mut history = HistoryGraph::new();
        let blocks =
            BlockSplitter::split(&mut block, &[EdgeKey::new(t1, h2)], Some(&mut history)).unwrap();

        for new_block in blocks.values() {
            let parents = history.parents(new_block.id());
            assert!(parents.contains(&block_id()));
            for element in new_block.element_ids() {
                assert!(parents.contains(element));
            }
        }
        let main = blocks.values().find(|b| b.contains(h1)).unwrap();
        assert_eq!(history.parents(main.id()), vec![t1, e1, h1, block_id()]);
        assert!(history.is_acyclic());
    }
}
