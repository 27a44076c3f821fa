//! Event state for one reconstruction

use std::collections::BTreeMap;

use crate::features::block_graph::{Block, ElementStore};
use crate::features::history::HistoryGraph;
use crate::shared::models::{Identifier, IdentifierFactory};

/// Everything a reconstruction reads and mutates for one event
///
/// Owned by a single worker; events share nothing.
#[derive(Debug, Clone, Default)]
pub struct PapasEvent {
    pub elements: ElementStore,
    /// Active and deactivated blocks, keyed by id
    pub blocks: BTreeMap<Identifier, Block>,
    pub history: Option<HistoryGraph>,
    pub ids: IdentifierFactory,
}

impl PapasEvent {
    /// Event with a history graph seeded with every element
    pub fn new(elements: ElementStore) -> Self {
        let mut ids = IdentifierFactory::new();
        let mut history = HistoryGraph::new();
        for id in elements.ids() {
            ids.observe(id);
            history.ensure_node(id);
        }
        Self {
            elements,
            blocks: BTreeMap::new(),
            history: Some(history),
            ids,
        }
    }

    pub fn without_history(mut self) -> Self {
        self.history = None;
        self
    }

    /// Add a block, linking its elements to it in the history graph
    pub fn insert_block(&mut self, block: Block) {
        self.ids.observe(block.id());
        if let Some(history) = self.history.as_mut() {
            history.ensure_node(block.id());
            for &element in block.element_ids() {
                history.add_link(element, block.id());
            }
        }
        self.blocks.insert(block.id(), block);
    }

    pub fn active_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values().filter(|b| b.is_active())
    }
}
