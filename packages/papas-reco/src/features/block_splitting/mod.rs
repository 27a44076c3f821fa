//! Block splitting
//!
//! - [`TopologyNormalizer`]: picks the edges that break the
//!   one-track-to-one-hcal rule, plus every ecal-hcal edge
//! - [`BlockSplitter`]: drops those edges and regroups the block into
//!   connected components

mod normalizer;
mod splitter;

pub use normalizer::TopologyNormalizer;
pub use splitter::BlockSplitter;
