//! Features
//!
//! - `block_graph`: elements, typed edges and blocks
//! - `history`: provenance DAG
//! - `block_splitting`: topology normalizer and block splitter
//! - `reconstruction`: per-block particle reconstruction

pub mod block_graph;
pub mod block_splitting;
pub mod history;
pub mod reconstruction;
