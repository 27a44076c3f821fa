//! Provenance Graph (History DAG)
//!
//! Records which raw elements and intermediate blocks each reconstructed
//! particle derives from. Edges always point forward (parent derives into
//! child): elements → blocks → particles.
//!
//! ```text
//!   st1 ──┐                ┌──► rp1 (charged hadron)
//!         ├──► rb42 ──► rb7 ┤
//!   mh1 ──┘                └──► rp2 (neutral hadron)
//! ```
//!
//! Acyclicity is kept by construction; [`HistoryGraph::is_acyclic`] verifies
//! it with petgraph for tests and debug checks.

mod graph;

pub use graph::{Direction, HistoryGraph, HistoryNode};
