//! Element & Block Graph Model
//!
//! Detector elements are grouped into blocks by the upstream block builder.
//! A block holds element ids plus the typed, distance-weighted edges between
//! them; elements themselves live in the [`ElementStore`].

mod block;
mod edge;
mod store;

pub use block::Block;
pub use edge::{Edge, EdgeKey, EdgeKind};
pub use store::ElementStore;
