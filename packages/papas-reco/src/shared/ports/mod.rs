//! Ports (trait seams towards external collaborators)

mod element_resolver;

pub use element_resolver::{ElementRef, ElementResolver};
