//! Multi-event reconstruction
//!
//! Events are independent: each owns its element store, lock maps, id
//! factory and history graph, so they can run on the rayon pool without
//! any shared state.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::path::Path;
use tracing::info;

use super::event::PapasEvent;
use super::input::EventInput;
use crate::config::ReconstructionConfig;
use crate::errors::Result;
use crate::features::reconstruction::{PFReconstructor, ReconstructionOutput};

/// Config from a YAML file, or the defaults when no path is given
pub fn load_config(path: Option<&Path>) -> Result<ReconstructionConfig> {
    match path {
        Some(path) => Ok(ReconstructionConfig::from_yaml_file(path)?),
        None => Ok(ReconstructionConfig::default()),
    }
}

/// Result of one event in a batch
#[derive(Debug)]
pub struct EventResult {
    pub event: PapasEvent,
    pub output: ReconstructionOutput,
}

/// Build and reconstruct every event, preserving input order
///
/// The first failing event aborts the batch.
pub fn reconstruct_events(
    inputs: Vec<EventInput>,
    config: &ReconstructionConfig,
) -> Result<Vec<EventResult>> {
    let reconstructor = PFReconstructor::new(config);
    let total = inputs.len();

    let run = |input: EventInput| -> Result<EventResult> {
        let mut event = PapasEvent::from_input(input, config.record_history)?;
        let output = reconstructor.reconstruct(&mut event)?;
        Ok(EventResult { event, output })
    };

    #[cfg(feature = "parallel")]
    let results: Result<Vec<EventResult>> = if config.parallel_events {
        inputs.into_par_iter().map(run).collect()
    } else {
        inputs.into_iter().map(run).collect()
    };

    #[cfg(not(feature = "parallel"))]
    let results: Result<Vec<EventResult>> = inputs.into_iter().map(run).collect();

    let results = results?;
    info!(
        "Reconstructed {} events, {} particles",
        total,
        results.iter().map(|r| r.output.particles.len()).sum::<usize>()
    );
    Ok(results)
}
