//! Reconstruction configuration
//!
//! Defaults reproduce the CMS hcal parametrisation. Everything can be
//! overridden from a versioned YAML file:
//!
//! ```yaml
//! version: 1
//! reconstruction:
//!   record_history: true
//!   hcal_resolution:
//!     barrel_eta_max: 1.48
//!     barrel: { stochastic: 1.02, constant: 0.065 }
//!     endcap: { stochastic: 1.2, constant: 0.028 }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, ConfigResult};
use super::validation::{check_range, Validatable};
use crate::shared::constants::hcal_resolution as defaults;

const SUPPORTED_VERSIONS: [u32; 1] = [1];

/// Stochastic and constant terms of a calorimeter resolution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolutionTerms {
    pub stochastic: f64,
    pub constant: f64,
}

/// Hcal energy resolution model and significance threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HcalResolutionConfig {
    /// |eta| up to which the barrel terms apply
    pub barrel_eta_max: f64,
    pub barrel: ResolutionTerms,
    pub endcap: ResolutionTerms,
    /// Energy floor used when evaluating the stochastic term
    pub min_energy: f64,
    /// nsigma = 1 + exp(-E / nsigma_energy_scale)
    pub nsigma_energy_scale: f64,
}

impl Default for HcalResolutionConfig {
    fn default() -> Self {
        Self {
            barrel_eta_max: defaults::BARREL_ETA_MAX,
            barrel: ResolutionTerms {
                stochastic: defaults::BARREL_STOCHASTIC,
                constant: defaults::BARREL_CONSTANT,
            },
            endcap: ResolutionTerms {
                stochastic: defaults::ENDCAP_STOCHASTIC,
                constant: defaults::ENDCAP_CONSTANT,
            },
            min_energy: defaults::MIN_ENERGY,
            nsigma_energy_scale: defaults::NSIGMA_ENERGY_SCALE,
        }
    }
}

impl Validatable for HcalResolutionConfig {
    fn validate(&self) -> ConfigResult<()> {
        check_range(
            "hcal_resolution.barrel_eta_max",
            self.barrel_eta_max,
            0.0,
            10.0,
            "Barrel boundary is an |eta| value",
        )?;
        for (name, terms) in [("barrel", &self.barrel), ("endcap", &self.endcap)] {
            check_range(
                &format!("hcal_resolution.{name}.stochastic"),
                terms.stochastic,
                0.0,
                10.0,
                "Stochastic term is a fraction times sqrt(GeV)",
            )?;
            check_range(
                &format!("hcal_resolution.{name}.constant"),
                terms.constant,
                0.0,
                1.0,
                "Constant term is a fraction",
            )?;
        }
        if self.barrel.stochastic == 0.0 && self.barrel.constant == 0.0 {
            return Err(ConfigError::Validation(
                "barrel resolution terms cannot both be zero".to_string(),
            ));
        }
        if self.endcap.stochastic == 0.0 && self.endcap.constant == 0.0 {
            return Err(ConfigError::Validation(
                "endcap resolution terms cannot both be zero".to_string(),
            ));
        }
        check_range(
            "hcal_resolution.min_energy",
            self.min_energy,
            1e-6,
            1000.0,
            "Energy floor must be positive",
        )?;
        check_range(
            "hcal_resolution.nsigma_energy_scale",
            self.nsigma_energy_scale,
            1e-6,
            1e6,
            "Energy scale must be positive",
        )
    }

    fn config_name(&self) -> &'static str {
        "HcalResolutionConfig"
    }
}

/// Top-level reconstruction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructionConfig {
    pub hcal_resolution: HcalResolutionConfig,

    /// Link split blocks and particles into the event's history graph
    pub record_history: bool,

    /// Reconstruct independent events on the rayon pool
    pub parallel_events: bool,
}

impl Default for ReconstructionConfig {
    fn default() -> Self {
        Self {
            hcal_resolution: HcalResolutionConfig::default(),
            record_history: true,
            parallel_events: true,
        }
    }
}

impl Validatable for ReconstructionConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.hcal_resolution.validate()
    }

    fn config_name(&self) -> &'static str {
        "ReconstructionConfig"
    }
}

/// YAML schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFileV1 {
    version: Option<u32>,
    #[serde(default)]
    reconstruction: ReconstructionConfig,
}

impl ReconstructionConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(content)?;
        let version = file.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }
        file.reconstruction.validate()?;
        Ok(file.reconstruction)
    }

    /// Load and validate a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: Some(1),
            reconstruction: self.clone(),
        };
        serde_yaml::to_string(&file).map_err(ConfigError::Yaml)
    }

    pub fn with_history(mut self, record_history: bool) -> Self {
        self.record_history = record_history;
        self
    }

    pub fn with_parallel_events(mut self, parallel_events: bool) -> Self {
        self.parallel_events = parallel_events;
        self
    }
}
