//! Hcal energy resolution model (CMS parametrisation)

use crate::config::HcalResolutionConfig;
use crate::shared::models::Cluster;

/// Expected fractional hcal resolution and the significance threshold for
/// calling an energy excess real
#[derive(Debug, Clone)]
pub struct HcalResolutionModel {
    config: HcalResolutionConfig,
}

impl HcalResolutionModel {
    pub fn new(config: HcalResolutionConfig) -> Self {
        Self { config }
    }

    /// sqrt(stoch² / max(E, floor) + const²), barrel or endcap terms by |eta|
    pub fn resolution(&self, energy: f64, eta: f64) -> f64 {
        let energy = energy.max(self.config.min_energy);
        let terms = if eta.abs() > self.config.barrel_eta_max {
            &self.config.endcap
        } else {
            &self.config.barrel
        };
        (terms.stochastic.powi(2) / energy + terms.constant.powi(2)).sqrt()
    }

    pub fn cluster_resolution(&self, cluster: &Cluster) -> f64 {
        self.resolution(cluster.energy, cluster.position.eta())
    }

    /// 1 + exp(-E / scale); lies in (1, 2] for non-negative energies
    pub fn nsigma(&self, energy: f64) -> f64 {
        1.0 + (-energy / self.config.nsigma_energy_scale).exp()
    }

    /// Relative excess above which the calorimeter energy is significant
    pub fn threshold(&self, cluster: &Cluster) -> f64 {
        self.nsigma(cluster.energy) * self.cluster_resolution(cluster)
    }
}

impl Default for HcalResolutionModel {
    fn default() -> Self {
        Self::new(HcalResolutionConfig::default())
    }
}
