//! Centralized physics and reconstruction constants
//!
//! Defaults for the configurable parameters live here so the config layer and
//! the tests agree on a single source.

/// Particle type codes (PDG numbering)
pub mod pdg {
    pub const PHOTON: i32 = 22;

    /// Neutral kaon, stand-in for any neutral hadron
    pub const K0_LONG: i32 = 130;

    /// Charged pion, stand-in for any charged hadron; sign follows the charge
    pub const PION: i32 = 211;
}

/// Rest masses in GeV
pub mod mass {
    pub const PHOTON: f64 = 0.0;
    pub const K0_LONG: f64 = 0.497614;
    pub const CHARGED_PION: f64 = 0.13957;
}

/// Hcal energy resolution model (CMS parametrisation)
pub mod hcal_resolution {
    /// |eta| boundary between barrel and endcap
    pub const BARREL_ETA_MAX: f64 = 1.48;

    pub const BARREL_STOCHASTIC: f64 = 1.02;
    pub const BARREL_CONSTANT: f64 = 0.065;

    pub const ENDCAP_STOCHASTIC: f64 = 1.2;
    pub const ENDCAP_CONSTANT: f64 = 0.028;

    /// Energies below this floor are evaluated at the floor
    pub const MIN_ENERGY: f64 = 1.0;

    /// nsigma = 1 + exp(-E / NSIGMA_ENERGY_SCALE)
    pub const NSIGMA_ENERGY_SCALE: f64 = 100.0;
}
