//! Particle building and the hcal energy balance

mod builders;
mod energy_balance;

pub use builders::{track_energy, ParticleBuilder};
pub use energy_balance::EnergyBalance;
