//! Three-vectors and Lorentz four-vectors (natural units, c = 1)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul};

/// Cartesian three-vector
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// |v|² = x² + y² + z²
    pub fn mag2(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn mag(&self) -> f64 {
        self.mag2().sqrt()
    }

    /// Transverse component √(x² + y²)
    pub fn perp(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector along this direction; the null vector maps to itself
    pub fn unit(&self) -> Self {
        let mag = self.mag();
        if mag > 0.0 {
            *self * (1.0 / mag)
        } else {
            *self
        }
    }

    /// Polar angle θ
    pub fn theta(&self) -> f64 {
        if self.x == 0.0 && self.y == 0.0 && self.z == 0.0 {
            0.0
        } else {
            self.perp().atan2(self.z)
        }
    }

    /// Azimuthal angle φ = atan2(y, x)
    pub fn phi(&self) -> f64 {
        if self.x == 0.0 && self.y == 0.0 {
            0.0
        } else {
            self.y.atan2(self.x)
        }
    }

    /// Pseudorapidity η = -ln(tan(θ/2))
    ///
    /// Vectors along the beam axis give ±infinity.
    pub fn eta(&self) -> f64 {
        let perp = self.perp();
        if perp == 0.0 {
            return if self.z > 0.0 {
                f64::INFINITY
            } else if self.z < 0.0 {
                f64::NEG_INFINITY
            } else {
                0.0
            };
        }
        let cos_theta = self.z / self.mag();
        0.5 * ((1.0 + cos_theta) / (1.0 - cos_theta)).ln()
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, other: Vector3) -> Vector3 {
        Vector3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    fn mul(self, scale: f64) -> Vector3 {
        Vector3::new(self.x * scale, self.y * scale, self.z * scale)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

/// Four-momentum p^μ = (px, py, pz, E)
///
/// Satisfies the mass-shell condition E² - |p|² = m²
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LorentzVector {
    pub px: f64,
    pub py: f64,
    pub pz: f64,
    pub e: f64,
}

impl LorentzVector {
    pub const fn new(px: f64, py: f64, pz: f64, e: f64) -> Self {
        Self { px, py, pz, e }
    }

    /// Build from a momentum three-vector and a fixed mass hypothesis
    pub fn from_momentum_and_mass(p3: Vector3, mass: f64) -> Self {
        let e = (p3.mag2() + mass * mass).sqrt();
        Self::new(p3.x, p3.y, p3.z, e)
    }

    /// Build from a momentum three-vector and an energy
    pub fn from_momentum_and_energy(p3: Vector3, e: f64) -> Self {
        Self::new(p3.x, p3.y, p3.z, e)
    }

    pub fn p3(&self) -> Vector3 {
        Vector3::new(self.px, self.py, self.pz)
    }

    pub fn p(&self) -> f64 {
        self.p3().mag()
    }

    pub fn pt(&self) -> f64 {
        self.p3().perp()
    }

    pub fn eta(&self) -> f64 {
        self.p3().eta()
    }

    pub fn theta(&self) -> f64 {
        self.p3().theta()
    }

    pub fn phi(&self) -> f64 {
        self.p3().phi()
    }

    /// m² = E² - |p|²
    pub fn mass2(&self) -> f64 {
        self.e * self.e - self.p3().mag2()
    }

    /// Invariant mass; spacelike vectors return -√(-m²)
    pub fn mass(&self) -> f64 {
        let m2 = self.mass2();
        if m2 >= 0.0 {
            m2.sqrt()
        } else {
            -(-m2).sqrt()
        }
    }
}

impl Add for LorentzVector {
    type Output = LorentzVector;

    fn add(self, other: LorentzVector) -> LorentzVector {
        LorentzVector::new(
            self.px + other.px,
            self.py + other.py,
            self.pz + other.pz,
            self.e + other.e,
        )
    }
}
