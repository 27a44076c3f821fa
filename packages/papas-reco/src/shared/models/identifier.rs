//! Identifiers for detector elements, particles and blocks
//!
//! An identifier carries its element kind and provenance subtype, decoded once
//! at construction. All cross references between entities go through
//! identifiers, never through embedded structures.
//!
//! Textual form is `<subtype><kind><index>`, e.g. `st3` (smeared track 3),
//! `mh12` (merged hcal cluster 12), `rp1` (reconstructed particle 1).

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::errors::{PapasError, Result};

/// Index width; leaves room for kind and subtype when packed into a u64
const INDEX_BITS: u32 = 56;
const INDEX_MASK: u64 = (1 << INDEX_BITS) - 1;

/// Kind of entity an identifier refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Track,
    EcalCluster,
    HcalCluster,
    Particle,
    Block,
}

impl ElementKind {
    pub fn letter(&self) -> char {
        match self {
            Self::Track => 't',
            Self::EcalCluster => 'e',
            Self::HcalCluster => 'h',
            Self::Particle => 'p',
            Self::Block => 'b',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            't' => Some(Self::Track),
            'e' => Some(Self::EcalCluster),
            'h' => Some(Self::HcalCluster),
            'p' => Some(Self::Particle),
            'b' => Some(Self::Block),
            _ => None,
        }
    }

    /// Tracks and calorimeter clusters; the only kinds a block may contain
    pub fn is_element(&self) -> bool {
        matches!(self, Self::Track | Self::EcalCluster | Self::HcalCluster)
    }
}

/// Provenance subtype
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Subtype {
    Generated,
    Smeared,
    Merged,
    Reconstructed,
}

impl Subtype {
    pub fn letter(&self) -> char {
        match self {
            Self::Generated => 'g',
            Self::Smeared => 's',
            Self::Merged => 'm',
            Self::Reconstructed => 'r',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'g' => Some(Self::Generated),
            's' => Some(Self::Smeared),
            'm' => Some(Self::Merged),
            'r' => Some(Self::Reconstructed),
            _ => None,
        }
    }
}

/// Globally unique, immutable identifier
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier {
    kind: ElementKind,
    subtype: Subtype,
    index: u64,
}

impl Identifier {
    pub fn new(kind: ElementKind, subtype: Subtype, index: u64) -> Self {
        Self {
            kind,
            subtype,
            index: index & INDEX_MASK,
        }
    }

    /// Id for a block split off `parent`, derived from the sorted member ids
    ///
    /// Identical inputs always give the same id, and the result never equals
    /// `parent` itself.
    pub fn derived_block(parent: Option<Identifier>, members: &[Identifier]) -> Self {
        let mut sorted = members.to_vec();
        sorted.sort();
        sorted.dedup();

        let mut hasher = Sha256::new();
        if let Some(parent) = parent {
            hasher.update(parent.to_string().as_bytes());
            hasher.update(b"/");
        }
        for id in &sorted {
            hasher.update(id.to_string().as_bytes());
            hasher.update(b",");
        }
        let digest = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        let mut index = u64::from_be_bytes(bytes) & INDEX_MASK;
        if Some(index) == parent.map(|p| p.index) {
            index = index.wrapping_add(1) & INDEX_MASK;
        }
        Self::new(ElementKind::Block, Subtype::Reconstructed, index)
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn subtype(&self) -> Subtype {
        self.subtype
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn is_track(&self) -> bool {
        self.kind == ElementKind::Track
    }

    pub fn is_ecal(&self) -> bool {
        self.kind == ElementKind::EcalCluster
    }

    pub fn is_hcal(&self) -> bool {
        self.kind == ElementKind::HcalCluster
    }

    /// Two-letter type code such as `st`, `me` or `rp`
    pub fn type_code(&self) -> String {
        let mut code = String::with_capacity(2);
        code.push(self.subtype.letter());
        code.push(self.kind.letter());
        code
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.subtype.letter(), self.kind.letter(), self.index)
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Identifier {
    type Err = PapasError;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        let subtype = chars.next().and_then(Subtype::from_letter);
        let kind = chars.next().and_then(ElementKind::from_letter);
        let index = chars.as_str().parse::<u64>().ok();
        match (subtype, kind, index) {
            (Some(subtype), Some(kind), Some(index)) if index <= INDEX_MASK => {
                Ok(Self::new(kind, subtype, index))
            }
            _ => Err(PapasError::InvalidIdentifier(s.to_string())),
        }
    }
}

impl TryFrom<String> for Identifier {
    type Error = PapasError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.to_string()
    }
}

/// Hands out sequential identifiers per (kind, subtype)
///
/// Counters start past every id passed to [`IdentifierFactory::observe`], so
/// freshly allocated particle ids never collide with input ids.
#[derive(Debug, Clone, Default)]
pub struct IdentifierFactory {
    counters: BTreeMap<(ElementKind, Subtype), u64>,
}

impl IdentifierFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an externally allocated id
    pub fn observe(&mut self, id: Identifier) {
        let counter = self.counters.entry((id.kind, id.subtype)).or_insert(0);
        if id.index >= *counter {
            *counter = id.index + 1;
        }
    }

    pub fn next(&mut self, kind: ElementKind, subtype: Subtype) -> Identifier {
        let counter = self.counters.entry((kind, subtype)).or_insert(1);
        let id = Identifier::new(kind, subtype, *counter);
        *counter += 1;
        id
    }
}
