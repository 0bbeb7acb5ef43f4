//! Defines the index distance metrics and pod types understood by the control plane.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use crate::error::PineconeError;

/// Enum representing supported distance metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Cosine similarity. Higher scores mean more similar.
    Cosine,
    /// Euclidean (L2) distance. Lower scores mean more similar.
    Euclidean,
    /// Dot product. Higher scores mean more similar.
    Dotproduct,
}

impl Default for Metric {
    fn default() -> Self {
        Metric::Cosine
    }
}

/// Hardware tier backing an index: a pod family (`s1`, `p1`, `p2`) and a size (`x1` .. `x8`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PodType {
    S1X1,
    S1X2,
    S1X4,
    S1X8,
    P1X1,
    P1X2,
    P1X4,
    P1X8,
    P2X1,
    P2X2,
    P2X4,
    P2X8,
}

const POD_TYPES: [(PodType, &str); 12] = [
    (PodType::S1X1, "s1.x1"),
    (PodType::S1X2, "s1.x2"),
    (PodType::S1X4, "s1.x4"),
    (PodType::S1X8, "s1.x8"),
    (PodType::P1X1, "p1.x1"),
    (PodType::P1X2, "p1.x2"),
    (PodType::P1X4, "p1.x4"),
    (PodType::P1X8, "p1.x8"),
    (PodType::P2X1, "p2.x1"),
    (PodType::P2X2, "p2.x2"),
    (PodType::P2X4, "p2.x4"),
    (PodType::P2X8, "p2.x8"),
];

impl PodType {
    /// Wire name, e.g. `"p1.x2"`.
    pub fn as_str(self) -> &'static str {
        // POD_TYPES is declared in variant order.
        POD_TYPES[self as usize].1
    }

    pub fn all() -> impl Iterator<Item = PodType> {
        POD_TYPES.iter().map(|(pod, _)| *pod)
    }
}

impl Default for PodType {
    fn default() -> Self {
        PodType::P1X1
    }
}

impl fmt::Display for PodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PodType {
    type Err = PineconeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        POD_TYPES
            .iter()
            .find(|(_, name)| *name == s)
            .map(|(pod, _)| *pod)
            .ok_or_else(|| PineconeError::RequestConstruction(format!("Unknown pod type '{}'", s)))
    }
}

impl Serialize for PodType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PodType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
