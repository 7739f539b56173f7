//! Result types produced by the coupling analyzer.
//!
//! All types serialize with serde so downstream reporters can emit them
//! without depending on analyzer internals.

use serde::{Deserialize, Serialize};

use depgauge_core::graph::{PackageId, TypeId};

/// Node a coupling query is asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum NodeKey {
    Package(PackageId),
    Type(TypeId),
}

impl From<PackageId> for NodeKey {
    fn from(id: PackageId) -> Self {
        NodeKey::Package(id)
    }
}

impl From<TypeId> for NodeKey {
    fn from(id: TypeId) -> Self {
        NodeKey::Type(id)
    }
}

/// Position of a package relative to the main sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    /// Balanced: distance within the threshold.
    MainSequence,
    /// Stable and concrete: hard to change.
    ZoneOfPain,
    /// Unstable and abstract: abstractions nobody uses.
    ZoneOfUselessness,
}

/// Martin metrics for one package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageStats {
    /// Package name.
    pub package: String,
    /// Number of types.
    pub total_types: usize,
    /// Types that are not abstract.
    pub concrete_types: usize,
    /// Abstract classes, interfaces and traits.
    pub abstract_types: usize,
    /// Afferent coupling (Ca): distinct packages depending on this one.
    pub ca: usize,
    /// Efferent coupling (Ce): distinct packages this one depends on.
    pub ce: usize,
    /// A = abstract / total.
    pub abstractness: f64,
    /// I = Ce / (Ca + Ce).
    pub instability: f64,
    /// D = |A + I - 1|.
    pub distance: f64,
    pub zone: Zone,
}

/// Serializable summary of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouplingReport {
    /// Per-package metrics sorted by package name.
    pub packages: Vec<PackageStats>,
    /// Distinct package cycles as package names, first package repeated at
    /// the end.
    pub cycles: Vec<Vec<String>>,
}

impl CouplingReport {
    /// True when no package takes part in a cycle.
    pub fn is_acyclic(&self) -> bool {
        self.cycles.is_empty()
    }
}
