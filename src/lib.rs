//! depgauge: package dependency graphs and coupling metrics for
//! object-oriented code.
//!
//! A parser drives the [`Registry`] while it reads source files; once all
//! files are processed, the [`CouplingAnalyzer`] walks the finished graph and
//! reports Martin package metrics and package cycles.

// Core infrastructure - re-exported from depgauge-core
pub use depgauge_core::config;
pub use depgauge_core::error;
pub use depgauge_core::graph;
pub use depgauge_core::registry;
pub use depgauge_core::types;
pub use depgauge_core::visitor;

// Analysis
pub mod coupling;

pub use coupling::{CouplingAnalyzer, CouplingReport, NodeKey, PackageStats, Zone};
pub use depgauge_core::config::RegistryConfig;
pub use depgauge_core::error::{ErrorCode, GaugeError, Result};
pub use depgauge_core::registry::Registry;
