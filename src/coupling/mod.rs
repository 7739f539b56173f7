//! Package coupling metrics.
//!
//! For every package the analyzer computes Robert C. Martin's metrics:
//!
//! - **Ca** (afferent coupling): distinct packages depending on it
//! - **Ce** (efferent coupling): distinct packages it depends on
//! - **A** (abstractness): abstract types / total types
//! - **I** (instability): Ce / (Ca + Ce)
//! - **D** (distance from the main sequence): |A + I - 1|
//!
//! and detects circular package dependencies.
//!
//! ```ignore
//! use depgauge::coupling::CouplingAnalyzer;
//!
//! let mut analyzer = CouplingAnalyzer::new();
//! analyzer.analyze(&registry);
//! let report = analyzer.summary();
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! ```

mod analyzer;
mod cycles;
mod types;
mod zones;

pub use analyzer::CouplingAnalyzer;
pub use types::{CouplingReport, NodeKey, PackageStats, Zone};
pub use zones::{classify_zone, MAIN_SEQUENCE_THRESHOLD};
