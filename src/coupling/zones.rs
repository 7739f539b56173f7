//! Zone classification.

use super::types::Zone;

/// Distance threshold for main sequence classification.
pub const MAIN_SEQUENCE_THRESHOLD: f64 = 0.3;

/// Classify a package from its instability and abstractness.
///
/// The main sequence is the line `A + I = 1`. Packages within the threshold
/// of it are on the main sequence. Below the line (`A + I < 1`) a package is
/// more stable and concrete than its abstractness justifies: zone of pain.
/// Above it a package is abstract with few dependents: zone of uselessness.
pub fn classify_zone(instability: f64, abstractness: f64) -> Zone {
    let offset = abstractness + instability - 1.0;
    if offset.abs() <= MAIN_SEQUENCE_THRESHOLD {
        Zone::MainSequence
    } else if offset < 0.0 {
        Zone::ZoneOfPain
    } else {
        Zone::ZoneOfUselessness
    }
}
