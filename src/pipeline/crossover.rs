// =============================================================================
// Moving-Average Crossover Classification
// =============================================================================
//
// A golden cross marks the short moving average overtaking the long one; a
// death cross marks the reverse. Classification is a single stateful
// forward pass: each index compares SMA10 against SMA50 into a tri-state
// strength, and a cross fires only when both the current and the previous
// strength are defined and they disagree.
// =============================================================================

use serde::Serialize;

/// Relative strength of the short moving average versus the long one at a
/// single index.
///
/// `Unknown` covers every index where either average is still inside its
/// warm-up (a padding sentinel). Ties count as `Strong` — the comparison is
/// `>=` on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Unknown,
    Weak,
    Strong,
}

impl Strength {
    /// Classify one index from the padded SMA series.
    pub fn classify(sma10: Option<f64>, sma50: Option<f64>) -> Self {
        match (sma10, sma50) {
            (Some(short), Some(long)) => {
                if short >= long {
                    Self::Strong
                } else {
                    Self::Weak
                }
            }
            _ => Self::Unknown,
        }
    }
}

/// Discrete crossover event between two moving averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CrossType {
    #[serde(rename = "golden-cross")]
    GoldenCross,
    #[serde(rename = "death-cross")]
    DeathCross,
}

/// Carries the previous index's strength across one forward pass.
///
/// The tracker is consumed by a single series walk and never shared between
/// runs. "Previous" means the immediately preceding index — unknowns are
/// not skipped, so a transition out of an unknown run never itself counts
/// as a cross; the first defined-to-defined flip afterwards is the earliest
/// possible one.
#[derive(Debug)]
pub struct CrossoverTracker {
    prev: Strength,
}

impl CrossoverTracker {
    pub fn new() -> Self {
        Self {
            prev: Strength::Unknown,
        }
    }

    /// Advance one index: classify the strength at this index and report a
    /// cross if the defined strength flipped since the previous index.
    pub fn update(&mut self, sma10: Option<f64>, sma50: Option<f64>) -> (Strength, Option<CrossType>) {
        let current = Strength::classify(sma10, sma50);

        let cross = match (self.prev, current) {
            (Strength::Weak, Strength::Strong) => Some(CrossType::GoldenCross),
            (Strength::Strong, Strength::Weak) => Some(CrossType::DeathCross),
            _ => None,
        };

        self.prev = current;
        (current, cross)
    }
}

impl Default for CrossoverTracker {
    fn default() -> Self {
        Self::new()
    }
}
