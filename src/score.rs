//! Flat scoring: a fixed amount per merged piece plus a fixed amount per cleared row

use serde::{Deserialize, Serialize};

/// Points awarded per action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    /// Awarded every time a piece settles
    pub per_merge: u64,
    /// Awarded for each cleared row
    pub per_line: u64,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            per_merge: 0,
            per_line: 100,
        }
    }
}

/// Score tracking
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Total lines cleared
    pub lines: u32,
    /// Pieces merged into the board
    pub pieces: u32,
    #[serde(skip)]
    rules: ScoringRules,
}

impl Score {
    pub fn new(rules: ScoringRules) -> Self {
        Self {
            points: 0,
            lines: 0,
            pieces: 0,
            rules,
        }
    }

    pub fn rules(&self) -> ScoringRules {
        self.rules
    }

    /// Account for a settled piece that cleared `rows_cleared` rows.
    /// Returns the points added
    pub fn record_merge(&mut self, rows_cleared: usize) -> u64 {
        let delta = self
            .rules
            .per_merge
            .saturating_add(self.rules.per_line.saturating_mul(rows_cleared as u64));
        self.points = self.points.saturating_add(delta);
        self.lines += rows_cleared as u32;
        self.pieces += 1;
        delta
    }

    /// Back to zero, same rules
    pub fn reset(&mut self) {
        *self = Self::new(self.rules);
    }
}
