#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure scoring system that turns energy accounting into a final score.

mod leaderboard;

use energy_grid_core::EnergyReport;

pub use leaderboard::{Leaderboard, LeaderboardEntry, DEFAULT_LEADERBOARD_CAPACITY};

/// Fraction of wasted energy subtracted from the collected energy.
pub const DEFAULT_WASTE_PENALTY_RATE: f64 = 0.2;

/// Scores a run with the default waste penalty.
#[must_use]
pub fn score(collected: f64, wasted: f64) -> f64 {
    ScoreCalculator::default().score(collected, wasted)
}

/// Itemised score for a single propagation report.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScoreBreakdown {
    /// Energy harvested by collectors.
    pub collected: f64,
    /// Energy lost to obstacles and the board edge.
    pub wasted: f64,
    /// Amount subtracted for wasted energy.
    pub penalty: f64,
    /// Collected energy minus the penalty.
    pub final_score: f64,
}

/// Stateless calculator applying a linear waste penalty.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreCalculator {
    waste_penalty_rate: f64,
}

impl ScoreCalculator {
    /// Creates a calculator that subtracts `waste_penalty_rate` per unit of
    /// wasted energy.
    #[must_use]
    pub const fn new(waste_penalty_rate: f64) -> Self {
        Self { waste_penalty_rate }
    }

    /// Penalty rate applied to wasted energy.
    #[must_use]
    pub const fn waste_penalty_rate(&self) -> f64 {
        self.waste_penalty_rate
    }

    /// Penalty incurred for `wasted` energy.
    #[must_use]
    pub fn penalty(&self, wasted: f64) -> f64 {
        wasted * self.waste_penalty_rate
    }

    /// Final score for the provided totals.
    #[must_use]
    pub fn score(&self, collected: f64, wasted: f64) -> f64 {
        collected - self.penalty(wasted)
    }

    /// Itemises the score of a propagation report.
    #[must_use]
    pub fn breakdown(&self, report: &EnergyReport) -> ScoreBreakdown {
        let EnergyReport {
            collected, wasted, ..
        } = *report;
        let penalty = self.penalty(wasted);
        ScoreBreakdown {
            collected,
            wasted,
            penalty,
            final_score: collected - penalty,
        }
    }
}

impl Default for ScoreCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_WASTE_PENALTY_RATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn lone_generator_scores_negative_eighty() {
        assert!((score(0.0, 400.0) - -80.0).abs() < EPSILON);
    }

    #[test]
    fn collected_energy_counts_in_full() {
        assert_eq!(score(150.0, 0.0), 150.0);
    }

    #[test]
    fn custom_rate_scales_the_penalty() {
        let calculator = ScoreCalculator::new(0.5);
        assert_eq!(calculator.score(100.0, 40.0), 80.0);
        assert_eq!(calculator.waste_penalty_rate(), 0.5);
    }

    #[test]
    fn breakdown_itemises_the_report() {
        let report = EnergyReport {
            collected: 60.0,
            wasted: 340.0,
            max_single_waste: 100.0,
            total_output: 400.0,
        };
        let breakdown = ScoreCalculator::default().breakdown(&report);
        assert_eq!(breakdown.collected, 60.0);
        assert_eq!(breakdown.wasted, 340.0);
        assert!((breakdown.penalty - 68.0).abs() < EPSILON);
        assert!((breakdown.final_score - -8.0).abs() < EPSILON);
    }
}
