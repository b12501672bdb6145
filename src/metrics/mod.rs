//! Score modules for a planting plan
//!
//! Each score lives in its own module. All are pure functions of the placed
//! species (and forest age where yield matters); nothing is cached between
//! calls.

pub mod biodiversity;
pub mod yield_score;
pub mod vertical_structure;
pub mod fixed_profit;

pub use biodiversity::{calculate_biodiversity, BiodiversityResult};
pub use yield_score::{calculate_yield, YieldResult};
pub use vertical_structure::{calculate_vertical_structure, VerticalStructureResult};
pub use fixed_profit::{calculate_fixed_profit, FIXED_ANNUAL_COST, FIXED_SETUP_COST};

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::SpeciesRecord;

/// Headline scores for one plan at one forest age
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    pub biodiversity_score: u64,
    pub yield_score: u64,
    pub vertical_score: u64,
    /// Fixed-cost profit estimate (see [`fixed_profit`])
    pub profit: f64,
}

impl ScoreSnapshot {
    pub fn total_score(&self) -> u64 {
        self.biodiversity_score + self.yield_score + self.vertical_score
    }
}

/// Detailed breakdown behind a [`ScoreSnapshot`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreDetails {
    pub biodiversity: BiodiversityResult,
    pub yield_result: YieldResult,
    pub vertical: VerticalStructureResult,
}

pub fn score_plan(placed: &[Arc<SpeciesRecord>], forest_age: u32) -> (ScoreSnapshot, ScoreDetails) {
    let biodiversity = calculate_biodiversity(placed);
    let yield_result = calculate_yield(placed, forest_age);
    let vertical = calculate_vertical_structure(placed);

    let snapshot = ScoreSnapshot {
        biodiversity_score: biodiversity.score,
        yield_score: yield_result.score,
        vertical_score: vertical.score,
        profit: calculate_fixed_profit(placed, forest_age),
    };

    (
        snapshot,
        ScoreDetails {
            biodiversity,
            yield_result,
            vertical,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::*;

    #[test]
    fn test_mango_lemongrass_snapshot() {
        let placed: Vec<_> = [mango(), lemongrass()].into_iter().map(Arc::new).collect();
        let (snapshot, details) = score_plan(&placed, 5);

        assert_eq!(snapshot.yield_score, 60);
        assert_eq!(snapshot.biodiversity_score, 20);
        // Canopy 10 + Herbaceous 10
        assert_eq!(snapshot.vertical_score, 20);
        assert_eq!(snapshot.total_score(), 100);
        assert_eq!(details.biodiversity.distinct_layers, 2);
    }
}
