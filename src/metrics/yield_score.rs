//! SCORE: YIELD
//!
//! Total age-adjusted annual yield across every placed plant, floored to an
//! integer. Units are mixed (kg, bunches, litres); the score is a relative
//! productivity figure, not a harvest forecast.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::SpeciesRecord;
use crate::utils::{effective_yield, maturity_factor};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldResult {
    pub score: u64,
    /// Unfloored sum
    pub raw: f64,
    /// Plants already at full yield
    pub mature_plants: usize,
}

pub fn calculate_yield(placed: &[Arc<SpeciesRecord>], forest_age: u32) -> YieldResult {
    let raw: f64 = placed.iter().map(|s| effective_yield(s, forest_age)).sum();
    let mature_plants = placed
        .iter()
        .filter(|s| maturity_factor(forest_age, s.maturity_age) >= 1.0)
        .count();

    YieldResult {
        score: libm::floor(raw.max(0.0)) as u64,
        raw,
        mature_plants,
    }
}
