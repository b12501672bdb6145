//! SCORE: FIXED-COST PROFIT
//!
//! Quick profit estimate shown beside the scores. It uses flat costs (1000
//! setup, 500 per year) and ignores the editable cost sheet, so it can
//! disagree with the net profit from [`crate::economics`]. Both figures are
//! reported separately.
//!
//! profit = total_income × age − (1000 + 500 × age)

use std::sync::Arc;

use crate::catalog::SpeciesRecord;
use crate::utils::annual_income;

pub const FIXED_SETUP_COST: f64 = 1000.0;
pub const FIXED_ANNUAL_COST: f64 = 500.0;

pub fn calculate_fixed_profit(placed: &[Arc<SpeciesRecord>], forest_age: u32) -> f64 {
    let total_income: f64 = placed.iter().map(|s| annual_income(s, forest_age)).sum();
    let age = forest_age as f64;
    total_income * age - (FIXED_SETUP_COST + FIXED_ANNUAL_COST * age)
}
