//! Multi-Year Projection
//!
//! Evaluates a plan at a series of forest ages without touching the session,
//! e.g. to tabulate years 1-50 or find the break-even year. Ages are evaluated
//! in parallel with Rayon; output keeps the input order.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::economics::project_economics;
use crate::metrics::score_plan;
use crate::session::PlanningSession;

/// One row of a year-by-year projection table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearProjection {
    pub forest_age: u32,
    pub yield_score: u64,
    pub total_score: u64,
    pub total_income: f64,
    /// Fixed-cost profit estimate
    pub fixed_profit: f64,
    /// Profit against the session's cost sheet
    pub net_profit: f64,
    pub roi: f64,
}

pub fn project_years(session: &PlanningSession, ages: &[u32]) -> Vec<YearProjection> {
    let placed = session.placed();
    let costs = session.costs();

    ages.par_iter()
        .map(|&age| {
            let (scores, _) = score_plan(&placed, age);
            let economics = project_economics(&placed, costs, age);
            YearProjection {
                forest_age: age,
                yield_score: scores.yield_score,
                total_score: scores.total_score(),
                total_income: economics.total_income,
                fixed_profit: scores.profit,
                net_profit: economics.net_profit,
                roi: economics.roi,
            }
        })
        .collect()
}

/// First projected age with non-negative net profit
pub fn break_even_year(projections: &[YearProjection]) -> Option<u32> {
    projections
        .iter()
        .filter(|p| p.net_profit >= 0.0)
        .map(|p| p.forest_age)
        .min()
}
