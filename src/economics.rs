//! Economic Projector
//!
//! Income per species from age-adjusted yield, and net profit / ROI against
//! the user's own cost sheet.
//!
//! net_profit = (Σ income − Σ annual costs) × age − Σ setup costs
//! roi        = net_profit / (Σ setup + Σ annual × age) × 100, or 0 when the
//!              denominator is not positive

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::SpeciesRecord;
use crate::utils::annual_income;

/// User-editable cost inputs, keyed by cost name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSheet {
    #[serde(default)]
    pub setup_costs: BTreeMap<String, f64>,
    #[serde(default)]
    pub annual_costs: BTreeMap<String, f64>,
}

impl CostSheet {
    pub fn set_setup_cost(&mut self, name: impl Into<String>, amount: f64) {
        self.setup_costs.insert(name.into(), amount);
    }

    pub fn set_annual_cost(&mut self, name: impl Into<String>, amount: f64) {
        self.annual_costs.insert(name.into(), amount);
    }

    pub fn remove_setup_cost(&mut self, name: &str) -> Option<f64> {
        self.setup_costs.remove(name)
    }

    pub fn remove_annual_cost(&mut self, name: &str) -> Option<f64> {
        self.annual_costs.remove(name)
    }

    pub fn total_setup(&self) -> f64 {
        self.setup_costs.values().sum()
    }

    pub fn total_annual(&self) -> f64 {
        self.annual_costs.values().sum()
    }
}

/// Net profit and return on investment over `forest_age` years
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfitProjection {
    pub net_profit: f64,
    /// Percent
    pub roi: f64,
}

/// Economic outputs for the current plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomicState {
    pub setup_costs: BTreeMap<String, f64>,
    pub annual_costs: BTreeMap<String, f64>,
    pub income_by_species: BTreeMap<String, f64>,
    pub total_income: f64,
    pub net_profit: f64,
    pub roi: f64,
}

/// Annual income per species name, summing every placed instance
pub fn project_income(placed: &[Arc<SpeciesRecord>], forest_age: u32) -> BTreeMap<String, f64> {
    let mut income: BTreeMap<String, f64> = BTreeMap::new();
    for s in placed {
        *income.entry(s.name.clone()).or_insert(0.0) += annual_income(s, forest_age);
    }
    income
}

pub fn project_profit(
    income: &BTreeMap<String, f64>,
    costs: &CostSheet,
    forest_age: u32,
) -> ProfitProjection {
    let age = forest_age as f64;
    let total_income: f64 = income.values().sum();
    let total_setup = costs.total_setup();
    let total_annual = costs.total_annual();

    let net_profit = (total_income - total_annual) * age - total_setup;

    let invested = total_setup + total_annual * age;
    let roi = if invested > 0.0 {
        net_profit / invested * 100.0
    } else {
        0.0
    };

    ProfitProjection { net_profit, roi }
}

pub fn project_economics(
    placed: &[Arc<SpeciesRecord>],
    costs: &CostSheet,
    forest_age: u32,
) -> EconomicState {
    let income_by_species = project_income(placed, forest_age);
    let profit = project_profit(&income_by_species, costs, forest_age);

    EconomicState {
        setup_costs: costs.setup_costs.clone(),
        annual_costs: costs.annual_costs.clone(),
        total_income: income_by_species.values().sum(),
        income_by_species,
        net_profit: profit.net_profit,
        roi: profit.roi,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::*;
    use approx::assert_relative_eq;

    fn sheet(setup: &[(&str, f64)], annual: &[(&str, f64)]) -> CostSheet {
        let mut costs = CostSheet::default();
        for (name, amount) in setup {
            costs.set_setup_cost(*name, *amount);
        }
        for (name, amount) in annual {
            costs.set_annual_cost(*name, *amount);
        }
        costs
    }

    #[test]
    fn test_income_merges_instances() {
        let placed: Vec<_> = [mango(), mango(), lemongrass()].into_iter().map(Arc::new).collect();
        let income = project_income(&placed, 5);
        assert_eq!(income.len(), 2);
        assert_relative_eq!(income["Mango"], 200.0, epsilon = 1e-9);
        assert_relative_eq!(income["Lemongrass"], 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_profit_and_roi() {
        let income = BTreeMap::from([("Mango".to_string(), 200.0)]);
        let costs = sheet(&[("saplings", 300.0), ("irrigation", 200.0)], &[("labour", 50.0)]);

        let p = project_profit(&income, &costs, 4);
        // (200 − 50) × 4 − 500 = 100; invested 500 + 200 = 700
        assert_relative_eq!(p.net_profit, 100.0, epsilon = 1e-9);
        assert_relative_eq!(p.roi, 100.0 / 700.0 * 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_denominator_roi() {
        let income = BTreeMap::from([("Mango".to_string(), 200.0)]);
        let p = project_profit(&income, &CostSheet::default(), 3);
        assert_eq!(p.roi, 0.0);
        assert_relative_eq!(p.net_profit, 600.0, epsilon = 1e-9);

        // Annual costs only, at age zero
        let costs = sheet(&[], &[("labour", 50.0)]);
        assert_eq!(project_profit(&income, &costs, 0).roi, 0.0);
    }

    #[test]
    fn test_cost_edits() {
        let mut costs = sheet(&[("fencing", 100.0)], &[]);
        costs.set_setup_cost("fencing", 150.0);
        costs.set_annual_cost("mulch", 20.0);
        assert_relative_eq!(costs.total_setup(), 150.0);
        assert_eq!(costs.remove_annual_cost("mulch"), Some(20.0));
        assert_eq!(costs.total_annual(), 0.0);
    }

    #[test]
    fn test_economic_state_totals() {
        let placed: Vec<_> = [mango(), lemongrass()].into_iter().map(Arc::new).collect();
        let costs = sheet(&[("saplings", 100.0)], &[("water", 10.0)]);
        let state = project_economics(&placed, &costs, 5);
        assert_relative_eq!(state.total_income, 110.0, epsilon = 1e-9);
        assert_relative_eq!(state.net_profit, (110.0 - 10.0) * 5.0 - 100.0, epsilon = 1e-9);
        assert_eq!(state.setup_costs["saplings"], 100.0);
    }
}
