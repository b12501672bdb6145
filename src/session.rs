//! Planning Session
//!
//! Owns everything a user edits: land size, grid, forest age, cost sheet and
//! placement rule. Derived values are never stored here; call
//! [`PlanningSession::recompute`] after a mutation to get a fresh
//! [`DerivedView`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::{SpeciesCatalog, SpeciesRecord};
use crate::compatibility::{analyze, suggest_companions, CompatibilityReport};
use crate::economics::{project_economics, CostSheet, EconomicState};
use crate::grid::{CellCoord, GridModel, LandSize};
use crate::metrics::{score_plan, ScoreDetails, ScoreSnapshot};
use crate::placement::{self, PlacementOutcome, PlacementRule};

pub const DEFAULT_FOREST_AGE: u32 = 1;

/// Everything the presentation layer shows after a change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedView {
    pub scores: ScoreSnapshot,
    pub total_score: u64,
    pub score_details: ScoreDetails,
    pub compatibility: CompatibilityReport,
    /// Companion suggestions, sorted for display (membership is what matters)
    pub suggestions: Vec<String>,
    pub economics: EconomicState,
}

#[derive(Debug, Clone)]
pub struct PlanningSession {
    catalog: Arc<SpeciesCatalog>,
    land: LandSize,
    grid: GridModel,
    forest_age: u32,
    costs: CostSheet,
    rule: PlacementRule,
}

impl PlanningSession {
    pub fn new(catalog: Arc<SpeciesCatalog>, land: LandSize) -> Self {
        Self {
            catalog,
            grid: GridModel::from_land(&land),
            land,
            forest_age: DEFAULT_FOREST_AGE,
            costs: CostSheet::default(),
            rule: PlacementRule::default(),
        }
    }

    pub fn with_rule(mut self, rule: PlacementRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn with_costs(mut self, costs: CostSheet) -> Self {
        self.costs = costs;
        self
    }

    pub fn catalog(&self) -> &SpeciesCatalog {
        &self.catalog
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn land(&self) -> LandSize {
        self.land
    }

    pub fn forest_age(&self) -> u32 {
        self.forest_age
    }

    pub fn costs(&self) -> &CostSheet {
        &self.costs
    }

    pub fn rule(&self) -> &PlacementRule {
        &self.rule
    }

    /// Place a catalog species by id; unknown ids leave the grid unchanged
    pub fn place(&mut self, coord: CellCoord, species_id: &str) -> PlacementOutcome {
        match self.catalog.get(species_id) {
            Some(species) => {
                let species = Arc::clone(species);
                placement::place(&mut self.grid, &self.rule, coord, species)
            }
            None => {
                tracing::debug!("Ignored placement of unknown species '{}'", species_id);
                PlacementOutcome::UnknownSpecies
            }
        }
    }

    /// Clear a cell; returns whether anything was removed
    pub fn remove(&mut self, coord: CellCoord) -> bool {
        placement::remove(&mut self.grid, coord).is_some()
    }

    pub fn last_occupant(&self, coord: CellCoord) -> Option<&Arc<SpeciesRecord>> {
        placement::last_occupant(&self.grid, coord)
    }

    /// Change the land size; the grid is rebuilt empty
    pub fn set_land_size(&mut self, land: LandSize) {
        let dropped = self.grid.plant_count();
        self.land = land;
        self.grid.resize(land.grid_size());
        tracing::info!(
            "Land size changed: grid is now {0}x{0}, {1} plantings cleared",
            self.grid.size(),
            dropped
        );
    }

    pub fn set_forest_age(&mut self, years: u32) {
        self.forest_age = years;
    }

    pub fn costs_mut(&mut self) -> &mut CostSheet {
        &mut self.costs
    }

    /// Every placed instance in grid order
    pub fn placed(&self) -> Vec<Arc<SpeciesRecord>> {
        self.grid.placed_species().cloned().collect()
    }

    /// Re-derive scores, compatibility and economics from the current state
    pub fn recompute(&self) -> DerivedView {
        let placed = self.placed();
        let (scores, score_details) = score_plan(&placed, self.forest_age);

        let mut suggestions: Vec<String> = suggest_companions(&placed).into_iter().collect();
        suggestions.sort();

        DerivedView {
            total_score: scores.total_score(),
            scores,
            score_details,
            compatibility: analyze(&placed),
            suggestions,
            economics: project_economics(&placed, &self.costs, self.forest_age),
        }
    }
}
