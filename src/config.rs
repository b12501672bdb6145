//! Plan Configuration
//!
//! JSON file describing a plan to evaluate: where the species catalog lives,
//! the land size, forest age, cost sheet and an optional list of initial
//! placements.
//!
//! ```json
//! {
//!   "catalogPath": "species.json",
//!   "land": { "mode": "acre", "sizeInAcres": 0.5 },
//!   "forestAge": 8,
//!   "costs": { "setupCosts": { "saplings": 1200 }, "annualCosts": { "labour": 300 } },
//!   "placements": [ { "x": 0, "y": 0, "speciesId": "mango" } ]
//! }
//! ```
//!
//! A relative `catalogPath` is resolved against the config file's directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::SpeciesCatalog;
use crate::economics::CostSheet;
use crate::error::{PlannerError, PlannerResult};
use crate::grid::{CellCoord, LandSize};
use crate::placement::{PlacementOutcome, PlacementRule};
use crate::session::{PlanningSession, DEFAULT_FOREST_AGE};

/// Forest ages covered by the year-by-year projection (UI range is 1-50)
pub const DEFAULT_PROJECTION_YEARS: u32 = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementCommand {
    pub x: usize,
    pub y: usize,
    pub species_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerConfig {
    pub catalog_path: PathBuf,
    #[serde(default)]
    pub land: LandSize,
    #[serde(default = "default_forest_age")]
    pub forest_age: u32,
    #[serde(default)]
    pub costs: CostSheet,
    #[serde(default)]
    pub placement_rule: PlacementRule,
    #[serde(default)]
    pub placements: Vec<PlacementCommand>,
    #[serde(default = "default_projection_years")]
    pub projection_years: u32,

    /// Directory of the config file, for resolving relative paths
    #[serde(skip)]
    base_dir: PathBuf,
}

fn default_forest_age() -> u32 {
    DEFAULT_FOREST_AGE
}

fn default_projection_years() -> u32 {
    DEFAULT_PROJECTION_YEARS
}

impl PlannerConfig {
    pub fn load(path: &Path) -> PlannerResult<Self> {
        let contents = fs::read_to_string(path).map_err(|source| PlannerError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut config = Self::from_json(&contents).map_err(|source| PlannerError::Json {
            path: path.display().to_string(),
            source,
        })?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn resolved_catalog_path(&self) -> PathBuf {
        if self.catalog_path.is_absolute() {
            self.catalog_path.clone()
        } else {
            self.base_dir.join(&self.catalog_path)
        }
    }

    /// Load the catalog; `.csv` files go through the table reader, anything
    /// else is parsed as JSON
    pub fn load_catalog(&self) -> PlannerResult<SpeciesCatalog> {
        let path = self.resolved_catalog_path();
        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .map_or(false, |e| e.eq_ignore_ascii_case("csv"));

        if is_csv {
            SpeciesCatalog::load_csv(&path)
        } else {
            SpeciesCatalog::load_json(&path)
        }
    }

    /// Build a session and apply the configured placements in order
    pub fn build_session(
        &self,
        catalog: Arc<SpeciesCatalog>,
    ) -> (PlanningSession, Vec<PlacementOutcome>) {
        let mut session = PlanningSession::new(catalog, self.land)
            .with_rule(self.placement_rule.clone())
            .with_costs(self.costs.clone());
        session.set_forest_age(self.forest_age);

        let outcomes = self
            .placements
            .iter()
            .map(|p| session.place(CellCoord::new(p.x, p.y), &p.species_id))
            .collect();

        (session, outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::catalog;
    use crate::catalog::VerticalLayer;

    const PLAN: &str = r#"{
        "catalogPath": "species.json",
        "land": { "mode": "custom", "lengthFt": 27, "widthFt": 45 },
        "forestAge": 5,
        "costs": { "setupCosts": { "saplings": 100 } },
        "placements": [
            { "x": 0, "y": 0, "speciesId": "mango" },
            { "x": 0, "y": 0, "speciesId": "jackfruit" },
            { "x": 1, "y": 0, "speciesId": "durian" }
        ]
    }"#;

    #[test]
    fn test_defaults() {
        let config = PlannerConfig::from_json(r#"{ "catalogPath": "/data/species.csv" }"#).unwrap();
        assert_eq!(config.forest_age, DEFAULT_FOREST_AGE);
        assert_eq!(config.projection_years, DEFAULT_PROJECTION_YEARS);
        assert_eq!(config.land, LandSize::default());
        assert_eq!(config.placement_rule.cap(VerticalLayer::Canopy), 1);
        assert_eq!(config.resolved_catalog_path(), PathBuf::from("/data/species.csv"));
    }

    #[test]
    fn test_build_session_applies_placements() {
        let config = PlannerConfig::from_json(PLAN).unwrap();
        let (session, outcomes) = config.build_session(Arc::new(catalog()));

        assert_eq!(session.grid().size(), 3);
        assert_eq!(session.forest_age(), 5);
        assert_eq!(outcomes[0], PlacementOutcome::Placed { index: 0 });
        assert!(matches!(outcomes[1], PlacementOutcome::LayerFull { .. }));
        assert_eq!(outcomes[2], PlacementOutcome::UnknownSpecies);
        assert_eq!(session.grid().plant_count(), 1);
        assert_eq!(session.costs().total_setup(), 100.0);
    }

    #[test]
    fn test_relative_catalog_path() {
        let dir = std::env::temp_dir().join(format!("plan_cfg_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("plan.json");
        fs::write(&path, PLAN).unwrap();

        let config = PlannerConfig::load(&path).unwrap();
        fs::remove_dir_all(&dir).ok();
        assert_eq!(config.resolved_catalog_path(), dir.join("species.json"));
    }
}
