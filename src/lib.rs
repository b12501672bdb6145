//! Food Forest Planner
//!
//! Planning-grid and scoring engine for perennial polycultures. Species from
//! a read-only catalog are placed on a square grid of 9 × 9 ft cells; every
//! change is followed by a full re-derivation of scores, companion findings
//! and economics.
//!
//! - `catalog`: species records and lookup
//! - `grid`: cell occupancy and land-size → grid-size conversion
//! - `placement`: per-layer density caps for add/remove
//! - `compatibility`: companion pairs and suggestions
//! - `metrics/`: biodiversity, yield, vertical structure, fixed-cost profit
//! - `economics`: income, net profit and ROI against a cost sheet
//! - `session`: owned planning state and `recompute`
//! - `projection`: year-by-year evaluation
//! - `export/`: CSV rows and SVG drawing

pub mod error;
pub mod utils;
pub mod catalog;
pub mod grid;
pub mod placement;
pub mod compatibility;
pub mod metrics;
pub mod economics;
pub mod session;
pub mod projection;
pub mod config;
pub mod export;

// Re-export commonly used types
pub use error::{PlannerError, PlannerResult};
pub use catalog::{SpeciesCatalog, SpeciesRecord, VerticalLayer};
pub use grid::{derive_grid_size, CellCoord, GridModel, LandSize};
pub use placement::{PlacementOutcome, PlacementRule};
pub use compatibility::{CompatibilityFinding, CompatibilityReport, Relation};
pub use metrics::ScoreSnapshot;
pub use economics::{CostSheet, EconomicState};
pub use session::{DerivedView, PlanningSession};
pub use projection::{break_even_year, project_years, YearProjection};
pub use config::PlannerConfig;
