//! SCORE: BIODIVERSITY
//!
//! Rewards species richness, with a flat bonus once every one of the seven
//! vertical layers is in use.
//!
//! score = distinct_species × 10 + (50 if distinct_layers == 7 else 0)

use std::sync::Arc;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::catalog::{SpeciesRecord, VerticalLayer};

pub const POINTS_PER_SPECIES: u64 = 10;
pub const FULL_STRATIFICATION_BONUS: u64 = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiodiversityResult {
    pub score: u64,
    /// Distinct species names on the grid
    pub distinct_species: usize,
    /// Distinct vertical layers on the grid (0-7)
    pub distinct_layers: usize,
    pub full_stratification: bool,
}

pub fn calculate_biodiversity(placed: &[Arc<SpeciesRecord>]) -> BiodiversityResult {
    let names: FxHashSet<&str> = placed.iter().map(|s| s.name.as_str()).collect();
    let layers: FxHashSet<VerticalLayer> = placed.iter().map(|s| s.layer).collect();

    let full_stratification = layers.len() == VerticalLayer::ALL.len();
    let bonus = if full_stratification { FULL_STRATIFICATION_BONUS } else { 0 };

    BiodiversityResult {
        score: names.len() as u64 * POINTS_PER_SPECIES + bonus,
        distinct_species: names.len(),
        distinct_layers: layers.len(),
        full_stratification,
    }
}
