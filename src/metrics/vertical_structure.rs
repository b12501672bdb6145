//! SCORE: VERTICAL STRUCTURE
//!
//! Rewards filling each stratum, with diminishing returns: every layer earns
//! 10 points per plant up to 5 plants (max 50 per layer, 350 overall).

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::{SpeciesRecord, VerticalLayer};

pub const LAYER_SATURATION: usize = 5;
pub const POINTS_PER_LAYER_PLANT: u64 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerticalStructureResult {
    pub score: u64,
    /// Plant count per occupied layer
    pub layer_counts: BTreeMap<VerticalLayer, usize>,
    /// Layers at or above saturation
    pub saturated_layers: Vec<VerticalLayer>,
}

pub fn calculate_vertical_structure(placed: &[Arc<SpeciesRecord>]) -> VerticalStructureResult {
    let mut layer_counts: BTreeMap<VerticalLayer, usize> = BTreeMap::new();
    for s in placed {
        *layer_counts.entry(s.layer).or_insert(0) += 1;
    }

    let score = layer_counts
        .values()
        .map(|&n| n.min(LAYER_SATURATION) as u64 * POINTS_PER_LAYER_PLANT)
        .sum();

    let saturated_layers = layer_counts
        .iter()
        .filter(|(_, n)| **n >= LAYER_SATURATION)
        .map(|(layer, _)| *layer)
        .collect();

    VerticalStructureResult {
        score,
        layer_counts,
        saturated_layers,
    }
}
