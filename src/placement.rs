//! Placement Engine
//!
//! Validates and applies add/remove commands against per-layer density caps.
//! Caps are counted per layer and per cell, independently of the other layers
//! sharing the cell: a cell can hold 1 Canopy, 4 Shrub and 7 Root plants at
//! the same time.
//!
//! Rejections are not errors. An over-cap or off-grid placement leaves the
//! grid untouched and reports why through [`PlacementOutcome`].

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::{SpeciesRecord, VerticalLayer};
use crate::grid::{CellCoord, CellOccupants, GridModel};

/// Cap for layers without an explicit entry
pub const DEFAULT_LAYER_CAP: usize = 7;

/// Maximum occupants of each vertical layer per cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRule {
    #[serde(default)]
    pub caps: BTreeMap<VerticalLayer, usize>,
    #[serde(default = "default_cap")]
    pub default_cap: usize,
}

fn default_cap() -> usize {
    DEFAULT_LAYER_CAP
}

impl Default for PlacementRule {
    fn default() -> Self {
        let caps = BTreeMap::from([
            (VerticalLayer::Canopy, 1),
            (VerticalLayer::Shrub, 4),
            (VerticalLayer::Root, 7),
        ]);
        Self {
            caps,
            default_cap: DEFAULT_LAYER_CAP,
        }
    }
}

impl PlacementRule {
    pub fn cap(&self, layer: VerticalLayer) -> usize {
        self.caps.get(&layer).copied().unwrap_or(self.default_cap)
    }
}

/// What happened to a placement command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PlacementOutcome {
    /// Appended at `index` within the cell
    Placed { index: usize },
    /// The cell already holds `cap` plants of this layer
    LayerFull { layer: VerticalLayer, cap: usize },
    OutOfBounds,
    /// Species id not in the catalog
    UnknownSpecies,
}

impl PlacementOutcome {
    pub fn is_placed(&self) -> bool {
        matches!(self, PlacementOutcome::Placed { .. })
    }
}

/// Number of plants of `layer` already in a cell
pub fn layer_count(occupants: &[Arc<SpeciesRecord>], layer: VerticalLayer) -> usize {
    occupants.iter().filter(|s| s.layer == layer).count()
}

/// Append `species` to the cell at `coord` if its layer has room
pub fn place(
    grid: &mut GridModel,
    rule: &PlacementRule,
    coord: CellCoord,
    species: Arc<SpeciesRecord>,
) -> PlacementOutcome {
    if !grid.contains(coord) {
        tracing::debug!("Rejected {} at ({}, {}): outside grid", species.name, coord.x, coord.y);
        return PlacementOutcome::OutOfBounds;
    }

    let occupants = grid.get(coord);
    let cap = rule.cap(species.layer);
    if layer_count(occupants, species.layer) >= cap {
        tracing::debug!(
            "Rejected {} at ({}, {}): {} layer full ({})",
            species.name, coord.x, coord.y, species.layer, cap
        );
        return PlacementOutcome::LayerFull {
            layer: species.layer,
            cap,
        };
    }

    let index = occupants.len();
    grid.push(coord, species);
    PlacementOutcome::Placed { index }
}

/// Clear every species in the cell; no-op for an empty cell
pub fn remove(grid: &mut GridModel, coord: CellCoord) -> Option<CellOccupants> {
    grid.clear(coord)
}

/// Replace a cell's contents wholesale, enforcing caps in planting order
///
/// Entries that would exceed their layer cap are dropped. Returns the number
/// of entries kept.
pub fn replace_cell(
    grid: &mut GridModel,
    rule: &PlacementRule,
    coord: CellCoord,
    species: impl IntoIterator<Item = Arc<SpeciesRecord>>,
) -> usize {
    if !grid.contains(coord) {
        return 0;
    }

    let mut kept = CellOccupants::new();
    for s in species {
        if layer_count(&kept, s.layer) < rule.cap(s.layer) {
            kept.push(s);
        }
    }
    let n = kept.len();
    grid.set(coord, kept);
    n
}

/// Most recently planted species in a cell
pub fn last_occupant(grid: &GridModel, coord: CellCoord) -> Option<&Arc<SpeciesRecord>> {
    grid.get(coord).last()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::*;

    fn shrub(name: &str) -> Arc<SpeciesRecord> {
        Arc::new(species(name, name, VerticalLayer::Shrub, 5.0, 2.0, 1.0, &[]))
    }

    #[test]
    fn test_default_caps() {
        let rule = PlacementRule::default();
        assert_eq!(rule.cap(VerticalLayer::Canopy), 1);
        assert_eq!(rule.cap(VerticalLayer::Shrub), 4);
        assert_eq!(rule.cap(VerticalLayer::Root), 7);
        assert_eq!(rule.cap(VerticalLayer::Vine), 7);
        assert_eq!(rule.cap(VerticalLayer::SubCanopy), 7);
    }

    #[test]
    fn test_second_canopy_rejected() {
        let mut grid = GridModel::new(3);
        let rule = PlacementRule::default();
        let c = CellCoord::new(0, 0);

        assert!(place(&mut grid, &rule, c, Arc::new(mango())).is_placed());
        let before = grid.clone();

        let outcome = place(&mut grid, &rule, c, Arc::new(jackfruit()));
        assert_eq!(
            outcome,
            PlacementOutcome::LayerFull { layer: VerticalLayer::Canopy, cap: 1 }
        );
        assert_eq!(grid, before);
    }

    #[test]
    fn test_caps_are_per_layer() {
        let mut grid = GridModel::new(2);
        let rule = PlacementRule::default();
        let c = CellCoord::new(1, 1);

        assert!(place(&mut grid, &rule, c, Arc::new(mango())).is_placed());
        for i in 0..4 {
            assert!(place(&mut grid, &rule, c, shrub(&format!("shrub{i}"))).is_placed());
        }
        assert!(!place(&mut grid, &rule, c, shrub("shrub4")).is_placed());

        // Other layers still have room
        for _ in 0..7 {
            assert!(place(&mut grid, &rule, c, Arc::new(lemongrass())).is_placed());
        }
        assert!(!place(&mut grid, &rule, c, Arc::new(lemongrass())).is_placed());
        assert_eq!(grid.get(c).len(), 1 + 4 + 7);
    }

    #[test]
    fn test_cap_invariant_holds_after_many_placements() {
        let mut grid = GridModel::new(2);
        let rule = PlacementRule::default();
        let pool = [Arc::new(mango()), Arc::new(lemongrass()), Arc::new(jackfruit()), shrub("hazel")];

        for i in 0..200 {
            let coord = CellCoord::new(i % 2, (i / 2) % 2);
            place(&mut grid, &rule, coord, pool[i % pool.len()].clone());
        }

        for (_, occupants) in grid.occupied_cells() {
            for layer in VerticalLayer::ALL {
                assert!(layer_count(occupants, layer) <= rule.cap(layer));
            }
        }
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let mut grid = GridModel::new(3);
        let outcome = place(&mut grid, &PlacementRule::default(), CellCoord::new(3, 0), Arc::new(mango()));
        assert_eq!(outcome, PlacementOutcome::OutOfBounds);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut grid = GridModel::new(3);
        let rule = PlacementRule::default();
        let c = CellCoord::new(2, 1);
        place(&mut grid, &rule, c, Arc::new(mango()));
        place(&mut grid, &rule, c, Arc::new(lemongrass()));
        place(&mut grid, &rule, CellCoord::new(0, 0), Arc::new(lemongrass()));

        let removed = remove(&mut grid, c).expect("cell was occupied");
        assert_eq!(removed.len(), 2);
        let once = grid.clone();

        assert!(remove(&mut grid, c).is_none());
        assert_eq!(grid, once);
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn test_last_occupant() {
        let mut grid = GridModel::new(3);
        let rule = PlacementRule::default();
        let c = CellCoord::new(0, 1);
        assert!(last_occupant(&grid, c).is_none());

        place(&mut grid, &rule, c, Arc::new(mango()));
        place(&mut grid, &rule, c, Arc::new(lemongrass()));
        assert_eq!(last_occupant(&grid, c).unwrap().name, "Lemongrass");
    }

    #[test]
    fn test_replace_cell_drops_over_cap() {
        let mut grid = GridModel::new(3);
        let rule = PlacementRule::default();
        let c = CellCoord::new(1, 0);
        let kept = replace_cell(
            &mut grid,
            &rule,
            c,
            vec![Arc::new(mango()), Arc::new(jackfruit()), Arc::new(lemongrass())],
        );
        assert_eq!(kept, 2);
        let names: Vec<&str> = grid.get(c).iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Mango", "Lemongrass"]);

        assert_eq!(replace_cell(&mut grid, &rule, c, Vec::new()), 0);
        assert!(grid.is_empty());
    }
}
