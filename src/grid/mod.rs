//! Grid Model
//!
//! Sparse mapping from cell coordinate to the ordered list of species planted
//! in that cell. Insertion order is planting order: the last entry is the most
//! recent planting and is drawn on top.
//!
//! Invariant: a coordinate is either absent or maps to a non-empty list.

pub mod land;

pub use land::{
    derive_grid_size, LandSize, CELL_AREA_SQ_FT, CELL_SIDE_FT, MAX_GRID_SIZE, SQ_FT_PER_ACRE,
};

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::catalog::SpeciesRecord;

/// Occupants of one cell (most cells hold a handful of plants)
pub type CellOccupants = SmallVec<[Arc<SpeciesRecord>; 4]>;

/// Integer cell position, `0 <= x, y < grid_size`
///
/// Ordered by `x` then `y`, which fixes the iteration order of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub x: usize,
    pub y: usize,
}

impl CellCoord {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridModel {
    size: usize,
    cells: BTreeMap<CellCoord, CellOccupants>,
}

impl GridModel {
    /// Empty square grid; size is clamped to `1..=MAX_GRID_SIZE`
    pub fn new(size: usize) -> Self {
        Self {
            size: size.clamp(1, MAX_GRID_SIZE),
            cells: BTreeMap::new(),
        }
    }

    pub fn from_land(spec: &LandSize) -> Self {
        Self::new(spec.grid_size())
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.x < self.size && coord.y < self.size
    }

    /// Replace the grid dimensions, dropping every placement
    pub fn resize(&mut self, new_size: usize) {
        self.size = new_size.clamp(1, MAX_GRID_SIZE);
        self.cells.clear();
    }

    /// Species at `coord` in planting order (empty when unoccupied)
    pub fn get(&self, coord: CellCoord) -> &[Arc<SpeciesRecord>] {
        self.cells.get(&coord).map(|c| c.as_slice()).unwrap_or(&[])
    }

    /// Overwrite a cell; an empty list removes the entry
    pub(crate) fn set(&mut self, coord: CellCoord, occupants: CellOccupants) {
        if occupants.is_empty() {
            self.cells.remove(&coord);
        } else {
            self.cells.insert(coord, occupants);
        }
    }

    pub(crate) fn push(&mut self, coord: CellCoord, species: Arc<SpeciesRecord>) {
        self.cells.entry(coord).or_default().push(species);
    }

    /// Remove and return a cell's occupants
    pub(crate) fn clear(&mut self, coord: CellCoord) -> Option<CellOccupants> {
        self.cells.remove(&coord)
    }

    /// Occupied cells in coordinate order
    pub fn occupied_cells(&self) -> impl Iterator<Item = (CellCoord, &[Arc<SpeciesRecord>])> {
        self.cells.iter().map(|(coord, occ)| (*coord, occ.as_slice()))
    }

    /// Every placed species instance across the grid, cell by cell
    pub fn placed_species(&self) -> impl Iterator<Item = &Arc<SpeciesRecord>> {
        self.cells.values().flat_map(|occ| occ.iter())
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.len()
    }

    pub fn plant_count(&self) -> usize {
        self.cells.values().map(|occ| occ.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
