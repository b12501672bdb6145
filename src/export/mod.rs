//! Plan exports
//!
//! Presentation-facing derivations of the grid:
//! - `csv`: one row per planted instance (`x, y, species, layer`)
//! - `svg`: stacked disc drawing of every cell

pub mod csv;
pub mod svg;

pub use self::csv::{save_csv, write_csv};
pub use self::svg::{disc_layout, render_svg, Disc, SvgFormatter};

use serde::{Deserialize, Serialize};

use crate::catalog::VerticalLayer;
use crate::grid::GridModel;

/// One planted instance; a cell with three plants gives three rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantingRow {
    pub x: usize,
    pub y: usize,
    pub species_name: String,
    pub layer: VerticalLayer,
}

pub fn planting_rows(grid: &GridModel) -> Vec<PlantingRow> {
    grid.occupied_cells()
        .flat_map(|(coord, occupants)| {
            occupants.iter().map(move |s| PlantingRow {
                x: coord.x,
                y: coord.y,
                species_name: s.name.clone(),
                layer: s.layer,
            })
        })
        .collect()
}
