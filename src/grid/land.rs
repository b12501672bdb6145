//! Land Size → Grid Dimension
//!
//! Each grid cell represents a 9 × 9 ft patch (81 sq ft). Acre plots become the
//! largest square grid whose area fits the plot; custom plots use the shorter
//! side.

use serde::{Deserialize, Serialize};

pub const CELL_SIDE_FT: f64 = 9.0;
pub const CELL_AREA_SQ_FT: f64 = CELL_SIDE_FT * CELL_SIDE_FT;
pub const SQ_FT_PER_ACRE: f64 = 43_560.0;

/// Largest grid side in cells (9000 ft, roughly 1860 acres)
pub const MAX_GRID_SIZE: usize = 1000;

/// Land-size specification entered by the user
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum LandSize {
    #[serde(rename = "acre")]
    Acres {
        #[serde(rename = "sizeInAcres")]
        size_in_acres: f64,
    },
    Custom {
        #[serde(rename = "lengthFt")]
        length_ft: f64,
        #[serde(rename = "widthFt")]
        width_ft: f64,
    },
}

impl Default for LandSize {
    fn default() -> Self {
        LandSize::Acres { size_in_acres: 1.0 }
    }
}

impl LandSize {
    /// Grid side length in cells, always within `1..=MAX_GRID_SIZE`
    ///
    /// - acre: `floor(sqrt(acres × 43560 / 81))`
    /// - custom: `floor(min(length, width) / 9)`
    ///
    /// If any input is NaN or infinite (in custom mode, either dimension on
    /// its own is enough) the result is 1. Zero, negative or too-small plots
    /// also give 1. Plots larger than `MAX_GRID_SIZE` cells per side are
    /// capped at `MAX_GRID_SIZE`.
    pub fn grid_size(&self) -> usize {
        let cells = match *self {
            LandSize::Acres { size_in_acres } => {
                if !size_in_acres.is_finite() {
                    return 1;
                }
                let total_sq_ft = size_in_acres * SQ_FT_PER_ACRE;
                libm::floor(libm::sqrt(total_sq_ft / CELL_AREA_SQ_FT))
            }
            LandSize::Custom { length_ft, width_ft } => {
                if !length_ft.is_finite() || !width_ft.is_finite() {
                    return 1;
                }
                libm::floor(length_ft.min(width_ft) / CELL_SIDE_FT)
            }
        };

        // sqrt of a negative area is NaN, which fails this comparison too
        if cells >= MAX_GRID_SIZE as f64 {
            MAX_GRID_SIZE
        } else if cells >= 1.0 {
            cells as usize
        } else {
            1
        }
    }
}

/// Free-function form of [`LandSize::grid_size`]
pub fn derive_grid_size(spec: &LandSize) -> usize {
    spec.grid_size()
}
