//! SVG rendering of the planting grid
//!
//! Each plant is a coloured disc centred in its cell and labelled with the
//! species symbol. Disc size depends on the layer (canopy largest). Plants
//! sharing a cell are stacked in planting order, each shifted down by
//! `STACK_OFFSET` units.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::catalog::VerticalLayer;
use crate::grid::GridModel;

pub const CELL_PX: f64 = 60.0;
pub const STACK_OFFSET: f64 = 5.0;

pub fn layer_radius(layer: VerticalLayer) -> f64 {
    match layer {
        VerticalLayer::Canopy => 25.0,
        VerticalLayer::SubCanopy => 21.0,
        VerticalLayer::Shrub => 17.0,
        VerticalLayer::Herbaceous => 13.0,
        VerticalLayer::GroundCover => 11.0,
        VerticalLayer::Vine => 9.0,
        VerticalLayer::Root => 7.0,
    }
}

pub fn layer_color(layer: VerticalLayer) -> &'static str {
    match layer {
        VerticalLayer::Canopy => "#1b5e20",
        VerticalLayer::SubCanopy => "#2e7d32",
        VerticalLayer::Shrub => "#558b2f",
        VerticalLayer::Herbaceous => "#9ccc65",
        VerticalLayer::GroundCover => "#c5e1a5",
        VerticalLayer::Vine => "#8e24aa",
        VerticalLayer::Root => "#8d6e63",
    }
}

/// Drawing primitive for one planted instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disc {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub color: String,
    pub symbol: String,
    pub species_name: String,
    /// Position within the cell's planting order
    pub stack_index: usize,
}

pub fn disc_layout(grid: &GridModel) -> Vec<Disc> {
    let mut discs = Vec::with_capacity(grid.plant_count());
    for (coord, occupants) in grid.occupied_cells() {
        let centre_x = coord.x as f64 * CELL_PX + CELL_PX / 2.0;
        let centre_y = coord.y as f64 * CELL_PX + CELL_PX / 2.0;
        for (idx, s) in occupants.iter().enumerate() {
            discs.push(Disc {
                cx: centre_x,
                cy: centre_y + idx as f64 * STACK_OFFSET,
                radius: layer_radius(s.layer),
                color: layer_color(s.layer).to_string(),
                symbol: s.symbol.clone(),
                species_name: s.name.clone(),
                stack_index: idx,
            });
        }
    }
    discs
}

/// SVG formatter for a planting grid
pub struct SvgFormatter;

impl SvgFormatter {
    pub fn format(grid: &GridModel) -> String {
        let side = grid.size() as f64 * CELL_PX;
        let mut svg = String::with_capacity(1024 + grid.plant_count() * 256);

        let _ = writeln!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{side}\" height=\"{side}\" viewBox=\"0 0 {side} {side}\">"
        );
        let _ = writeln!(svg, "<rect width=\"{side}\" height=\"{side}\" fill=\"#fdfaf3\"/>");

        // Cell lines
        svg.push_str("<g stroke=\"#d7ccc8\" stroke-width=\"1\">\n");
        for i in 0..=grid.size() {
            let p = i as f64 * CELL_PX;
            let _ = writeln!(svg, "<line x1=\"{p}\" y1=\"0\" x2=\"{p}\" y2=\"{side}\"/>");
            let _ = writeln!(svg, "<line x1=\"0\" y1=\"{p}\" x2=\"{side}\" y2=\"{p}\"/>");
        }
        svg.push_str("</g>\n");

        for disc in disc_layout(grid) {
            let _ = writeln!(
                svg,
                "<g><title>{}</title><circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" fill-opacity=\"0.8\" stroke=\"#ffffff\"/>\
                 <text x=\"{}\" y=\"{}\" font-size=\"12\" text-anchor=\"middle\" dominant-baseline=\"central\">{}</text></g>",
                escape(&disc.species_name),
                disc.cx,
                disc.cy,
                disc.radius,
                disc.color,
                disc.cx,
                disc.cy,
                escape(&disc.symbol),
            );
        }

        svg.push_str("</svg>\n");
        svg
    }
}

pub fn render_svg(grid: &GridModel) -> String {
    SvgFormatter::format(grid)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
