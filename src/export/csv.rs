//! CSV export of planted instances, written with Polars

use std::fs::File;
use std::io::Write;
use std::path::Path;

use polars::prelude::*;

use super::planting_rows;
use crate::error::{PlannerError, PlannerResult};
use crate::grid::GridModel;

/// Build the export table: columns `x, y, species, layer`
pub fn plantings_frame(grid: &GridModel) -> PolarsResult<DataFrame> {
    let rows = planting_rows(grid);

    let xs: Vec<u32> = rows.iter().map(|r| r.x as u32).collect();
    let ys: Vec<u32> = rows.iter().map(|r| r.y as u32).collect();
    let species: Vec<&str> = rows.iter().map(|r| r.species_name.as_str()).collect();
    let layers: Vec<&str> = rows.iter().map(|r| r.layer.display_name()).collect();

    df!(
        "x" => xs,
        "y" => ys,
        "species" => species,
        "layer" => layers
    )
}

pub fn write_csv<W: Write>(grid: &GridModel, writer: &mut W) -> PolarsResult<()> {
    let mut df = plantings_frame(grid)?;
    CsvWriter::new(writer).include_header(true).finish(&mut df)
}

pub fn save_csv(grid: &GridModel, path: &Path) -> PlannerResult<()> {
    let mut file = File::create(path).map_err(|source| PlannerError::Io {
        path: path.display().to_string(),
        source,
    })?;
    write_csv(grid, &mut file).map_err(|source| PlannerError::Table {
        path: path.display().to_string(),
        source,
    })?;
    tracing::info!("Wrote {} plantings to {}", grid.plant_count(), path.display());
    Ok(())
}
