//! Species Catalog
//!
//! Read-only lookup over an externally supplied list of species records.
//! The catalog is loaded once (JSON array or CSV table) and shared behind an
//! `Arc`; nothing in the planner mutates it.
//!
//! CSV layout (header row required):
//!   id, name, symbol, climate_zone, layer, companions, yield_per_year,
//!   yield_unit, market_price, maturity_age, description, image
//!
//! `companions` is pipe-separated ("Comfrey|Lemongrass"). Optional text
//! columns may be absent entirely.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use polars::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};

/// One of the seven canonical planting strata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VerticalLayer {
    Canopy,
    #[serde(rename = "Sub-canopy")]
    SubCanopy,
    Shrub,
    Herbaceous,
    #[serde(rename = "Ground Cover")]
    GroundCover,
    Vine,
    Root,
}

impl VerticalLayer {
    pub const ALL: [VerticalLayer; 7] = [
        VerticalLayer::Canopy,
        VerticalLayer::SubCanopy,
        VerticalLayer::Shrub,
        VerticalLayer::Herbaceous,
        VerticalLayer::GroundCover,
        VerticalLayer::Vine,
        VerticalLayer::Root,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            VerticalLayer::Canopy => "Canopy",
            VerticalLayer::SubCanopy => "Sub-canopy",
            VerticalLayer::Shrub => "Shrub",
            VerticalLayer::Herbaceous => "Herbaceous",
            VerticalLayer::GroundCover => "Ground Cover",
            VerticalLayer::Vine => "Vine",
            VerticalLayer::Root => "Root",
        }
    }
}

impl fmt::Display for VerticalLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for VerticalLayer {
    type Err = PlannerError;

    /// Accepts display names in any case, with or without the hyphen/space
    /// ("Sub-canopy", "subcanopy", "ground cover", "GROUND_COVER").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match key.as_str() {
            "canopy" => Ok(VerticalLayer::Canopy),
            "subcanopy" => Ok(VerticalLayer::SubCanopy),
            "shrub" => Ok(VerticalLayer::Shrub),
            "herbaceous" => Ok(VerticalLayer::Herbaceous),
            "groundcover" => Ok(VerticalLayer::GroundCover),
            "vine" => Ok(VerticalLayer::Vine),
            "root" => Ok(VerticalLayer::Root),
            _ => Err(PlannerError::UnknownLayer(s.to_string())),
        }
    }
}

/// A perennial species as supplied by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesRecord {
    pub id: String,
    pub name: String,
    /// Short label drawn on the planting disc (usually an emoji or letter)
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub climate_zone: String,
    pub layer: VerticalLayer,
    /// Names (not ids) of beneficial neighbours; may be one-sided
    #[serde(default)]
    pub companions: Vec<String>,
    pub yield_per_year: f64,
    #[serde(default)]
    pub yield_unit: String,
    pub market_price: f64,
    /// Years until full yield
    pub maturity_age: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
}

impl SpeciesRecord {
    pub fn lists_companion(&self, name: &str) -> bool {
        self.companions.iter().any(|c| c == name)
    }
}

/// Immutable species lookup table
#[derive(Debug, Clone, Default)]
pub struct SpeciesCatalog {
    records: Vec<Arc<SpeciesRecord>>,
    by_id: FxHashMap<String, usize>,
    by_name: FxHashMap<String, usize>,
}

impl SpeciesCatalog {
    /// Build a catalog, rejecting duplicate identifiers
    pub fn from_records(records: Vec<SpeciesRecord>) -> PlannerResult<Self> {
        let mut catalog = SpeciesCatalog::default();

        for record in records {
            if catalog.by_id.contains_key(&record.id) {
                return Err(PlannerError::DuplicateSpeciesId(record.id));
            }
            let idx = catalog.records.len();
            catalog.by_id.insert(record.id.clone(), idx);
            // First record wins for name lookups
            catalog.by_name.entry(record.name.clone()).or_insert(idx);
            catalog.records.push(Arc::new(record));
        }

        Ok(catalog)
    }

    /// Load catalog from a JSON array of species records
    pub fn load_json(path: &Path) -> PlannerResult<Self> {
        let contents = fs::read_to_string(path).map_err(|source| PlannerError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let records: Vec<SpeciesRecord> =
            serde_json::from_str(&contents).map_err(|source| PlannerError::Json {
                path: path.display().to_string(),
                source,
            })?;

        let catalog = Self::from_records(records)?;
        tracing::info!("Loaded {} species from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Load catalog from a CSV table
    pub fn load_csv(path: &Path) -> PlannerResult<Self> {
        let path_str = path.display().to_string();
        let table_err = |source: PolarsError| PlannerError::Table {
            path: path_str.clone(),
            source,
        };

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .map_err(table_err)?
            .finish()
            .map_err(table_err)?;

        let records = Self::records_from_frame(&df)?;

        let catalog = Self::from_records(records)?;
        tracing::info!("Loaded {} species from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    fn records_from_frame(df: &DataFrame) -> PlannerResult<Vec<SpeciesRecord>> {
        let ids = text_values(df, "id")?;
        let names = text_values(df, "name")?;
        let layers = text_values(df, "layer")?;
        let symbols = text_values(df, "symbol")?;
        let zones = text_values(df, "climate_zone")?;
        let companions = text_values(df, "companions")?;
        let units = text_values(df, "yield_unit")?;
        let descriptions = text_values(df, "description")?;
        let images = text_values(df, "image")?;
        let yields = numeric_values(df, "yield_per_year")?;
        let prices = numeric_values(df, "market_price")?;
        let maturities = numeric_values(df, "maturity_age")?;

        let mut records = Vec::with_capacity(df.height());
        for row in 0..df.height() {
            let id = required(&ids, row, "id")?;
            let name = required(&names, row, "name")?;
            let layer: VerticalLayer = required(&layers, row, "layer")?.parse()?;

            let companion_names = optional(&companions, row)
                .split('|')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();

            let mut symbol = optional(&symbols, row);
            if symbol.is_empty() {
                symbol = name.chars().take(1).collect();
            }

            records.push(SpeciesRecord {
                id,
                name,
                symbol,
                climate_zone: optional(&zones, row),
                layer,
                companions: companion_names,
                yield_per_year: required_num(&yields, row, "yield_per_year")?,
                yield_unit: optional(&units, row),
                market_price: required_num(&prices, row, "market_price")?,
                maturity_age: required_num(&maturities, row, "maturity_age")?,
                description: optional(&descriptions, row),
                image: optional(&images, row),
            });
        }

        Ok(records)
    }

    /// Look up a species by identifier; a miss is simply `None`
    pub fn get(&self, id: &str) -> Option<&Arc<SpeciesRecord>> {
        self.by_id.get(id).map(|&idx| &self.records[idx])
    }

    pub fn by_name(&self, name: &str) -> Option<&Arc<SpeciesRecord>> {
        self.by_name.get(name).map(|&idx| &self.records[idx])
    }

    pub fn by_layer(&self, layer: VerticalLayer) -> impl Iterator<Item = &Arc<SpeciesRecord>> {
        self.records.iter().filter(move |r| r.layer == layer)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<SpeciesRecord>> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Text column as owned values; `None` when the column is absent
fn text_values(df: &DataFrame, name: &str) -> PolarsResult<Option<Vec<Option<String>>>> {
    let Ok(column) = df.column(name) else {
        return Ok(None);
    };
    let column = column.cast(&DataType::String)?;
    let values = column
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect();
    Ok(Some(values))
}

/// Numeric column cast to Float64 (CSV integers infer as Int64)
fn numeric_values(df: &DataFrame, name: &str) -> PolarsResult<Option<Vec<Option<f64>>>> {
    let Ok(column) = df.column(name) else {
        return Ok(None);
    };
    let column = column.cast(&DataType::Float64)?;
    Ok(Some(column.f64()?.into_iter().collect()))
}

fn required(values: &Option<Vec<Option<String>>>, row: usize, column: &str) -> PlannerResult<String> {
    values
        .as_ref()
        .and_then(|v| v[row].as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| PlannerError::MissingField {
            row,
            column: column.to_string(),
        })
}

fn required_num(values: &Option<Vec<Option<f64>>>, row: usize, column: &str) -> PlannerResult<f64> {
    values
        .as_ref()
        .and_then(|v| v[row])
        .ok_or_else(|| PlannerError::MissingField {
            row,
            column: column.to_string(),
        })
}

fn optional(values: &Option<Vec<Option<String>>>, row: usize) -> String {
    values
        .as_ref()
        .and_then(|v| v[row].as_deref())
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use std::io::Write;

    #[test]
    fn test_layer_parsing_is_lenient() {
        assert_eq!("Sub-canopy".parse::<VerticalLayer>().unwrap(), VerticalLayer::SubCanopy);
        assert_eq!("ground cover".parse::<VerticalLayer>().unwrap(), VerticalLayer::GroundCover);
        assert_eq!("GROUND_COVER".parse::<VerticalLayer>().unwrap(), VerticalLayer::GroundCover);
        assert!("Emergent".parse::<VerticalLayer>().is_err());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = SpeciesCatalog::from_records(vec![mango(), mango()]);
        assert!(matches!(result, Err(PlannerError::DuplicateSpeciesId(id)) if id == "mango"));
    }

    #[test]
    fn test_lookup_miss_is_none() {
        let catalog = catalog();
        assert!(catalog.get("durian").is_none());
        assert_eq!(catalog.get("mango").unwrap().name, "Mango");
        assert_eq!(catalog.by_name("Lemongrass").unwrap().id, "lemongrass");
        assert_eq!(catalog.by_layer(VerticalLayer::Canopy).count(), 2);
    }

    #[test]
    fn test_json_field_names() {
        let json = r#"[{
            "id": "banana", "name": "Banana", "symbol": "B", "layer": "Sub-canopy",
            "companions": ["Comfrey"], "yieldPerYear": 30, "yieldUnit": "kg",
            "marketPrice": 1.2, "maturityAge": 2
        }]"#;
        let records: Vec<SpeciesRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records[0].layer, VerticalLayer::SubCanopy);
        assert_eq!(records[0].companions, vec!["Comfrey".to_string()]);
        assert!(records[0].climate_zone.is_empty());
    }

    #[test]
    fn test_load_csv() {
        let path = std::env::temp_dir().join(format!("species_catalog_{}.csv", std::process::id()));
        {
            let mut file = fs::File::create(&path).unwrap();
            writeln!(file, "id,name,layer,companions,yield_per_year,market_price,maturity_age").unwrap();
            writeln!(file, "mango,Mango,Canopy,Lemongrass|Comfrey,50,2.0,5").unwrap();
            writeln!(file, "comfrey,Comfrey,Ground Cover,,2,0.5,1").unwrap();
        }

        let catalog = SpeciesCatalog::load_csv(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(catalog.len(), 2);
        let mango = catalog.get("mango").unwrap();
        assert_eq!(mango.companions, vec!["Lemongrass".to_string(), "Comfrey".to_string()]);
        assert_eq!(mango.symbol, "M");
        assert_eq!(mango.yield_per_year, 50.0);
        let comfrey = catalog.get("comfrey").unwrap();
        assert_eq!(comfrey.layer, VerticalLayer::GroundCover);
        assert!(comfrey.companions.is_empty());
    }

    #[test]
    fn test_load_csv_row_errors() {
        let path = std::env::temp_dir().join(format!("species_bad_{}.csv", std::process::id()));

        fs::write(&path, "id,name,layer,yield_per_year,market_price,maturity_age\nfig,Fig,Emergent,5,1,3\n").unwrap();
        let unknown_layer = SpeciesCatalog::load_csv(&path);
        assert!(matches!(unknown_layer, Err(PlannerError::UnknownLayer(l)) if l == "Emergent"));

        fs::write(&path, "id,name,layer,yield_per_year,market_price\nfig,Fig,Canopy,5,1\n").unwrap();
        let missing = SpeciesCatalog::load_csv(&path);
        fs::remove_file(&path).ok();
        assert!(matches!(
            missing,
            Err(PlannerError::MissingField { row: 0, column }) if column == "maturity_age"
        ));
    }
}
