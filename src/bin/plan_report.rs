// Plan report binary
//
// Evaluates a plan described by a JSON config and prints the derived view and
// a year-by-year projection as JSON.
// Usage: PLAN_CONFIG=plan.json cargo run --features cli --bin plan_report

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use food_forest_planner::export::{save_csv, SvgFormatter};
use food_forest_planner::{break_even_year, project_years, PlannerConfig};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "food_forest_planner=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Configuration from environment variables
    let config_path = std::env::var("PLAN_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("plan.json"));
    let export_dir = std::env::var("EXPORT_DIR").ok().map(PathBuf::from);

    let mut config = PlannerConfig::load(&config_path)
        .with_context(|| format!("Failed to load plan config {}", config_path.display()))?;

    if let Some(age) = std::env::var("FOREST_AGE").ok().and_then(|a| a.parse().ok()) {
        config.forest_age = age;
    }

    tracing::info!("Configuration:");
    tracing::info!("  PLAN_CONFIG: {}", config_path.display());
    tracing::info!("  Catalog: {}", config.resolved_catalog_path().display());
    tracing::info!("  Forest age: {}", config.forest_age);

    let catalog = config.load_catalog().context("Failed to load species catalog")?;
    let (session, outcomes) = config.build_session(Arc::new(catalog));

    let rejected = outcomes.iter().filter(|o| !o.is_placed()).count();
    if rejected > 0 {
        tracing::warn!("{} of {} configured placements were not applied", rejected, outcomes.len());
    }

    let view = session.recompute();
    let ages: Vec<u32> = (1..=config.projection_years.max(1)).collect();
    let projections = project_years(&session, &ages);

    let report = json!({
        "gridSize": session.grid().size(),
        "plantCount": session.grid().plant_count(),
        "placementOutcomes": outcomes,
        "view": view,
        "projection": projections,
        "breakEvenYear": break_even_year(&projections),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    if let Some(dir) = export_dir {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create export dir {}", dir.display()))?;
        save_csv(session.grid(), &dir.join("plantings.csv"))?;

        let svg_path = dir.join("plan.svg");
        std::fs::write(&svg_path, SvgFormatter::format(session.grid()))
            .with_context(|| format!("Failed to write {}", svg_path.display()))?;
        tracing::info!("Wrote {}", svg_path.display());
    }

    Ok(())
}
