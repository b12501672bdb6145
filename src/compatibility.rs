//! Companion Compatibility Analysis
//!
//! Compares every placed plant with every other placed plant on the grid (not
//! only same-cell neighbours). Each unordered pair of instances is classified:
//!
//! - compatible: either species lists the other as a companion
//! - indeterminate: neither does
//!
//! There is no antagonistic relation in the catalog; a missing companion entry
//! is the only negative signal. Duplicated species count as separate instances,
//! so two Mangos form a pair with each other, but an instance is never paired
//! with itself.
//!
//! Cost is O(n²) in the number of placed instances. Plans are bounded by land
//! area, so n stays in the low hundreds.

use std::sync::Arc;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::catalog::SpeciesRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Compatible,
    Indeterminate,
}

/// Classification of one pair of placed instances
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityFinding {
    pub species_a: String,
    pub species_b: String,
    pub relation: Relation,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityReport {
    pub compatible: Vec<CompatibilityFinding>,
    pub indeterminate: Vec<CompatibilityFinding>,
}

impl CompatibilityReport {
    pub fn total_pairs(&self) -> usize {
        self.compatible.len() + self.indeterminate.len()
    }

    /// Share of pairs that are compatible (0 when there are no pairs)
    pub fn compatibility_ratio(&self) -> f64 {
        let total = self.total_pairs();
        if total == 0 {
            0.0
        } else {
            self.compatible.len() as f64 / total as f64
        }
    }
}

/// Compatible if the companion listing exists in either direction
pub fn classify_pair(a: &SpeciesRecord, b: &SpeciesRecord) -> Relation {
    if a.lists_companion(&b.name) || b.lists_companion(&a.name) {
        Relation::Compatible
    } else {
        Relation::Indeterminate
    }
}

/// Classify every unordered pair (i < j) of placed instances
pub fn analyze(placed: &[Arc<SpeciesRecord>]) -> CompatibilityReport {
    let mut report = CompatibilityReport::default();

    for i in 0..placed.len() {
        for j in i + 1..placed.len() {
            let (a, b) = (&placed[i], &placed[j]);
            let relation = classify_pair(a, b);
            let finding = CompatibilityFinding {
                species_a: a.name.clone(),
                species_b: b.name.clone(),
                relation,
            };
            match relation {
                Relation::Compatible => report.compatible.push(finding),
                Relation::Indeterminate => report.indeterminate.push(finding),
            }
        }
    }

    report
}

/// Companion names listed by placed species but not yet planted
///
/// Unordered by nature; callers that need a stable display order sort it.
pub fn suggest_companions(placed: &[Arc<SpeciesRecord>]) -> AHashSet<String> {
    let placed_names: AHashSet<&str> = placed.iter().map(|s| s.name.as_str()).collect();

    placed
        .iter()
        .flat_map(|s| s.companions.iter())
        .filter(|name| !placed_names.contains(name.as_str()))
        .cloned()
        .collect()
}
