//! Maturity Factor
//!
//! Scales a species' rated annual yield to its productivity at a given forest
//! age: `min(1, forest_age / maturity_age)`.

use crate::catalog::SpeciesRecord;

/// Fraction of full yield reached at `forest_age` (0.0 - 1.0)
///
/// A maturity age of zero (or less) means the species yields fully from
/// year one, so the factor is 1 for any age.
pub fn maturity_factor(forest_age: u32, maturity_age: f64) -> f64 {
    if maturity_age <= 0.0 || !maturity_age.is_finite() {
        return 1.0;
    }
    (forest_age as f64 / maturity_age).min(1.0)
}

/// Yield of one plant at `forest_age`
pub fn effective_yield(species: &SpeciesRecord, forest_age: u32) -> f64 {
    species.yield_per_year * maturity_factor(forest_age, species.maturity_age)
}

/// Market value of one plant's yield at `forest_age`
pub fn annual_income(species: &SpeciesRecord, forest_age: u32) -> f64 {
    effective_yield(species, forest_age) * species.market_price
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_partial_maturity() {
        assert_relative_eq!(maturity_factor(2, 5.0), 0.4, epsilon = 1e-12);
        assert_relative_eq!(maturity_factor(0, 5.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_capped_at_one_past_maturity() {
        assert_eq!(maturity_factor(5, 5.0), 1.0);
        assert_eq!(maturity_factor(50, 5.0), 1.0);
        assert_eq!(maturity_factor(1000, 0.5), 1.0);
    }

    #[test]
    fn test_zero_maturity_age() {
        assert_eq!(maturity_factor(0, 0.0), 1.0);
        assert_eq!(maturity_factor(3, 0.0), 1.0);
    }

    #[test]
    fn test_income_of_young_mango() {
        let mango = crate::catalog::fixtures::mango();
        // 50 × (2/5) = 20 kg at 2.0 per kg
        assert_relative_eq!(effective_yield(&mango, 2), 20.0, epsilon = 1e-9);
        assert_relative_eq!(annual_income(&mango, 2), 40.0, epsilon = 1e-9);
    }
}
