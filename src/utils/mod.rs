//! Utility modules shared by the scoring and economics code
//!
//! - Maturity: age-dependent yield scaling

pub mod maturity;

pub use maturity::{annual_income, effective_yield, maturity_factor};
