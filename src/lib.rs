//! Offspring genotype probabilities from two parent genotypes.
//!
//! ```
//! let results = punnett::calculate("Bb", "Bb").unwrap();
//! assert_eq!(results[0].genotype, "Bb");
//! assert_eq!(results[0].probability, 50.0);
//! ```

pub mod batch;
pub mod cli;
pub mod cross;
pub mod error;
pub mod loci;
pub mod model;
pub mod output;
pub mod parse;
pub mod phenotype;

pub use cross::{Aggregation, CrossOptions, calculate, calculate_with, punnett_square};
pub use error::{CustomError, Result, ValidationError};
pub use model::GenotypeProbability;
pub use parse::Notation;
