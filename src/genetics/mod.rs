//! Genetics: single-locus Mendelian model
//!
//! Genotype codes, the genotype → phenotype mapping for each mode of
//! inheritance, and the Hardy-Weinberg transition tables that drive every
//! random genotype in a generated pedigree.

mod genotype;
mod inheritance;
pub mod sampling;

pub use genotype::{phenotype, phenotype_from_codes, Genotype, InheritanceMode, Phenotype, Sex};
pub use inheritance::{ForwardOutcomes, HardyWeinberg, InheritanceModel, ReverseOutcomes};
