//! pedgen: synthetic pedigree generator
//!
//! Builds multi-generation families for single-locus Mendelian traits:
//! an affected founder, spouses drawn from a Hardy-Weinberg population,
//! children sampled from Mendelian segregation, and optionally inferred
//! ancestors for the spouses who marry in.

pub mod error;
pub mod export;
pub mod genetics;
pub mod pedigree;

pub use error::{PedigreeError, Result};
pub use export::{PedDelimiter, PedigreeGraph, PedigreeSnapshot};
pub use genetics::{phenotype, Genotype, InheritanceMode, InheritanceModel, Phenotype, Sex};
pub use pedigree::{generate_pedigree, generate_pedigree_with_rng, GeneratorConfig, Individual, Pedigree};
