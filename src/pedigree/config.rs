//! GeneratorConfig: parameters of one pedigree generation run

use crate::error::{PedigreeError, Result};
use crate::genetics::InheritanceMode;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters controlling pedigree shape and genotype draws
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Upper bound on children per couple (at least one is always born)
    pub max_children: u32,
    /// Shared by every individual in the pedigree
    pub family_id: String,
    pub mode: InheritanceMode,
    /// Number of generations in the main line of descent
    pub generation_count: u32,
    /// Chance that a child beyond the first continues the lineage
    pub spouse_likelihood: f64,
    /// Whether spouses draw genotypes from the population prior
    /// (otherwise they are homozygous reference)
    pub affected_spouse_allowed: bool,
    /// Chance, per unparented individual, of inferring a parent pair
    pub backprop_likelihood: f64,
    /// Alternate-allele frequency q
    pub alt_allele_freq: f64,
    /// Fixed RNG seed for reproducible pedigrees
    pub seed: Option<u64>,
    /// Hard ceiling on pedigree size
    pub max_individuals: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_children: 3,
            family_id: "GeneratedFamily".to_string(),
            mode: InheritanceMode::Dominant,
            generation_count: 3,
            spouse_likelihood: 0.6,
            affected_spouse_allowed: true,
            backprop_likelihood: 0.25,
            alt_allele_freq: 0.1,
            seed: None,
            max_individuals: 100_000,
        }
    }
}

impl GeneratorConfig {
    /// Config with the required parameters and defaults for the rest.
    /// Fails on an unrecognised mode before anything is generated.
    pub fn new(
        max_children: u32,
        family_id: impl Into<String>,
        mode: &str,
        generation_count: u32,
    ) -> Result<Self> {
        Ok(Self {
            max_children,
            family_id: family_id.into(),
            mode: mode.parse()?,
            generation_count,
            ..Self::default()
        })
    }

    /// Small nuclear-style pedigrees: few children, no ancestor inference
    pub fn compact() -> Self {
        Self {
            max_children: 2,
            spouse_likelihood: 0.3,
            backprop_likelihood: 0.0,
            ..Self::default()
        }
    }

    /// Large extended pedigrees with deep ancestry
    pub fn sprawling() -> Self {
        Self {
            max_children: 5,
            generation_count: 5,
            spouse_likelihood: 0.8,
            backprop_likelihood: 0.6,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Range checks on every numeric parameter
    pub fn validate(&self) -> Result<()> {
        let probabilities = [
            ("spouse_likelihood", self.spouse_likelihood),
            ("backprop_likelihood", self.backprop_likelihood),
            ("alt_allele_freq", self.alt_allele_freq),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(PedigreeError::InvalidParameterRange { name, value });
            }
        }

        let counts = [
            ("generation_count", self.generation_count as f64),
            ("max_children", self.max_children as f64),
            ("max_individuals", self.max_individuals as f64),
        ];
        for (name, value) in counts {
            if value < 1.0 {
                return Err(PedigreeError::InvalidParameterRange { name, value });
            }
        }
        Ok(())
    }

    /// Seeded RNG when `seed` is set, entropy-seeded otherwise
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn summary(&self) -> String {
        format!(
            "{} | {} | {} generations | <= {} children | spouse {:.2} | backprop {:.2} | q={:.2}{}",
            self.family_id,
            self.mode.abbreviation(),
            self.generation_count,
            self.max_children,
            self.spouse_likelihood,
            self.backprop_likelihood,
            self.alt_allele_freq,
            if self.affected_spouse_allowed { "" } else { " | unaffected spouses" }
        )
    }
}
