//! Recursive pedigree growth
//!
//! Forward expansion walks down the main line of descent: each expanding
//! individual gets a spouse and at least one child, and the first child always
//! continues the lineage so the requested depth is reached. Backward expansion
//! walks up from a parentless spouse, inferring parent pairs from the reverse
//! inheritance table with a per-level coin flip.

use super::config::GeneratorConfig;
use super::generators::{spawn_ancestor, spawn_child, spawn_spouse};
use super::store::RecordStore;
use crate::error::{PedigreeError, Result};
use crate::genetics::sampling::{passes, percentile_draw};
use crate::genetics::{InheritanceModel, Sex};
use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Counters collected while a pedigree grows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionStats {
    pub spouses: u32,
    pub children: u32,
    pub ancestors: u32,
    /// Deepest generation index reached by forward expansion
    pub max_generation: u32,
}

/// Drives forward and backward expansion over one record store
pub struct Expander<'a, R: Rng + ?Sized> {
    store: &'a mut RecordStore,
    model: &'a InheritanceModel,
    config: &'a GeneratorConfig,
    rng: &'a mut R,
    stats: ExpansionStats,
}

impl<'a, R: Rng + ?Sized> Expander<'a, R> {
    /// Fails with `InvalidParameterRange` if `config` does not validate
    pub fn new(
        store: &'a mut RecordStore,
        model: &'a InheritanceModel,
        config: &'a GeneratorConfig,
        rng: &'a mut R,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store,
            model,
            config,
            rng,
            stats: ExpansionStats::default(),
        })
    }

    pub fn stats(&self) -> ExpansionStats {
        self.stats
    }

    /// Grow the pedigree below `anchor`, who sits at `generation`
    pub fn expand(&mut self, generation: u32, anchor: u32) -> Result<()> {
        self.stats.max_generation = self.stats.max_generation.max(generation);
        if generation + 1 >= self.config.generation_count {
            return Ok(());
        }

        let spouse = spawn_spouse(
            self.store,
            self.model,
            self.config.mode,
            anchor,
            self.config.affected_spouse_allowed,
            self.rng,
        )?;
        self.stats.spouses += 1;

        let (paternal, maternal) = match self.store.sex(anchor)? {
            Sex::Male => (anchor, spouse),
            Sex::Female => (spouse, anchor),
        };

        // spouses may only reach back as far as the founder's generation
        if self.config.backprop_likelihood > 0.0 {
            self.backprop(generation, spouse)?;
        }

        let n_children = self.rng.gen_range(1..=self.config.max_children);
        debug!(
            "generation {}: couple {}/{} with {} children",
            generation, paternal, maternal, n_children
        );
        for i in 0..n_children {
            let child = spawn_child(self.store, self.model, self.config.mode, paternal, maternal, self.rng)?;
            self.stats.children += 1;
            let continues = passes(self.rng, self.config.spouse_likelihood);
            if continues || i == 0 {
                self.expand(generation + 1, child)?;
            }
        }
        Ok(())
    }

    /// Possibly infer parents for parentless `anchor`, up to `remaining` levels
    pub fn backprop(&mut self, remaining: u32, anchor: u32) -> Result<()> {
        if self.store.get(anchor)?.parentage.is_known() {
            return Err(PedigreeError::ParentsAlreadyKnown(anchor));
        }
        let draw = percentile_draw(self.rng);
        if remaining == 0 || draw > self.config.backprop_likelihood {
            return Ok(());
        }

        let genotype = self.store.genotype(anchor)?;
        let Some((paternal_genotype, maternal_genotype)) = self.model.sample_parents(self.rng, genotype)
        else {
            warn!(
                "no parental pair has positive weight for genotype {} at q={}, leaving #{} parentless",
                genotype, self.model.alt_freq, anchor
            );
            return Ok(());
        };

        let father = spawn_ancestor(self.store, self.config.mode, Sex::Male, paternal_genotype)?;
        let mother = spawn_ancestor(self.store, self.config.mode, Sex::Female, maternal_genotype)?;
        self.store.link_parents(anchor, father, mother)?;
        self.stats.ancestors += 2;

        self.backprop(remaining - 1, father)?;
        self.backprop(remaining - 1, mother)
    }
}
