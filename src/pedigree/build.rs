//! Top-level pedigree generation

use super::config::GeneratorConfig;
use super::expansion::Expander;
use super::family::Pedigree;
use super::generators::spawn_primary_founder;
use super::store::RecordStore;
use crate::error::Result;
use crate::genetics::InheritanceModel;
use log::info;
use rand::Rng;

/// Generate one pedigree using the config's own RNG (seeded if `seed` is set)
pub fn generate_pedigree(config: &GeneratorConfig) -> Result<Pedigree> {
    let mut rng = config.rng();
    generate_pedigree_with_rng(config, &mut rng)
}

/// Generate one pedigree drawing every random decision from `rng`.
///
/// Validation happens before the first record is created; any error during
/// growth discards the partial store.
pub fn generate_pedigree_with_rng<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Pedigree> {
    config.validate()?;
    let model = InheritanceModel::new(config.alt_allele_freq)?;
    let mut store = RecordStore::new(config.family_id.clone(), config.max_individuals);

    let founder = spawn_primary_founder(&mut store, config.mode, rng)?;
    let stats = {
        let mut expander = Expander::new(&mut store, &model, config, rng)?;
        expander.expand(0, founder)?;
        expander.stats()
    };

    let pedigree = Pedigree::new(config.family_id.clone(), config.mode, store.into_records());
    info!(
        "Generated pedigree {}: {} individuals ({} spouses, {} children, {} inferred ancestors)",
        pedigree.family_id,
        pedigree.len(),
        stats.spouses,
        stats.children,
        stats.ancestors
    );
    Ok(pedigree)
}
