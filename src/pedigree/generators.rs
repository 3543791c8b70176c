//! Record generators: primary founder, spouses, children and inferred ancestors
//!
//! Each generator draws what it needs from the RNG and appends exactly one
//! record to the store, returning the new ID.

use super::record::Parentage;
use super::store::RecordStore;
use crate::error::Result;
use crate::genetics::sampling::weighted_choice;
use crate::genetics::{phenotype, Genotype, InheritanceMode, InheritanceModel, Phenotype, Sex};
use rand::Rng;

/// Dominant-mode founders: (genotype, weight). Homozygous carriers of a
/// dominant condition are rare, so heterozygotes dominate.
const DOMINANT_FOUNDER_PRIOR: [(Genotype, f64); 2] = [(Genotype::Het, 0.8), (Genotype::HomAlt, 0.2)];

fn random_sex<R: Rng + ?Sized>(rng: &mut R) -> Sex {
    if rng.gen_range(1..=2u8) == 1 {
        Sex::Male
    } else {
        Sex::Female
    }
}

/// Create the affected primary founder. Must be the first record.
pub fn spawn_primary_founder<R: Rng + ?Sized>(
    store: &mut RecordStore,
    mode: InheritanceMode,
    rng: &mut R,
) -> Result<u32> {
    let genotype = match mode {
        InheritanceMode::Recessive => Genotype::HomAlt,
        InheritanceMode::Dominant => {
            weighted_choice(rng, &DOMINANT_FOUNDER_PRIOR).unwrap_or(Genotype::Het)
        }
    };
    let sex = random_sex(rng);
    store.insert(Parentage::Unknown, sex, Phenotype::Affected, genotype)
}

/// Create an unrelated partner of opposite sex for `anchor`
pub fn spawn_spouse<R: Rng + ?Sized>(
    store: &mut RecordStore,
    model: &InheritanceModel,
    mode: InheritanceMode,
    anchor: u32,
    affected_allowed: bool,
    rng: &mut R,
) -> Result<u32> {
    let sex = store.sex(anchor)?.opposite();
    let genotype = if affected_allowed {
        model.sample_population(rng)?
    } else {
        Genotype::HomRef
    };
    store.insert(Parentage::Unknown, sex, phenotype(genotype, mode), genotype)
}

/// Create a child of two recorded parents, genotype drawn from the forward table
pub fn spawn_child<R: Rng + ?Sized>(
    store: &mut RecordStore,
    model: &InheritanceModel,
    mode: InheritanceMode,
    paternal: u32,
    maternal: u32,
    rng: &mut R,
) -> Result<u32> {
    let genotype = model.sample_child(rng, store.genotype(paternal)?, store.genotype(maternal)?)?;
    let sex = random_sex(rng);
    store.insert(
        Parentage::Known { paternal, maternal },
        sex,
        phenotype(genotype, mode),
        genotype,
    )
}

/// Create a parentless ancestor with a known sex and genotype
pub fn spawn_ancestor(
    store: &mut RecordStore,
    mode: InheritanceMode,
    sex: Sex,
    genotype: Genotype,
) -> Result<u32> {
    store.insert(Parentage::Unknown, sex, phenotype(genotype, mode), genotype)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_recessive_founder() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let mut store = RecordStore::new("F1", 10);
            let id = spawn_primary_founder(&mut store, InheritanceMode::Recessive, &mut rng).unwrap();
            let founder = store.get(id).unwrap();
            assert_eq!(id, 1);
            assert_eq!(founder.genotype, Genotype::HomAlt);
            assert_eq!(founder.phenotype, Phenotype::Affected);
            assert!(founder.is_founder());
        }
    }

    #[test]
    fn test_dominant_founder_mostly_het() {
        let mut rng = StdRng::seed_from_u64(2);
        let n = 2000;
        let mut hom = 0;
        for _ in 0..n {
            let mut store = RecordStore::new("F1", 10);
            spawn_primary_founder(&mut store, InheritanceMode::Dominant, &mut rng).unwrap();
            let founder = store.get(1).unwrap();
            assert_ne!(founder.genotype, Genotype::HomRef);
            assert!(founder.is_affected());
            if founder.genotype == Genotype::HomAlt {
                hom += 1;
            }
        }
        let frac = hom as f64 / n as f64;
        assert!((frac - 0.2).abs() < 0.04, "homozygous fraction {}", frac);
    }

    #[test]
    fn test_spouse_opposite_sex() {
        let mut rng = StdRng::seed_from_u64(3);
        let model = InheritanceModel::new(0.5).unwrap();
        let mut store = RecordStore::new("F1", 100);
        let founder = spawn_primary_founder(&mut store, InheritanceMode::Dominant, &mut rng).unwrap();
        for _ in 0..20 {
            let spouse = spawn_spouse(&mut store, &model, InheritanceMode::Dominant, founder, true, &mut rng)
                .unwrap();
            let record = store.get(spouse).unwrap();
            assert_ne!(record.sex, store.get(founder).unwrap().sex);
            assert!(record.is_founder());
            assert_eq!(record.phenotype, phenotype(record.genotype, InheritanceMode::Dominant));
        }
    }

    #[test]
    fn test_unaffected_spouse_is_homref() {
        let mut rng = StdRng::seed_from_u64(4);
        let model = InheritanceModel::new(0.9).unwrap();
        let mut store = RecordStore::new("F1", 100);
        spawn_primary_founder(&mut store, InheritanceMode::Recessive, &mut rng).unwrap();
        for _ in 0..20 {
            let spouse = spawn_spouse(&mut store, &model, InheritanceMode::Recessive, 1, false, &mut rng)
                .unwrap();
            assert_eq!(store.genotype(spouse).unwrap(), Genotype::HomRef);
        }
    }

    #[test]
    fn test_child_genotype_follows_parents() {
        let mut rng = StdRng::seed_from_u64(5);
        let model = InheritanceModel::new(0.1).unwrap();
        let mode = InheritanceMode::Recessive;
        let mut store = RecordStore::new("F1", 100);
        let dad = spawn_ancestor(&mut store, mode, Sex::Male, Genotype::HomAlt);
        let mum = spawn_ancestor(&mut store, mode, Sex::Female, Genotype::HomRef);
        let (dad, mum) = (dad.unwrap(), mum.unwrap());
        for _ in 0..20 {
            let child = spawn_child(&mut store, &model, mode, dad, mum, &mut rng).unwrap();
            let record = store.get(child).unwrap();
            assert_eq!(record.genotype, Genotype::Het);
            assert_eq!(record.phenotype, Phenotype::Unaffected);
            assert_eq!(record.parentage.ids(), (dad, mum));
        }
    }

    #[test]
    fn test_child_of_missing_parent() {
        let mut rng = StdRng::seed_from_u64(6);
        let model = InheritanceModel::new(0.1).unwrap();
        let mut store = RecordStore::new("F1", 100);
        spawn_primary_founder(&mut store, InheritanceMode::Dominant, &mut rng).unwrap();
        assert!(spawn_child(&mut store, &model, InheritanceMode::Dominant, 1, 2, &mut rng).is_err());
        assert_eq!(store.len(), 1);
    }
}
