//! Individual records and their two-phase parent state

use crate::genetics::{Genotype, Phenotype, Sex};
use serde::{Deserialize, Serialize};

/// Whether an individual's parents are recorded.
///
/// Children are created `Known`. Founders and spouses start `Unknown` and
/// may move to `Known` once, when ancestor inference back-fills them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Parentage {
    Unknown,
    Known { paternal: u32, maternal: u32 },
}

impl Parentage {
    pub fn is_known(&self) -> bool {
        matches!(self, Parentage::Known { .. })
    }

    /// (paternal, maternal) IDs with 0 standing for "not recorded"
    pub fn ids(&self) -> (u32, u32) {
        match *self {
            Parentage::Unknown => (0, 0),
            Parentage::Known { paternal, maternal } => (paternal, maternal),
        }
    }
}

/// One person in a generated pedigree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    pub family_id: String,
    /// 1-based, assigned in insertion order
    pub id: u32,
    pub parentage: Parentage,
    pub sex: Sex,
    /// Fixed at creation from genotype and mode
    pub phenotype: Phenotype,
    pub genotype: Genotype,
}

impl Individual {
    pub fn paternal_id(&self) -> u32 {
        self.parentage.ids().0
    }

    pub fn maternal_id(&self) -> u32 {
        self.parentage.ids().1
    }

    /// No recorded parents
    pub fn is_founder(&self) -> bool {
        !self.parentage.is_known()
    }

    pub fn is_affected(&self) -> bool {
        self.phenotype.is_affected()
    }

    /// Carries at least one alternate allele
    pub fn is_carrier(&self) -> bool {
        self.genotype != Genotype::HomRef
    }

    pub fn summary(&self) -> String {
        let (pat, mat) = self.parentage.ids();
        format!(
            "#{} | sex={} | phenotype={} | genotype={} | parents={}/{}",
            self.id,
            self.sex.code(),
            self.phenotype.code(),
            self.genotype,
            pat,
            mat
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(parentage: Parentage) -> Individual {
        Individual {
            family_id: "F1".into(),
            id: 4,
            parentage,
            sex: Sex::Female,
            phenotype: Phenotype::Unaffected,
            genotype: Genotype::Het,
        }
    }

    #[test]
    fn test_unknown_parents_read_as_zero() {
        let ind = sample(Parentage::Unknown);
        assert!(ind.is_founder());
        assert_eq!((ind.paternal_id(), ind.maternal_id()), (0, 0));
    }

    #[test]
    fn test_known_parents() {
        let ind = sample(Parentage::Known { paternal: 1, maternal: 2 });
        assert!(!ind.is_founder());
        assert_eq!(ind.paternal_id(), 1);
        assert_eq!(ind.maternal_id(), 2);
        assert!(ind.is_carrier());
        assert!(!ind.is_affected());
        assert_eq!(ind.summary(), "#4 | sex=2 | phenotype=1 | genotype=1 | parents=1/2");
    }
}
