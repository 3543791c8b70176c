//! Pedigree: the finished record set handed to exporters

use super::record::Individual;
use crate::export::pedfile::{format_ped, PedDelimiter};
use crate::genetics::{phenotype, InheritanceMode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A finalized, generated family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pedigree {
    pub family_id: String,
    pub mode: InheritanceMode,
    individuals: Vec<Individual>,
}

impl Pedigree {
    pub fn new(family_id: impl Into<String>, mode: InheritanceMode, individuals: Vec<Individual>) -> Self {
        Self {
            family_id: family_id.into(),
            mode,
            individuals,
        }
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn iter(&self) -> impl Iterator<Item = &Individual> {
        self.individuals.iter()
    }

    pub fn get(&self, id: u32) -> Option<&Individual> {
        id.checked_sub(1).and_then(|i| self.individuals.get(i as usize))
    }

    /// The affected individual forward expansion started from
    pub fn primary_founder(&self) -> Option<&Individual> {
        self.get(1)
    }

    /// Everyone without recorded parents
    pub fn founders(&self) -> Vec<&Individual> {
        self.individuals.iter().filter(|i| i.is_founder()).collect()
    }

    pub fn children_of(&self, parent: u32) -> Vec<&Individual> {
        self.individuals
            .iter()
            .filter(|i| parent != 0 && (i.paternal_id() == parent || i.maternal_id() == parent))
            .collect()
    }

    pub fn affected_count(&self) -> usize {
        self.individuals.iter().filter(|i| i.is_affected()).count()
    }

    pub fn carrier_count(&self) -> usize {
        self.individuals.iter().filter(|i| i.is_carrier()).count()
    }

    /// Generation depth of each individual: founders are 0, everyone else
    /// sits one below their deepest parent
    pub fn generation_depths(&self) -> HashMap<u32, u32> {
        let mut depths = HashMap::with_capacity(self.individuals.len());
        for ind in &self.individuals {
            self.depth_of(ind.id, &mut depths);
        }
        depths
    }

    fn depth_of(&self, id: u32, memo: &mut HashMap<u32, u32>) -> u32 {
        if let Some(d) = memo.get(&id) {
            return *d;
        }
        // provisional entry so malformed cyclic input terminates
        memo.insert(id, 0);
        let depth = match self.get(id) {
            Some(ind) if !ind.is_founder() => {
                let pat = self.depth_of(ind.paternal_id(), memo);
                let mat = self.depth_of(ind.maternal_id(), memo);
                pat.max(mat) + 1
            }
            _ => 0,
        };
        memo.insert(id, depth);
        depth
    }

    /// Number of generations spanned by the longest line of descent
    pub fn depth(&self) -> u32 {
        self.generation_depths().values().max().map_or(0, |d| d + 1)
    }

    /// Structural problems, empty for a well-formed pedigree
    pub fn integrity_violations(&self) -> Vec<String> {
        let mut problems = Vec::new();
        for (index, ind) in self.individuals.iter().enumerate() {
            if ind.id as usize != index + 1 {
                problems.push(format!("record {} carries ID {}", index + 1, ind.id));
            }
            if ind.family_id != self.family_id {
                problems.push(format!("#{} belongs to family '{}'", ind.id, ind.family_id));
            }
            if ind.phenotype != phenotype(ind.genotype, self.mode) {
                problems.push(format!("#{} phenotype does not match genotype {}", ind.id, ind.genotype));
            }
            let (pat, mat) = ind.parentage.ids();
            if ind.parentage.is_known() {
                for parent in [pat, mat] {
                    if self.get(parent).is_none() || parent == ind.id {
                        problems.push(format!("#{} references missing parent {}", ind.id, parent));
                    }
                }
            }
        }
        if let Some(root) = self.primary_founder() {
            if !root.is_founder() {
                problems.push("primary founder has parents".to_string());
            }
            if !root.is_affected() {
                problems.push("primary founder is unaffected".to_string());
            }
        }
        problems
    }

    /// Pedigree-file text, one row per individual, no header
    pub fn to_ped(&self, delimiter: PedDelimiter) -> String {
        format_ped(self, delimiter)
    }

    pub fn summary(&self) -> String {
        format!(
            "Pedigree '{}' | {} | {} individuals | {} affected | {} carriers | {} founders | {} generations",
            self.family_id,
            self.mode.abbreviation(),
            self.len(),
            self.affected_count(),
            self.carrier_count(),
            self.founders().len(),
            self.depth()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genetics::{Genotype, Phenotype, Sex};
    use crate::pedigree::record::Parentage;

    fn person(id: u32, parentage: Parentage, sex: Sex, genotype: Genotype) -> Individual {
        Individual {
            family_id: "F1".into(),
            id,
            parentage,
            sex,
            phenotype: phenotype(genotype, InheritanceMode::Recessive),
            genotype,
        }
    }

    fn trio_with_grandparents() -> Pedigree {
        let kids = Parentage::Known { paternal: 1, maternal: 2 };
        Pedigree::new(
            "F1",
            InheritanceMode::Recessive,
            vec![
                person(1, Parentage::Unknown, Sex::Male, Genotype::HomAlt),
                person(2, Parentage::Known { paternal: 4, maternal: 5 }, Sex::Female, Genotype::Het),
                person(3, kids, Sex::Female, Genotype::HomAlt),
                person(4, Parentage::Unknown, Sex::Male, Genotype::Het),
                person(5, Parentage::Unknown, Sex::Female, Genotype::HomRef),
            ],
        )
    }

    #[test]
    fn test_lookup() {
        let ped = trio_with_grandparents();
        assert_eq!(ped.len(), 5);
        assert!(ped.get(0).is_none());
        assert!(ped.get(6).is_none());
        assert_eq!(ped.get(3).unwrap().sex, Sex::Female);
        assert_eq!(ped.primary_founder().unwrap().id, 1);
    }

    #[test]
    fn test_counts() {
        let ped = trio_with_grandparents();
        assert_eq!(ped.affected_count(), 2);
        assert_eq!(ped.carrier_count(), 4);
        assert_eq!(ped.founders().len(), 3);
        assert_eq!(ped.children_of(1).len(), 1);
        assert_eq!(ped.children_of(4).iter().map(|i| i.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_depths_follow_back_filled_ancestors() {
        let ped = trio_with_grandparents();
        let depths = ped.generation_depths();
        assert_eq!(depths[&1], 0);
        assert_eq!(depths[&4], 0);
        assert_eq!(depths[&2], 1);
        assert_eq!(depths[&3], 2);
        assert_eq!(ped.depth(), 3);
    }

    #[test]
    fn test_integrity_clean() {
        assert!(trio_with_grandparents().integrity_violations().is_empty());
    }

    #[test]
    fn test_integrity_detects_problems() {
        let mut records = trio_with_grandparents().individuals;
        records[2].parentage = Parentage::Known { paternal: 1, maternal: 9 };
        records[3].phenotype = Phenotype::Affected;
        let ped = Pedigree::new("F1", InheritanceMode::Recessive, records);
        let problems = ped.integrity_violations();
        assert_eq!(problems.len(), 2, "{:?}", problems);
    }

    #[test]
    fn test_summary() {
        let summary = trio_with_grandparents().summary();
        assert!(summary.contains("5 individuals"));
        assert!(summary.contains("AR"));
    }
}
