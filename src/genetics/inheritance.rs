//! InheritanceModel: Mendelian transition tables for a single biallelic locus
//!
//! The forward table answers "what can this couple's child be?" and the
//! reverse table answers "which parents could have produced this genotype?".
//! Reverse weights are Hardy-Weinberg joint frequencies of the parental pair,
//! so ancestor inference draws plausible parents rather than exact posteriors.

use super::genotype::Genotype;
use super::sampling::weighted_choice;
use crate::error::{PedigreeError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

const REF: Genotype = Genotype::HomRef;
const HET: Genotype = Genotype::Het;
const ALT: Genotype = Genotype::HomAlt;

/// Ordered (paternal, maternal) pairs able to produce each child genotype,
/// indexed by child genotype code
const REVERSE_PAIRS: [&[(Genotype, Genotype)]; 3] = [
    &[(HET, REF), (REF, HET), (REF, REF)],
    &[(ALT, HET), (HET, ALT), (ALT, REF), (REF, ALT), (HET, HET), (HET, REF), (REF, HET)],
    &[(ALT, ALT), (ALT, HET), (HET, ALT), (HET, HET)],
];

/// Child outcomes with relative integer weights
pub type ForwardOutcomes = Vec<(Genotype, u32)>;
/// Parental pairs with relative population weights
pub type ReverseOutcomes = Vec<((Genotype, Genotype), f64)>;

/// Hardy-Weinberg genotype frequencies for a reference-allele frequency `p`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HardyWeinberg {
    /// p²
    pub hom_ref: f64,
    /// 2pq
    pub het: f64,
    /// q²
    pub hom_alt: f64,
}

impl HardyWeinberg {
    pub fn from_alt_freq(q: f64) -> Self {
        let p = 1.0 - q;
        Self {
            hom_ref: p * p,
            het: 2.0 * p * q,
            hom_alt: q * q,
        }
    }

    pub fn frequency(&self, genotype: Genotype) -> f64 {
        match genotype {
            Genotype::HomRef => self.hom_ref,
            Genotype::Het => self.het,
            Genotype::HomAlt => self.hom_alt,
        }
    }

    /// Population prior as a weighted list, in genotype-code order
    pub fn weights(&self) -> [(Genotype, f64); 3] {
        [
            (Genotype::HomRef, self.hom_ref),
            (Genotype::Het, self.het),
            (Genotype::HomAlt, self.hom_alt),
        ]
    }
}

/// Gametes a parent can transmit: (alternate allele?, relative weight).
/// Homozygotes transmit their only allele with the full weight of 2.
fn gametes(genotype: Genotype) -> &'static [(u8, u32)] {
    match genotype {
        Genotype::HomRef => &[(0, 2)],
        Genotype::Het => &[(1, 1), (0, 1)],
        Genotype::HomAlt => &[(1, 2)],
    }
}

/// Convolve both parents' gametes into child genotype weights.
/// Outcomes are listed from most to fewest alternate alleles.
fn segregate(paternal: Genotype, maternal: Genotype) -> ForwardOutcomes {
    let mut weights = [0u32; 3];
    for &(pa, pw) in gametes(paternal) {
        for &(ma, mw) in gametes(maternal) {
            weights[(pa + ma) as usize] += pw * mw;
        }
    }
    Genotype::ALL
        .iter()
        .rev()
        .filter(|g| weights[g.index()] > 0)
        .map(|&g| (g, weights[g.index()]))
        .collect()
}

/// Forward and reverse genotype-transition tables for one allele frequency
#[derive(Debug, Clone, Serialize)]
pub struct InheritanceModel {
    /// Alternate-allele frequency q
    pub alt_freq: f64,
    /// Reference-allele frequency p = 1 - q
    pub ref_freq: f64,
    pub hardy_weinberg: HardyWeinberg,
    forward: Vec<Vec<ForwardOutcomes>>,
    reverse: Vec<ReverseOutcomes>,
}

impl InheritanceModel {
    /// Build both tables for alternate-allele frequency `alt_freq`
    pub fn new(alt_freq: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&alt_freq) {
            return Err(PedigreeError::InvalidParameterRange {
                name: "alt_allele_freq",
                value: alt_freq,
            });
        }
        let hw = HardyWeinberg::from_alt_freq(alt_freq);

        let forward = Genotype::ALL
            .iter()
            .map(|&p| Genotype::ALL.iter().map(|&m| segregate(p, m)).collect())
            .collect();

        let reverse = REVERSE_PAIRS
            .iter()
            .map(|pairs| {
                pairs
                    .iter()
                    .map(|&(p, m)| ((p, m), hw.frequency(p) * hw.frequency(m)))
                    .collect()
            })
            .collect();

        Ok(Self {
            alt_freq,
            ref_freq: 1.0 - alt_freq,
            hardy_weinberg: hw,
            forward,
            reverse,
        })
    }

    /// Possible child genotypes for a (paternal, maternal) pair
    pub fn forward(&self, paternal: Genotype, maternal: Genotype) -> &[(Genotype, u32)] {
        &self.forward[paternal.index()][maternal.index()]
    }

    /// Possible (paternal, maternal) pairs for a child genotype
    pub fn reverse(&self, child: Genotype) -> &[((Genotype, Genotype), f64)] {
        &self.reverse[child.index()]
    }

    /// Forward lookup from raw genotype codes
    pub fn forward_by_code(&self, paternal: u8, maternal: u8) -> Result<&[(Genotype, u32)]> {
        Ok(self.forward(Genotype::try_from(paternal)?, Genotype::try_from(maternal)?))
    }

    /// Reverse lookup from a raw genotype code
    pub fn reverse_by_code(&self, child: u8) -> Result<&[((Genotype, Genotype), f64)]> {
        Ok(self.reverse(Genotype::try_from(child)?))
    }

    /// Whether `child` is a permitted outcome for the parental pair
    pub fn permits(&self, paternal: Genotype, maternal: Genotype, child: Genotype) -> bool {
        self.forward(paternal, maternal).iter().any(|(g, _)| *g == child)
    }

    /// Draw a child genotype from the forward table
    pub fn sample_child<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        paternal: Genotype,
        maternal: Genotype,
    ) -> Result<Genotype> {
        weighted_choice(rng, self.forward(paternal, maternal)).ok_or_else(|| {
            PedigreeError::DegenerateWeights(format!("child of {} x {}", paternal, maternal))
        })
    }

    /// Draw a parental genotype pair from the reverse table.
    /// `None` when no pair has positive population weight.
    pub fn sample_parents<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        child: Genotype,
    ) -> Option<(Genotype, Genotype)> {
        weighted_choice(rng, self.reverse(child))
    }

    /// Draw an unrelated individual's genotype from the population prior
    pub fn sample_population<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Genotype> {
        weighted_choice(rng, &self.hardy_weinberg.weights())
            .ok_or_else(|| PedigreeError::DegenerateWeights("population genotype".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_forward_table_matches_mendel() {
        let model = InheritanceModel::new(0.1).unwrap();
        assert_eq!(model.forward(ALT, ALT), &[(ALT, 4)]);
        assert_eq!(model.forward(ALT, HET), &[(ALT, 2), (HET, 2)]);
        assert_eq!(model.forward(HET, ALT), &[(ALT, 2), (HET, 2)]);
        assert_eq!(model.forward(ALT, REF), &[(HET, 4)]);
        assert_eq!(model.forward(REF, ALT), &[(HET, 4)]);
        assert_eq!(model.forward(HET, HET), &[(ALT, 1), (HET, 2), (REF, 1)]);
        assert_eq!(model.forward(HET, REF), &[(HET, 2), (REF, 2)]);
        assert_eq!(model.forward(REF, HET), &[(HET, 2), (REF, 2)]);
        assert_eq!(model.forward(REF, REF), &[(REF, 4)]);
    }

    #[test]
    fn test_reverse_table_weights() {
        let q = 0.1;
        let model = InheritanceModel::new(q).unwrap();
        let (rr, rh, ra) = ((1.0 - q) * (1.0 - q), 2.0 * (1.0 - q) * q, q * q);

        let homalt = model.reverse(ALT);
        let expected = [ra * ra, ra * rh, rh * ra, rh * rh];
        assert_eq!(homalt.len(), 4);
        for ((_, w), e) in homalt.iter().zip(expected) {
            assert!((w - e).abs() < 1e-12);
        }

        let het = model.reverse(HET);
        assert_eq!(het.len(), 7);
        assert_eq!(het[2].0, (ALT, REF));
        assert!((het[2].1 - ra * rr).abs() < 1e-12);
        assert!((het[4].1 - rh * rh).abs() < 1e-12);

        let homref = model.reverse(REF);
        assert_eq!(
            homref.iter().map(|(pair, _)| *pair).collect::<Vec<_>>(),
            vec![(HET, REF), (REF, HET), (REF, REF)]
        );
    }

    #[test]
    fn test_reverse_pairs_consistent_with_forward() {
        let model = InheritanceModel::new(0.3).unwrap();
        for child in Genotype::ALL {
            for ((p, m), _) in model.reverse(child) {
                assert!(model.permits(*p, *m, child), "{} x {} cannot give {}", p, m, child);
            }
        }
    }

    #[test]
    fn test_out_of_range_frequency() {
        assert!(matches!(
            InheritanceModel::new(1.2),
            Err(PedigreeError::InvalidParameterRange { name: "alt_allele_freq", .. })
        ));
        assert!(InheritanceModel::new(f64::NAN).is_err());
    }

    #[test]
    fn test_raw_code_lookup() {
        let model = InheritanceModel::new(0.1).unwrap();
        assert_eq!(model.forward_by_code(1, 1).unwrap().len(), 3);
        assert!(matches!(model.forward_by_code(1, 4), Err(PedigreeError::InvalidGenotype(4))));
        assert!(matches!(model.reverse_by_code(9), Err(PedigreeError::InvalidGenotype(9))));
    }

    #[test]
    fn test_degenerate_frequency() {
        let model = InheritanceModel::new(0.0).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(model.sample_population(&mut rng).unwrap(), REF);
            assert_eq!(model.sample_parents(&mut rng, REF), Some((REF, REF)));
        }
        // a homozygous-alternate child has no plausible parents when q = 0
        assert_eq!(model.sample_parents(&mut rng, ALT), None);
    }

    #[test]
    fn test_sampled_children_are_permitted() {
        let model = InheritanceModel::new(0.2).unwrap();
        let mut rng = StdRng::seed_from_u64(99);
        for p in Genotype::ALL {
            for m in Genotype::ALL {
                for _ in 0..50 {
                    let child = model.sample_child(&mut rng, p, m).unwrap();
                    assert!(model.permits(p, m, child));
                }
            }
        }
    }
}
