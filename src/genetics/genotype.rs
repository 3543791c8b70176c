//! Genotype, sex and phenotype codes
//!
//! All three use the integer codes of the standard pedigree-file convention,
//! so they (de)serialise as plain numbers.

use crate::error::{PedigreeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Allele-pair state at the single simulated locus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Genotype {
    /// Two reference alleles (code 0)
    HomRef,
    /// One reference, one alternate allele (code 1)
    Het,
    /// Two alternate alleles (code 2)
    HomAlt,
}

impl Genotype {
    pub const ALL: [Genotype; 3] = [Genotype::HomRef, Genotype::Het, Genotype::HomAlt];

    pub fn code(self) -> u8 {
        match self {
            Genotype::HomRef => 0,
            Genotype::Het => 1,
            Genotype::HomAlt => 2,
        }
    }

    pub(crate) fn index(self) -> usize {
        self.code() as usize
    }
}

impl TryFrom<u8> for Genotype {
    type Error = PedigreeError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Genotype::HomRef),
            1 => Ok(Genotype::Het),
            2 => Ok(Genotype::HomAlt),
            other => Err(PedigreeError::InvalidGenotype(other)),
        }
    }
}

impl From<Genotype> for u8 {
    fn from(g: Genotype) -> u8 {
        g.code()
    }
}

impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Recorded sex: 1 = male, 2 = female
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn code(self) -> u8 {
        match self {
            Sex::Male => 1,
            Sex::Female => 2,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Sex::Male => Sex::Female,
            Sex::Female => Sex::Male,
        }
    }
}

impl TryFrom<u8> for Sex {
    type Error = String;

    fn try_from(code: u8) -> std::result::Result<Self, String> {
        match code {
            1 => Ok(Sex::Male),
            2 => Ok(Sex::Female),
            other => Err(format!("invalid sex code {}", other)),
        }
    }
}

impl From<Sex> for u8 {
    fn from(s: Sex) -> u8 {
        s.code()
    }
}

/// Observed trait status: 1 = unaffected, 2 = affected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Phenotype {
    Unaffected,
    Affected,
}

impl Phenotype {
    pub fn code(self) -> u8 {
        match self {
            Phenotype::Unaffected => 1,
            Phenotype::Affected => 2,
        }
    }

    pub fn is_affected(self) -> bool {
        self == Phenotype::Affected
    }
}

impl TryFrom<u8> for Phenotype {
    type Error = String;

    fn try_from(code: u8) -> std::result::Result<Self, String> {
        match code {
            1 => Ok(Phenotype::Unaffected),
            2 => Ok(Phenotype::Affected),
            other => Err(format!("invalid phenotype code {}", other)),
        }
    }
}

impl From<Phenotype> for u8 {
    fn from(p: Phenotype) -> u8 {
        p.code()
    }
}

/// Mode of inheritance governing the genotype → phenotype mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum InheritanceMode {
    /// Autosomal dominant: one alternate allele is enough
    Dominant,
    /// Autosomal recessive: both alleles must be alternate
    Recessive,
}

impl InheritanceMode {
    /// Short pedigree-literature label
    pub fn abbreviation(self) -> &'static str {
        match self {
            InheritanceMode::Dominant => "AD",
            InheritanceMode::Recessive => "AR",
        }
    }
}

impl FromStr for InheritanceMode {
    type Err = PedigreeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ad" | "dominant" | "autosomal-dominant" => Ok(InheritanceMode::Dominant),
            "ar" | "recessive" | "autosomal-recessive" => Ok(InheritanceMode::Recessive),
            _ => Err(PedigreeError::InvalidMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for InheritanceMode {
    type Error = PedigreeError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<InheritanceMode> for String {
    fn from(mode: InheritanceMode) -> String {
        mode.to_string()
    }
}

impl fmt::Display for InheritanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InheritanceMode::Dominant => write!(f, "dominant"),
            InheritanceMode::Recessive => write!(f, "recessive"),
        }
    }
}

/// Translate a genotype into the phenotype it produces under `mode`
pub fn phenotype(genotype: Genotype, mode: InheritanceMode) -> Phenotype {
    let affected = match mode {
        InheritanceMode::Recessive => genotype == Genotype::HomAlt,
        InheritanceMode::Dominant => genotype != Genotype::HomRef,
    };
    if affected {
        Phenotype::Affected
    } else {
        Phenotype::Unaffected
    }
}

/// Phenotype lookup from raw codes, as read from external input
pub fn phenotype_from_codes(genotype: u8, mode: &str) -> Result<Phenotype> {
    let mode: InheritanceMode = mode.parse()?;
    Ok(phenotype(Genotype::try_from(genotype)?, mode))
}
