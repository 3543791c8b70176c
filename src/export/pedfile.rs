//! Pedigree-file (PED) export
//!
//! Six columns per individual: FamilyID, IndividualID, PaternalID, MaternalID,
//! Sex, Phenotype. No header row. Missing parents are written as 0.

use crate::error::{PedigreeError, Result};
use crate::pedigree::{Individual, Pedigree};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

const FALLBACK_FAMILY: &str = "GeneratedFamily";

/// Column separator for PED output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PedDelimiter {
    #[default]
    Tab,
    Space,
}

impl PedDelimiter {
    pub fn as_str(self) -> &'static str {
        match self {
            PedDelimiter::Tab => "\t",
            PedDelimiter::Space => " ",
        }
    }
}

impl FromStr for PedDelimiter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        match s.to_ascii_lowercase().as_str() {
            "tab" | "\\t" => Ok(PedDelimiter::Tab),
            "space" | " " => Ok(PedDelimiter::Space),
            other => Err(format!("unknown delimiter '{}' (expected tab or space)", other)),
        }
    }
}

/// One individual flattened to pedigree-file columns, plus the genotype
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PedRow {
    #[serde(rename = "FamilyID")]
    pub family_id: String,
    #[serde(rename = "IndividualID")]
    pub individual_id: u32,
    #[serde(rename = "PaternalID")]
    pub paternal_id: u32,
    #[serde(rename = "MaternalID")]
    pub maternal_id: u32,
    #[serde(rename = "Sex")]
    pub sex: u8,
    #[serde(rename = "Phenotype")]
    pub phenotype: u8,
    #[serde(rename = "Genotype")]
    pub genotype: u8,
}

impl From<&Individual> for PedRow {
    fn from(ind: &Individual) -> Self {
        Self {
            family_id: ind.family_id.clone(),
            individual_id: ind.id,
            paternal_id: ind.paternal_id(),
            maternal_id: ind.maternal_id(),
            sex: ind.sex.code(),
            phenotype: ind.phenotype.code(),
            genotype: ind.genotype.code(),
        }
    }
}

impl PedRow {
    /// The six PED columns joined by `delimiter` (genotype is not a PED column)
    pub fn to_line(&self, delimiter: PedDelimiter) -> String {
        [
            self.family_id.clone(),
            self.individual_id.to_string(),
            self.paternal_id.to_string(),
            self.maternal_id.to_string(),
            self.sex.to_string(),
            self.phenotype.to_string(),
        ]
        .join(delimiter.as_str())
    }
}

pub fn pedigree_rows(pedigree: &Pedigree) -> Vec<PedRow> {
    pedigree.iter().map(PedRow::from).collect()
}

/// Render rows as PED text, newline-terminated
pub fn format_rows(rows: &[PedRow], delimiter: PedDelimiter) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str(&row.to_line(delimiter));
        out.push('\n');
    }
    out
}

pub fn format_ped(pedigree: &Pedigree, delimiter: PedDelimiter) -> String {
    format_rows(&pedigree_rows(pedigree), delimiter)
}

/// `<FamilyID>.ped`, falling back to a generic name for blank IDs
pub fn ped_file_name(family_id: &str) -> String {
    let name = family_id.trim();
    if name.is_empty() {
        format!("{}.ped", FALLBACK_FAMILY)
    } else {
        format!("{}.ped", name)
    }
}

/// Write the pedigree to `<dir>/<FamilyID>.ped`, creating `dir` if needed
pub fn write_ped_file(
    pedigree: &Pedigree,
    dir: impl AsRef<Path>,
    delimiter: PedDelimiter,
) -> Result<PathBuf> {
    let dir = dir.as_ref();
    let name = ped_file_name(&pedigree.family_id);
    if name.contains(std::path::is_separator) {
        return Err(PedigreeError::InvalidArgument(format!(
            "family ID '{}' is not a valid file name",
            pedigree.family_id
        )));
    }
    std::fs::create_dir_all(dir)?;
    let path = dir.join(name);
    std::fs::write(&path, format_ped(pedigree, delimiter))?;
    info!("Wrote {} individuals to {}", pedigree.len(), path.display());
    Ok(path)
}
