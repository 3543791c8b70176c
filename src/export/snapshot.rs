//! PedigreeSnapshot: JSON archive of a generated pedigree
//!
//! Stores the rows (genotypes included), the config that produced them and a
//! SHA256 checksum over every stored row field, so two runs can be compared
//! and a stored file can be checked for tampering.

use super::pedfile::{pedigree_rows, PedDelimiter, PedRow};
use crate::error::Result;
use crate::genetics::InheritanceMode;
use crate::pedigree::{GeneratorConfig, Pedigree};
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PedigreeSnapshot {
    pub family_id: String,
    pub mode: InheritanceMode,
    pub generated_at: DateTime<Utc>,
    /// Hex SHA256 of the tab-delimited rows with genotype as a seventh column
    pub checksum: String,
    pub config: Option<GeneratorConfig>,
    pub individuals: Vec<PedRow>,
}

/// Hex SHA256 over the tab-delimited PED rendering of `rows`, each line
/// extended with the genotype column
pub fn rows_checksum(rows: &[PedRow]) -> String {
    let mut hasher = Sha256::new();
    for row in rows {
        hasher.update(row.to_line(PedDelimiter::Tab).as_bytes());
        hasher.update(format!("\t{}\n", row.genotype).as_bytes());
    }
    hex::encode(hasher.finalize())
}

pub fn pedigree_checksum(pedigree: &Pedigree) -> String {
    rows_checksum(&pedigree_rows(pedigree))
}

impl PedigreeSnapshot {
    pub fn from_pedigree(pedigree: &Pedigree, config: Option<&GeneratorConfig>) -> Self {
        let individuals = pedigree_rows(pedigree);
        Self {
            family_id: pedigree.family_id.clone(),
            mode: pedigree.mode,
            generated_at: Utc::now(),
            checksum: rows_checksum(&individuals),
            config: config.cloned(),
            individuals,
        }
    }

    /// Leading `len` characters of the checksum, or all of it when shorter
    pub fn short_checksum(&self, len: usize) -> &str {
        self.checksum.get(..len).unwrap_or(&self.checksum)
    }

    /// Recompute the checksum and compare with the stored one
    pub fn verify(&self) -> bool {
        rows_checksum(&self.individuals) == self.checksum
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        info!(
            "Saved snapshot of {} ({} individuals, checksum {}) to {}",
            self.family_id,
            self.individuals.len(),
            self.short_checksum(12),
            path.display()
        );
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pedigree::generate_pedigree;

    fn config() -> GeneratorConfig {
        GeneratorConfig { family_id: "SNAP".into(), seed: Some(5), ..Default::default() }
    }

    #[test]
    fn test_same_seed_same_checksum() {
        let a = generate_pedigree(&config()).unwrap();
        let b = generate_pedigree(&config()).unwrap();
        assert_eq!(pedigree_checksum(&a), pedigree_checksum(&b));
        assert_eq!(pedigree_checksum(&a).len(), 64);
    }

    #[test]
    fn test_verify_detects_edits() {
        let ped = generate_pedigree(&config()).unwrap();
        let mut snapshot = PedigreeSnapshot::from_pedigree(&ped, Some(&config()));
        assert!(snapshot.verify());
        snapshot.individuals[0].phenotype = 1;
        assert!(!snapshot.verify());
    }

    #[test]
    fn test_verify_detects_genotype_edit() {
        let ped = generate_pedigree(&config()).unwrap();
        let mut snapshot = PedigreeSnapshot::from_pedigree(&ped, None);
        let row = &mut snapshot.individuals[0];
        row.genotype = (row.genotype + 1) % 3;
        assert!(!snapshot.verify());
    }

    #[test]
    fn test_checksum_covers_genotype_column() {
        let rows = pedigree_rows(&generate_pedigree(&config()).unwrap());
        let mut edited = rows.clone();
        let last = edited.len() - 1;
        edited[last].genotype = (edited[last].genotype + 1) % 3;
        assert_ne!(rows_checksum(&rows), rows_checksum(&edited));
    }

    #[test]
    fn test_save_with_short_checksum() {
        log::set_max_level(log::LevelFilter::Info);
        let ped = generate_pedigree(&config()).unwrap();
        let mut snapshot = PedigreeSnapshot::from_pedigree(&ped, None);
        snapshot.checksum = "abc".into();
        assert_eq!(snapshot.short_checksum(12), "abc");

        let path = std::env::temp_dir().join(format!("pedgen-short-{}.json", std::process::id()));
        snapshot.save(&path).unwrap();
        let loaded = PedigreeSnapshot::load(&path).unwrap();
        assert_eq!(loaded.checksum, "abc");
        assert!(!loaded.verify());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_save_and_load() {
        let ped = generate_pedigree(&config()).unwrap();
        let snapshot = PedigreeSnapshot::from_pedigree(&ped, Some(&config()));
        let path = std::env::temp_dir().join(format!("pedgen-snapshot-{}.json", std::process::id()));
        snapshot.save(&path).unwrap();

        let loaded = PedigreeSnapshot::load(&path).unwrap();
        assert!(loaded.verify());
        assert_eq!(loaded.individuals, snapshot.individuals);
        assert_eq!(loaded.config, Some(config()));
        assert_eq!(loaded.mode, ped.mode);
        let _ = std::fs::remove_file(&path);
    }
}
