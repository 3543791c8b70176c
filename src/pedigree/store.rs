//! RecordStore: append-only record collection for one generation run
//!
//! Owns the monotonic ID counter. Every insert checks that referenced
//! parents already exist, so the store can never hold a dangling link.

use super::record::{Individual, Parentage};
use crate::error::{PedigreeError, Result};
use crate::genetics::{Genotype, Phenotype, Sex};
use log::debug;

#[derive(Debug)]
pub struct RecordStore {
    family_id: String,
    records: Vec<Individual>,
    next_id: u32,
    capacity: usize,
}

impl RecordStore {
    /// Create an empty store that refuses to grow past `capacity` records
    pub fn new(family_id: impl Into<String>, capacity: usize) -> Self {
        Self {
            family_id: family_id.into(),
            records: Vec::new(),
            next_id: 1,
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// ID the next insert will receive
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    pub fn contains(&self, id: u32) -> bool {
        id >= 1 && (id as usize) <= self.records.len()
    }

    pub fn get(&self, id: u32) -> Result<&Individual> {
        if !self.contains(id) {
            return Err(PedigreeError::UnknownIndividual(id));
        }
        Ok(&self.records[id as usize - 1])
    }

    fn get_mut(&mut self, id: u32) -> Result<&mut Individual> {
        if !self.contains(id) {
            return Err(PedigreeError::UnknownIndividual(id));
        }
        Ok(&mut self.records[id as usize - 1])
    }

    pub fn genotype(&self, id: u32) -> Result<Genotype> {
        Ok(self.get(id)?.genotype)
    }

    pub fn sex(&self, id: u32) -> Result<Sex> {
        Ok(self.get(id)?.sex)
    }

    /// Append a record and return its newly assigned ID
    pub fn insert(
        &mut self,
        parentage: Parentage,
        sex: Sex,
        phenotype: Phenotype,
        genotype: Genotype,
    ) -> Result<u32> {
        if self.records.len() >= self.capacity {
            return Err(PedigreeError::CapacityExceeded { limit: self.capacity });
        }
        if let Parentage::Known { paternal, maternal } = parentage {
            self.get(paternal)?;
            self.get(maternal)?;
        }

        let id = self.next_id;
        self.records.push(Individual {
            family_id: self.family_id.clone(),
            id,
            parentage,
            sex,
            phenotype,
            genotype,
        });
        self.next_id += 1;

        debug!(
            "{}: inserted #{} (sex={}, genotype={}, parents={:?})",
            self.family_id,
            id,
            sex.code(),
            genotype,
            parentage.ids()
        );
        Ok(id)
    }

    /// Record parents for an individual whose parents are still unknown.
    ///
    /// This is the only mutation allowed after insertion, and it can happen
    /// at most once per record.
    pub fn link_parents(&mut self, child: u32, paternal: u32, maternal: u32) -> Result<()> {
        self.get(paternal)?;
        self.get(maternal)?;
        let record = self.get_mut(child)?;
        if record.parentage.is_known() {
            return Err(PedigreeError::ParentsAlreadyKnown(child));
        }
        record.parentage = Parentage::Known { paternal, maternal };
        debug!("{}: back-filled parents {}/{} for #{}", self.family_id, paternal, maternal, child);
        Ok(())
    }

    /// Hand over the finished records
    pub fn into_records(self) -> Vec<Individual> {
        self.records
    }
}
