//! Export surfaces for generated pedigrees
//!
//! PED text files, a parent → child graph with DOT rendering, and JSON
//! snapshots with integrity checksums.

pub mod graph;
pub mod pedfile;
pub mod snapshot;

pub use graph::{GraphNode, PedigreeGraph};
pub use pedfile::{format_ped, write_ped_file, PedDelimiter, PedRow};
pub use snapshot::{pedigree_checksum, PedigreeSnapshot};
