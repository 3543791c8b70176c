//! Pedigree construction
//!
//! A pedigree grows from one affected primary founder: forward expansion adds
//! spouses and children generation by generation, backward expansion infers
//! ancestors for the parentless spouses that marry in. All records live in a
//! single `RecordStore` that is threaded through every step explicitly.

mod build;
mod config;
mod expansion;
mod family;
mod generators;
mod record;
mod store;

pub use build::{generate_pedigree, generate_pedigree_with_rng};
pub use config::GeneratorConfig;
pub use expansion::{Expander, ExpansionStats};
pub use family::Pedigree;
pub use generators::{spawn_ancestor, spawn_child, spawn_primary_founder, spawn_spouse};
pub use record::{Individual, Parentage};
pub use store::RecordStore;
