//! PedigreeGraph: parent → child digraph for visualisation
//!
//! One node per individual and one edge per recorded parent link. The graph
//! renders to Graphviz DOT for a top-down tree layout: males are boxes,
//! females ellipses, affected individuals red and unaffected light blue.

use crate::genetics::{Genotype, Phenotype, Sex};
use crate::pedigree::Pedigree;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;

const AFFECTED_COLOR: &str = "red";
const UNAFFECTED_COLOR: &str = "lightblue";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: u32,
    pub family_id: String,
    pub sex: Sex,
    pub phenotype: Phenotype,
    pub genotype: Genotype,
    /// Longest-path distance from a parentless node
    pub generation: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PedigreeGraph {
    nodes: Vec<GraphNode>,
    /// (parent, child)
    edges: Vec<(u32, u32)>,
}

impl PedigreeGraph {
    pub fn from_pedigree(pedigree: &Pedigree) -> Self {
        let depths = pedigree.generation_depths();
        let nodes = pedigree
            .iter()
            .map(|ind| GraphNode {
                id: ind.id,
                family_id: ind.family_id.clone(),
                sex: ind.sex,
                phenotype: ind.phenotype,
                genotype: ind.genotype,
                generation: depths.get(&ind.id).copied().unwrap_or(0),
            })
            .collect();

        let mut edges = Vec::new();
        for ind in pedigree.iter() {
            let (pat, mat) = ind.parentage.ids();
            if pat != 0 {
                edges.push((pat, ind.id));
            }
            if mat != 0 {
                edges.push((mat, ind.id));
            }
        }
        Self { nodes, edges }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[(u32, u32)] {
        &self.edges
    }

    pub fn node(&self, id: u32) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn parents_of(&self, id: u32) -> Vec<u32> {
        self.edges.iter().filter(|(_, c)| *c == id).map(|(p, _)| *p).collect()
    }

    pub fn children_of(&self, id: u32) -> Vec<u32> {
        self.edges.iter().filter(|(p, _)| *p == id).map(|(_, c)| *c).collect()
    }

    /// Nodes with no incoming edge
    pub fn roots(&self) -> Vec<u32> {
        self.nodes
            .iter()
            .filter(|n| !self.edges.iter().any(|(_, c)| *c == n.id))
            .map(|n| n.id)
            .collect()
    }

    /// Node IDs grouped by generation, top layer first
    pub fn generation_layers(&self) -> Vec<Vec<u32>> {
        let mut layers: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
        for node in &self.nodes {
            layers.entry(node.generation).or_default().push(node.id);
        }
        layers.into_values().collect()
    }

    /// Graphviz DOT source for a top-down pedigree drawing
    pub fn to_dot(&self, title: &str) -> String {
        let title = title.replace('"', "\\\"");
        let mut dot = String::new();
        let _ = writeln!(dot, "digraph \"{}\" {{", title);
        let _ = writeln!(dot, "    rankdir=TB;");
        let _ = writeln!(dot, "    label=\"{}\";", title);
        let _ = writeln!(dot, "    labelloc=t;");
        let _ = writeln!(dot, "    node [style=filled];");

        for node in &self.nodes {
            let shape = match node.sex {
                Sex::Male => "box",
                Sex::Female => "ellipse",
            };
            let color = if node.phenotype.is_affected() {
                AFFECTED_COLOR
            } else {
                UNAFFECTED_COLOR
            };
            let _ = writeln!(
                dot,
                "    {} [label=\"{}\", shape={}, fillcolor={}];",
                node.id, node.id, shape, color
            );
        }
        for (parent, child) in &self.edges {
            let _ = writeln!(dot, "    {} -> {};", parent, child);
        }
        for layer in self.generation_layers() {
            let ids: Vec<String> = layer.iter().map(|id| id.to_string()).collect();
            let _ = writeln!(dot, "    {{ rank=same; {}; }}", ids.join("; "));
        }
        dot.push_str("}\n");
        dot
    }
}
