//! Domain types shared by the chunking strategies and the index builder.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type NodeId = String;
pub type Meta = HashMap<String, String>;

/// A source document after corpus selection. Titles are only used while
/// filtering the dataset pool and are dropped here; a document is just its
/// raw text, identified by position in the corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub text: String,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// An indexable unit of text produced by a chunking strategy.
///
/// - `id`: unique within the strategy's output set
/// - `metadata`: strategy-specific string payload (window text, level, ...)
/// - `parent`/`children`: arena indices into the owning [`Partition`];
///   flat strategies leave them empty, the hierarchical strategy uses them
///   to record the tree. Indices, never references, so the tree stays
///   acyclic from the borrow checker's point of view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub text: String,
    pub metadata: Meta,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            metadata: Meta::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// One strategy's output: the full node arena plus the subset of arena
/// indices that should actually be embedded and written to the collection.
/// For flat strategies `indexable` covers every node; for the hierarchical
/// strategy it is the leaf set while `nodes` keeps the whole tree for the
/// auxiliary document store.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    pub nodes: Vec<Node>,
    pub indexable: Vec<usize>,
}

impl Partition {
    /// Wrap a flat node list where every node is indexable.
    pub fn flat(nodes: Vec<Node>) -> Self {
        let indexable = (0..nodes.len()).collect();
        Self { nodes, indexable }
    }

    pub fn indexable_nodes(&self) -> impl Iterator<Item = &Node> {
        self.indexable.iter().map(|&i| &self.nodes[i])
    }

    pub fn indexable_texts(&self) -> Vec<String> {
        self.indexable_nodes().map(|n| n.text.clone()).collect()
    }
}
