use crate::strategy::Strategy;
use crate::token::window_positions;
use paperdb_core::types::{Document, Node, Partition};
use paperdb_core::{Error, Result};

/// Hierarchical splitter: partitions each document into a tree of nodes at
/// strictly decreasing granularities. Level 0 windows are roots; each node
/// large enough to split again is re-split at the next level's granularity.
/// Parent/child links are arena indices into the partition's node vector.
///
/// Only leaves are indexable; the full tree is registered in the auxiliary
/// document store so retrieval can merge a matched leaf into its ancestors.
#[derive(Debug, Clone)]
pub struct HierarchicalSplitter {
    levels: Vec<usize>,
}

impl HierarchicalSplitter {
    /// `levels` are granularities in tokens, largest first. The list must be
    /// non-empty, non-zero, and strictly decreasing.
    pub fn new(levels: Vec<usize>) -> Result<Self> {
        if levels.is_empty() {
            return Err(Error::Config("hierarchy levels must not be empty".to_string()));
        }
        if levels.contains(&0) {
            return Err(Error::Config("hierarchy levels must be > 0".to_string()));
        }
        if levels.windows(2).any(|w| w[1] >= w[0]) {
            return Err(Error::Config(format!(
                "hierarchy levels must be strictly decreasing, got {levels:?}"
            )));
        }
        Ok(Self { levels })
    }
}

/// Nodes with no children: the small chunks that actually get embedded.
pub fn leaf_nodes(nodes: &[Node]) -> Vec<&Node> {
    nodes.iter().filter(|n| n.is_leaf()).collect()
}

/// Nodes with no parent: the top-level spans, one coverage unit per window
/// of the largest granularity.
pub fn root_nodes(nodes: &[Node]) -> Vec<&Node> {
    nodes.iter().filter(|n| n.is_root()).collect()
}

impl Strategy for HierarchicalSplitter {
    fn name(&self) -> &'static str {
        "hierarchical"
    }

    fn needs_docstore(&self) -> bool {
        true
    }

    fn partition(&self, docs: &[Document]) -> Result<Partition> {
        let mut nodes: Vec<Node> = Vec::new();

        for (d, doc) in docs.iter().enumerate() {
            let tokens: Vec<&str> = doc.text.split_whitespace().collect();
            if tokens.is_empty() {
                continue;
            }

            let mut ordinals = vec![0usize; self.levels.len()];

            // Level 0: roots.
            let mut frontier: Vec<usize> = Vec::new();
            for (start, end) in window_positions(tokens.len(), self.levels[0], 0) {
                let idx = nodes.len();
                let mut node = Node::new(
                    format!("doc{d}:lvl0:{}", ordinals[0]),
                    tokens[start..end].join(" "),
                );
                node.metadata.insert("doc".to_string(), d.to_string());
                node.metadata.insert("level".to_string(), "0".to_string());
                ordinals[0] += 1;
                nodes.push(node);
                frontier.push(idx);
            }

            // Re-split each frontier node at the next granularity. A node
            // already within the child size stays a leaf at its own level.
            for (level, &size) in self.levels.iter().enumerate().skip(1) {
                let mut next_frontier = Vec::new();
                for &p in &frontier {
                    let parent_text = nodes[p].text.clone();
                    let parent_tokens: Vec<&str> = parent_text.split_whitespace().collect();
                    if parent_tokens.len() <= size {
                        continue;
                    }
                    for (start, end) in window_positions(parent_tokens.len(), size, 0) {
                        let idx = nodes.len();
                        let mut node = Node::new(
                            format!("doc{d}:lvl{level}:{}", ordinals[level]),
                            parent_tokens[start..end].join(" "),
                        );
                        node.parent = Some(p);
                        node.metadata.insert("doc".to_string(), d.to_string());
                        node.metadata.insert("level".to_string(), level.to_string());
                        ordinals[level] += 1;
                        nodes.push(node);
                        nodes[p].children.push(idx);
                        next_frontier.push(idx);
                    }
                }
                frontier = next_frontier;
            }
        }

        let indexable: Vec<usize> = nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_leaf())
            .map(|(i, _)| i)
            .collect();
        tracing::debug!(
            total = nodes.len(),
            leaves = indexable.len(),
            "hierarchical partition complete"
        );
        Ok(Partition { nodes, indexable })
    }
}
