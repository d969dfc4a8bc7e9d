use paperdb_core::types::{Document, Partition};
use paperdb_core::Result;

/// A document-partitioning strategy. The index builder iterates strategies
/// uniformly: partition the corpus, embed the indexable subset, write one
/// collection.
pub trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether the full node set must be registered in the auxiliary
    /// document store before indexing. Only the hierarchical strategy needs
    /// this, so a matched leaf can later be merged back into its ancestors.
    fn needs_docstore(&self) -> bool {
        false
    }

    fn partition(&self, docs: &[Document]) -> Result<Partition>;
}
