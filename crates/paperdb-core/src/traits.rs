//! Collaborator seams: embedding, vector storage, and the auxiliary
//! document store. The partitioning logic itself is synchronous; these are
//! async because the storage backend and the embedding API are.

use crate::types::Node;
use async_trait::async_trait;

#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embedding dimensionality (D).
    fn dim(&self) -> usize;

    /// Compute embeddings for a batch of input texts. The result has the
    /// same length and order as `texts`. A failed call fails the whole
    /// batch; callers treat that as fatal for the current collection build.
    async fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>>;
}

#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Create a new, empty named collection. Fails if the name already
    /// exists; a rerun against the same store must not silently append.
    async fn create_collection(&self, name: &str) -> anyhow::Result<()>;

    /// Write `(node, vector)` pairs into an existing collection.
    /// `nodes` and `vectors` must have equal length.
    async fn upsert(
        &self,
        collection: &str,
        nodes: &[Node],
        vectors: &[Vec<f32>],
    ) -> anyhow::Result<()>;
}

#[async_trait]
pub trait DocStore: Send + Sync {
    /// Register nodes keyed by node id. `nodes` is a whole arena so parent
    /// and child indices can be resolved to ids. Re-registering the same id
    /// overwrites the previous row.
    async fn add_documents(&self, nodes: &[Node]) -> anyhow::Result<()>;
}
