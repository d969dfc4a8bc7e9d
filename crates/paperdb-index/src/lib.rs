#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

//! Index builder: runs one chunking strategy end to end against the
//! embedding and storage collaborators. Strategies run strictly
//! sequentially and write independent collections, so a failure in one
//! build leaves the others untouched.

use anyhow::{bail, Result};
use paperdb_chunk::Strategy;
use paperdb_core::traits::{DocStore, Embedder, VectorStore};
use paperdb_core::types::{Document, Node};

pub struct IndexBuilder<'a> {
    embedder: &'a dyn Embedder,
    store: &'a dyn VectorStore,
    docstore: &'a dyn DocStore,
}

impl<'a> IndexBuilder<'a> {
    pub fn new(
        embedder: &'a dyn Embedder,
        store: &'a dyn VectorStore,
        docstore: &'a dyn DocStore,
    ) -> Self {
        Self {
            embedder,
            store,
            docstore,
        }
    }

    /// Build one strategy's collection: partition the corpus, register the
    /// node tree if the strategy needs the docstore, create the collection,
    /// embed every indexable unit in one batched call, and write the
    /// `(unit, vector)` pairs. Any failure aborts this build; no partial
    /// collection is patched up afterwards.
    pub async fn build(
        &self,
        strategy: &dyn Strategy,
        collection: &str,
        docs: &[Document],
    ) -> Result<usize> {
        tracing::info!(strategy = strategy.name(), collection, docs = docs.len(), "build start");
        let partition = strategy.partition(docs)?;

        if strategy.needs_docstore() {
            self.docstore.add_documents(&partition.nodes).await?;
        }

        self.store.create_collection(collection).await?;

        let texts = partition.indexable_texts();
        let vectors = self.embedder.embed_batch(&texts).await?;
        if vectors.len() != texts.len() {
            bail!(
                "embedder returned {} vectors for {} units",
                vectors.len(),
                texts.len()
            );
        }
        for v in &vectors {
            if v.len() != self.embedder.dim() {
                bail!("embedding dim {} does not match embedder dim {}", v.len(), self.embedder.dim());
            }
        }

        let units: Vec<Node> = partition.indexable_nodes().cloned().collect();
        self.store.upsert(collection, &units, &vectors).await?;

        tracing::info!(
            strategy = strategy.name(),
            collection,
            units = units.len(),
            total_nodes = partition.nodes.len(),
            "build complete"
        );
        Ok(units.len())
    }
}
