use anyhow::{bail, Result};
use arrow_array::{FixedSizeListArray, RecordBatch, RecordBatchIterator, StringArray};
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use lancedb::{connect, Connection};
use std::path::Path;
use std::sync::Arc;

use crate::schema::build_collection_schema;
use paperdb_core::traits::VectorStore;
use paperdb_core::types::Node;

/// LanceDB-backed vector store. Each strategy writes its units into its own
/// named collection (a table); collections are created at most once per run.
pub struct LanceVectorStore {
    db: Connection,
    dim: usize,
}

impl LanceVectorStore {
    pub async fn open(db_path: &Path, dim: usize) -> Result<Self> {
        let db = connect(db_path.to_string_lossy().as_ref()).execute().await?;
        Ok(Self { db, dim })
    }

    pub fn connection(&self) -> &Connection {
        &self.db
    }

    fn nodes_to_record_batch(&self, nodes: &[Node], vectors: &[Vec<f32>]) -> Result<RecordBatch> {
        let schema = build_collection_schema(self.dim as i32);
        let mut ids = Vec::new();
        let mut texts = Vec::new();
        let mut metadatas = Vec::new();
        let mut hashes = Vec::new();
        let mut vecs: Vec<Option<Vec<Option<f32>>>> = Vec::new();
        for (node, vector) in nodes.iter().zip(vectors.iter()) {
            ids.push(node.id.clone());
            texts.push(node.text.clone());
            metadatas.push(serde_json::to_string(&node.metadata)?);
            hashes.push(blake3::hash(node.text.as_bytes()).to_hex().to_string());
            vecs.push(Some(vector.iter().map(|&x| Some(x)).collect()));
        }
        let record_batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(ids)),
                Arc::new(StringArray::from(texts)),
                Arc::new(StringArray::from(metadatas)),
                Arc::new(StringArray::from(hashes)),
                Arc::new(FixedSizeListArray::from_iter_primitive::<
                    arrow_array::types::Float32Type,
                    _,
                    _,
                >(vecs.into_iter(), self.dim as i32)),
            ],
        )?;
        Ok(record_batch)
    }

    async fn insert_batch(&self, collection: &str, batch: RecordBatch) -> Result<()> {
        let schema = batch.schema();
        let reader = Box::new(RecordBatchIterator::new(vec![Ok(batch)].into_iter(), schema));
        self.db
            .open_table(collection)
            .execute()
            .await?
            .add(reader)
            .execute()
            .await?;
        Ok(())
    }
}

#[async_trait]
impl VectorStore for LanceVectorStore {
    async fn create_collection(&self, name: &str) -> Result<()> {
        let names = self.db.table_names().execute().await?;
        if names.contains(&name.to_string()) {
            bail!("collection '{name}' already exists");
        }
        let schema = build_collection_schema(self.dim as i32);
        let iter = RecordBatchIterator::new(vec![].into_iter(), schema);
        self.db.create_table(name, Box::new(iter)).execute().await?;
        tracing::info!(collection = name, "collection created");
        Ok(())
    }

    async fn upsert(&self, collection: &str, nodes: &[Node], vectors: &[Vec<f32>]) -> Result<()> {
        if nodes.is_empty() {
            tracing::warn!(collection, "no units to write");
            return Ok(());
        }
        if nodes.len() != vectors.len() {
            bail!(
                "{} units but {} vectors for collection '{collection}'",
                nodes.len(),
                vectors.len()
            );
        }
        for v in vectors {
            if v.len() != self.dim {
                bail!("vector dim {} does not match store dim {}", v.len(), self.dim);
            }
        }

        let pb = ProgressBar::new(nodes.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} units ({percent}%) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let batch_size = 1000usize;
        let mut written = 0usize;
        for (chunk_nodes, chunk_vectors) in nodes
            .chunks(batch_size)
            .zip(vectors.chunks(batch_size))
        {
            let batch = self.nodes_to_record_batch(chunk_nodes, chunk_vectors)?;
            self.insert_batch(collection, batch).await?;
            written += chunk_nodes.len();
            pb.set_position(written as u64);
        }
        pb.finish_with_message("done");
        tracing::info!(collection, units = written, "collection populated");
        Ok(())
    }
}
