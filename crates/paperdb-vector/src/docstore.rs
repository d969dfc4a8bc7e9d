use anyhow::Result;
use arrow_array::{RecordBatch, RecordBatchIterator, StringArray, TimestampMillisecondArray};
use async_trait::async_trait;
use chrono::Utc;
use lancedb::{connect, Connection};
use std::path::Path;
use std::sync::Arc;

use crate::schema::build_docstore_schema;
use paperdb_core::traits::DocStore;
use paperdb_core::types::Node;

/// Auxiliary keyed node store. The hierarchical strategy registers every
/// tree node here (not just leaves) so a retrieval layer can merge a matched
/// leaf back up into its parent context. Writes are `merge_insert` on `id`,
/// so re-registering the same node is idempotent.
pub struct LanceDocStore {
    db: Connection,
    table: String,
}

impl LanceDocStore {
    pub async fn open(db_path: &Path, table: &str) -> Result<Self> {
        let db = connect(db_path.to_string_lossy().as_ref()).execute().await?;
        Ok(Self {
            db,
            table: table.to_string(),
        })
    }

    async fn ensure_table(&self) -> Result<()> {
        let names = self.db.table_names().execute().await?;
        if names.contains(&self.table) {
            return Ok(());
        }
        // create empty table with 0 rows
        let schema = build_docstore_schema();
        let iter = RecordBatchIterator::new(vec![].into_iter(), schema);
        self.db.create_table(&self.table, Box::new(iter)).execute().await?;
        Ok(())
    }

    /// Resolve arena indices to node ids and build one record batch for the
    /// whole arena.
    fn nodes_to_record_batch(nodes: &[Node]) -> Result<RecordBatch> {
        let schema = build_docstore_schema();
        let now = Utc::now().timestamp_millis();

        let mut ids = Vec::new();
        let mut texts = Vec::new();
        let mut metadatas = Vec::new();
        let mut parents: Vec<Option<String>> = Vec::new();
        let mut children = Vec::new();
        let mut timestamps = Vec::new();
        for node in nodes {
            ids.push(node.id.clone());
            texts.push(node.text.clone());
            metadatas.push(serde_json::to_string(&node.metadata)?);
            parents.push(node.parent.map(|p| nodes[p].id.clone()));
            let child_ids: Vec<&str> = node.children.iter().map(|&c| nodes[c].id.as_str()).collect();
            children.push(serde_json::to_string(&child_ids)?);
            timestamps.push(now);
        }

        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(ids)),
                Arc::new(StringArray::from(texts)),
                Arc::new(StringArray::from(metadatas)),
                Arc::new(StringArray::from(parents)),
                Arc::new(StringArray::from(children)),
                Arc::new(TimestampMillisecondArray::from(timestamps)),
            ],
        )?;
        Ok(batch)
    }
}

#[async_trait]
impl DocStore for LanceDocStore {
    async fn add_documents(&self, nodes: &[Node]) -> Result<()> {
        if nodes.is_empty() {
            return Ok(());
        }
        self.ensure_table().await?;
        let table = self.db.open_table(&self.table).execute().await?;

        let batch = Self::nodes_to_record_batch(nodes)?;
        let schema = batch.schema();
        let reader = Box::new(RecordBatchIterator::new(vec![Ok(batch)].into_iter(), schema));

        // Upsert behavior via merge_insert: node id is unique
        let mut mi = table.merge_insert(&["id"]);
        mi.when_matched_update_all(None).when_not_matched_insert_all();
        let _ = mi.execute(reader).await?;
        tracing::info!(table = %self.table, nodes = nodes.len(), "node tree registered");
        Ok(())
    }
}
