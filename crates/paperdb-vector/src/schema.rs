//! Arrow schemas for the strategy collections and the node docstore.

use arrow_schema::{DataType, Field, Schema, TimeUnit};
use std::sync::Arc;

/// One row per indexable unit: id, payload text, metadata JSON, a content
/// hash for change detection, and the embedding vector.
pub fn build_collection_schema(dim: i32) -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("id", DataType::Utf8, false),
        Field::new("text", DataType::Utf8, false),
        Field::new("metadata", DataType::Utf8, false),
        Field::new("content_hash", DataType::Utf8, false),
        Field::new(
            "vector",
            DataType::FixedSizeList(Arc::new(Field::new("item", DataType::Float32, true)), dim),
            true,
        ),
    ]))
}

/// One row per hierarchical node, leaves and ancestors alike. Parent and
/// children are stored as node ids (children as a JSON array) so a retrieval
/// layer can walk the tree without arena indices.
pub fn build_docstore_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("id", DataType::Utf8, false),
        Field::new("text", DataType::Utf8, false),
        Field::new("metadata", DataType::Utf8, false),
        Field::new("parent", DataType::Utf8, true),
        Field::new("children", DataType::Utf8, false),
        Field::new(
            "updated_at",
            DataType::Timestamp(TimeUnit::Millisecond, None),
            false,
        ),
    ]))
}
