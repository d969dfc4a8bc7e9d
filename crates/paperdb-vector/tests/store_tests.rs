use futures::TryStreamExt;
use lancedb::query::ExecutableQuery;
use lancedb::Connection;
use paperdb_core::traits::{DocStore, VectorStore};
use paperdb_core::types::Node;
use paperdb_vector::{LanceDocStore, LanceVectorStore};

const DIM: usize = 16;

fn unit(id: &str, text: &str) -> Node {
    Node::new(id, text)
}

fn vector(seed: f32) -> Vec<f32> {
    (0..DIM).map(|i| seed + i as f32).collect()
}

async fn count_rows(conn: &Connection, table: &str) -> usize {
    let t = conn.open_table(table).execute().await.expect("open table");
    let mut stream = t.query().execute().await.expect("query");
    let mut n = 0;
    while let Some(batch) = stream.try_next().await.expect("stream") {
        n += batch.num_rows();
    }
    n
}

#[tokio::test]
async fn create_collection_twice_fails() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let store = LanceVectorStore::open(tmp.path(), DIM).await?;

    store.create_collection("papers_token").await?;
    let err = store.create_collection("papers_token").await.unwrap_err();
    assert!(err.to_string().contains("already exists"), "{err}");
    Ok(())
}

#[tokio::test]
async fn upsert_writes_every_unit() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let store = LanceVectorStore::open(tmp.path(), DIM).await?;
    store.create_collection("papers_token").await?;

    let nodes: Vec<Node> = (0..5)
        .map(|i| unit(&format!("doc0:tok{i}"), &format!("chunk {i}")))
        .collect();
    let vectors: Vec<Vec<f32>> = (0..5).map(|i| vector(i as f32)).collect();
    store.upsert("papers_token", &nodes, &vectors).await?;

    assert_eq!(count_rows(store.connection(), "papers_token").await, 5);
    Ok(())
}

#[tokio::test]
async fn upsert_rejects_mismatched_lengths_and_dims() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let store = LanceVectorStore::open(tmp.path(), DIM).await?;
    store.create_collection("papers_token").await?;

    let nodes = vec![unit("a", "alpha"), unit("b", "bravo")];
    let err = store
        .upsert("papers_token", &nodes, &[vector(0.0)])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("2 units but 1 vectors"), "{err}");

    let bad_dim = vec![vec![0.0f32; DIM + 1], vec![0.0f32; DIM + 1]];
    let err = store.upsert("papers_token", &nodes, &bad_dim).await.unwrap_err();
    assert!(err.to_string().contains("does not match store dim"), "{err}");
    Ok(())
}

#[tokio::test]
async fn docstore_registration_is_idempotent() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let docstore = LanceDocStore::open(tmp.path(), "papers_nodes").await?;

    // A tiny arena: one root with two children.
    let mut root = unit("doc0:lvl0:0", "alpha bravo charlie delta");
    root.children = vec![1, 2];
    let mut left = unit("doc0:lvl1:0", "alpha bravo");
    left.parent = Some(0);
    let mut right = unit("doc0:lvl1:1", "charlie delta");
    right.parent = Some(0);
    let nodes = vec![root, left, right];

    docstore.add_documents(&nodes).await?;
    docstore.add_documents(&nodes).await?;

    let conn = lancedb::connect(tmp.path().to_string_lossy().as_ref())
        .execute()
        .await?;
    assert_eq!(count_rows(&conn, "papers_nodes").await, 3, "merge_insert deduplicates by id");
    Ok(())
}
