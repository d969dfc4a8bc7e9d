use std::fs;

use figment::providers::{Format, Toml};
use figment::Figment;
use paperdb_core::config::Config;
use paperdb_core::dataset::load_rows;
use paperdb_core::types::{Node, Partition};
use tempfile::TempDir;

#[test]
fn load_rows_parses_jsonl_and_skips_blank_lines() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("snapshot.jsonl");
    fs::write(
        &path,
        "{\"title\": \"A\", \"content\": \"alpha\"}\n\n{\"title\": \"B\", \"content\": \"bravo\"}\n",
    )
    .unwrap();

    let rows = load_rows(&path).expect("load");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].title, "A");
    assert_eq!(rows[1].content, "bravo");
}

#[test]
fn load_rows_rejects_malformed_line() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("snapshot.jsonl");
    fs::write(&path, "{\"title\": \"A\", \"content\": \"alpha\"}\nnot json\n").unwrap();

    let err = load_rows(&path).unwrap_err();
    assert!(err.to_string().contains(":2"), "error names the line: {err}");
}

#[test]
fn load_rows_missing_file_is_config_error() {
    let err = load_rows(std::path::Path::new("/nonexistent/snapshot.jsonl")).unwrap_err();
    assert!(matches!(err, paperdb_core::Error::Config(_)));
}

#[test]
fn pipeline_config_defaults_and_overrides() {
    let figment = Figment::new().merge(Toml::string(
        r#"
        [pipeline]
        sample_size = 7
        seed = 42
        "#,
    ));
    let config = Config::from_figment(figment);
    let pipeline = config.pipeline().expect("pipeline config");

    assert_eq!(pipeline.sample_size, 7);
    assert_eq!(pipeline.seed, 42);
    // Untouched keys keep their defaults.
    assert_eq!(pipeline.token_chunk_size, 512);
    assert_eq!(pipeline.token_overlap, 50);
    assert_eq!(pipeline.hierarchy_levels, vec![2048, 512, 128]);
    assert_eq!(pipeline.sentence_collection, "papers_sentence_window");
}

#[test]
fn embedding_config_falls_back_to_top_level_key() {
    let figment = Figment::new().merge(Toml::string("openai_api_key = \"sk-test\"\n"));
    let config = Config::from_figment(figment);
    let embed = config.embedding().expect("embed config");

    assert_eq!(embed.api_key.as_deref(), Some("sk-test"));
    assert_eq!(embed.model, "text-embedding-3-large");
    assert_eq!(embed.dim, 3072);
}

#[test]
fn partition_flat_marks_every_node_indexable() {
    let nodes = vec![Node::new("a", "one"), Node::new("b", "two")];
    let partition = Partition::flat(nodes);

    assert_eq!(partition.indexable, vec![0, 1]);
    assert_eq!(partition.indexable_texts(), vec!["one", "two"]);
    assert!(partition.nodes.iter().all(|n| n.is_root() && n.is_leaf()));
}
