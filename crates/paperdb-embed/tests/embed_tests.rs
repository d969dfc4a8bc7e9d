use paperdb_core::config::EmbedConfig;
use paperdb_embed::{get_default_embedder, FakeEmbedder, OpenAiEmbedder};
use paperdb_core::traits::Embedder;

#[tokio::test]
async fn fake_embedder_shapes_and_determinism() {
    let embedder = FakeEmbedder::new(3072);
    let texts = vec!["hello world".to_string(), "hello world".to_string()];
    let embs = embedder.embed_batch(&texts).await.expect("embed_batch");
    let v1 = &embs[0];
    let v2 = &embs[1];

    assert_eq!(v1.len(), 3072, "embedding dim follows config");

    // Norm approximately 1.0
    let norm: f32 = v1.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() <= 1e-3, "vector is L2-normalized (norm={norm})");

    // Deterministic for same input
    for (a, b) in v1.iter().zip(v2.iter()) {
        assert!((a - b).abs() <= 1e-6);
    }
}

#[tokio::test]
async fn fake_embedder_empty_batch_is_empty() {
    let embedder = FakeEmbedder::new(64);
    let embs = embedder.embed_batch(&[]).await.expect("embed_batch");
    assert!(embs.is_empty());
}

#[test]
fn openai_embedder_requires_an_api_key() {
    let cfg = EmbedConfig::default();
    assert!(cfg.api_key.is_none());
    let err = OpenAiEmbedder::new(&cfg).unwrap_err();
    assert!(err.to_string().contains("api_key"), "{err}");
}

#[test]
fn env_toggle_selects_the_fake_embedder() {
    std::env::set_var("APP_USE_FAKE_EMBEDDINGS", "1");
    // No api key configured; only the fake path can succeed here.
    let embedder = get_default_embedder(&EmbedConfig::default()).expect("embedder");
    assert_eq!(embedder.dim(), 3072);
    std::env::remove_var("APP_USE_FAKE_EMBEDDINGS");
}
