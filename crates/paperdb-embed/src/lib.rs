#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

//! Embedding collaborator implementations: the OpenAI embeddings API and a
//! deterministic fake for tests and offline runs.

pub mod fake;
pub mod openai;

pub use fake::FakeEmbedder;
pub use openai::OpenAiEmbedder;

use anyhow::Result;
use paperdb_core::config::EmbedConfig;
use paperdb_core::traits::Embedder;

/// Build the configured embedder. `APP_USE_FAKE_EMBEDDINGS=1` forces the
/// fake embedder regardless of credentials, for fast deterministic runs.
pub fn get_default_embedder(cfg: &EmbedConfig) -> Result<Box<dyn Embedder>> {
    let use_fake = std::env::var("APP_USE_FAKE_EMBEDDINGS")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    if use_fake {
        tracing::info!(dim = cfg.dim, "using FakeEmbedder");
        return Ok(Box::new(FakeEmbedder::new(cfg.dim)));
    }
    Ok(Box::new(OpenAiEmbedder::new(cfg)?))
}
