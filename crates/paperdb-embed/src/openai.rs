use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use paperdb_core::config::EmbedConfig;
use paperdb_core::traits::Embedder;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingRow>,
}

#[derive(Deserialize)]
struct EmbeddingRow {
    index: usize,
    embedding: Vec<f32>,
}

/// OpenAI `/v1/embeddings` client. Inputs beyond `batch_size` are split into
/// sub-requests that run with bounded concurrency; rows are re-assembled by
/// the response `index` field, so the output order always matches the input.
#[derive(Debug)]
pub struct OpenAiEmbedder {
    client: reqwest::Client,
    api_key: String,
    model: String,
    dim: usize,
    base_url: String,
    batch_size: usize,
    max_concurrency: usize,
}

impl OpenAiEmbedder {
    /// The API key comes in through the config struct; nothing global.
    pub fn new(cfg: &EmbedConfig) -> Result<Self> {
        let api_key = cfg
            .api_key
            .clone()
            .ok_or_else(|| anyhow!("embedding api_key is not configured"))?;
        if cfg.batch_size == 0 {
            bail!("embedding batch_size must be > 0");
        }
        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model: cfg.model.clone(),
            dim: cfg.dim,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            batch_size: cfg.batch_size,
            max_concurrency: cfg.max_concurrency.max(1),
        })
    }

    async fn embed_sub_batch(&self, batch: &[String]) -> Result<Vec<Vec<f32>>> {
        let url = format!("{}/embeddings", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&EmbeddingsRequest {
                model: &self.model,
                input: batch,
            })
            .send()
            .await
            .context("embeddings request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("embeddings request returned {status}: {body}");
        }

        let parsed: EmbeddingsResponse = response
            .json()
            .await
            .context("embeddings response was not valid JSON")?;
        if parsed.data.len() != batch.len() {
            bail!(
                "embeddings response has {} rows for {} inputs",
                parsed.data.len(),
                batch.len()
            );
        }

        let mut out = vec![Vec::new(); batch.len()];
        for row in parsed.data {
            if row.embedding.len() != self.dim {
                bail!(
                    "embedding at index {} has dim {}, expected {}",
                    row.index,
                    row.embedding.len(),
                    self.dim
                );
            }
            let slot = out
                .get_mut(row.index)
                .ok_or_else(|| anyhow!("embedding index {} out of range", row.index))?;
            *slot = row.embedding;
        }
        Ok(out)
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        tracing::debug!(
            inputs = texts.len(),
            batch_size = self.batch_size,
            "embedding batch"
        );
        // `buffered` keeps sub-batch results in submission order while
        // overlapping request latency across up to `max_concurrency` calls.
        let sub_batches: Vec<_> = texts
            .chunks(self.batch_size)
            .map(|batch| self.embed_sub_batch(batch))
            .collect();
        let results: Vec<Vec<Vec<f32>>> = stream::iter(sub_batches)
            .buffered(self.max_concurrency)
            .try_collect()
            .await?;

        let mut vectors = Vec::with_capacity(texts.len());
        for batch in results {
            vectors.extend(batch);
        }
        Ok(vectors)
    }
}
