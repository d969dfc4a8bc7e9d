use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Chunking and storage parameters for one ingest run, extracted from the
/// `[pipeline]` section of the config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// JSONL snapshot of the paper dataset ({"title": .., "content": ..}).
    pub dataset_path: String,
    /// LanceDB database directory.
    pub db_path: String,
    /// Number of candidate papers to sample on top of the required set.
    pub sample_size: usize,
    /// RNG seed for candidate sampling. Fixed so runs are reproducible.
    pub seed: u64,
    pub token_chunk_size: usize,
    pub token_overlap: usize,
    pub sentence_window_size: usize,
    /// Hierarchical granularities in tokens, largest first. The original
    /// pipeline relied on library defaults; these are pinned explicitly.
    pub hierarchy_levels: Vec<usize>,
    pub token_collection: String,
    pub sentence_collection: String,
    pub hierarchy_collection: String,
    /// Table holding the full hierarchical node tree for auto-merging.
    pub docstore_table: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            dataset_path: "resources/ai_arxiv.jsonl".to_string(),
            db_path: "./lance_db".to_string(),
            sample_size: 40,
            seed: 123,
            token_chunk_size: 512,
            token_overlap: 50,
            sentence_window_size: 3,
            hierarchy_levels: vec![2048, 512, 128],
            token_collection: "papers_token".to_string(),
            sentence_collection: "papers_sentence_window".to_string(),
            hierarchy_collection: "papers_automerging".to_string(),
            docstore_table: "papers_nodes".to_string(),
        }
    }
}

/// Embedding collaborator parameters, extracted from `[embedding]`.
/// The API key is injected into the embedder constructor; nothing in the
/// process mutates a shared client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub dim: usize,
    pub base_url: String,
    /// Max inputs per embeddings request; larger batches are split and the
    /// sub-requests run concurrently.
    pub batch_size: usize,
    pub max_concurrency: usize,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "text-embedding-3-large".to_string(),
            dim: 3072,
            base_url: "https://api.openai.com/v1".to_string(),
            batch_size: 128,
            max_concurrency: 4,
        }
    }
}

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        Ok(Self { figment })
    }

    /// Build a config from an explicit figment; used by tests.
    pub fn from_figment(figment: Figment) -> Self {
        Self { figment }
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    pub fn pipeline(&self) -> anyhow::Result<PipelineConfig> {
        Figment::from(Serialized::defaults(PipelineConfig::default()))
            .merge(self.figment.focus("pipeline"))
            .extract()
            .map_err(|e| anyhow::anyhow!("invalid [pipeline] config: {}", e))
    }

    pub fn embedding(&self) -> anyhow::Result<EmbedConfig> {
        let mut cfg: EmbedConfig = Figment::from(Serialized::defaults(EmbedConfig::default()))
            .merge(self.figment.focus("embedding"))
            .extract()
            .map_err(|e| anyhow::anyhow!("invalid [embedding] config: {}", e))?;
        // Legacy top-level key, also reachable as APP_OPENAI_API_KEY.
        if cfg.api_key.is_none() {
            cfg.api_key = self.get::<String>("openai_api_key").ok();
        }
        Ok(cfg)
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}
