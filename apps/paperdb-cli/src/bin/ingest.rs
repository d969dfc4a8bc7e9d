use anyhow::Result;
use paperdb_chunk::{
    CorpusSelector, HierarchicalSplitter, SentenceWindowSplitter, Strategy, TokenWindowSplitter,
};
use paperdb_core::config::{expand_path, Config};
use paperdb_core::dataset;
use paperdb_embed::get_default_embedder;
use paperdb_index::IndexBuilder;
use paperdb_vector::{LanceDocStore, LanceVectorStore};
use tracing_subscriber::EnvFilter;

/// Papers that must always be part of the corpus, on top of the random
/// sample drawn from the rest of the dataset.
const REQUIRED_PAPER_TITLES: &[&str] = &[
    "BERT: Pre-training of Deep Bidirectional Transformers for Language Understanding",
    "DistilBERT, a distilled version of BERT: smaller, faster, cheaper and lighter",
    "HellaSwag: Can a Machine Really Finish Your Sentence?",
    "LLaMA: Open and Efficient Foundation Language Models",
    "Measuring Massive Multitask Language Understanding",
    "CodeNet: A Large-Scale AI for Code Dataset for Learning a Diversity of Coding Tasks",
    "Task2Vec: Task Embedding for Meta-Learning",
    "GLM-130B: An Open Bilingual Pre-trained Model",
    "SuperGLUE: A Stickier Benchmark for General-Purpose Language Understanding Systems",
    "Megatron-LM: Training Multi-Billion Parameter Language Models Using Model Parallelism",
    "PAL: Program-aided Language Models",
    "RoBERTa: A Robustly Optimized BERT Pretraining Approach",
    "DetectGPT: Zero-Shot Machine-Generated Text Detection using Probability Curvature",
];

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load()?;
    let pipeline = config.pipeline()?;
    let embed_cfg = config.embedding()?;

    let dataset_path = expand_path(&pipeline.dataset_path);
    let rows = dataset::load_rows(&dataset_path)?;

    let required: Vec<String> = REQUIRED_PAPER_TITLES.iter().map(|s| (*s).to_string()).collect();
    let corpus = CorpusSelector::new(pipeline.sample_size, pipeline.seed).select(&rows, &required)?;

    let embedder = get_default_embedder(&embed_cfg)?;
    let db_path = expand_path(&pipeline.db_path);
    let store = LanceVectorStore::open(&db_path, embed_cfg.dim).await?;
    let docstore = LanceDocStore::open(&db_path, &pipeline.docstore_table).await?;
    let builder = IndexBuilder::new(embedder.as_ref(), &store, &docstore);

    let token = TokenWindowSplitter::new(pipeline.token_chunk_size, pipeline.token_overlap)?;
    let sentence = SentenceWindowSplitter::new(pipeline.sentence_window_size);
    let hierarchy = HierarchicalSplitter::new(pipeline.hierarchy_levels.clone())?;

    let strategies: Vec<(&dyn Strategy, &str)> = vec![
        (&token, pipeline.token_collection.as_str()),
        (&sentence, pipeline.sentence_collection.as_str()),
        (&hierarchy, pipeline.hierarchy_collection.as_str()),
    ];

    for (strategy, collection) in strategies {
        let units = builder.build(strategy, collection, &corpus).await?;
        tracing::info!(strategy = strategy.name(), collection, units, "strategy indexed");
    }

    tracing::info!(db = %db_path.display(), "ingest complete");
    Ok(())
}
