use std::collections::HashSet;

use paperdb_core::dataset::DatasetRow;
use paperdb_core::types::Document;
use paperdb_core::{Error, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Selects the ingest corpus: every row whose title matches the required
/// list, plus a seeded uniform sample from the remaining pool.
#[derive(Debug, Clone)]
pub struct CorpusSelector {
    pub sample_size: usize,
    pub seed: u64,
}

impl CorpusSelector {
    pub fn new(sample_size: usize, seed: u64) -> Self {
        Self { sample_size, seed }
    }

    /// Partition `pool` into required rows (exact title match, pool order)
    /// and candidates, then append `sample_size` candidates drawn with the
    /// fixed seed. Titles are dropped from the output.
    ///
    /// Fails if any required title is absent or the candidate pool is
    /// smaller than the sample size; sampling never truncates silently.
    pub fn select(&self, pool: &[DatasetRow], required_titles: &[String]) -> Result<Vec<Document>> {
        let wanted: HashSet<&str> = required_titles.iter().map(String::as_str).collect();

        let mut required: Vec<&DatasetRow> = Vec::new();
        let mut candidates: Vec<&DatasetRow> = Vec::new();
        let mut found: HashSet<&str> = HashSet::new();
        for row in pool {
            if wanted.contains(row.title.as_str()) {
                found.insert(row.title.as_str());
                required.push(row);
            } else {
                candidates.push(row);
            }
        }

        let missing: Vec<&str> = required_titles
            .iter()
            .map(String::as_str)
            .filter(|t| !found.contains(t))
            .collect();
        if !missing.is_empty() {
            return Err(Error::Corpus(format!(
                "required titles not found in dataset: {missing:?}"
            )));
        }

        if candidates.len() < self.sample_size {
            return Err(Error::Corpus(format!(
                "candidate pool has {} rows, cannot sample {}",
                candidates.len(),
                self.sample_size
            )));
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let picks = rand::seq::index::sample(&mut rng, candidates.len(), self.sample_size);

        let mut corpus: Vec<Document> = required
            .iter()
            .map(|r| Document::new(r.content.clone()))
            .collect();
        corpus.extend(picks.iter().map(|i| Document::new(candidates[i].content.clone())));

        tracing::info!(
            required = required.len(),
            sampled = self.sample_size,
            seed = self.seed,
            corpus = corpus.len(),
            "corpus selected"
        );
        Ok(corpus)
    }
}
