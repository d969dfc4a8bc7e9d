use crate::strategy::Strategy;
use paperdb_core::types::{Document, Node, Partition};
use paperdb_core::Result;

pub const WINDOW_KEY: &str = "window";
pub const ORIGINAL_TEXT_KEY: &str = "original_text";

/// Sentence-window splitter: one unit per sentence, with the sentence plus
/// its neighbors carried as `window` metadata for retrieval-time context.
/// Windows truncate at document edges and never cross documents.
#[derive(Debug, Clone)]
pub struct SentenceWindowSplitter {
    window_size: usize,
}

impl SentenceWindowSplitter {
    pub fn new(window_size: usize) -> Self {
        Self { window_size }
    }
}

/// Split text into sentences on `.`/`!`/`?` followed by whitespace or end of
/// input. Text without any terminator is a single sentence. Pieces are
/// trimmed and empty pieces dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?')
            && chars.peek().is_none_or(|next| next.is_whitespace())
        {
            let sentence = current.trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            current.clear();
        }
    }
    let tail = current.trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }
    sentences
}

impl Strategy for SentenceWindowSplitter {
    fn name(&self) -> &'static str {
        "sentence_window"
    }

    fn partition(&self, docs: &[Document]) -> Result<Partition> {
        let mut nodes = Vec::new();
        for (d, doc) in docs.iter().enumerate() {
            let sentences = split_sentences(&doc.text);
            for (i, sentence) in sentences.iter().enumerate() {
                let lo = i.saturating_sub(self.window_size);
                let hi = (i + self.window_size).min(sentences.len() - 1);
                let window = sentences[lo..=hi].join(" ");

                let mut node = Node::new(format!("doc{d}:sent{i}"), sentence.clone());
                node.metadata.insert("doc".to_string(), d.to_string());
                node.metadata.insert("sentence_index".to_string(), i.to_string());
                node.metadata.insert(WINDOW_KEY.to_string(), window);
                node.metadata
                    .insert(ORIGINAL_TEXT_KEY.to_string(), sentence.clone());
                nodes.push(node);
            }
        }
        tracing::debug!(units = nodes.len(), "sentence-window partition complete");
        Ok(Partition::flat(nodes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_terminators_followed_by_whitespace() {
        let sentences = split_sentences("One. Two! Three? Four");
        assert_eq!(sentences, vec!["One.", "Two!", "Three?", "Four"]);
    }

    #[test]
    fn decimal_points_do_not_split() {
        let sentences = split_sentences("Accuracy rose to 91.5 percent. Done.");
        assert_eq!(sentences, vec!["Accuracy rose to 91.5 percent.", "Done."]);
    }

    #[test]
    fn no_terminator_is_one_sentence() {
        assert_eq!(split_sentences("just a fragment"), vec!["just a fragment"]);
    }

    #[test]
    fn terminator_at_end_of_input_closes_sentence() {
        assert_eq!(split_sentences("The end."), vec!["The end."]);
    }
}
