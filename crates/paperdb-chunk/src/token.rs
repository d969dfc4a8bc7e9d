use crate::strategy::Strategy;
use paperdb_core::types::{Document, Node, Partition};
use paperdb_core::{Error, Result};

/// Flat token-window splitter: slides a fixed window of whitespace tokens
/// across each document with a configured overlap. Windows never cross
/// document boundaries; a document shorter than the window yields exactly
/// one unit.
#[derive(Debug, Clone)]
pub struct TokenWindowSplitter {
    chunk_size: usize,
    overlap: usize,
}

impl TokenWindowSplitter {
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::Config("token chunk_size must be > 0".to_string()));
        }
        if overlap >= chunk_size {
            return Err(Error::Config(format!(
                "token overlap {overlap} must be strictly less than chunk_size {chunk_size}"
            )));
        }
        Ok(Self { chunk_size, overlap })
    }
}

/// Window positions over a token stream of `len` tokens. The last window is
/// allowed to be short; for `len > 0` this emits
/// `ceil((len - overlap) / (size - overlap))` windows.
pub(crate) fn window_positions(len: usize, size: usize, overlap: usize) -> Vec<(usize, usize)> {
    let mut positions = Vec::new();
    if len == 0 {
        return positions;
    }
    let mut start = 0;
    loop {
        let end = (start + size).min(len);
        positions.push((start, end));
        if end >= len {
            break;
        }
        start = end - overlap;
    }
    positions
}

impl Strategy for TokenWindowSplitter {
    fn name(&self) -> &'static str {
        "token_window"
    }

    fn partition(&self, docs: &[Document]) -> Result<Partition> {
        let mut nodes = Vec::new();
        for (d, doc) in docs.iter().enumerate() {
            let tokens: Vec<&str> = doc.text.split_whitespace().collect();
            for (i, (start, end)) in window_positions(tokens.len(), self.chunk_size, self.overlap)
                .into_iter()
                .enumerate()
            {
                let mut node = Node::new(format!("doc{d}:tok{i}"), tokens[start..end].join(" "));
                node.metadata.insert("doc".to_string(), d.to_string());
                node.metadata.insert("chunk_index".to_string(), i.to_string());
                node.metadata.insert("token_start".to_string(), start.to_string());
                node.metadata.insert("token_end".to_string(), end.to_string());
                nodes.push(node);
            }
        }
        tracing::debug!(units = nodes.len(), "token-window partition complete");
        Ok(Partition::flat(nodes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_positions_cover_stream_with_overlap() {
        // 10 tokens, window 4, overlap 1 -> stride 3 -> ceil(9/3) = 3 windows
        let positions = window_positions(10, 4, 1);
        assert_eq!(positions, vec![(0, 4), (3, 7), (6, 10)]);
    }

    #[test]
    fn short_stream_is_one_window() {
        assert_eq!(window_positions(3, 8, 2), vec![(0, 3)]);
    }

    #[test]
    fn empty_stream_has_no_windows() {
        assert!(window_positions(0, 8, 2).is_empty());
    }

    #[test]
    fn overlap_must_be_smaller_than_chunk() {
        assert!(TokenWindowSplitter::new(8, 8).is_err());
        assert!(TokenWindowSplitter::new(8, 9).is_err());
        assert!(TokenWindowSplitter::new(8, 7).is_ok());
    }
}
