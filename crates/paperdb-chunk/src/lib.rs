#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

//! Corpus selection and the three document-partitioning strategies:
//! flat token windows, sentence windows, and the hierarchical node tree.

pub mod hierarchy;
pub mod selector;
pub mod sentence;
pub mod strategy;
pub mod token;

pub use hierarchy::{leaf_nodes, root_nodes, HierarchicalSplitter};
pub use selector::CorpusSelector;
pub use sentence::{split_sentences, SentenceWindowSplitter};
pub use strategy::Strategy;
pub use token::TokenWindowSplitter;
