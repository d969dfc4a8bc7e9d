#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

//! LanceDB-backed persistence: one table per strategy collection plus the
//! auxiliary node docstore used by the hierarchical strategy.

pub mod docstore;
pub mod schema;
pub mod store;

pub use docstore::LanceDocStore;
pub use store::LanceVectorStore;
