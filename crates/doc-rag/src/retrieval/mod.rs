//! Nearest-neighbor retrieval over chunk embeddings

mod index;

pub use index::{FlatL2Index, SearchHit};
