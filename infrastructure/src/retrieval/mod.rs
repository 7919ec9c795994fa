//! Chunk retrieval adapters

mod local_store;

pub use local_store::{Chunk, ChunkStoreError, LocalChunkStore};
