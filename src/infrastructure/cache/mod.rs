mod chunk_cache;

pub use chunk_cache::ChunkFileCache;
