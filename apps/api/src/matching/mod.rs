// Semantic job matching: sentence embeddings + cosine similarity + top-k.

pub mod embedder;
pub mod handlers;
#[cfg(feature = "local-models")]
pub mod minilm;
pub mod ranking;
