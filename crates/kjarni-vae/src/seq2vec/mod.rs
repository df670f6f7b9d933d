//! Sequence-to-vector networks.

mod boe;

pub use boe::BagOfEmbeddingsEncoder;
