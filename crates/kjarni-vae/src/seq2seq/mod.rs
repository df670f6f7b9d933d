//! Sequence-to-sequence networks.

mod feedforward;
mod pass_through;

pub use feedforward::FeedForwardSeq2Seq;
pub use pass_through::PassThroughEncoder;
