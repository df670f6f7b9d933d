//! Kjarni VAE: interchangeable encoders for variational autoencoders over text
//!
//! An encoder turns token embeddings (plus a padding mask) into one
//! fixed-size vector per example. Three variants share one calling
//! convention so a model can swap them through configuration:
//!
//! - `feedforward`: a feed-forward network over flat input
//! - `seq2vec`: a sequence-to-vector network over masked sequences
//! - `seq2seq`: a sequence-to-sequence network followed by `meanpool`,
//!   `maxpool` and/or `final_state` aggregation
//!
//! ```
//! use kjarni_vae::prelude::*;
//! use ndarray::{Array3, array};
//! use ndarray_rand::rand::{SeedableRng, rngs::StdRng};
//!
//! let config = EncoderConfig::from_json_str(r#"{
//!     "type": "seq2seq",
//!     "architecture": {"type": "pass_through", "input_dim": 4},
//!     "aggregations": "meanpool,maxpool"
//! }"#)?;
//! let encoder = config.build(&mut StdRng::seed_from_u64(0))?;
//! assert_eq!(encoder.output_dim(), 8);
//!
//! let embedded = Array3::<f32>::ones((2, 3, 4));
//! let mask = array![[1.0, 1.0, 0.0], [1.0, 0.0, 0.0]];
//! let vectors = encoder.forward(EncoderInput::Sequence { embedded: &embedded, mask: &mask })?;
//! assert_eq!(vectors.shape(), &[2, 8]);
//! # Ok::<(), kjarni_vae::EncoderError>(())
//! ```

pub mod activations;
pub mod config;
pub mod encoder;
pub mod error;
pub mod feedforward;
pub mod pooling;
pub mod seq2seq;
pub mod seq2vec;
pub mod traits;
pub mod utils;

// Re-export commonly used items
pub use crate::{
    activations::Activation,
    config::{EncoderConfig, FeedForwardConfig, OneOrMany, Seq2SeqConfig, Seq2VecConfig},
    encoder::{
        Aggregation, Encoder, EncoderInput, EncoderType, FeedForwardEncoder, Seq2SeqEncoder,
        Seq2VecEncoder, VaeEncoder,
    },
    error::{EncoderError, EncoderResult},
    feedforward::{DenseLayer, FeedForward},
    pooling::{final_encoder_states, masked_max, masked_mean},
    seq2seq::{FeedForwardSeq2Seq, PassThroughEncoder},
    seq2vec::BagOfEmbeddingsEncoder,
    traits::{FeedForwardNetwork, Seq2SeqNetwork, Seq2VecNetwork},
};

// Prelude for easy imports
pub mod prelude {
    pub use crate::config::EncoderConfig;
    pub use crate::encoder::{Encoder, EncoderInput, EncoderType, VaeEncoder};
    pub use crate::error::{EncoderError, EncoderResult};
    pub use crate::traits::{FeedForwardNetwork, Seq2SeqNetwork, Seq2VecNetwork};
}

#[cfg(test)]
pub mod tests;
