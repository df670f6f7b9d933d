//! Encoder variants with a uniform calling convention.
//!
//! The host model picks a variant by name ([`EncoderType`]), reads
//! [`Encoder::output_dim`] once to size downstream layers, and calls
//! [`Encoder::forward`] every step to get one vector per batch element.

use std::fmt;
use std::str::FromStr;

use ndarray::{Array2, Array3};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::error::{EncoderError, EncoderResult};
use crate::utils::levenshtein;

mod aggregation;
mod feedforward;
mod seq2seq;
mod seq2vec;

pub use aggregation::Aggregation;
pub use feedforward::FeedForwardEncoder;
pub use seq2seq::Seq2SeqEncoder;
pub use seq2vec::Seq2VecEncoder;

/// Registered encoder variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter)]
pub enum EncoderType {
    #[default]
    FeedForward,
    Seq2Vec,
    Seq2Seq,
}

impl EncoderType {
    /// Name used to select the variant in configuration.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FeedForward => "feedforward",
            Self::Seq2Vec => "seq2vec",
            Self::Seq2Seq => "seq2seq",
        }
    }

    pub fn all() -> impl Iterator<Item = EncoderType> {
        EncoderType::iter()
    }

    pub fn from_name(name: &str) -> Option<EncoderType> {
        Self::all().find(|t| t.name() == name)
    }

    /// Exact lookup, with close names suggested on failure.
    pub fn resolve(name: &str) -> EncoderResult<EncoderType> {
        if let Some(t) = Self::from_name(name) {
            return Ok(t);
        }

        let all_names: Vec<&str> = Self::all().map(|t| t.name()).collect();
        let suggestions = levenshtein::find_similar(name, &all_names, 3, 0.5);
        let message = if suggestions.is_empty() {
            format!(
                "Unknown encoder type '{name}'. Available: {}",
                all_names.join(", ")
            )
        } else {
            let names: Vec<&str> = suggestions.iter().map(|(n, _)| n.as_str()).collect();
            format!(
                "Unknown encoder type '{name}'. Did you mean: {}?",
                names.join(", ")
            )
        };
        Err(EncoderError::UnknownEncoderType(message))
    }
}

impl fmt::Display for EncoderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EncoderType {
    type Err = EncoderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}

/// Input handed to an encoder.
#[derive(Debug, Clone, Copy)]
pub enum EncoderInput<'a> {
    /// `[batch, features]`, for feed-forward encoders.
    Flat(&'a Array2<f32>),
    /// `[batch, seq_len, hidden]` embeddings and their `[batch, seq_len]` mask.
    Sequence {
        embedded: &'a Array3<f32>,
        mask: &'a Array2<f32>,
    },
}

/// Uniform encoder contract.
pub trait Encoder: Send + Sync {
    fn encoder_type(&self) -> EncoderType;

    /// Width of the vector produced for each batch element.
    fn output_dim(&self) -> usize;

    /// Returns `[batch, output_dim]`.
    fn forward(&self, input: EncoderInput<'_>) -> EncoderResult<Array2<f32>>;
}

/// One encoder of any registered variant.
pub enum VaeEncoder {
    FeedForward(FeedForwardEncoder),
    Seq2Vec(Seq2VecEncoder),
    Seq2Seq(Seq2SeqEncoder),
}

impl VaeEncoder {
    fn inner(&self) -> &dyn Encoder {
        match self {
            VaeEncoder::FeedForward(encoder) => encoder,
            VaeEncoder::Seq2Vec(encoder) => encoder,
            VaeEncoder::Seq2Seq(encoder) => encoder,
        }
    }
}

impl Encoder for VaeEncoder {
    fn encoder_type(&self) -> EncoderType {
        self.inner().encoder_type()
    }

    fn output_dim(&self) -> usize {
        self.inner().output_dim()
    }

    fn forward(&self, input: EncoderInput<'_>) -> EncoderResult<Array2<f32>> {
        self.inner().forward(input)
    }
}

impl fmt::Debug for VaeEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaeEncoder")
            .field("type", &self.encoder_type())
            .field("output_dim", &self.output_dim())
            .finish()
    }
}

impl From<FeedForwardEncoder> for VaeEncoder {
    fn from(encoder: FeedForwardEncoder) -> Self {
        VaeEncoder::FeedForward(encoder)
    }
}

impl From<Seq2VecEncoder> for VaeEncoder {
    fn from(encoder: Seq2VecEncoder) -> Self {
        VaeEncoder::Seq2Vec(encoder)
    }
}

impl From<Seq2SeqEncoder> for VaeEncoder {
    fn from(encoder: Seq2SeqEncoder) -> Self {
        VaeEncoder::Seq2Seq(encoder)
    }
}
