use ndarray::Array2;

use super::{Encoder, EncoderInput, EncoderType};
use crate::error::{EncoderError, EncoderResult};
use crate::traits::FeedForwardNetwork;

/// Passes flat input straight through a feed-forward network.
pub struct FeedForwardEncoder {
    architecture: Box<dyn FeedForwardNetwork>,
}

impl FeedForwardEncoder {
    pub fn new(architecture: Box<dyn FeedForwardNetwork>) -> Self {
        log::debug!(
            "Built feedforward encoder: {} -> {}",
            architecture.input_dim(),
            architecture.output_dim()
        );
        Self { architecture }
    }

    pub fn architecture(&self) -> &dyn FeedForwardNetwork {
        self.architecture.as_ref()
    }

    /// Output of the wrapped network, unchanged.
    pub fn encode(&self, embedded: &Array2<f32>) -> EncoderResult<Array2<f32>> {
        log::trace!("feedforward encoder forward: input {:?}", embedded.dim());
        Ok(self.architecture.forward(embedded)?)
    }
}

impl Encoder for FeedForwardEncoder {
    fn encoder_type(&self) -> EncoderType {
        EncoderType::FeedForward
    }

    fn output_dim(&self) -> usize {
        self.architecture.output_dim()
    }

    fn forward(&self, input: EncoderInput<'_>) -> EncoderResult<Array2<f32>> {
        match input {
            EncoderInput::Flat(embedded) => self.encode(embedded),
            EncoderInput::Sequence { .. } => Err(EncoderError::InputMismatch {
                encoder: EncoderType::FeedForward,
                expected: "flat",
            }),
        }
    }
}
