use ndarray::{Array2, Array3};

use super::{Encoder, EncoderInput, EncoderType};
use crate::error::{EncoderError, EncoderResult};
use crate::traits::Seq2VecNetwork;

/// Hands masked sequence input to a sequence-to-vector network.
pub struct Seq2VecEncoder {
    architecture: Box<dyn Seq2VecNetwork>,
}

impl Seq2VecEncoder {
    pub fn new(architecture: Box<dyn Seq2VecNetwork>) -> Self {
        log::debug!(
            "Built seq2vec encoder: {} -> {}",
            architecture.input_dim(),
            architecture.output_dim()
        );
        Self { architecture }
    }

    pub fn architecture(&self) -> &dyn Seq2VecNetwork {
        self.architecture.as_ref()
    }

    pub fn encode(&self, embedded: &Array3<f32>, mask: &Array2<f32>) -> EncoderResult<Array2<f32>> {
        log::trace!(
            "seq2vec encoder forward: input {:?}, mask {:?}",
            embedded.dim(),
            mask.dim()
        );
        Ok(self.architecture.forward(embedded, mask)?)
    }
}

impl Encoder for Seq2VecEncoder {
    fn encoder_type(&self) -> EncoderType {
        EncoderType::Seq2Vec
    }

    fn output_dim(&self) -> usize {
        self.architecture.output_dim()
    }

    fn forward(&self, input: EncoderInput<'_>) -> EncoderResult<Array2<f32>> {
        match input {
            EncoderInput::Sequence { embedded, mask } => self.encode(embedded, mask),
            EncoderInput::Flat(_) => Err(EncoderError::InputMismatch {
                encoder: EncoderType::Seq2Vec,
                expected: "sequence",
            }),
        }
    }
}
