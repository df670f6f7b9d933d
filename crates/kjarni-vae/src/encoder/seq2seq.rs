use ndarray::{Array2, Array3, ArrayView2, Axis, concatenate};

use super::{Aggregation, Encoder, EncoderInput, EncoderType};
use crate::error::{EncoderError, EncoderResult};
use crate::pooling::{final_encoder_states, masked_max, masked_mean};
use crate::traits::Seq2SeqNetwork;
use crate::utils::masks::{broadcast_mask, check_mask_shape};

/// Runs a sequence-to-sequence network, then reduces its per-position output
/// with each configured aggregation and concatenates the results.
///
/// Aggregation names are kept exactly as configured and only interpreted at
/// forward time, so an unknown name fails on the first call rather than at
/// construction.
pub struct Seq2SeqEncoder {
    architecture: Box<dyn Seq2SeqNetwork>,
    aggregations: Vec<String>,
}

impl Seq2SeqEncoder {
    /// `aggregations` is a comma-delimited list such as `"meanpool,final_state"`.
    pub fn new(architecture: Box<dyn Seq2SeqNetwork>, aggregations: &str) -> Self {
        let aggregations: Vec<String> = aggregations.split(',').map(str::to_string).collect();
        log::debug!(
            "Built seq2seq encoder: {} -> {} x {:?} (bidirectional={})",
            architecture.input_dim(),
            architecture.output_dim(),
            aggregations,
            architecture.is_bidirectional()
        );
        Self {
            architecture,
            aggregations,
        }
    }

    pub fn architecture(&self) -> &dyn Seq2SeqNetwork {
        self.architecture.as_ref()
    }

    pub fn aggregations(&self) -> &[String] {
        &self.aggregations
    }

    pub fn encode(&self, embedded: &Array3<f32>, mask: &Array2<f32>) -> EncoderResult<Array2<f32>> {
        log::trace!(
            "seq2seq encoder forward: input {:?}, mask {:?}, aggregations {:?}",
            embedded.dim(),
            mask.dim(),
            self.aggregations
        );
        let encoded = self.architecture.forward(embedded, mask)?;
        check_mask_shape(encoded.dim(), mask)?;

        let mut pooled = Vec::with_capacity(self.aggregations.len());
        for name in &self.aggregations {
            let aggregation: Aggregation = name.parse()?;
            pooled.push(self.aggregate(aggregation, &encoded, mask)?);
        }

        let views: Vec<ArrayView2<f32>> = pooled.iter().map(|p| p.view()).collect();
        Ok(concatenate(Axis(1), &views).map_err(anyhow::Error::from)?)
    }

    fn aggregate(
        &self,
        aggregation: Aggregation,
        encoded: &Array3<f32>,
        mask: &Array2<f32>,
    ) -> anyhow::Result<Array2<f32>> {
        match aggregation {
            // Padded positions are zeroed before the masked reduction.
            Aggregation::MeanPool => {
                let context = encoded * &broadcast_mask(mask);
                masked_mean(&context, mask)
            }
            Aggregation::MaxPool => {
                let context = encoded * &broadcast_mask(mask);
                masked_max(&context, mask)
            }
            Aggregation::FinalState => {
                final_encoder_states(encoded, mask, self.architecture.is_bidirectional())
            }
        }
    }
}

impl Encoder for Seq2SeqEncoder {
    fn encoder_type(&self) -> EncoderType {
        EncoderType::Seq2Seq
    }

    fn output_dim(&self) -> usize {
        self.architecture.output_dim() * self.aggregations.len()
    }

    fn forward(&self, input: EncoderInput<'_>) -> EncoderResult<Array2<f32>> {
        match input {
            EncoderInput::Sequence { embedded, mask } => self.encode(embedded, mask),
            EncoderInput::Flat(_) => Err(EncoderError::InputMismatch {
                encoder: EncoderType::Seq2Seq,
                expected: "sequence",
            }),
        }
    }
}
