use anyhow::Result;
use ndarray::{Array2, Array3};

use crate::feedforward::FeedForward;
use crate::traits::{FeedForwardNetwork, Seq2SeqNetwork};
use crate::utils::masks::{broadcast_mask, check_mask_shape};

/// Applies a [`FeedForward`] to every position, then zeroes padded positions.
#[derive(Debug, Clone)]
pub struct FeedForwardSeq2Seq {
    feedforward: FeedForward,
}

impl FeedForwardSeq2Seq {
    pub fn new(feedforward: FeedForward) -> Self {
        log::debug!(
            "Built feedforward seq2seq: {} -> {}",
            feedforward.input_dim(),
            feedforward.output_dim()
        );
        Self { feedforward }
    }

    pub fn feedforward(&self) -> &FeedForward {
        &self.feedforward
    }
}

impl Seq2SeqNetwork for FeedForwardSeq2Seq {
    fn input_dim(&self) -> usize {
        self.feedforward.input_dim()
    }

    fn output_dim(&self) -> usize {
        self.feedforward.output_dim()
    }

    fn is_bidirectional(&self) -> bool {
        false
    }

    fn forward(&self, embedded: &Array3<f32>, mask: &Array2<f32>) -> Result<Array3<f32>> {
        check_mask_shape(embedded.dim(), mask)?;
        let output = self.feedforward.forward_3d(embedded)?;
        Ok(output * &broadcast_mask(mask))
    }
}
