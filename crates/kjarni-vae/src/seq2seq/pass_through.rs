use anyhow::{Result, anyhow};
use ndarray::{Array2, Array3};

use crate::traits::Seq2SeqNetwork;
use crate::utils::masks::{broadcast_mask, check_mask_shape};

/// Returns its input with padded positions zeroed.
#[derive(Debug, Clone)]
pub struct PassThroughEncoder {
    input_dim: usize,
}

impl PassThroughEncoder {
    pub fn new(input_dim: usize) -> Result<Self> {
        if input_dim == 0 {
            return Err(anyhow!("Pass-through encoder needs a non-zero input_dim"));
        }
        log::debug!("Built pass-through seq2seq: dim={}", input_dim);
        Ok(Self { input_dim })
    }
}

impl Seq2SeqNetwork for PassThroughEncoder {
    fn input_dim(&self) -> usize {
        self.input_dim
    }

    fn output_dim(&self) -> usize {
        self.input_dim
    }

    fn is_bidirectional(&self) -> bool {
        false
    }

    fn forward(&self, embedded: &Array3<f32>, mask: &Array2<f32>) -> Result<Array3<f32>> {
        let (_, _, hidden) = embedded.dim();
        if hidden != self.input_dim {
            return Err(anyhow!(
                "Pass-through expected input size {}, got {}",
                self.input_dim,
                hidden
            ));
        }
        check_mask_shape(embedded.dim(), mask)?;
        Ok(embedded * &broadcast_mask(mask))
    }
}
