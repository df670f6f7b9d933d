//! Bag-of-embeddings pooling.

use anyhow::{Result, anyhow};
use ndarray::{Array2, Array3, Axis};

use crate::traits::Seq2VecNetwork;
use crate::utils::masks::{broadcast_mask, check_mask_shape};

/// Sums the embeddings of valid positions, optionally dividing by the
/// number of valid positions.
///
/// Rows without any valid position produce zeros.
#[derive(Debug, Clone)]
pub struct BagOfEmbeddingsEncoder {
    embedding_dim: usize,
    averaged: bool,
}

impl BagOfEmbeddingsEncoder {
    pub fn new(embedding_dim: usize, averaged: bool) -> Result<Self> {
        if embedding_dim == 0 {
            return Err(anyhow!("Bag of embeddings needs a non-zero embedding_dim"));
        }
        log::debug!(
            "Built bag-of-embeddings seq2vec: dim={}, averaged={}",
            embedding_dim,
            averaged
        );
        Ok(Self {
            embedding_dim,
            averaged,
        })
    }

    pub fn averaged(&self) -> bool {
        self.averaged
    }
}

impl Seq2VecNetwork for BagOfEmbeddingsEncoder {
    fn input_dim(&self) -> usize {
        self.embedding_dim
    }

    fn output_dim(&self) -> usize {
        self.embedding_dim
    }

    fn forward(&self, embedded: &Array3<f32>, mask: &Array2<f32>) -> Result<Array2<f32>> {
        let (_, _, hidden) = embedded.dim();
        if hidden != self.embedding_dim {
            return Err(anyhow!(
                "Bag of embeddings expected embedding size {}, got {}",
                self.embedding_dim,
                hidden
            ));
        }
        check_mask_shape(embedded.dim(), mask)?;

        let valid = mask.mapv(|m| if m != 0.0 { 1.0 } else { 0.0 });
        let summed = (embedded * &broadcast_mask(&valid)).sum_axis(Axis(1));

        if !self.averaged {
            return Ok(summed);
        }

        let lengths = valid
            .sum_axis(Axis(1))
            .mapv(|len| len.max(1.0))
            .insert_axis(Axis(1));
        Ok(summed / &lengths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn embedded() -> Array3<f32> {
        array![
            [[1.0, 2.0], [3.0, 4.0], [100.0, 100.0]],
            [[0.5, 0.5], [0.5, 0.5], [0.5, 0.5]]
        ]
    }

    #[test]
    fn test_summed() -> Result<()> {
        let boe = BagOfEmbeddingsEncoder::new(2, false)?;
        let mask = array![[1.0, 1.0, 0.0], [1.0, 1.0, 1.0]];
        let output = boe.forward(&embedded(), &mask)?;
        assert_eq!(output, array![[4.0, 6.0], [1.5, 1.5]]);
        Ok(())
    }

    #[test]
    fn test_averaged() -> Result<()> {
        let boe = BagOfEmbeddingsEncoder::new(2, true)?;
        let mask = array![[1.0, 1.0, 0.0], [0.0, 0.0, 0.0]];
        let output = boe.forward(&embedded(), &mask)?;

        assert_abs_diff_eq!(output[[0, 0]], 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(output[[0, 1]], 3.0, epsilon = 1e-6);
        assert_eq!(output.row(1).to_vec(), vec![0.0, 0.0]);
        Ok(())
    }

    #[test]
    fn test_rejects_wrong_embedding_size() -> Result<()> {
        let boe = BagOfEmbeddingsEncoder::new(3, false)?;
        let mask = array![[1.0, 1.0, 1.0], [1.0, 1.0, 1.0]];
        assert!(boe.forward(&embedded(), &mask).is_err());
        assert!(BagOfEmbeddingsEncoder::new(0, true).is_err());
        Ok(())
    }
}
