// Stub architectures shared by unit tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, anyhow};
use ndarray::{Array2, Array3};

use crate::traits::{FeedForwardNetwork, Seq2SeqNetwork, Seq2VecNetwork};

/// Returns its input unchanged and counts calls.
pub struct IdentitySeq2Seq {
    pub dim: usize,
    pub bidirectional: bool,
    pub calls: AtomicUsize,
}

impl IdentitySeq2Seq {
    pub fn new(dim: usize, bidirectional: bool) -> Self {
        Self {
            dim,
            bidirectional,
            calls: AtomicUsize::new(0),
        }
    }
}

impl Seq2SeqNetwork for IdentitySeq2Seq {
    fn input_dim(&self) -> usize {
        self.dim
    }

    fn output_dim(&self) -> usize {
        self.dim
    }

    fn is_bidirectional(&self) -> bool {
        self.bidirectional
    }

    fn forward(&self, embedded: &Array3<f32>, _mask: &Array2<f32>) -> Result<Array3<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(embedded.clone())
    }
}

/// Scales flat input by a constant.
pub struct ScaleFeedForward {
    pub dim: usize,
    pub factor: f32,
}

impl FeedForwardNetwork for ScaleFeedForward {
    fn input_dim(&self) -> usize {
        self.dim
    }

    fn output_dim(&self) -> usize {
        self.dim
    }

    fn forward(&self, input: &Array2<f32>) -> Result<Array2<f32>> {
        Ok(input * self.factor)
    }
}

/// Emits the mask sum of each row, repeated `dim` times.
pub struct MaskSumSeq2Vec {
    pub dim: usize,
}

impl Seq2VecNetwork for MaskSumSeq2Vec {
    fn input_dim(&self) -> usize {
        self.dim
    }

    fn output_dim(&self) -> usize {
        self.dim
    }

    fn forward(&self, embedded: &Array3<f32>, mask: &Array2<f32>) -> Result<Array2<f32>> {
        let batch = embedded.dim().0;
        let mut output = Array2::zeros((batch, self.dim));
        for (mut row, mask_row) in output.outer_iter_mut().zip(mask.outer_iter()) {
            row.fill(mask_row.sum());
        }
        Ok(output)
    }
}

/// Always fails with a shape error.
pub struct BrokenFeedForward;

impl FeedForwardNetwork for BrokenFeedForward {
    fn input_dim(&self) -> usize {
        4
    }

    fn output_dim(&self) -> usize {
        2
    }

    fn forward(&self, input: &Array2<f32>) -> Result<Array2<f32>> {
        Err(anyhow!("shape mismatch: got {} columns", input.ncols()))
    }
}
