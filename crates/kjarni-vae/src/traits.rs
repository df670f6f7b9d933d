//! Architecture traits wrapped by the encoders.
//!
//! Anything implementing one of these can be handed to the matching encoder
//! variant. Tensors follow the crate conventions: sequence input is
//! `[batch, seq_len, hidden]`, masks are `[batch, seq_len]` with non-zero
//! marking valid positions.

use anyhow::Result;
use ndarray::{Array2, Array3};

/// A network mapping `[batch, input_dim]` to `[batch, output_dim]`.
pub trait FeedForwardNetwork: Send + Sync {
    fn input_dim(&self) -> usize;

    fn output_dim(&self) -> usize;

    fn forward(&self, input: &Array2<f32>) -> Result<Array2<f32>>;
}

/// A network collapsing a masked sequence into one vector per row.
pub trait Seq2VecNetwork: Send + Sync {
    fn input_dim(&self) -> usize;

    fn output_dim(&self) -> usize;

    fn forward(&self, embedded: &Array3<f32>, mask: &Array2<f32>) -> Result<Array2<f32>>;
}

/// A network producing one vector per input position.
pub trait Seq2SeqNetwork: Send + Sync {
    fn input_dim(&self) -> usize;

    fn output_dim(&self) -> usize;

    /// Whether the output concatenates a forward and a backward pass.
    ///
    /// Controls how final states are extracted: see
    /// [`final_encoder_states`](crate::pooling::final_encoder_states).
    fn is_bidirectional(&self) -> bool;

    fn forward(&self, embedded: &Array3<f32>, mask: &Array2<f32>) -> Result<Array3<f32>>;
}
