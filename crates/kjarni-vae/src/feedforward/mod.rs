//! Stacked dense layers.
//!
//! Each layer computes `activation(x @ W + b)` with `W` stored `[in, out]`.
//! Works on flat `[batch, in]` inputs and, position by position, on
//! `[batch, seq, in]` inputs.

use anyhow::{Result, anyhow};
use ndarray::{Array1, Array2, Array3};
use ndarray_rand::RandomExt;
use ndarray_rand::rand::Rng;
use ndarray_rand::rand_distr::Uniform;

use crate::activations::{Activation, apply_activation};
use crate::config::FeedForwardConfig;
use crate::traits::FeedForwardNetwork;
use crate::utils::linear_algebra::{matmul_2d, matmul_3d_2d};

/// A single `[in, out]` projection followed by an activation.
#[derive(Debug, Clone)]
pub struct DenseLayer {
    pub weight: Array2<f32>,
    pub bias: Array1<f32>,
    pub activation: Activation,
}

impl DenseLayer {
    pub fn new(weight: Array2<f32>, bias: Array1<f32>, activation: Activation) -> Result<Self> {
        if weight.ncols() != bias.len() {
            return Err(anyhow!(
                "Dense weight output size {} doesn't match bias size {}",
                weight.ncols(),
                bias.len()
            ));
        }
        Ok(Self {
            weight,
            bias,
            activation,
        })
    }

    /// Weights drawn from `U(-1/sqrt(in), 1/sqrt(in))`, zero bias.
    pub fn random<R: Rng + ?Sized>(
        input_dim: usize,
        output_dim: usize,
        activation: Activation,
        rng: &mut R,
    ) -> Result<Self> {
        if input_dim == 0 || output_dim == 0 {
            return Err(anyhow!(
                "Dense layer dimensions must be non-zero, got {}x{}",
                input_dim,
                output_dim
            ));
        }
        let bound = 1.0 / (input_dim as f32).sqrt();
        let weight = Array2::random_using((input_dim, output_dim), Uniform::new(-bound, bound), rng);
        Self::new(weight, Array1::zeros(output_dim), activation)
    }

    pub fn input_dim(&self) -> usize {
        self.weight.nrows()
    }

    pub fn output_dim(&self) -> usize {
        self.weight.ncols()
    }

    pub fn forward(&self, input: &Array2<f32>) -> Result<Array2<f32>> {
        let mut hidden = matmul_2d(&input.view(), &self.weight.view())?;
        hidden += &self.bias;
        apply_activation(&mut hidden, self.activation);
        Ok(hidden)
    }

    pub fn forward_3d(&self, input: &Array3<f32>) -> Result<Array3<f32>> {
        let mut hidden = matmul_3d_2d(input, &self.weight)?;
        hidden += &self.bias;
        apply_activation(&mut hidden, self.activation);
        Ok(hidden)
    }
}

/// A feed-forward network of one or more dense layers.
#[derive(Debug, Clone)]
pub struct FeedForward {
    layers: Vec<DenseLayer>,
}

impl FeedForward {
    pub fn new(layers: Vec<DenseLayer>) -> Result<Self> {
        if layers.is_empty() {
            return Err(anyhow!("FeedForward needs at least one layer"));
        }
        for (i, pair) in layers.windows(2).enumerate() {
            if pair[0].output_dim() != pair[1].input_dim() {
                return Err(anyhow!(
                    "Layer {} output size {} doesn't match layer {} input size {}",
                    i,
                    pair[0].output_dim(),
                    i + 1,
                    pair[1].input_dim()
                ));
            }
        }
        Ok(Self { layers })
    }

    /// Randomly initialised network shaped by `config`.
    pub fn from_config<R: Rng + ?Sized>(config: &FeedForwardConfig, rng: &mut R) -> Result<Self> {
        let hidden_dims = config.hidden_dims()?;
        let activations = config.activations()?;

        let mut layers = Vec::with_capacity(config.num_layers);
        let mut input_dim = config.input_dim;
        for (&output_dim, &activation) in hidden_dims.iter().zip(&activations) {
            layers.push(DenseLayer::random(input_dim, output_dim, activation, rng)?);
            input_dim = output_dim;
        }

        let ffn = Self::new(layers)?;
        log::debug!(
            "Built FeedForward: {} -> {:?}, activations {:?}",
            config.input_dim,
            hidden_dims,
            activations
        );
        Ok(ffn)
    }

    pub fn layers(&self) -> &[DenseLayer] {
        &self.layers
    }

    fn check_input(&self, actual: usize) -> Result<()> {
        let expected = FeedForwardNetwork::input_dim(self);
        if actual != expected {
            return Err(anyhow!(
                "FeedForward input size {} doesn't match expected {}",
                actual,
                expected
            ));
        }
        Ok(())
    }

    /// Applies the network to every position of `[batch, seq, in]`.
    pub fn forward_3d(&self, input: &Array3<f32>) -> Result<Array3<f32>> {
        self.check_input(input.dim().2)?;
        let mut hidden = self.layers[0].forward_3d(input)?;
        for layer in &self.layers[1..] {
            hidden = layer.forward_3d(&hidden)?;
        }
        Ok(hidden)
    }
}

impl FeedForwardNetwork for FeedForward {
    fn input_dim(&self) -> usize {
        self.layers[0].input_dim()
    }

    fn output_dim(&self) -> usize {
        self.layers[self.layers.len() - 1].output_dim()
    }

    fn forward(&self, input: &Array2<f32>) -> Result<Array2<f32>> {
        self.check_input(input.ncols())?;
        let mut hidden = self.layers[0].forward(input)?;
        for layer in &self.layers[1..] {
            hidden = layer.forward(&hidden)?;
        }
        Ok(hidden)
    }
}
