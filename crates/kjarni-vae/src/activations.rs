//! Activation functions for dense layers.

use std::fmt;
use std::str::FromStr;

use libm::{erff, expf, tanhf};
use ndarray::{ArrayBase, DataMut, Dimension};
use serde::{Deserialize, Serialize};

/// Minimum array size for parallel execution.
pub const PARALLEL_THRESHOLD: usize = 16_384;

const SQRT_2_INV: f32 = 0.7071067811865475;
const SQRT_2_OVER_PI: f32 = 0.7978845608;
const GELU_COEFF: f32 = 0.044715;

/// Supported activation functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    /// Identity.
    #[default]
    #[serde(alias = "identity")]
    Linear,
    Relu,
    Tanh,
    Sigmoid,
    Gelu,
    #[serde(alias = "gelu_new", alias = "gelu_fast")]
    GeluNew,
    #[serde(alias = "swish")]
    SilU,
}

impl FromStr for Activation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linear" | "identity" => Ok(Activation::Linear),
            "relu" => Ok(Activation::Relu),
            "tanh" => Ok(Activation::Tanh),
            "sigmoid" => Ok(Activation::Sigmoid),
            "gelu" => Ok(Activation::Gelu),
            "gelu_new" | "gelu_fast" | "gelunew" => Ok(Activation::GeluNew),
            "silu" | "swish" => Ok(Activation::SilU),
            _ => Err(format!("unknown activation function: {}", s)),
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Activation::Linear => "linear",
            Activation::Relu => "relu",
            Activation::Tanh => "tanh",
            Activation::Sigmoid => "sigmoid",
            Activation::Gelu => "gelu",
            Activation::GeluNew => "gelu_new",
            Activation::SilU => "silu",
        };
        f.write_str(name)
    }
}

impl Activation {
    fn scalar_fn(self) -> fn(f32) -> f32 {
        match self {
            Activation::Linear => identity_scalar,
            Activation::Relu => relu_scalar,
            Activation::Tanh => tanh_scalar,
            Activation::Sigmoid => sigmoid_scalar,
            Activation::Gelu => gelu_scalar,
            Activation::GeluNew => gelu_new_scalar,
            Activation::SilU => silu_scalar,
        }
    }
}

#[inline(always)]
fn identity_scalar(x: f32) -> f32 {
    x
}

#[inline(always)]
pub fn relu_scalar(x: f32) -> f32 {
    x.max(0.0)
}

#[inline(always)]
pub fn tanh_scalar(x: f32) -> f32 {
    tanhf(x)
}

#[inline(always)]
pub fn sigmoid_scalar(x: f32) -> f32 {
    1.0 / (1.0 + expf(-x))
}

#[inline(always)]
pub fn gelu_scalar(x: f32) -> f32 {
    0.5 * x * (1.0 + erff(x * SQRT_2_INV))
}

#[inline(always)]
pub fn gelu_new_scalar(x: f32) -> f32 {
    let x_cubed = x * x * x;
    let inner = SQRT_2_OVER_PI * (x + GELU_COEFF * x_cubed);
    0.5 * x * (1.0 + tanhf(inner))
}

#[inline(always)]
pub fn silu_scalar(x: f32) -> f32 {
    if x <= -20.0 {
        0.0
    } else if x >= 20.0 {
        x
    } else {
        x / (1.0 + expf(-x))
    }
}

/// Applies an activation in place to an array of any dimensionality.
pub fn apply_activation<S, D>(arr: &mut ArrayBase<S, D>, activation: Activation)
where
    S: DataMut<Elem = f32>,
    D: Dimension,
{
    if activation == Activation::Linear {
        return;
    }
    let f = activation.scalar_fn();
    if arr.len() >= PARALLEL_THRESHOLD {
        arr.par_mapv_inplace(f);
    } else {
        arr.mapv_inplace(f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{Array2, Array3};

    #[test]
    fn test_scalars() {
        assert_eq!(relu_scalar(1.0), 1.0);
        assert_eq!(relu_scalar(-1.0), 0.0);

        assert_relative_eq!(sigmoid_scalar(0.0), 0.5);
        assert_relative_eq!(tanh_scalar(0.0), 0.0);
        assert_relative_eq!(tanh_scalar(10.0), 1.0, epsilon = 1e-4);

        assert_relative_eq!(silu_scalar(1.0), 0.7310586, epsilon = 1e-5);
        assert_relative_eq!(silu_scalar(-100.0), 0.0);

        assert_relative_eq!(gelu_scalar(1.0), 0.8413447, epsilon = 1e-5);
        assert_relative_eq!(gelu_new_scalar(1.0), 0.841192, epsilon = 1e-5);
    }

    #[test]
    fn test_linear_is_identity() {
        let mut arr = Array2::from_elem((2, 3), -2.0f32);
        apply_activation(&mut arr, Activation::Linear);
        assert!(arr.iter().all(|&x| x == -2.0));
    }

    #[test]
    fn test_apply_activation_3d() {
        let mut arr = Array3::from_elem((1, 2, 3), -2.0f32);
        apply_activation(&mut arr, Activation::Relu);
        assert!(arr.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_parallel_path_matches_serial() {
        let mut big = Array2::from_elem((PARALLEL_THRESHOLD, 2), 1.0f32);
        apply_activation(&mut big, Activation::Tanh);
        assert!(big.iter().all(|&x| (x - tanh_scalar(1.0)).abs() < 1e-7));
    }

    #[test]
    fn test_from_str_and_serde() {
        assert_eq!("swish".parse::<Activation>().unwrap(), Activation::SilU);
        assert_eq!("GELU_NEW".parse::<Activation>().unwrap(), Activation::GeluNew);
        assert!("softplus".parse::<Activation>().is_err());

        let parsed: Activation = serde_json::from_str("\"gelu_new\"").unwrap();
        assert_eq!(parsed, Activation::GeluNew);
        let parsed: Activation = serde_json::from_str("\"relu\"").unwrap();
        assert_eq!(parsed, Activation::Relu);
        assert_eq!(Activation::default(), Activation::Linear);
    }
}
