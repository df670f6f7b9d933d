//! Dense matrix products over batched activations.

use anyhow::{Result, anyhow};
use ndarray::{Array2, Array3, ArrayView2};

/// Computes `a @ b` for `a: [m, k]` and `b: [k, n]`.
pub fn matmul_2d(a: &ArrayView2<f32>, b: &ArrayView2<f32>) -> Result<Array2<f32>> {
    let (_, k) = a.dim();
    let (k2, _) = b.dim();
    if k != k2 {
        return Err(anyhow!(
            "Matmul inner dimensions do not match: {} vs {}",
            k,
            k2
        ));
    }
    Ok(a.dot(b))
}

/// Applies a `[in, out]` weight to every position of a `[batch, seq, in]` tensor.
pub fn matmul_3d_2d(a: &Array3<f32>, b: &Array2<f32>) -> Result<Array3<f32>> {
    let (batch, m, k) = a.dim();
    let (_, n) = b.dim();
    let a_flat = a.as_standard_layout();
    let a_flat = a_flat.view().into_shape_with_order((batch * m, k))?;
    let c_flat = matmul_2d(&a_flat, &b.view())?;
    Ok(c_flat.into_shape_with_order((batch, m, n))?)
}
