use anyhow::{Result, anyhow};
use ndarray::{Array1, Array2, ArrayView3, Axis};

/// Checks that `mask` is `[batch, seq_len]` for values shaped `[batch, seq_len, hidden]`.
pub fn check_mask_shape(values_dim: (usize, usize, usize), mask: &Array2<f32>) -> Result<()> {
    let (batch_size, seq_len, _) = values_dim;
    let (mask_batch, mask_len) = mask.dim();

    if mask_batch != batch_size {
        return Err(anyhow!(
            "Mask batch size {} doesn't match input batch size {}",
            mask_batch,
            batch_size
        ));
    }

    if mask_len != seq_len {
        return Err(anyhow!(
            "Mask sequence length {} doesn't match input sequence length {}",
            mask_len,
            seq_len
        ));
    }

    Ok(())
}

/// Expands `[batch, seq_len]` to `[batch, seq_len, 1]` for broadcasting over features.
pub fn broadcast_mask(mask: &Array2<f32>) -> ArrayView3<'_, f32> {
    mask.view().insert_axis(Axis(2))
}

/// Create a full mask (all positions valid)
///
/// Returns [batch_size, seq_len] with all 1.0
pub fn create_full_mask(batch_size: usize, seq_len: usize) -> Array2<f32> {
    Array2::ones((batch_size, seq_len))
}

/// Create a left-aligned mask from per-row sequence lengths.
///
/// Lengths longer than `max_len` are truncated.
pub fn mask_from_lengths(lengths: &[usize], max_len: usize) -> Array2<f32> {
    let mut mask = Array2::zeros((lengths.len(), max_len));
    for (mut row, &len) in mask.outer_iter_mut().zip(lengths) {
        row.slice_mut(ndarray::s![..len.min(max_len)]).fill(1.0);
    }
    mask
}

/// Create a padding mask from token IDs
///
/// Marks positions equal to `pad_token_id` as 0.0, others as 1.0
pub fn padding_mask_from_token_ids(token_ids: &Array2<u32>, pad_token_id: u32) -> Array2<f32> {
    token_ids.mapv(|id| if id == pad_token_id { 0.0 } else { 1.0 })
}

/// Number of valid positions per row.
pub fn lengths_from_mask(mask: &Array2<f32>) -> Array1<usize> {
    mask.map_axis(Axis(1), |row| row.iter().filter(|&&m| m != 0.0).count())
}
