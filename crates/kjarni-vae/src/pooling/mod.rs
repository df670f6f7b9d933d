//! Masked reductions over the position axis of sequence outputs.
//!
//! Every function takes values shaped `[batch, seq_len, hidden]` and a mask
//! shaped `[batch, seq_len]` (non-zero = valid) and returns `[batch, hidden]`.

use anyhow::{Result, anyhow};
use ndarray::{Array2, Array3, Axis, Zip, s};

use crate::utils::masks::{broadcast_mask, check_mask_shape};

/// Value written over padded positions before a max reduction.
pub const MASKED_MAX_FILL: f32 = -1e7;

/// Lower bound on the valid-position count used as a divisor.
pub const MIN_MASK_COUNT: f32 = 1e-13;

/// Mean over valid positions. Rows with no valid position pool to zeros.
pub fn masked_mean(values: &Array3<f32>, mask: &Array2<f32>) -> Result<Array2<f32>> {
    check_mask_shape(values.dim(), mask)?;

    let valid = mask.mapv(|m| if m != 0.0 { 1.0 } else { 0.0 });
    let masked = values * &broadcast_mask(&valid);
    let sum = masked.sum_axis(Axis(1));

    let count = valid
        .sum_axis(Axis(1))
        .mapv(|c| c.max(MIN_MASK_COUNT))
        .insert_axis(Axis(1));

    Ok(sum / &count)
}

/// Max over valid positions. Rows with no valid position pool to [`MASKED_MAX_FILL`].
pub fn masked_max(values: &Array3<f32>, mask: &Array2<f32>) -> Result<Array2<f32>> {
    check_mask_shape(values.dim(), mask)?;

    let mut filled = values.clone();
    Zip::from(&mut filled)
        .and_broadcast(&broadcast_mask(mask))
        .for_each(|v, &m| {
            if m == 0.0 {
                *v = MASKED_MAX_FILL;
            }
        });

    Ok(filled.fold_axis(Axis(1), MASKED_MAX_FILL, |&acc, &x| acc.max(x)))
}

/// Final encoder state per row.
///
/// For a unidirectional encoder this is the vector at the last valid position.
/// For a bidirectional encoder the first half of the features comes from the
/// last valid position (forward pass) and the second half from position 0
/// (backward pass), split at `hidden / 2`. With an odd hidden size the
/// backward half takes the extra feature. Rows with no valid position select
/// position 0.
pub fn final_encoder_states(
    outputs: &Array3<f32>,
    mask: &Array2<f32>,
    bidirectional: bool,
) -> Result<Array2<f32>> {
    check_mask_shape(outputs.dim(), mask)?;

    let (batch_size, seq_len, hidden_size) = outputs.dim();
    if seq_len == 0 {
        return Err(anyhow!("Cannot take final states of an empty sequence"));
    }
    let half = hidden_size / 2;
    let mut states = Array2::<f32>::zeros((batch_size, hidden_size));

    for (i, mut state) in states.outer_iter_mut().enumerate() {
        let last_pos = mask.row(i).iter().rposition(|&m| m != 0.0).unwrap_or(0);
        let last = outputs.slice(s![i, last_pos, ..]);

        if bidirectional {
            state.slice_mut(s![..half]).assign(&last.slice(s![..half]));
            state
                .slice_mut(s![half..])
                .assign(&outputs.slice(s![i, 0, half..]));
        } else {
            state.assign(&last);
        }
    }

    Ok(states)
}
