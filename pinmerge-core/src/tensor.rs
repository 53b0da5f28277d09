//! Sequence masks and masked reductions over ndarray
//!
//! Masks are `[batch, max_len]` boolean arrays where `true` marks a valid
//! (or selected) position.

use ndarray::{Array1, Array2, Array3, ArrayView1, ArrayView2, ArrayView3, Axis};
use rand::Rng;

use crate::error::{CoreError, Result};

/// Mask of positions below each sequence length.
///
/// The width is `max_len` when given, otherwise the largest length.
pub fn lens_to_mask(lengths: ArrayView1<'_, usize>, max_len: Option<usize>) -> Array2<bool> {
    let width = max_len.unwrap_or_else(|| lengths.iter().copied().max().unwrap_or(0));
    Array2::from_shape_fn((lengths.len(), width), |(b, i)| i < lengths[b])
}

/// Mask of the half-open span `[start, end)` of each row.
///
/// The width is the largest `seq_len`.
pub fn mask_from_start_end_indices(
    seq_len: ArrayView1<'_, usize>,
    start: ArrayView1<'_, usize>,
    end: ArrayView1<'_, usize>,
) -> Result<Array2<bool>> {
    if seq_len.len() != start.len() || seq_len.len() != end.len() {
        return Err(CoreError::InvalidArgument(format!(
            "batch size mismatch: seq_len {}, start {}, end {}",
            seq_len.len(),
            start.len(),
            end.len()
        )));
    }

    let width = seq_len.iter().copied().max().unwrap_or(0);
    Ok(Array2::from_shape_fn((seq_len.len(), width), |(b, i)| {
        i >= start[b] && i < end[b]
    }))
}

/// Mask a random contiguous span covering `frac` of each sequence.
///
/// The span length is `floor(frac * seq_len)` and its start is drawn
/// uniformly from `[0, seq_len - length]`.
pub fn mask_from_frac_lengths<R: Rng + ?Sized>(
    seq_len: ArrayView1<'_, usize>,
    frac: ArrayView1<'_, f32>,
    rng: &mut R,
) -> Result<Array2<bool>> {
    if seq_len.len() != frac.len() {
        return Err(CoreError::InvalidArgument(format!(
            "batch size mismatch: seq_len {}, frac {}",
            seq_len.len(),
            frac.len()
        )));
    }

    let lengths: Array1<usize> = seq_len
        .iter()
        .zip(frac.iter())
        .map(|(&len, &f)| ((f.clamp(0.0, 1.0) * len as f32) as usize).min(len))
        .collect();

    let start: Array1<usize> = seq_len
        .iter()
        .zip(lengths.iter())
        .map(|(&len, &span)| {
            let max_start = (len - span) as f32;
            (max_start * rng.gen::<f32>()) as usize
        })
        .collect();

    let end = &start + &lengths;
    mask_from_start_end_indices(seq_len, start.view(), end.view())
}

/// Mean over the sequence axis of a `[batch, len, dim]` array.
///
/// With a mask only selected positions contribute; rows with no selected
/// position divide by one and so come out as zeros.
pub fn maybe_masked_mean(
    values: ArrayView3<'_, f32>,
    mask: Option<ArrayView2<'_, bool>>,
) -> Result<Array2<f32>> {
    let Some(mask) = mask else {
        return values
            .mean_axis(Axis(1))
            .ok_or_else(|| CoreError::InvalidArgument("cannot average an empty sequence axis".into()));
    };

    let (batch, len, _) = values.dim();
    if mask.dim() != (batch, len) {
        return Err(CoreError::InvalidArgument(format!(
            "mask shape {:?} does not match values {:?}",
            mask.dim(),
            values.dim()
        )));
    }

    let weights: Array3<f32> = mask
        .mapv(|keep| if keep { 1.0 } else { 0.0 })
        .insert_axis(Axis(2));
    let sums = (&values * &weights).sum_axis(Axis(1));
    let counts = weights.sum_axis(Axis(1)).mapv(|c| c.max(1.0));

    Ok(&sums / &counts)
}
