//! Sampling timestep schedules

use ndarray::Array1;

/// Grid resolution of the tabulated schedules
const EPSS_DT: f32 = 1.0 / 32.0;

/// Tabulated step positions, in units of [`EPSS_DT`]
const EPSS_TABLE: &[(usize, &[u8])] = &[
    (5, &[0, 2, 4, 8, 16, 32]),
    (6, &[0, 2, 4, 6, 8, 16, 32]),
    (7, &[0, 2, 4, 6, 8, 16, 24, 32]),
    (10, &[0, 2, 4, 6, 8, 12, 16, 20, 24, 28, 32]),
    (12, &[0, 2, 4, 6, 8, 10, 12, 14, 16, 20, 24, 28, 32]),
    (16, &[0, 1, 2, 3, 4, 5, 6, 7, 8, 10, 12, 14, 16, 20, 24, 28, 32]),
];

/// Empirically pruned step schedule for `steps` sampling steps.
///
/// Returns `steps + 1` points from 0 to 1. Step counts without a tabulated
/// schedule fall back to a uniform grid.
pub fn epss_timesteps(steps: usize) -> Array1<f32> {
    match EPSS_TABLE.iter().find(|(n, _)| *n == steps) {
        Some((_, points)) => points.iter().map(|&p| f32::from(p) * EPSS_DT).collect(),
        None => Array1::linspace(0.0, 1.0, steps + 1),
    }
}

/// Step counts with a tabulated schedule
pub fn tabulated_steps() -> impl Iterator<Item = usize> {
    EPSS_TABLE.iter().map(|(n, _)| *n)
}
