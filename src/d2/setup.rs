//! Turning a color-mapped grid into the initial state of a simulation.

use ndarray::{Array, Array2};
use tracing::warn;

use super::label::{Labeling, FOREGROUND};

/// Temperature of every cell that is not part of a loop.
pub const SURFACE_TEMPERATURE: f64 = 25.0;

pub const DEFAULT_EDGE_TEMPERATURES: [f64; 3] = [100.0, 200.0, 300.0];

/// Reduce a color-mapped grid to loop skeleton: positive cells become
/// [`FOREGROUND`], everything else background.
pub fn binarize(grid: &Array2<i32>) -> Array2<i32> {
    grid.mapv(|v| if v > 0 { FOREGROUND } else { 0 })
}

/// One edge temperature per labeled region.
///
/// Up to three regions use [`DEFAULT_EDGE_TEMPERATURES`]. Past that the
/// range 100..=300 is split evenly across all regions.
pub fn edge_temperatures(regions: usize) -> Vec<f64> {
    let defaults = DEFAULT_EDGE_TEMPERATURES;
    if regions <= defaults.len() {
        return defaults.to_vec();
    }

    warn!(
        regions,
        temperatures = defaults.len(),
        "more regions than edge temperatures, spreading them evenly"
    );
    let first = defaults[0];
    let last = defaults[defaults.len() - 1];
    Array::linspace(first, last, regions).to_vec()
}

/// Initial temperature field: the k-th labeled loop takes `edge_temps[k]`,
/// every other cell `surface`.
///
/// Loops without a matching entry in `edge_temps` stay at `surface`. Label
/// values must not collide with the background values of `labels`.
pub fn assemble_temperatures(
    labels: &Array2<i32>,
    labeling: &Labeling,
    edge_temps: &[f64],
    surface: f64,
) -> Array2<f64> {
    labels.mapv(|v| {
        labeling
            .index_of(v)
            .and_then(|k| edge_temps.get(k).copied())
            .unwrap_or(surface)
    })
}
