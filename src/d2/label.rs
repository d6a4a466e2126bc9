use ndarray::{Array, Array2};
use tracing::debug;

use crate::{Error, Result};

/// Value marking a foreground cell that has not been labeled yet.
pub const FOREGROUND: i32 = 1;

const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Label sequence produced by one labeling pass.
///
/// The k-th component found in row-major order carries `start + k * step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labeling {
    pub start: i32,
    pub step: i32,
    pub count: usize,
}

impl Labeling {
    pub fn label(&self, index: usize) -> i32 {
        self.start + index as i32 * self.step
    }

    /// Component index carrying `value`, if any.
    pub fn index_of(&self, value: i32) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        if self.step == 0 {
            return if value == self.start { Some(0) } else { None };
        }

        let offset = value - self.start;
        if offset % self.step != 0 {
            return None;
        }
        let index = offset / self.step;
        if index >= 0 && (index as usize) < self.count {
            Some(index as usize)
        } else {
            None
        }
    }

    pub fn labels(&self) -> impl Iterator<Item = i32> + '_ {
        (0..self.count).map(move |k| self.label(k))
    }
}

fn neighbor(
    (r, c): (usize, usize),
    (dr, dc): (isize, isize),
    dim: (usize, usize),
) -> Option<(usize, usize)> {
    let r = r as isize + dr;
    let c = c as isize + dc;
    if r < 0 || c < 0 || r as usize >= dim.0 || c as usize >= dim.1 {
        None
    } else {
        Some((r as usize, c as usize))
    }
}

fn flood_fill(
    grid: &mut Array2<i32>,
    visited: &mut Array2<bool>,
    seed: (usize, usize),
    label: i32,
) -> usize {
    let dim = grid.dim();
    let mut stack = vec![seed];
    let mut filled = 0;

    while let Some(ij) = stack.pop() {
        if visited[ij] || grid[ij] != FOREGROUND {
            continue;
        }
        visited[ij] = true;
        grid[ij] = label;
        filled += 1;

        stack.extend(DIRECTIONS.iter().filter_map(|&d| neighbor(ij, d, dim)));
    }

    filled
}

/// Label every 4-connected loop of [`FOREGROUND`] cells in place.
///
/// Cells holding any other value are left untouched. Components are numbered
/// in the row-major order of their first cell, starting at `start` and
/// advancing by `step`.
pub fn label_loops(grid: &mut Array2<i32>, start: i32, step: i32) -> Labeling {
    let (rows, cols) = grid.dim();
    let mut visited = Array::from_elem((rows, cols), false);
    let mut labeling = Labeling {
        start,
        step,
        count: 0,
    };

    for i in 0..rows {
        for j in 0..cols {
            if visited[[i, j]] || grid[[i, j]] != FOREGROUND {
                continue;
            }
            let label = labeling.label(labeling.count);
            let size = flood_fill(grid, &mut visited, (i, j), label);
            debug!(label, size, row = i, col = j, "labeled loop");
            labeling.count += 1;
        }
    }

    debug!(count = labeling.count, rows, cols, "labeling finished");
    labeling
}

/// Like [`label_loops`], but leaves `grid` alone and labels a copy.
pub fn labeled(grid: &Array2<i32>, start: i32, step: i32) -> (Array2<i32>, Labeling) {
    let mut out = grid.clone();
    let labeling = label_loops(&mut out, start, step);
    (out, labeling)
}

/// Build a grid from nested rows, rejecting jagged input.
pub fn grid_from_rows(rows: &[Vec<i32>]) -> Result<Array2<i32>> {
    let cols = rows.first().map_or(0, Vec::len);

    if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
        return Err(Error::Jagged {
            row,
            len: r.len(),
            expected: cols,
        });
    }

    let flat = rows.iter().flatten().copied().collect();
    Array::from_shape_vec((rows.len(), cols), flat).map_err(|_| Error::ShapeMismatch {
        expected: (rows.len(), cols),
        actual: (rows.len(), cols),
    })
}
