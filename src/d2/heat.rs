use ndarray::{Array2, Zip};
use tracing::debug;

use crate::{Error, Result};

/// Largest stability ratio `rx + ry` the explicit scheme accepts.
pub const MAX_STABILITY_RATIO: f64 = 0.5;

/// Thermal diffusivity, grid spacing and time step of a [`DiffusionField`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffusionParams {
    pub alpha: f64,
    pub dx: f64,
    pub dy: f64,
    pub dt: f64,
}

impl Default for DiffusionParams {
    fn default() -> Self {
        Self {
            alpha: 1.32e-4,
            dx: 1.0,
            dy: 1.0,
            dt: 0.1,
        }
    }
}

impl DiffusionParams {
    pub fn new(alpha: f64, dx: f64, dy: f64, dt: f64) -> Self {
        Self { alpha, dx, dy, dt }
    }

    /// `(rx, ry)` = `(alpha * dt / dx^2, alpha * dt / dy^2)`
    pub fn ratios(&self) -> (f64, f64) {
        let rx = self.alpha * self.dt / (self.dx * self.dx);
        let ry = self.alpha * self.dt / (self.dy * self.dy);
        (rx, ry)
    }

    pub fn stability_ratio(&self) -> f64 {
        let (rx, ry) = self.ratios();
        rx + ry
    }

    pub fn validate(&self) -> Result<()> {
        let named = [
            ("alpha", self.alpha),
            ("dx", self.dx),
            ("dy", self.dy),
            ("dt", self.dt),
        ];
        for &(name, value) in named.iter() {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidParameter { name, value });
            }
        }

        let ratio = self.stability_ratio();
        if ratio > MAX_STABILITY_RATIO {
            return Err(Error::Unstable { ratio });
        }
        Ok(())
    }
}

/// Temperature field stepped by an explicit FTCS scheme.
///
/// The outermost ring of cells is never updated, and pinned cells keep their
/// initial value forever. Both act as fixed-temperature boundaries.
#[derive(Debug, Clone)]
pub struct DiffusionField {
    values: Array2<f64>,
    next: Array2<f64>,
    pinned: Array2<bool>,
    params: DiffusionParams,
    steps: usize,
}

fn check_dim((rows, cols): (usize, usize)) -> Result<()> {
    if rows < 3 || cols < 3 {
        return Err(Error::TooSmall { rows, cols });
    }
    Ok(())
}

impl DiffusionField {
    /// Pin every cell whose initial value equals one of the nonzero
    /// `edge_temperatures`.
    ///
    /// Membership is decided here, once. A free cell that later drifts onto
    /// an edge temperature keeps diffusing.
    pub fn new(
        initial: Array2<f64>,
        edge_temperatures: &[f64],
        params: DiffusionParams,
    ) -> Result<Self> {
        let edges: Vec<f64> = edge_temperatures
            .iter()
            .copied()
            .filter(|&t| t != 0.0)
            .collect();
        let pinned = initial.mapv(|v| edges.contains(&v));

        Self::with_pinned(initial, pinned, params)
    }

    /// Pin exactly the cells set in `pinned`.
    pub fn with_pinned(
        initial: Array2<f64>,
        pinned: Array2<bool>,
        params: DiffusionParams,
    ) -> Result<Self> {
        check_dim(initial.dim())?;
        if pinned.dim() != initial.dim() {
            return Err(Error::ShapeMismatch {
                expected: initial.dim(),
                actual: pinned.dim(),
            });
        }
        params.validate()?;

        let (rx, ry) = params.ratios();
        debug!(
            rows = initial.nrows(),
            cols = initial.ncols(),
            pinned = pinned.iter().filter(|&&p| p).count(),
            rx,
            ry,
            "diffusion field ready"
        );

        Ok(Self {
            next: initial.clone(),
            values: initial,
            pinned,
            params,
            steps: 0,
        })
    }

    /// Advance by one time step and return the new field.
    pub fn update(&mut self) -> Result<&Array2<f64>> {
        self.params.validate()?;

        let (rx, ry) = self.params.ratios();
        let (rows, cols) = self.values.dim();
        let t = &self.values;

        Zip::indexed(&mut self.next)
            .and(&self.pinned)
            .for_each(|(i, j), e, &pinned| {
                let c = t[[i, j]];

                if pinned || i == 0 || j == 0 || i + 1 == rows || j + 1 == cols {
                    *e = c;
                    return;
                }

                *e = c
                    + rx * (t[[i, j + 1]] + t[[i, j - 1]] - 2.0 * c)
                    + ry * (t[[i + 1, j]] + t[[i - 1, j]] - 2.0 * c);
            });

        std::mem::swap(&mut self.values, &mut self.next);
        self.steps += 1;

        Ok(&self.values)
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn value(&self, ij: (usize, usize)) -> f64 {
        self.values[ij]
    }

    pub fn is_pinned(&self, ij: (usize, usize)) -> bool {
        self.pinned[ij]
    }

    pub fn pinned_count(&self) -> usize {
        self.pinned.iter().filter(|&&p| p).count()
    }

    /// Number of updates applied so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn params(&self) -> &DiffusionParams {
        &self.params
    }

    #[cfg(test)]
    pub(crate) fn params_mut(&mut self) -> &mut DiffusionParams {
        &mut self.params
    }

    pub fn dim(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// Owned copy of the current field, unaffected by later updates.
    pub fn snapshot(&self) -> Array2<f64> {
        self.values.clone()
    }

    pub fn min_max(&self) -> (f64, f64) {
        self.values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}
