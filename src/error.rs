use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("simulation unstable: rx + ry = {ratio}, should be <= 0.5")]
    Unstable { ratio: f64 },
    #[error("diffusion parameter `{name}` must be positive and finite, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("grid must be at least 3x3 to have interior cells, got {rows}x{cols}")]
    TooSmall { rows: usize, cols: usize },
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    #[error("row {row} has {len} cells, expected {expected}")]
    Jagged {
        row: usize,
        len: usize,
        expected: usize,
    },
}

impl Error {
    /// Parameters that would make the simulation unstable or meaningless.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Unstable { .. } | Error::InvalidParameter { .. })
    }

    /// Inputs whose dimensions cannot be simulated or labeled.
    pub fn is_shape(&self) -> bool {
        matches!(
            self,
            Error::TooSmall { .. } | Error::ShapeMismatch { .. } | Error::Jagged { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
