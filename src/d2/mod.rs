mod driver;
mod heat;
mod label;
pub mod setup;

pub use driver::{run, Frame, Frames, SimulationConfig};
pub use heat::{DiffusionField, DiffusionParams, MAX_STABILITY_RATIO};
pub use label::{grid_from_rows, label_loops, labeled, Labeling, FOREGROUND};
