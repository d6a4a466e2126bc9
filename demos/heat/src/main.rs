use std::env;

use image_util::{load_grid, save_gif, save_heat, save_labels, ColorMapping};
use loopheat::d2::setup::{
    assemble_temperatures, binarize, edge_temperatures, SURFACE_TEMPERATURE,
};
use loopheat::d2::{label_loops, DiffusionField, DiffusionParams, SimulationConfig};
use ndarray::{Array, Array2};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Two square loops with a gap between them, as the sample image draws them.
fn double_border(n: usize) -> Array2<i32> {
    let width = (n / 100).max(1);
    let outer = n / 20;
    let inner = n / 5;

    Array::from_shape_fn((n, n), |(i, j)| {
        let ring = i.min(j).min(n - 1 - i).min(n - 1 - j);
        if (outer..outer + width).contains(&ring) || (inner..inner + width).contains(&ring) {
            1
        } else if ring >= outer + width && ring < inner {
            -1
        } else {
            0
        }
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    const N: usize = 500;

    let grid = match env::args().nth(1) {
        Some(path) => load_grid(&path, &ColorMapping::default(), (N, N))?,
        None => double_border(N),
    };

    let mut skeleton = binarize(&grid);
    let labeling = label_loops(&mut skeleton, 1, 1);
    info!(regions = labeling.count, "detected regions");
    save_labels("labels", 0, &skeleton)?;

    let edges = edge_temperatures(labeling.count);
    let initial = assemble_temperatures(&skeleton, &labeling, &edges, SURFACE_TEMPERATURE);
    let mut field = DiffusionField::new(initial, &edges, DiffusionParams::default())?;

    let range = field.min_max();
    save_heat("heat", 0, field.values(), range)?;

    let config = SimulationConfig::default();
    let mut fields = Vec::with_capacity(config.frame_count);

    for frame in config.run(&mut field) {
        let frame = frame?;
        save_heat("heat", frame.index + 1, &frame.values, range)?;
        fields.push(frame.values);

        eprint!("\r {} / {}", fields.len(), config.frame_count);
    }
    eprintln!();

    save_gif("heat_diffusion.gif", &fields, range, 100)?;
    info!(steps = field.steps(), "wrote heat_diffusion.gif");

    Ok(())
}
