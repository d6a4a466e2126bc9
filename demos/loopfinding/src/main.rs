use std::env;

use image_util::{load_grid, save_labels, ColorMapping};
use loopheat::d2::setup::binarize;
use loopheat::d2::{grid_from_rows, label_loops};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn sample() -> Vec<Vec<i32>> {
    vec![
        vec![1, 1, 1, 1, 1, 1, 1, 1, 1],
        vec![1, 0, 0, 0, 0, 1, 1, 1, 1],
        vec![1, 1, 0, 0, 0, 0, 0, 0, 1],
        vec![1, 0, 0, 1, 1, 1, 0, 1, 1],
        vec![1, 1, 0, 1, 0, 1, 0, 0, 1],
        vec![1, 1, 0, 1, 1, 1, 0, 0, 1],
        vec![1, 0, 0, 0, 0, 0, 0, 1, 1],
        vec![1, 1, 1, 1, 1, 1, 1, 1, 1],
    ]
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    const N: usize = 500;

    let (mut grid, start, step) = match env::args().nth(1) {
        Some(path) => {
            let grid = load_grid(&path, &ColorMapping::default(), (N, N))?;
            (binarize(&grid), 1, 10)
        }
        None => (grid_from_rows(&sample())?, 11, 1),
    };

    let labeling = label_loops(&mut grid, start, step);
    info!(loops = labeling.count, "labeled");

    if grid.ncols() <= 40 {
        for row in grid.rows() {
            println!("{:?}", row.to_vec());
        }
    }
    save_labels("loops", 0, &grid)?;

    Ok(())
}
