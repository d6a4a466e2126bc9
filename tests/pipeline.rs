use loopheat::d2::setup::{
    assemble_temperatures, binarize, edge_temperatures, SURFACE_TEMPERATURE,
};
use loopheat::d2::{grid_from_rows, label_loops, run, DiffusionField, DiffusionParams};

const STEPS_PER_FRAME: usize = 20;
const FRAMES: usize = 5;

/// Two nested square loops drawn on a blue (0) background with white (-1)
/// gaps between them.
fn double_border() -> Vec<Vec<i32>> {
    let n = 12;
    (0..n)
        .map(|i| {
            (0..n)
                .map(|j| {
                    let ring = i.min(j).min(n - 1 - i).min(n - 1 - j);
                    match ring {
                        1 | 4 => 1,
                        2 | 3 => -1,
                        _ => 0,
                    }
                })
                .collect()
        })
        .collect()
}

#[test]
fn test_loops_heat_their_surroundings() {
    let grid = grid_from_rows(&double_border()).unwrap();
    let mut skeleton = binarize(&grid);
    let labeling = label_loops(&mut skeleton, 1, 1);
    assert_eq!(labeling.count, 2);

    let edges = edge_temperatures(labeling.count);
    let initial = assemble_temperatures(&skeleton, &labeling, &edges, SURFACE_TEMPERATURE);
    assert_eq!(initial[[1, 1]], 100.0);
    assert_eq!(initial[[4, 4]], 200.0);
    assert_eq!(initial[[2, 2]], SURFACE_TEMPERATURE);

    let params = DiffusionParams::default();
    let mut field = DiffusionField::new(initial.clone(), &edges, params).unwrap();
    // Two loops of 36 and 12 cells.
    assert_eq!(field.pinned_count(), 48);

    let frames: Vec<_> = run(&mut field, STEPS_PER_FRAME, FRAMES)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(frames.len(), FRAMES);

    let last = &frames[FRAMES - 1];
    assert_eq!(last.step, STEPS_PER_FRAME * FRAMES);
    for ((i, j), &v) in initial.indexed_iter() {
        if field.is_pinned((i, j)) {
            assert_eq!(last.values[[i, j]], v);
        }
    }

    // The gap and the core warm up. The outermost ring never moves.
    assert!(last.values[[2, 5]] > SURFACE_TEMPERATURE);
    assert!(last.values[[5, 5]] > SURFACE_TEMPERATURE);
    assert_eq!(last.values[[0, 0]], SURFACE_TEMPERATURE);
    assert_eq!(last.values[[0, 6]], SURFACE_TEMPERATURE);
}

#[test]
fn test_unstable_parameters_stop_before_stepping() {
    let grid = grid_from_rows(&double_border()).unwrap();
    let mut skeleton = binarize(&grid);
    let labeling = label_loops(&mut skeleton, 1, 1);
    let edges = edge_temperatures(labeling.count);
    let initial = assemble_temperatures(&skeleton, &labeling, &edges, SURFACE_TEMPERATURE);

    let params = DiffusionParams {
        alpha: 3.0,
        ..DiffusionParams::default()
    };
    let err = DiffusionField::new(initial, &edges, params).unwrap_err();
    assert!(err.is_configuration());
}
