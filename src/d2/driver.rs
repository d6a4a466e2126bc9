use std::iter::FusedIterator;

use ndarray::Array2;
use tracing::trace;

use super::heat::DiffusionField;
use crate::Result;

/// One rendered moment of a simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub index: usize,
    /// Total updates applied to the field when this frame was taken.
    pub step: usize,
    pub values: Array2<f64>,
}

/// Lazy, finite sequence of frames produced by [`run`].
///
/// Each frame owns a copy of the field, so holding on to it never observes
/// later steps. The first error is yielded once and ends the sequence.
#[derive(Debug)]
pub struct Frames<'a> {
    field: &'a mut DiffusionField,
    steps_per_frame: usize,
    index: usize,
    frame_count: usize,
}

impl<'a> Iterator for Frames<'a> {
    type Item = Result<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.frame_count {
            return None;
        }

        for _ in 0..self.steps_per_frame {
            if let Err(e) = self.field.update() {
                self.index = self.frame_count;
                return Some(Err(e));
            }
        }

        let frame = Frame {
            index: self.index,
            step: self.field.steps(),
            values: self.field.snapshot(),
        };
        trace!(frame = frame.index, step = frame.step, "frame ready");
        self.index += 1;

        Some(Ok(frame))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.frame_count - self.index;
        (0, Some(left))
    }
}

impl<'a> FusedIterator for Frames<'a> {}

/// Step `field` `steps_per_frame` times per frame, for `frame_count` frames.
pub fn run(field: &mut DiffusionField, steps_per_frame: usize, frame_count: usize) -> Frames<'_> {
    Frames {
        field,
        steps_per_frame,
        index: 0,
        frame_count,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    pub steps_per_frame: usize,
    pub frame_count: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            steps_per_frame: 20,
            frame_count: 50,
        }
    }
}

impl SimulationConfig {
    pub fn run<'a>(&self, field: &'a mut DiffusionField) -> Frames<'a> {
        run(field, self.steps_per_frame, self.frame_count)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::d2::DiffusionParams;
    use crate::Error;
    use ndarray::Array;

    fn hot_corner() -> DiffusionField {
        let mut initial = Array::from_elem((5, 5), 25.0);
        initial[[1, 1]] = 300.0;
        let params = DiffusionParams::new(1.0, 1.0, 1.0, 0.2);
        DiffusionField::new(initial, &[300.0], params).unwrap()
    }

    #[test]
    fn test_frame_count_and_steps() {
        let mut field = hot_corner();
        let frames: Vec<Frame> = run(&mut field, 3, 4).map(|f| f.unwrap()).collect();

        assert_eq!(frames.len(), 4);
        for (k, frame) in frames.iter().enumerate() {
            assert_eq!(frame.index, k);
            assert_eq!(frame.step, 3 * (k + 1));
        }
        assert_eq!(field.steps(), 12);
        assert_eq!(frames[3].values, *field.values());
    }

    #[test]
    fn test_matches_manual_stepping() {
        let mut driven = hot_corner();
        let mut manual = hot_corner();

        let frames: Vec<Frame> = run(&mut driven, 2, 3).map(|f| f.unwrap()).collect();
        for frame in frames.iter() {
            manual.update().unwrap();
            let t = manual.update().unwrap();
            assert_eq!(&frame.values, t);
        }
    }

    #[test]
    fn test_early_stop() {
        let mut field = hot_corner();
        let first = run(&mut field, 5, 100).next().unwrap().unwrap();

        assert_eq!(first.step, 5);
        assert_eq!(field.steps(), 5);
    }

    #[test]
    fn test_frames_are_detached() {
        let mut field = hot_corner();
        let mut frames = run(&mut field, 1, 2);
        let a = frames.next().unwrap().unwrap();
        let b = frames.next().unwrap().unwrap();

        assert!(a.values[[1, 2]] < b.values[[1, 2]]);
        assert!(frames.next().is_none());
    }

    #[test]
    fn test_error_ends_sequence() {
        let mut field = DiffusionField::new(
            Array::from_elem((3, 3), 1.0),
            &[],
            DiffusionParams::default(),
        )
        .unwrap();
        field.params_mut().dt = 1e6;

        let mut frames = run(&mut field, 1, 10);
        match frames.next() {
            Some(Err(Error::Unstable { .. })) => {}
            other => panic!("unexpected {:?}", other),
        }
        assert!(frames.next().is_none());
    }

    #[test]
    fn test_zero_frames() {
        let mut field = hot_corner();
        let config = SimulationConfig {
            steps_per_frame: 20,
            frame_count: 0,
        };

        assert_eq!(config.run(&mut field).count(), 0);
        assert_eq!(field.steps(), 0);
    }

    #[test]
    fn test_default_config() {
        let mut field = hot_corner();
        let frames = SimulationConfig::default().run(&mut field);

        assert_eq!(frames.size_hint(), (0, Some(50)));
        assert_eq!(frames.count(), 50);
        assert_eq!(field.steps(), 1000);
    }
}
