//! Trajectory sampling: a propagator, a start epoch, and a duration in,
//! a time-ordered sequence of position samples out

use nalgebra::Vector3;

use super::{Epoch, PropagationError, Propagator, StateVector};

/// One successful trajectory sample.
#[derive(Debug, Clone, Copy)]
pub struct SamplePoint {
    /// Hours past the start epoch
    pub offset_hours: f64,
    /// TEME position in km
    pub position: Vector3<f64>,
}

/// Ordered samples over one prediction window.
#[derive(Debug, Clone, Default)]
pub struct Trajectory {
    /// Successful samples, strictly ascending by offset
    pub points: Vec<SamplePoint>,
    /// How many samples were requested
    pub requested: usize,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Samples that failed to propagate and were dropped
    pub fn failed(&self) -> usize {
        self.requested - self.points.len()
    }
}

/// Default sampling cadence: one sample per minute of the window.
pub fn samples_per_window(duration_hours: f64) -> usize {
    (duration_hours * 60.0).round().max(1.0) as usize
}

/// Sample `sample_count` evenly spaced offsets over `[0, duration_hours)`.
///
/// Each queried epoch moves only the Julian day count of `start`; the day
/// fraction is held fixed (see [`Epoch::offset_by_hours`]). A failed sample
/// is dropped from the result, never replaced with a placeholder, and is
/// reported with the offset that failed.
pub fn sample_trajectory(
    propagator: &dyn Propagator,
    start: Epoch,
    duration_hours: f64,
    sample_count: usize,
) -> Trajectory {
    let mut points = Vec::with_capacity(sample_count);

    for i in 0..sample_count {
        let offset_hours = duration_hours * i as f64 / sample_count as f64;
        match propagator.propagate(start.offset_by_hours(offset_hours)) {
            Ok(state) => points.push(SamplePoint {
                offset_hours,
                position: state.position,
            }),
            Err(e) => log::warn!("propagation failed at t={:.2} h: {}", offset_hours, e),
        }
    }

    Trajectory {
        points,
        requested: sample_count,
    }
}

/// Propagate once at `epoch`, with no retry.
///
/// A failure is returned as-is; it is never substituted with a stale or
/// zeroed state.
pub fn query_current_state(
    propagator: &dyn Propagator,
    epoch: Epoch,
) -> Result<StateVector, PropagationError> {
    propagator.propagate(epoch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::HashSet;

    struct FixedPropagator(Vector3<f64>);

    impl Propagator for FixedPropagator {
        fn propagate(&self, _epoch: Epoch) -> Result<StateVector, PropagationError> {
            Ok(StateVector {
                position: self.0,
                velocity: Vector3::zeros(),
            })
        }
    }

    struct FailingPropagator;

    impl Propagator for FailingPropagator {
        fn propagate(&self, _epoch: Epoch) -> Result<StateVector, PropagationError> {
            Err(PropagationError {
                message: "mean elements not converged".to_string(),
            })
        }
    }

    /// Fails the nth call for every n in `fail_at` (call order == offset order).
    struct SelectivePropagator {
        fail_at: HashSet<usize>,
        calls: Cell<usize>,
    }

    impl Propagator for SelectivePropagator {
        fn propagate(&self, _epoch: Epoch) -> Result<StateVector, PropagationError> {
            let i = self.calls.get();
            self.calls.set(i + 1);
            if self.fail_at.contains(&i) {
                Err(PropagationError {
                    message: "decayed".to_string(),
                })
            } else {
                Ok(StateVector {
                    position: Vector3::new(7000.0, 0.0, 0.0),
                    velocity: Vector3::zeros(),
                })
            }
        }
    }

    fn start() -> Epoch {
        Epoch::from_calendar(2024, 6, 15, 12, 0, 0.0)
    }

    #[test]
    fn offsets_are_strictly_ascending_and_half_open() {
        let propagator = FixedPropagator(Vector3::new(1.0, 2.0, 3.0));
        let trajectory = sample_trajectory(&propagator, start(), 24.0, 1440);

        assert_eq!(trajectory.len(), 1440);
        assert_eq!(trajectory.points[0].offset_hours, 0.0);
        for pair in trajectory.points.windows(2) {
            assert!(pair[0].offset_hours < pair[1].offset_hours);
        }
        assert!(trajectory.points.last().unwrap().offset_hours < 24.0);
    }

    #[test]
    fn fixed_propagator_yields_identical_positions() {
        let propagator = FixedPropagator(Vector3::new(1.0, 2.0, 3.0));
        let trajectory = sample_trajectory(&propagator, start(), 1.0, 3);

        assert_eq!(trajectory.len(), 3);
        for point in &trajectory.points {
            assert_eq!(point.position, Vector3::new(1.0, 2.0, 3.0));
        }
    }

    #[test]
    fn failed_samples_are_dropped_not_substituted() {
        let propagator = SelectivePropagator {
            fail_at: [1, 3].into_iter().collect(),
            calls: Cell::new(0),
        };
        let trajectory = sample_trajectory(&propagator, start(), 5.0, 5);

        assert_eq!(trajectory.len(), 3);
        assert_eq!(trajectory.requested, 5);
        assert_eq!(trajectory.failed(), 2);

        // Offsets 1.0 and 3.0 failed; only 0.0, 2.0, 4.0 survive
        let offsets: Vec<f64> = trajectory.points.iter().map(|p| p.offset_hours).collect();
        assert_eq!(offsets, vec![0.0, 2.0, 4.0]);
    }

    #[test]
    fn all_failures_yield_empty_trajectory() {
        let trajectory = sample_trajectory(&FailingPropagator, start(), 24.0, 10);
        assert!(trajectory.is_empty());
        assert_eq!(trajectory.requested, 10);
        assert_eq!(trajectory.failed(), 10);
    }

    #[test]
    fn offset_sequence_is_idempotent() {
        let propagator = FixedPropagator(Vector3::new(1.0, 2.0, 3.0));
        let a = sample_trajectory(&propagator, start(), 12.0, 100);
        let b = sample_trajectory(&propagator, start(), 12.0, 100);

        let offsets = |t: &Trajectory| t.points.iter().map(|p| p.offset_hours).collect::<Vec<_>>();
        assert_eq!(offsets(&a), offsets(&b));
    }

    #[test]
    fn current_state_failure_is_explicit() {
        let result = query_current_state(&FailingPropagator, start());
        assert!(result.is_err());
    }

    #[test]
    fn default_cadence_is_one_sample_per_minute() {
        assert_eq!(samples_per_window(24.0), 1440);
        assert_eq!(samples_per_window(1.0), 60);
    }
}
