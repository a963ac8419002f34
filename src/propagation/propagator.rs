//! SGP4 propagation using satkit, behind a narrow capability trait

use chrono::{Datelike, Timelike};
use nalgebra::Vector3;
use satkit::sgp4::{sgp4, SGP4Error};

use super::Epoch;

/// Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Julian date of the Unix epoch (1970-01-01T00:00:00 UTC)
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Position and velocity at a queried epoch, TEME frame.
#[derive(Debug, Clone, Copy)]
pub struct StateVector {
    /// Position in km
    pub position: Vector3<f64>,
    /// Velocity in km/s
    pub velocity: Vector3<f64>,
}

impl StateVector {
    /// Scalar speed in km/s
    pub fn speed_kms(&self) -> f64 {
        self.velocity.norm()
    }

    /// Altitude above the spherical Earth surface in km
    pub fn altitude_km(&self) -> f64 {
        self.position.norm() - EARTH_RADIUS_KM
    }
}

/// The propagator factory rejected the element lines.
#[derive(Debug, Clone)]
pub struct ElementParseError {
    pub message: String,
}

impl std::fmt::Display for ElementParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "malformed element lines: {}", self.message)
    }
}

impl std::error::Error for ElementParseError {}

/// A single propagation query failed.
#[derive(Debug, Clone)]
pub struct PropagationError {
    pub message: String,
}

impl std::fmt::Display for PropagationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "propagation failed: {}", self.message)
    }
}

impl std::error::Error for PropagationError {}

/// Stateless propagation capability: query epoch in, state out.
///
/// Implementations must be read-only per call so the sampler and the
/// current-state query can share one instance freely.
pub trait Propagator {
    fn propagate(&self, epoch: Epoch) -> Result<StateVector, PropagationError>;
}

/// SGP4 propagator bound to one element set.
pub struct Sgp4Propagator {
    tle: satkit::TLE,
}

impl Sgp4Propagator {
    /// Build a propagator from two element lines.
    pub fn from_elements(line1: &str, line2: &str) -> Result<Self, ElementParseError> {
        let tle = satkit::TLE::load_2line(line1, line2).map_err(|e| ElementParseError {
            message: e.to_string(),
        })?;
        Ok(Self { tle })
    }
}

impl Propagator for Sgp4Propagator {
    fn propagate(&self, epoch: Epoch) -> Result<StateVector, PropagationError> {
        let time = instant_from_epoch(&epoch).ok_or_else(|| PropagationError {
            message: format!("epoch jd={:.3} is not representable", epoch.as_jd()),
        })?;

        // satkit caches propagation state inside the TLE; clone per call so
        // `&self` propagation stays genuinely read-only.
        let mut tle = self.tle.clone();
        let (pos_m, vel_m, errs) = sgp4(&mut tle, &[time]);
        match errs.first() {
            Some(SGP4Error::SGP4Success) => {
                // pos and vel are in the TEME frame, in meters and m/s
                let pos = pos_m.column(0);
                let vel = vel_m.column(0);
                Ok(StateVector {
                    position: Vector3::new(pos[0], pos[1], pos[2]) / 1000.0,
                    velocity: Vector3::new(vel[0], vel[1], vel[2]) / 1000.0,
                })
            }
            Some(e) => Err(PropagationError {
                message: e.to_string(),
            }),
            None => Err(PropagationError {
                message: "sgp4 returned no result".to_string(),
            }),
        }
    }
}

/// Convert a two-part Julian date to a satkit instant through the calendar
/// round trip, keeping sub-second precision in the seconds argument.
fn instant_from_epoch(epoch: &Epoch) -> Option<satkit::Instant> {
    let unix_seconds = (epoch.as_jd() - UNIX_EPOCH_JD) * 86_400.0;
    let whole = unix_seconds.floor();
    let dt = chrono::DateTime::from_timestamp(whole as i64, 0)?;

    Some(satkit::Instant::from_datetime(
        dt.year(),
        dt.month() as i32,
        dt.day() as i32,
        dt.hour() as i32,
        dt.minute() as i32,
        dt.second() as f64 + (unix_seconds - whole),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    // SGP4 reference TLE for the ISS
    const ISS_LINE1: &str = "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
    const ISS_LINE2: &str = "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    #[test]
    fn builds_from_valid_elements() {
        assert!(Sgp4Propagator::from_elements(ISS_LINE1, ISS_LINE2).is_ok());
    }

    #[test]
    fn rejects_garbage_elements() {
        let err = Sgp4Propagator::from_elements("not an element line", "also not one");
        assert!(err.is_err());
    }

    #[test]
    fn propagates_near_tle_epoch() {
        let propagator = Sgp4Propagator::from_elements(ISS_LINE1, ISS_LINE2).unwrap();

        // TLE epoch is day 264.51782528 of 2008 (2008-09-20 ~12:25 UTC)
        let epoch = Epoch::from_calendar(2008, 9, 20, 12, 25, 40.0);
        let state = propagator.propagate(epoch).unwrap();

        // LEO sanity: geocentric distance and orbital speed
        let radius = state.position.norm();
        assert!(
            (6_500.0..7_100.0).contains(&radius),
            "unexpected radius {radius} km"
        );
        let speed = state.speed_kms();
        assert!((7.0..8.5).contains(&speed), "unexpected speed {speed} km/s");
        assert!(state.altitude_km() > 200.0);
    }

    #[test]
    fn propagation_is_repeatable() {
        let propagator = Sgp4Propagator::from_elements(ISS_LINE1, ISS_LINE2).unwrap();
        let epoch = Epoch::from_calendar(2008, 9, 21, 0, 0, 0.0);

        let a = propagator.propagate(epoch).unwrap();
        let b = propagator.propagate(epoch).unwrap();
        assert_eq!(a.position, b.position);
        assert_eq!(a.velocity, b.velocity);
    }

    #[test]
    fn instant_round_trips_through_calendar() {
        let epoch = Epoch::from_calendar(2008, 9, 20, 12, 25, 40.0);
        let instant = instant_from_epoch(&epoch).unwrap();
        assert!((instant.as_jd() - epoch.as_jd()).abs() < 1e-6);
    }
}
