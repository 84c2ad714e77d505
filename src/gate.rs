//! The proximity check that decides whether a listing may be unlocked.

use crate::coords::Coords;

/// Radius around a listing, in meters, inside which it can be unlocked.
pub const UNLOCK_RADIUS_METERS: f64 = 30.0;

/// Outcome of a single proximity evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityResult {
    distance: f64,
    within_threshold: bool,
}

impl ProximityResult {
    /// Great circle distance between the user and the target in meters.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// True if the distance is less than or equal to the gate's radius.
    pub fn within_threshold(&self) -> bool {
        self.within_threshold
    }
}

/// Compares a user position with a target position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityGate {
    radius: f64,
}

impl Default for ProximityGate {
    fn default() -> Self {
        ProximityGate {
            radius: UNLOCK_RADIUS_METERS,
        }
    }
}

impl ProximityGate {
    /// Create a gate with a radius other than `UNLOCK_RADIUS_METERS`. Negative radii are treated
    /// as zero.
    pub fn with_radius(radius: f64) -> Self {
        ProximityGate {
            radius: radius.max(0.0),
        }
    }

    /// The radius in meters.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Evaluate once, no smoothing and no memory of earlier evaluations.
    pub fn evaluate(&self, user: &Coords, target: &Coords) -> ProximityResult {
        let distance = user.distance_to(target);
        let within_threshold = distance <= self.radius;

        log::debug!(
            "user {} target {} distance {:.2} m (radius {} m) within: {}",
            user,
            target,
            distance,
            self.radius,
            within_threshold
        );

        ProximityResult {
            distance,
            within_threshold,
        }
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;

    fn coords(lat: f64, lon: f64) -> Coords {
        Coords::new(lat, lon).unwrap()
    }

    #[test]
    fn test_threshold_boundary() {
        let gate = ProximityGate::default();
        let origin = coords(0.0, 0.0);

        let just_under = gate.evaluate(&origin, &coords(0.0, 0.00026));
        assert!(just_under.distance() < 30.0);
        assert!(just_under.within_threshold());

        let just_over = gate.evaluate(&origin, &coords(0.0, 0.00027));
        assert!(just_over.distance() > 30.0);
        assert!((just_over.distance() - 30.0).abs() < 0.05);
        assert!(!just_over.within_threshold());
    }

    #[test]
    fn test_within_matches_distance() {
        let gate = ProximityGate::default();
        let home = coords(37.7749, -122.4194);

        for step in 0..100 {
            let user = coords(37.7749 + f64::from(step) * 0.000_01, -122.4194);
            let result = gate.evaluate(&user, &home);
            assert_eq!(result.within_threshold(), result.distance() <= 30.0);
        }
    }

    #[test]
    fn test_same_point_is_within() {
        let gate = ProximityGate::default();
        let home = coords(37.7749, -122.4194);
        let result = gate.evaluate(&home, &home);

        assert_eq!(result.distance(), 0.0);
        assert!(result.within_threshold());
    }

    #[test]
    fn test_custom_radius() {
        let origin = coords(0.0, 0.0);
        let target = coords(0.0, 0.00027);

        assert!(ProximityGate::with_radius(31.0)
            .evaluate(&origin, &target)
            .within_threshold());
        assert!(!ProximityGate::with_radius(-5.0)
            .evaluate(&origin, &target)
            .within_threshold());
        assert_eq!(ProximityGate::with_radius(-5.0).radius(), 0.0);
    }
}
