// Orbital Mechanics - Kepler elements to Cartesian state, two-body propagation
// Heliocentric frame, SI units for state vectors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

use crate::config::OrbitConfig;
use crate::error::{ImpactError, ImpactResult};

/// Julian Date of the Unix epoch (1970-01-01 00:00 UTC)
pub const JD_UNIX_EPOCH: f64 = 2440587.5;

pub const SECONDS_PER_DAY: f64 = 86400.0;

// =============================================================================
// 3D VECTOR MATHEMATICS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn normalize(&self) -> Self {
        match self.magnitude() {
            mag if mag > 1e-15 => Self::new(self.x / mag, self.y / mag, self.z / mag),
            _ => Self::zero(),
        }
    }

    pub fn dot(&self, other: &Vector3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    fn mul(self, s: f64) -> Vector3 {
        Vector3::new(self.x * s, self.y * s, self.z * s)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Vector3 {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

// =============================================================================
// STATE VECTOR (Position + Velocity)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    pub position: Vector3, // meters (SI)
    pub velocity: Vector3, // m/s (SI)
}

impl StateVector {
    pub fn new(position: Vector3, velocity: Vector3) -> Self {
        Self { position, velocity }
    }
}

// =============================================================================
// KEPLERIAN ORBITAL ELEMENTS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    /// Semi-major axis (AU)
    pub semi_major_axis: f64,
    /// Eccentricity, elliptical only: [0, 1)
    pub eccentricity: f64,
    /// Inclination (degrees)
    pub inclination: f64,
    /// Longitude of ascending node (degrees)
    pub longitude_ascending_node: f64,
    /// Argument of periapsis (degrees)
    pub argument_periapsis: f64,
    /// Mean anomaly at epoch (degrees)
    pub mean_anomaly: f64,
    /// Epoch (Julian Date)
    pub epoch: f64,
}

/// Result of solving Kepler's equation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    pub eccentric_anomaly: f64,
    pub iterations: u32,
    pub converged: bool,
}

impl OrbitalElements {
    pub fn validate(&self) -> ImpactResult<()> {
        if !(self.semi_major_axis.is_finite() && self.semi_major_axis > 0.0) {
            return Err(ImpactError::invalid_orbit(
                "semi_major_axis",
                self.semi_major_axis,
                "must be positive",
            ));
        }
        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(ImpactError::invalid_orbit(
                "eccentricity",
                self.eccentricity,
                "must lie in [0, 1)",
            ));
        }
        let angles = [
            ("inclination", self.inclination),
            ("longitude_ascending_node", self.longitude_ascending_node),
            ("argument_periapsis", self.argument_periapsis),
            ("mean_anomaly", self.mean_anomaly),
        ];
        for (field, value) in angles {
            if !value.is_finite() {
                return Err(ImpactError::invalid_orbit(field, value, "must be finite"));
            }
        }
        Ok(())
    }

    /// Convert orbital elements to a heliocentric Cartesian state vector.
    ///
    /// The result is only meaningful at `self.epoch`.
    pub fn to_state_vector(&self, orbit: &OrbitConfig) -> ImpactResult<StateVector> {
        self.validate()?;

        let mu = orbit.mu_sun;
        let a = self.semi_major_axis * orbit.au_m;
        let e = self.eccentricity;
        let i = self.inclination.to_radians();
        let omega_big = self.longitude_ascending_node.to_radians(); // Ω
        let omega_small = self.argument_periapsis.to_radians(); // ω
        let m = self.mean_anomaly.to_radians();

        let eccentric_anomaly =
            solve_kepler_equation(m, e, orbit.kepler_tolerance, orbit.kepler_max_iterations)
                .eccentric_anomaly;

        let cos_e = eccentric_anomaly.cos();
        let sin_e = eccentric_anomaly.sin();
        let true_anomaly = 2.0
            * ((1.0 + e).sqrt() * (eccentric_anomaly / 2.0).sin())
                .atan2((1.0 - e).sqrt() * (eccentric_anomaly / 2.0).cos());

        // Position in orbital plane (perifocal frame)
        let r = a * (1.0 - e * cos_e);
        let x_orb = r * true_anomaly.cos();
        let y_orb = r * true_anomaly.sin();

        // Velocity in orbital plane, from the eccentric anomaly
        let n = (mu / a.powi(3)).sqrt();
        let denom = 1.0 - e * cos_e;
        let vx_orb = -a * n * sin_e / denom;
        let vy_orb = a * n * (1.0 - e * e).sqrt() * cos_e / denom;

        // 3-1-3 rotation R = Rz(Ω) · Rx(i) · Rz(ω)
        let cos_omega = omega_big.cos();
        let sin_omega = omega_big.sin();
        let cos_w = omega_small.cos();
        let sin_w = omega_small.sin();
        let cos_i = i.cos();
        let sin_i = i.sin();

        let r11 = cos_omega * cos_w - sin_omega * sin_w * cos_i;
        let r12 = -cos_omega * sin_w - sin_omega * cos_w * cos_i;
        let r21 = sin_omega * cos_w + cos_omega * sin_w * cos_i;
        let r22 = -sin_omega * sin_w + cos_omega * cos_w * cos_i;
        let r31 = sin_w * sin_i;
        let r32 = cos_w * sin_i;

        let position = Vector3::new(
            r11 * x_orb + r12 * y_orb,
            r21 * x_orb + r22 * y_orb,
            r31 * x_orb + r32 * y_orb,
        );

        let velocity = Vector3::new(
            r11 * vx_orb + r12 * vy_orb,
            r21 * vx_orb + r22 * vy_orb,
            r31 * vx_orb + r32 * vy_orb,
        );

        Ok(StateVector { position, velocity })
    }

    pub fn epoch_utc(&self) -> Option<DateTime<Utc>> {
        julian_date_to_utc(self.epoch)
    }
}

/// Solve Kepler's equation M = E - e*sin(E) using Newton-Raphson
///
/// Seeded at E₀ = M. Stops when the residual drops below `tolerance`; on
/// hitting `max_iterations` the last iterate is returned unconverged.
pub fn solve_kepler_equation(
    mean_anomaly: f64,
    eccentricity: f64,
    tolerance: f64,
    max_iterations: u32,
) -> KeplerSolution {
    let mut e_anom = mean_anomaly;

    for iteration in 0..max_iterations {
        let f = e_anom - eccentricity * e_anom.sin() - mean_anomaly;
        if f.abs() < tolerance {
            return KeplerSolution {
                eccentric_anomaly: e_anom,
                iterations: iteration,
                converged: true,
            };
        }
        let f_prime = 1.0 - eccentricity * e_anom.cos();
        e_anom -= f / f_prime;
    }

    tracing::warn!(
        mean_anomaly,
        eccentricity,
        max_iterations,
        "Kepler solver hit iteration cap, returning best estimate"
    );
    KeplerSolution {
        eccentric_anomaly: e_anom,
        iterations: max_iterations,
        converged: false,
    }
}

/// Single explicit-Euler step under inverse-square gravity: a = -μ·r/|r|³
///
/// Velocity is updated first and the new velocity moves the position. No
/// internal sub-stepping; long spans must be split by the caller.
pub fn propagate(state: &StateVector, dt: f64, mu: f64) -> StateVector {
    let r = state.position.magnitude();
    let acceleration = if r > 1e-10 {
        state.position * (-mu / (r * r * r))
    } else {
        Vector3::zero()
    };

    let velocity = state.velocity + acceleration * dt;
    let position = state.position + velocity * dt;
    StateVector { position, velocity }
}

/// Convert a Julian Date to UTC. `None` when out of chrono's range.
pub fn julian_date_to_utc(julian_date: f64) -> Option<DateTime<Utc>> {
    if !julian_date.is_finite() {
        return None;
    }
    let millis = ((julian_date - JD_UNIX_EPOCH) * SECONDS_PER_DAY * 1000.0).round();
    if millis.abs() > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn earthlike() -> OrbitalElements {
        OrbitalElements {
            semi_major_axis: 1.0,
            eccentricity: 0.0167,
            inclination: 0.0,
            longitude_ascending_node: 0.0,
            argument_periapsis: 102.9,
            mean_anomaly: 0.0,
            epoch: 2451545.0,
        }
    }

    #[test]
    fn test_circular_anomaly_needs_no_iteration() {
        for mean_anomaly in [0.0, 1.0, 3.0] {
            let sol = solve_kepler_equation(mean_anomaly, 0.0, 1e-10, 100);
            assert_eq!((sol.eccentric_anomaly, sol.iterations), (mean_anomaly, 0));
            assert!(sol.converged);
        }
    }

    #[test]
    fn test_kepler_equation_eccentric() {
        let sol = solve_kepler_equation(0.5, 0.5, 1e-10, 100);
        let check = sol.eccentric_anomaly - 0.5 * sol.eccentric_anomaly.sin();
        assert!((check - 0.5).abs() < 1e-10);
        assert!(sol.converged);
    }

    #[test]
    fn test_kepler_cap_out_returns_estimate() {
        let sol = solve_kepler_equation(2.0, 0.9, 1e-300, 3);
        assert!(!sol.converged);
        assert_eq!(sol.iterations, 3);
        assert!(sol.eccentric_anomaly.is_finite());
    }

    #[test]
    fn test_invalid_orbit_rejected_before_solving() {
        let mut elements = earthlike();
        elements.semi_major_axis = 0.0;
        let err = elements.to_state_vector(&OrbitConfig::default()).unwrap_err();
        assert_eq!(err.field(), Some("semi_major_axis"));

        let mut elements = earthlike();
        elements.eccentricity = 1.0;
        let err = elements.to_state_vector(&OrbitConfig::default()).unwrap_err();
        assert_eq!(err.field(), Some("eccentricity"));
    }

    #[test]
    fn test_circular_orbit_state() {
        let orbit = OrbitConfig::default();
        let elements = OrbitalElements {
            eccentricity: 0.0,
            argument_periapsis: 0.0,
            ..earthlike()
        };
        let state = elements.to_state_vector(&orbit).unwrap();

        // Periapsis on +x, velocity along +y with v = sqrt(mu/a)
        let a = orbit.au_m;
        assert!((state.position.x - a).abs() / a < 1e-12);
        assert!(state.position.y.abs() < 1e-3);
        let v_circ = (orbit.mu_sun / a).sqrt();
        assert!((state.velocity.y - v_circ).abs() < 1e-6);
        assert!(state.velocity.x.abs() < 1e-6);
    }

    #[test]
    fn test_inclined_orbit_leaves_ecliptic() {
        let elements = OrbitalElements {
            inclination: 30.0,
            argument_periapsis: 90.0,
            ..earthlike()
        };
        let state = elements.to_state_vector(&OrbitConfig::default()).unwrap();
        // sin(ω)·sin(i) = 0.5 of the periapsis distance lies out of plane
        let r = state.position.magnitude();
        assert!((state.position.z / r - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_vis_viva_holds() {
        let orbit = OrbitConfig::default();
        let elements = OrbitalElements {
            semi_major_axis: 1.8,
            eccentricity: 0.4,
            inclination: 12.0,
            longitude_ascending_node: 80.0,
            argument_periapsis: 210.0,
            mean_anomaly: 133.0,
            epoch: 2460000.5,
        };
        let state = elements.to_state_vector(&orbit).unwrap();
        let a = elements.semi_major_axis * orbit.au_m;
        let r = state.position.magnitude();
        let v = state.velocity.magnitude();
        let expected = orbit.mu_sun * (2.0 / r - 1.0 / a);
        assert!(((v * v) - expected).abs() / expected < 1e-9);
    }

    #[test]
    fn test_propagate_zero_dt_is_identity() {
        let orbit = OrbitConfig::default();
        let state = earthlike().to_state_vector(&orbit).unwrap();
        let same = propagate(&state, 0.0, orbit.mu_sun);
        assert_eq!(same, state);
    }

    #[test]
    fn test_propagate_pulls_toward_sun() {
        let state = StateVector::new(Vector3::new(1.496e11, 0.0, 0.0), Vector3::zero());
        let next = propagate(&state, 3600.0, 1.327e20);
        assert!(next.velocity.x < 0.0);
        assert!(next.position.x < state.position.x);
        // Semi-implicit: position moves with the updated velocity
        assert!((next.position.x - (state.position.x + next.velocity.x * 3600.0)).abs() < 1e-3);
    }

    #[test]
    fn test_vector3_operations() {
        let v1 = Vector3::new(1.0, 2.0, 3.0);
        let v2 = Vector3::new(4.0, 5.0, 6.0);

        assert_eq!(v1 + v2, Vector3::new(5.0, 7.0, 9.0));
        assert_eq!(v2 - v1, Vector3::new(3.0, 3.0, 3.0));
        assert_eq!(v1 * 2.0, Vector3::new(2.0, 4.0, 6.0));
        assert_eq!(-v1 + v1, Vector3::zero());

        let dot = v1.dot(&v2);
        assert!((dot - 32.0).abs() < 1e-10);

        assert_eq!(Vector3::zero().normalize(), Vector3::zero());
        assert!((Vector3::from([3.0, 0.0, 4.0]).normalize().z - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_julian_date_conversion() {
        let j2000 = julian_date_to_utc(2451545.0).unwrap();
        assert_eq!(j2000.year(), 2000);
        assert_eq!(j2000.month(), 1);
        assert_eq!(j2000.day(), 1);
        assert_eq!(j2000.to_rfc3339(), "2000-01-01T12:00:00+00:00");
        assert!(julian_date_to_utc(f64::NAN).is_none());
    }
}
