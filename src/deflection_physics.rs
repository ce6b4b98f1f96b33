// Deflection Physics - kinetic impactor momentum transfer and trajectory shift
// First-order model: Δv is added to velocity and position advances linearly

use serde::{Deserialize, Serialize};

use crate::config::DeflectionConfig;
use crate::error::{require_positive, ImpactError, ImpactResult};
use crate::orbital_mechanics::{StateVector, Vector3, SECONDS_PER_DAY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeflectionKind {
    #[default]
    KineticImpactor,
    GravityTractor,
    NuclearDetonation,
}

/// Spacecraft parameters for a kinetic-impactor mission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KineticImpactorParams {
    /// Impactor mass (kg)
    pub mass: f64,
    /// Relative impact speed (m/s)
    pub velocity: f64,
    /// Angle between impactor track and asteroid velocity (deg, 0-180)
    pub angle_deg: f64,
}

impl KineticImpactorParams {
    pub fn validate(&self) -> ImpactResult<()> {
        require_positive("impactor_mass", self.mass)?;
        require_positive("impactor_velocity", self.velocity)?;
        if !(0.0..=180.0).contains(&self.angle_deg) {
            return Err(ImpactError::invalid_scenario(
                "impactor_angle",
                self.angle_deg,
                "must be within [0, 180] degrees",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeflectionStrategy {
    pub kind: DeflectionKind,
    /// Velocity change magnitude (m/s)
    pub delta_v: f64,
    /// Direction of the velocity change; normalized before use
    pub direction: Vector3,
    /// Application time before impact (days)
    pub lead_time_days: f64,
    #[serde(default)]
    pub impactor: Option<KineticImpactorParams>,
}

impl DeflectionStrategy {
    pub fn new(kind: DeflectionKind, delta_v: f64, direction: Vector3, lead_time_days: f64) -> Self {
        Self {
            kind,
            delta_v,
            direction,
            lead_time_days,
            impactor: None,
        }
    }

    pub fn with_impactor(mut self, impactor: KineticImpactorParams) -> Self {
        self.impactor = Some(impactor);
        self
    }

    pub fn validate(&self) -> ImpactResult<()> {
        if !(self.delta_v.is_finite() && self.delta_v >= 0.0) {
            return Err(ImpactError::invalid_scenario(
                "delta_v",
                self.delta_v,
                "must be non-negative",
            ));
        }
        let norm = self.direction.magnitude();
        if !(norm.is_finite() && norm > 0.0) {
            return Err(ImpactError::invalid_scenario(
                "delta_v_direction",
                norm,
                "must be a non-zero vector",
            ));
        }
        require_positive("lead_time_days", self.lead_time_days)?;
        if let Some(impactor) = &self.impactor {
            impactor.validate()?;
        }
        Ok(())
    }

    pub fn delta_v_vector(&self) -> Vector3 {
        self.direction.normalize() * self.delta_v
    }

    pub fn lead_time_seconds(&self) -> f64 {
        self.lead_time_days * SECONDS_PER_DAY
    }
}

/// Δv = m_i · v_i · cos(θ) · η / m_a (m/s)
pub fn kinetic_impactor_delta_v(
    impactor_mass: f64,
    impactor_velocity: f64,
    asteroid_mass: f64,
    angle_deg: f64,
    deflection: &DeflectionConfig,
) -> ImpactResult<f64> {
    require_positive("asteroid_mass", asteroid_mass)?;
    Ok(impactor_mass * impactor_velocity * angle_deg.to_radians().cos() * deflection.momentum_efficiency
        / asteroid_mass)
}

/// Add Δv to the velocity, then advance the position by `v' · t`.
pub fn apply_deflection(state: &StateVector, delta_v: &Vector3, lead_time_s: f64) -> StateVector {
    let velocity = state.velocity + *delta_v;
    let position = state.position + velocity * lead_time_s;
    StateVector::new(position, velocity)
}

/// Clearance above the Earth's surface (m); non-positive means an impact.
pub fn miss_distance(state: &StateVector, earth_position: &Vector3, earth_radius_m: f64) -> f64 {
    (state.position - *earth_position).magnitude() - earth_radius_m
}

/// Angle between two velocity vectors (deg). Zero if either is zero.
pub fn deflection_angle_deg(original: &Vector3, deflected: &Vector3) -> f64 {
    let denom = original.magnitude() * deflected.magnitude();
    if denom <= 0.0 {
        return 0.0;
    }
    (original.dot(deflected) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}
