// Scenario - request-side inputs for the impact engine
// Validated once at the boundary; downstream code assumes physical values

use serde::{Deserialize, Serialize};

use crate::deflection_physics::DeflectionStrategy;
use crate::error::{require_positive, ImpactError, ImpactResult};
use crate::impact_physics::{AsteroidProperties, DensityClass};
use crate::orbital_mechanics::OrbitalElements;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    #[default]
    ContinentalCrust,
    OceanicCrust,
    Ocean,
}

impl TargetType {
    /// Whether an impact on this target can raise a tsunami.
    pub fn is_water(self) -> bool {
        matches!(self, Self::Ocean | Self::OceanicCrust)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactScenario {
    pub asteroid: AsteroidProperties,
    pub orbit: OrbitalElements,
    /// Degrees from horizontal, (0, 90]
    pub impact_angle: f64,
    /// m/s
    pub impact_velocity: f64,
    #[serde(default)]
    pub target_type: TargetType,
    pub impact_latitude: f64,
    pub impact_longitude: f64,
    /// Julian Date
    #[serde(default)]
    pub impact_time: Option<f64>,
}

impl ImpactScenario {
    pub fn validate(&self) -> ImpactResult<()> {
        self.orbit.validate()?;
        self.asteroid.validate()?;
        require_positive("impact_velocity", self.impact_velocity)?;
        if !(self.impact_angle > 0.0 && self.impact_angle <= 90.0) {
            return Err(ImpactError::invalid_scenario(
                "impact_angle",
                self.impact_angle,
                "must lie in (0, 90] degrees",
            ));
        }
        if !(-90.0..=90.0).contains(&self.impact_latitude) {
            return Err(ImpactError::invalid_scenario(
                "impact_latitude",
                self.impact_latitude,
                "must lie in [-90, 90]",
            ));
        }
        if !(-180.0..=180.0).contains(&self.impact_longitude) {
            return Err(ImpactError::invalid_scenario(
                "impact_longitude",
                self.impact_longitude,
                "must lie in [-180, 180]",
            ));
        }
        if let Some(time) = self.impact_time {
            if !time.is_finite() {
                return Err(ImpactError::invalid_scenario("impact_time", time, "must be finite"));
            }
        }
        Ok(())
    }
}

/// Which effect categories to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectToggles {
    pub tsunami: bool,
    pub seismic: bool,
    pub population: bool,
}

impl Default for EffectToggles {
    fn default() -> Self {
        Self {
            tsunami: true,
            seismic: true,
            population: true,
        }
    }
}

impl EffectToggles {
    pub fn none() -> Self {
        Self {
            tsunami: false,
            seismic: false,
            population: false,
        }
    }
}

/// Upper bound on ensemble members per request
pub const MAX_ENSEMBLE_SAMPLES: usize = 100_000;

/// Monte Carlo sampling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnsembleSettings {
    pub samples: usize,
    pub seed: u64,
    /// Relative 1σ spread on diameter
    pub diameter_sigma: f64,
    /// Relative 1σ spread on velocity
    pub velocity_sigma: f64,
    /// Absolute 1σ spread on angle (degrees)
    pub angle_sigma_deg: f64,
}

impl Default for EnsembleSettings {
    fn default() -> Self {
        Self {
            samples: 1000,
            seed: 42,
            diameter_sigma: 0.1,
            velocity_sigma: 0.05,
            angle_sigma_deg: 5.0,
        }
    }
}

impl EnsembleSettings {
    pub fn validate(&self) -> ImpactResult<()> {
        if self.samples == 0 || self.samples > MAX_ENSEMBLE_SAMPLES {
            return Err(ImpactError::invalid_scenario(
                "ensemble_samples",
                self.samples as f64,
                "must be between 1 and 100000",
            ));
        }
        for (field, sigma) in [
            ("diameter_sigma", self.diameter_sigma),
            ("velocity_sigma", self.velocity_sigma),
            ("angle_sigma_deg", self.angle_sigma_deg),
        ] {
            if !(sigma.is_finite() && sigma >= 0.0) {
                return Err(ImpactError::invalid_scenario(field, sigma, "must be non-negative"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub scenario: ImpactScenario,
    #[serde(default)]
    pub deflection: Option<DeflectionStrategy>,
    #[serde(default)]
    pub effects: EffectToggles,
    /// Spatial resolution hint (km), echoed in metadata
    #[serde(default = "default_resolution_km")]
    pub resolution_km: f64,
    #[serde(default)]
    pub ensemble: Option<EnsembleSettings>,
}

fn default_resolution_km() -> f64 {
    10.0
}

impl SimulationRequest {
    pub fn new(scenario: ImpactScenario) -> Self {
        Self {
            scenario,
            deflection: None,
            effects: EffectToggles::default(),
            resolution_km: default_resolution_km(),
            ensemble: None,
        }
    }

    pub fn validate(&self) -> ImpactResult<()> {
        self.scenario.validate()?;
        require_positive("resolution_km", self.resolution_km)?;
        if let Some(deflection) = &self.deflection {
            deflection.validate()?;
        }
        if let Some(ensemble) = &self.ensemble {
            ensemble.validate()?;
        }
        Ok(())
    }
}

// =============================================================================
// PRESETS
// =============================================================================

/// Canned asteroid/entry combination without orbit or location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetScenario {
    pub name: String,
    pub description: String,
    pub asteroid: AsteroidProperties,
    pub impact_velocity: f64,
    pub impact_angle: f64,
    pub target_type: TargetType,
}

impl PresetScenario {
    fn new(
        name: &str,
        description: &str,
        asteroid: AsteroidProperties,
        impact_velocity: f64,
        impact_angle: f64,
        target_type: TargetType,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            asteroid,
            impact_velocity,
            impact_angle,
            target_type,
        }
    }

    /// Place the preset on an orbit and an impact site.
    pub fn into_scenario(self, orbit: OrbitalElements, latitude: f64, longitude: f64) -> ImpactScenario {
        ImpactScenario {
            asteroid: self.asteroid,
            orbit,
            impact_angle: self.impact_angle,
            impact_velocity: self.impact_velocity,
            target_type: self.target_type,
            impact_latitude: latitude,
            impact_longitude: longitude,
            impact_time: None,
        }
    }
}

pub fn preset_scenarios() -> Vec<PresetScenario> {
    vec![
        PresetScenario::new(
            "Small Asteroid",
            "Small asteroid impact (100m diameter)",
            AsteroidProperties::new(100.0, DensityClass::Stony),
            15_000.0,
            45.0,
            TargetType::ContinentalCrust,
        ),
        PresetScenario::new(
            "Medium Asteroid",
            "Medium asteroid impact (500m diameter)",
            AsteroidProperties::new(500.0, DensityClass::Stony),
            20_000.0,
            30.0,
            TargetType::Ocean,
        ),
        PresetScenario::new(
            "Large Asteroid",
            "Large asteroid impact (1km diameter)",
            AsteroidProperties::new(1000.0, DensityClass::Iron),
            25_000.0,
            60.0,
            TargetType::ContinentalCrust,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn orbit() -> OrbitalElements {
        OrbitalElements {
            semi_major_axis: 1.2,
            eccentricity: 0.2,
            inclination: 5.0,
            longitude_ascending_node: 40.0,
            argument_periapsis: 80.0,
            mean_anomaly: 10.0,
            epoch: 2460000.5,
        }
    }

    fn scenario() -> ImpactScenario {
        ImpactScenario {
            asteroid: AsteroidProperties::new(160.0, DensityClass::Stony),
            orbit: orbit(),
            impact_angle: 45.0,
            impact_velocity: 15_000.0,
            target_type: TargetType::ContinentalCrust,
            impact_latitude: 40.0,
            impact_longitude: -74.0,
            impact_time: None,
        }
    }

    #[test]
    fn test_target_water() {
        assert!(TargetType::Ocean.is_water());
        assert!(TargetType::OceanicCrust.is_water());
        assert!(!TargetType::ContinentalCrust.is_water());
    }

    #[test]
    fn test_valid_scenario() {
        assert!(scenario().validate().is_ok());
        let mut vertical = scenario();
        vertical.impact_angle = 90.0;
        assert!(vertical.validate().is_ok());
    }

    #[test]
    fn test_scenario_rejections() {
        let mut s = scenario();
        s.impact_angle = 0.0;
        assert_eq!(s.validate().unwrap_err().field(), Some("impact_angle"));

        let mut s = scenario();
        s.impact_velocity = -1.0;
        assert_eq!(s.validate().unwrap_err().field(), Some("impact_velocity"));

        let mut s = scenario();
        s.impact_latitude = 91.0;
        assert_eq!(s.validate().unwrap_err().field(), Some("impact_latitude"));

        let mut s = scenario();
        s.orbit.semi_major_axis = 0.0;
        assert_eq!(s.validate().unwrap_err().kind(), ErrorKind::InvalidOrbit);
    }

    #[test]
    fn test_request_defaults_from_json() {
        let json = serde_json::json!({ "scenario": scenario() });
        let request: SimulationRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.resolution_km, 10.0);
        assert_eq!(request.effects, EffectToggles::default());
        assert!(request.deflection.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_request_rejects_bad_resolution() {
        let mut request = SimulationRequest::new(scenario());
        request.resolution_km = 0.0;
        assert_eq!(request.validate().unwrap_err().field(), Some("resolution_km"));
    }

    #[test]
    fn test_ensemble_sample_limits() {
        let mut request = SimulationRequest::new(scenario());
        request.ensemble = Some(EnsembleSettings {
            samples: usize::MAX,
            ..EnsembleSettings::default()
        });
        assert_eq!(request.validate().unwrap_err().field(), Some("ensemble_samples"));

        request.ensemble = Some(EnsembleSettings {
            samples: MAX_ENSEMBLE_SAMPLES,
            ..EnsembleSettings::default()
        });
        assert!(request.validate().is_ok());

        request.ensemble = Some(EnsembleSettings {
            samples: 0,
            ..EnsembleSettings::default()
        });
        assert_eq!(request.validate().unwrap_err().field(), Some("ensemble_samples"));
    }

    #[test]
    fn test_presets() {
        let presets = preset_scenarios();
        assert_eq!(presets.len(), 3);
        assert_eq!(presets[1].target_type, TargetType::Ocean);
        assert_eq!(presets[2].asteroid.density(), 7800.0);

        let placed = presets[0].clone().into_scenario(orbit(), 10.0, 20.0);
        assert!(placed.validate().is_ok());
        assert_eq!(placed.asteroid.diameter, 100.0);
    }
}
