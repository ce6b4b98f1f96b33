// Engine Configuration - Physical constants and tuning parameters
// Every formula reads its constants from here; defaults reproduce the reference model

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Prefix for environment overrides (`IMPACT_SIM_SEISMIC_EFFICIENCY`, ...)
pub const ENV_PREFIX: &str = "IMPACT_SIM_";

// =============================================================================
// CONFIG SECTIONS
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub orbit: OrbitConfig,
    pub impact: ImpactConfig,
    pub seismic: SeismicConfig,
    pub zones: ZoneConfig,
    pub tsunami: TsunamiConfig,
    pub deflection: DeflectionConfig,
    pub exposure: ExposureConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    /// Sun's gravitational parameter μ (m³/s²)
    pub mu_sun: f64,
    /// Astronomical Unit in meters
    pub au_m: f64,
    /// Stop Newton-Raphson once |E - e·sin(E) - M| drops below this
    pub kepler_tolerance: f64,
    pub kepler_max_iterations: u32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            mu_sun: 1.327e20,
            au_m: 1.496e11,
            kepler_tolerance: 1e-10,
            kepler_max_iterations: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactConfig {
    /// Joules per megaton of TNT
    pub tnt_megaton_joules: f64,
    /// π-scaling coefficient C in D = C·(E/(ρ·g))^(1/4)·sin(θ)^(1/3)
    pub crater_scaling: f64,
    pub crater_depth_ratio: f64,
    pub rim_height_ratio: f64,
    /// Target rock density (kg/m³)
    pub target_density: f64,
    /// Surface gravity (m/s²)
    pub gravity: f64,
    /// Blast radius (km) = blast_scale_km · Mt^blast_exponent
    pub blast_scale_km: f64,
    pub blast_exponent: f64,
    /// Overpressure range (km) = C · Mt^n / psi^m
    pub overpressure_coefficient: f64,
    pub overpressure_exponent: f64,
    /// Fraction of impact energy radiated as heat
    pub thermal_efficiency: f64,
}

impl Default for ImpactConfig {
    fn default() -> Self {
        Self {
            tnt_megaton_joules: 4.184e15,
            crater_scaling: 1.25,
            crater_depth_ratio: 0.25,
            rim_height_ratio: 0.1,
            target_density: 2500.0,
            gravity: 9.81,
            blast_scale_km: 10.0,
            blast_exponent: 0.33,
            overpressure_coefficient: 0.28,
            overpressure_exponent: 0.33,
            thermal_efficiency: 0.1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeismicConfig {
    /// Fraction of impact energy converted to seismic moment
    pub efficiency: f64,
    /// Number of sampled distances (the first, 1 km sample emits no ring)
    pub mmi_samples: usize,
    pub max_distance_km: f64,
    /// Peak ground acceleration (m/s²) per unit magnitude
    pub pga_per_magnitude: f64,
}

impl Default for SeismicConfig {
    fn default() -> Self {
        Self {
            efficiency: 0.01,
            mmi_samples: 20,
            max_distance_km: 1000.0,
            pga_per_magnitude: 0.1,
        }
    }
}

/// Ring-polygon rendering shared by all hazard zones.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    pub ring_vertices: usize,
    pub km_per_degree: f64,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            ring_vertices: 32,
            km_per_degree: 111.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TsunamiConfig {
    /// Fraction of impact energy converted to wave energy
    pub efficiency: f64,
    /// Radius of the circular source footprint (m)
    pub source_radius_m: f64,
    pub water_density: f64,
    pub initial_height_coefficient: f64,
    /// Water depth assumed at an ocean impact site (m)
    pub water_depth_m: f64,
    /// Look the depth up by basin instead of using `water_depth_m`
    pub regional_depth: bool,
    /// Distance from an ocean impact site to the nearest shore (m)
    pub distance_to_shore_m: f64,
    pub shore_slope: f64,
    pub max_distance_km: f64,
    /// Inland reach (km) per metre of wave height
    pub reach_km_per_m: f64,
    pub coastline_km_per_band: f64,
}

impl Default for TsunamiConfig {
    fn default() -> Self {
        Self {
            efficiency: 0.1,
            source_radius_m: 1000.0,
            water_density: 1000.0,
            initial_height_coefficient: 0.1,
            water_depth_m: 4000.0,
            regional_depth: false,
            distance_to_shore_m: 100_000.0,
            shore_slope: 0.01,
            max_distance_km: 500.0,
            reach_km_per_m: 100.0,
            coastline_km_per_band: 50.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeflectionConfig {
    /// Momentum transfer efficiency η of a kinetic impactor
    pub momentum_efficiency: f64,
    /// Impact point shift (degrees) per m/s of Δv component
    pub impact_shift_deg_per_m_s: f64,
    /// Δv (m/s) that counts as a fully effective strategy
    pub reference_delta_v_m_s: f64,
}

impl Default for DeflectionConfig {
    fn default() -> Self {
        Self {
            momentum_efficiency: 0.1,
            impact_shift_deg_per_m_s: 0.01,
            reference_delta_v_m_s: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExposureConfig {
    pub earth_radius_km: f64,
    pub damage_per_person_usd: f64,
    pub energy_damage_reference_j: f64,
    pub energy_damage_cap: f64,
}

impl Default for ExposureConfig {
    fn default() -> Self {
        Self {
            earth_radius_km: 6371.0,
            damage_per_person_usd: 100_000.0,
            energy_damage_reference_j: 1e18,
            energy_damage_cap: 10.0,
        }
    }
}

// =============================================================================
// LOADING
// =============================================================================

impl EngineConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML config file; missing keys fall back to defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Defaults plus `IMPACT_SIM_*` overrides from the process env and `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from any key/value source (env, test maps...).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let targets: [(&str, &mut f64); 7] = [
            ("SEISMIC_EFFICIENCY", &mut self.seismic.efficiency),
            ("TSUNAMI_EFFICIENCY", &mut self.tsunami.efficiency),
            ("DEFLECTION_EFFICIENCY", &mut self.deflection.momentum_efficiency),
            ("CRATER_SCALING", &mut self.impact.crater_scaling),
            ("TARGET_DENSITY", &mut self.impact.target_density),
            ("GRAVITY", &mut self.impact.gravity),
            ("EARTH_RADIUS_KM", &mut self.exposure.earth_radius_km),
        ];

        for (suffix, slot) in targets {
            let key = format!("{ENV_PREFIX}{suffix}");
            if let Some(raw) = lookup(&key) {
                *slot = raw.trim().parse().map_err(|_| ConfigError::Env {
                    key: key.clone(),
                    value: raw.clone(),
                })?;
                tracing::debug!(key = %key, value = *slot, "config override applied");
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positives = [
            ("orbit.mu_sun", self.orbit.mu_sun),
            ("orbit.au_m", self.orbit.au_m),
            ("orbit.kepler_tolerance", self.orbit.kepler_tolerance),
            ("impact.tnt_megaton_joules", self.impact.tnt_megaton_joules),
            ("impact.crater_scaling", self.impact.crater_scaling),
            ("impact.target_density", self.impact.target_density),
            ("impact.gravity", self.impact.gravity),
            ("seismic.efficiency", self.seismic.efficiency),
            ("seismic.max_distance_km", self.seismic.max_distance_km),
            ("zones.km_per_degree", self.zones.km_per_degree),
            ("tsunami.efficiency", self.tsunami.efficiency),
            ("tsunami.source_radius_m", self.tsunami.source_radius_m),
            ("tsunami.water_density", self.tsunami.water_density),
            ("tsunami.water_depth_m", self.tsunami.water_depth_m),
            ("tsunami.shore_slope", self.tsunami.shore_slope),
            ("tsunami.max_distance_km", self.tsunami.max_distance_km),
            ("deflection.momentum_efficiency", self.deflection.momentum_efficiency),
            ("deflection.reference_delta_v_m_s", self.deflection.reference_delta_v_m_s),
            ("exposure.earth_radius_km", self.exposure.earth_radius_km),
        ];
        for (field, value) in positives {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid {
                    field: field.to_string(),
                    value,
                });
            }
        }

        let counts = [
            ("orbit.kepler_max_iterations", self.orbit.kepler_max_iterations as usize, 1),
            ("seismic.mmi_samples", self.seismic.mmi_samples, 2),
            ("zones.ring_vertices", self.zones.ring_vertices, 3),
        ];
        for (field, value, min) in counts {
            if value < min {
                return Err(ConfigError::Invalid {
                    field: field.to_string(),
                    value: value as f64,
                });
            }
        }
        Ok(())
    }
}
