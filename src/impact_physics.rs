// Impact Physics - mass/energy scaling, cratering, seismic intensity zones
// Empirical scaling laws; constants come from EngineConfig

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::config::{EngineConfig, ImpactConfig, SeismicConfig};
use crate::error::{require_positive, ImpactError, ImpactResult};
use crate::geometry::{linspace, ring_polygon};
use crate::hazard_zone::{HazardKind, HazardZone};

/// Smallest angle (degrees) fed to the sin(θ)^(1/3) crater term
pub const MIN_IMPACT_ANGLE_DEG: f64 = 1e-6;

pub const MMI_MIN: f64 = 1.0;
pub const MMI_MAX: f64 = 12.0;

// =============================================================================
// ASTEROID PROPERTIES
// =============================================================================

/// Bulk density class of an asteroid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DensityClass {
    #[default]
    Stony,
    Iron,
    Carbonaceous,
}

impl DensityClass {
    /// Bulk density (kg/m³)
    pub fn density(self) -> f64 {
        match self {
            Self::Stony => 3000.0,
            Self::Iron => 7800.0,
            Self::Carbonaceous => 2000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsteroidProperties {
    /// Diameter (m)
    pub diameter: f64,
    #[serde(default)]
    pub density_class: DensityClass,
    /// Explicit density (kg/m³), overrides the class default
    #[serde(default)]
    pub density_override: Option<f64>,
}

impl AsteroidProperties {
    pub fn new(diameter: f64, density_class: DensityClass) -> Self {
        Self {
            diameter,
            density_class,
            density_override: None,
        }
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.density_override = Some(density);
        self
    }

    pub fn density(&self) -> f64 {
        self.density_override
            .unwrap_or_else(|| self.density_class.density())
    }

    pub fn validate(&self) -> ImpactResult<()> {
        require_positive("diameter", self.diameter)?;
        require_positive("density", self.density())?;
        Ok(())
    }

    pub fn mass(&self) -> f64 {
        mass(self.diameter, self.density())
    }
}

// =============================================================================
// ENERGY
// =============================================================================

/// Mass of a homogeneous sphere (kg).
pub fn mass(diameter: f64, density: f64) -> f64 {
    let radius = diameter / 2.0;
    (4.0 / 3.0) * PI * radius.powi(3) * density
}

/// Kinetic energy (J).
pub fn kinetic_energy(mass: f64, velocity: f64) -> f64 {
    0.5 * mass * velocity * velocity
}

/// Energy in megatons of TNT.
pub fn tnt_equivalent_megatons(energy: f64, impact: &ImpactConfig) -> f64 {
    energy / impact.tnt_megaton_joules
}

fn require_energy(energy: f64) -> ImpactResult<f64> {
    if energy.is_finite() && energy > 0.0 {
        Ok(energy)
    } else {
        Err(ImpactError::invalid_scenario("energy", energy, "must be positive"))
    }
}

// =============================================================================
// CRATER
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Crater {
    pub diameter_m: f64,
    pub depth_m: f64,
    pub rim_height_m: f64,
}

/// Final crater by π-scaling: D = C·(E/(ρ·g))^(1/4)·sin(θ)^(1/3)
///
/// The angle is clamped into (0°, 90°] before the sine term.
pub fn crater_diameter(
    energy: f64,
    impact_angle_deg: f64,
    target_density: f64,
    gravity: f64,
    impact: &ImpactConfig,
) -> ImpactResult<Crater> {
    let energy = require_energy(energy)?;
    require_positive("target_density", target_density)?;
    require_positive("gravity", gravity)?;
    if impact_angle_deg.is_nan() {
        return Err(ImpactError::invalid_scenario(
            "impact_angle",
            impact_angle_deg,
            "must be a number",
        ));
    }

    let angle = impact_angle_deg.clamp(MIN_IMPACT_ANGLE_DEG, 90.0).to_radians();
    let energy_density = energy / (target_density * gravity);
    let diameter_m = impact.crater_scaling * energy_density.powf(0.25) * angle.sin().powf(1.0 / 3.0);

    Ok(Crater {
        diameter_m,
        depth_m: diameter_m * impact.crater_depth_ratio,
        rim_height_m: diameter_m * impact.rim_height_ratio,
    })
}

// =============================================================================
// BLAST
// =============================================================================

/// Radius (km) of the blast zone used for exposure banding.
pub fn blast_radius_km(energy: f64, impact: &ImpactConfig) -> f64 {
    tnt_equivalent_megatons(energy, impact).max(0.0).powf(impact.blast_exponent) * impact.blast_scale_km
}

/// Range (km) at which the blast wave still carries `pressure_psi`.
pub fn overpressure_range_km(energy_mt: f64, pressure_psi: f64, impact: &ImpactConfig) -> f64 {
    impact.overpressure_coefficient * energy_mt.max(0.0).powf(impact.overpressure_exponent)
        / pressure_psi.powf(impact.overpressure_exponent)
}

/// Thermal radiation fluence (J/m²) at `distance_m` from the impact.
pub fn thermal_fluence(energy: f64, distance_m: f64, impact: &ImpactConfig) -> f64 {
    if distance_m <= 0.0 {
        return 0.0;
    }
    impact.thermal_efficiency * energy / (4.0 * PI * distance_m * distance_m)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlastEffects {
    pub energy_megatons: f64,
    pub overpressure_1psi_radius_km: f64,
    pub overpressure_5psi_radius_km: f64,
    pub overpressure_20psi_radius_km: f64,
    pub thermal_10km_j_m2: f64,
    pub thermal_50km_j_m2: f64,
    pub thermal_100km_j_m2: f64,
}

pub fn blast_effects(energy: f64, impact: &ImpactConfig) -> BlastEffects {
    let energy_megatons = tnt_equivalent_megatons(energy, impact);
    BlastEffects {
        energy_megatons,
        overpressure_1psi_radius_km: overpressure_range_km(energy_megatons, 1.0, impact),
        overpressure_5psi_radius_km: overpressure_range_km(energy_megatons, 5.0, impact),
        overpressure_20psi_radius_km: overpressure_range_km(energy_megatons, 20.0, impact),
        thermal_10km_j_m2: thermal_fluence(energy, 10_000.0, impact),
        thermal_50km_j_m2: thermal_fluence(energy, 50_000.0, impact),
        thermal_100km_j_m2: thermal_fluence(energy, 100_000.0, impact),
    }
}

// =============================================================================
// SEISMIC
// =============================================================================

/// Moment magnitude: M0 = η·E, Mw = (2/3)(log10(M0) − 16.0) + 6.0
pub fn seismic_magnitude(energy: f64, seismic: &SeismicConfig) -> ImpactResult<f64> {
    let energy = require_energy(energy)?;
    let seismic_moment = energy * seismic.efficiency;
    Ok((2.0 / 3.0) * (seismic_moment.log10() - 16.0) + 6.0)
}

/// Peak ground acceleration (m/s²), linear in magnitude.
pub fn peak_ground_acceleration(magnitude: f64, seismic: &SeismicConfig) -> f64 {
    magnitude * seismic.pga_per_magnitude
}

/// Attenuated intensity at `distance_km`, clamped to [1, 12].
pub fn mmi_at_distance(magnitude: f64, distance_km: f64) -> f64 {
    let mmi = magnitude - 1.5 * distance_km.log10() - 0.01 * distance_km;
    mmi.clamp(MMI_MIN, MMI_MAX)
}

/// Roman-numeral label for a truncated MMI level.
pub fn mmi_label(level: u8) -> &'static str {
    const LABELS: [&str; 12] = [
        "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII",
    ];
    let index = level.clamp(1, 12) as usize - 1;
    LABELS[index]
}

pub fn mmi_color(level: u8) -> &'static str {
    match level {
        1 => "#FFFFFF",
        2 => "#FFFF00",
        3 => "#FFA500",
        4 => "#FF4500",
        5 => "#FF0000",
        6 => "#8B0000",
        7 => "#800080",
        8 => "#000080",
        // IX and above
        _ => "#000000",
    }
}

/// Concentric MMI rings around the epicenter, innermost first.
///
/// Distances are `mmi_samples` evenly spaced values over
/// `[1, max_distance_km]`; the first sample has no width and emits no ring.
pub fn mmi_zones(
    magnitude: f64,
    lat: f64,
    lon: f64,
    max_distance_km: f64,
    config: &EngineConfig,
) -> ImpactResult<Vec<HazardZone>> {
    if !(max_distance_km.is_finite() && max_distance_km > 1.0) {
        return Err(ImpactError::invalid_scenario(
            "max_distance_km",
            max_distance_km,
            "must exceed 1 km",
        ));
    }

    let zones = linspace(1.0, max_distance_km, config.seismic.mmi_samples)
        .into_iter()
        .skip(1)
        .map(|distance| {
            let mmi = mmi_at_distance(magnitude, distance);
            let level = mmi as u8;
            HazardZone {
                kind: HazardKind::Seismic,
                intensity: mmi,
                radius_km: distance,
                label: mmi_label(level).to_string(),
                color: mmi_color(level).to_string(),
                ring: ring_polygon(lat, lon, distance, &config.zones),
            }
        })
        .collect();
    Ok(zones)
}

// =============================================================================
// DAMAGE RINGS
// =============================================================================

/// Structural damage ring around the crater.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageZone {
    pub name: String,
    pub radius_km: f64,
    /// Share of structures destroyed (0-100)
    pub damage_percent: f64,
    pub color: String,
}

/// (name, crater radii, damage %, colour), innermost first
const DAMAGE_RINGS: [(&str, f64, f64, &str); 5] = [
    ("Total Destruction", 1.0, 100.0, "#8B0000"),
    ("Severe Damage", 3.0, 75.0, "#FF0000"),
    ("Moderate Damage", 6.0, 50.0, "#FF8C00"),
    ("Light Damage", 10.0, 25.0, "#FFD700"),
    ("Minimal Damage", 15.0, 10.0, "#FFFFE0"),
];

/// Five damage rings at 1, 3, 6, 10 and 15 crater radii.
pub fn damage_zones(crater_radius_km: f64) -> Vec<DamageZone> {
    DAMAGE_RINGS
        .iter()
        .map(|&(name, multiple, damage_percent, color)| DamageZone {
            name: name.to_string(),
            radius_km: crater_radius_km * multiple,
            damage_percent,
            color: color.to_string(),
        })
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
