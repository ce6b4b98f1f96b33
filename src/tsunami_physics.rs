// Tsunami Physics - wave height at shore and inundation zones
// Energy-density source model with spreading, dissipation and shoaling

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::config::{EngineConfig, TsunamiConfig};
use crate::error::{require_positive, ImpactError, ImpactResult};
use crate::geometry::ring_polygon;
use crate::hazard_zone::{HazardKind, HazardZone};

const GRAVITY: f64 = 9.81;

// =============================================================================
// WAVE HEIGHT
// =============================================================================

/// Maximum wave height at shore (m).
///
/// The initial height comes from `efficiency · E` spread over a disc of
/// `source_radius_m`. When `distance_to_shore_m > 0` it is attenuated by
/// `1/√(d_km)`, `exp(−d / 100 km)` and amplified by `1/√(slope)`.
pub fn tsunami_height(
    energy: f64,
    water_depth_m: f64,
    distance_to_shore_m: f64,
    shore_slope: f64,
    tsunami: &TsunamiConfig,
) -> ImpactResult<f64> {
    if !(energy.is_finite() && energy > 0.0) {
        return Err(ImpactError::invalid_scenario("energy", energy, "must be positive"));
    }
    require_positive("water_depth", water_depth_m)?;
    if !(distance_to_shore_m.is_finite() && distance_to_shore_m >= 0.0) {
        return Err(ImpactError::invalid_scenario(
            "distance_to_shore",
            distance_to_shore_m,
            "must be non-negative",
        ));
    }

    let source_area = PI * tsunami.source_radius_m * tsunami.source_radius_m;
    let energy_density = energy * tsunami.efficiency / source_area;
    let initial_height =
        tsunami.initial_height_coefficient * (energy_density / (tsunami.water_density * GRAVITY)).sqrt();

    if distance_to_shore_m == 0.0 {
        return Ok(initial_height.max(0.0));
    }

    let slope = require_positive("shore_slope", shore_slope)?;
    let geometric = 1.0 / (distance_to_shore_m / 1000.0).sqrt();
    let dissipation = (-distance_to_shore_m / 100_000.0).exp();
    let shoaling = 1.0 / slope.sqrt();

    Ok((initial_height * geometric * dissipation * shoaling).max(0.0))
}

/// Shallow-water wave speed √(g·h) (m/s).
pub fn wave_speed_m_s(water_depth_m: f64) -> f64 {
    (GRAVITY * water_depth_m.max(0.0)).sqrt()
}

/// Minutes for the wave to cover `distance_m` over open water of `water_depth_m`.
pub fn arrival_time_minutes(distance_m: f64, water_depth_m: f64) -> f64 {
    let speed = wave_speed_m_s(water_depth_m);
    if speed <= 0.0 {
        return 0.0;
    }
    distance_m / speed / 60.0
}

/// Coarse basin depth (m) at an ocean impact site.
///
/// Open Pacific 4000, Atlantic 3500, Indian 3800, Mediterranean 1500,
/// Caribbean 2000, northern shelves 200, anywhere else 1000. Earlier
/// basins win where boxes overlap.
pub fn ocean_depth_m(lat: f64, lon: f64) -> f64 {
    let within = |lat_range: (f64, f64), lon_range: (f64, f64)| {
        (lat_range.0..=lat_range.1).contains(&lat) && (lon_range.0..=lon_range.1).contains(&lon)
    };

    if within((20.0, 60.0), (-180.0, -120.0)) || within((-60.0, 20.0), (-180.0, -80.0)) {
        4000.0
    } else if within((20.0, 60.0), (-80.0, -20.0)) || within((-60.0, 20.0), (-80.0, 20.0)) {
        3500.0
    } else if within((20.0, 60.0), (20.0, 100.0)) || within((-60.0, 20.0), (20.0, 120.0)) {
        3800.0
    } else if within((30.0, 45.0), (-10.0, 40.0)) {
        1500.0
    } else if within((10.0, 30.0), (-90.0, -60.0)) {
        2000.0
    } else if within((40.0, 70.0), (-180.0, -50.0)) || within((40.0, 70.0), (-10.0, 40.0)) {
        200.0
    } else {
        1000.0
    }
}

// =============================================================================
// SEVERITY
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TsunamiSeverity {
    Low,
    Medium,
    High,
    Extreme,
}

impl TsunamiSeverity {
    pub fn from_height(height_m: f64) -> Self {
        if height_m < 2.0 {
            Self::Low
        } else if height_m < 5.0 {
            Self::Medium
        } else if height_m < 10.0 {
            Self::High
        } else {
            Self::Extreme
        }
    }
}

/// Inundation band category, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TsunamiCategory {
    Extreme,
    High,
    Moderate,
    Low,
}

impl TsunamiCategory {
    pub const ALL: [TsunamiCategory; 4] = [Self::Extreme, Self::High, Self::Moderate, Self::Low];

    /// Share of the maximum height carried by this band.
    pub fn height_fraction(self) -> f64 {
        match self {
            Self::Extreme => 0.8,
            Self::High => 0.6,
            Self::Moderate => 0.4,
            Self::Low => 0.2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Extreme => "extreme",
            Self::High => "high",
            Self::Moderate => "moderate",
            Self::Low => "low",
        }
    }

    pub fn color(self) -> &'static str {
        tsunami_color(self.label())
    }
}

/// Palette lookup by category name; unknown names fall back to the low-band blue.
pub fn tsunami_color(category: &str) -> &'static str {
    match category {
        "low" => "#0066CC",
        "moderate" => "#00CC66",
        "high" => "#FFCC00",
        "extreme" => "#FF6600",
        "catastrophic" => "#CC0000",
        _ => "#0066CC",
    }
}

// =============================================================================
// ZONES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TsunamiBand {
    pub category: TsunamiCategory,
    pub height_m: f64,
    /// Inland reach (km), capped at the zone extent
    pub reach_km: f64,
}

/// Height bands at 80/60/40/20% of `max_height`, most severe first.
/// Bands with non-positive height are omitted.
pub fn tsunami_bands(max_height: f64, max_distance_km: f64, tsunami: &TsunamiConfig) -> Vec<TsunamiBand> {
    TsunamiCategory::ALL
        .iter()
        .map(|&category| {
            let height_m = max_height * category.height_fraction();
            TsunamiBand {
                category,
                height_m,
                reach_km: (height_m * tsunami.reach_km_per_m).min(max_distance_km),
            }
        })
        .filter(|band| band.height_m > 0.0)
        .collect()
}

/// Inundation rings around the impact point, innermost first.
///
/// When several bands cap at the same reach only the most severe is kept,
/// so radii are strictly increasing along the sequence.
pub fn tsunami_zones(
    lat: f64,
    lon: f64,
    max_height: f64,
    max_distance_km: f64,
    config: &EngineConfig,
) -> ImpactResult<Vec<HazardZone>> {
    require_positive("max_distance_km", max_distance_km)?;

    let mut zones: Vec<HazardZone> = Vec::new();
    for band in tsunami_bands(max_height, max_distance_km, &config.tsunami).into_iter().rev() {
        let zone = HazardZone {
            kind: HazardKind::Tsunami,
            intensity: band.height_m,
            radius_km: band.reach_km,
            label: band.category.label().to_string(),
            color: band.category.color().to_string(),
            ring: ring_polygon(lat, lon, band.reach_km, &config.zones),
        };
        match zones.last_mut() {
            Some(last) if last.radius_km >= zone.radius_km => *last = zone,
            _ => zones.push(zone),
        }
    }
    Ok(zones)
}

// =============================================================================
// TESTS
// =============================================================================
