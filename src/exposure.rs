// Exposure Aggregator - affected population and economic loss by distance band
// Cities are supplied by the caller; nothing here performs I/O

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::ExposureConfig;
use crate::geometry::haversine_km;
use crate::hazard_zone::{max_radius_km, HazardKind, HazardZone};

/// A population center as delivered by the geodata collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub population: u64,
    /// USD per person per year
    pub gdp_per_capita: f64,
}

impl CityRecord {
    pub fn new(name: &str, country: &str, latitude: f64, longitude: f64, population: u64, gdp_per_capita: f64) -> Self {
        Self {
            name: name.to_string(),
            country: country.to_string(),
            latitude,
            longitude,
            population,
            gdp_per_capita,
        }
    }

    /// Annual economic output (USD).
    pub fn gdp(&self) -> f64 {
        self.population as f64 * self.gdp_per_capita
    }
}

/// Distance band, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExposureLevel {
    Minimal,
    Low,
    Medium,
    High,
    Extreme,
}

impl ExposureLevel {
    /// Fraction of a city's GDP lost at this level.
    pub fn loss_multiplier(self) -> f64 {
        match self {
            Self::Extreme => 0.95,
            Self::High => 0.50,
            Self::Medium => 0.20,
            Self::Low => 0.05,
            Self::Minimal => 0.01,
        }
    }
}

/// Radii (km) that define the exposure bands.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ExposureExtents {
    pub crater_diameter_km: f64,
    pub blast_radius_km: f64,
    pub tsunami_radius_km: f64,
    pub seismic_radius_km: f64,
}

impl ExposureExtents {
    /// Take tsunami and seismic extents from the outermost zone of each kind.
    pub fn from_zones(crater_diameter_km: f64, blast_radius_km: f64, zones: &[HazardZone]) -> Self {
        Self {
            crater_diameter_km,
            blast_radius_km,
            tsunami_radius_km: max_radius_km(zones, HazardKind::Tsunami).unwrap_or(0.0),
            seismic_radius_km: max_radius_km(zones, HazardKind::Seismic).unwrap_or(0.0),
        }
    }

    /// Cities beyond this distance are not exposed at all.
    pub fn outer_radius_km(&self) -> f64 {
        self.blast_radius_km
            .max(self.tsunami_radius_km)
            .max(self.crater_diameter_km * 2.0)
            .max(self.seismic_radius_km)
    }

    /// Band for a city at `distance_km`, or `None` outside the outer radius.
    pub fn classify(&self, distance_km: f64) -> Option<ExposureLevel> {
        if !(distance_km <= self.outer_radius_km()) {
            return None;
        }
        let level = if distance_km <= self.crater_diameter_km {
            ExposureLevel::Extreme
        } else if distance_km <= self.blast_radius_km {
            ExposureLevel::High
        } else if distance_km <= self.blast_radius_km * 3.0 {
            ExposureLevel::Medium
        } else if distance_km <= self.blast_radius_km * 10.0 {
            ExposureLevel::Low
        } else {
            ExposureLevel::Minimal
        };
        Some(level)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffectedCity {
    #[serde(flatten)]
    pub city: CityRecord,
    pub distance_km: f64,
    pub exposure_level: ExposureLevel,
    /// USD
    pub economic_loss: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExposureResult {
    pub population_affected: u64,
    pub total_economic_loss: f64,
    pub gdp_impact_percentage: f64,
    pub cities_affected: Vec<AffectedCity>,
}

impl ExposureResult {
    pub fn population_by_level(&self) -> BTreeMap<ExposureLevel, u64> {
        let mut totals = BTreeMap::new();
        for affected in &self.cities_affected {
            let total = totals.entry(affected.exposure_level).or_insert(0u64);
            *total = total.saturating_add(affected.city.population);
        }
        totals
    }
}

/// `numerator / denominator`, or 0 when the denominator is not positive or
/// the quotient is not finite.
pub fn guarded_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator <= 0.0 {
        tracing::debug!(numerator, denominator, "division guard: zero denominator");
        return 0.0;
    }
    let ratio = numerator / denominator;
    if ratio.is_finite() {
        ratio
    } else {
        tracing::debug!(numerator, denominator, "division guard: non-finite ratio");
        0.0
    }
}

/// Band every city by great-circle distance from the impact point and sum
/// population and loss over those inside the outer radius.
///
/// The GDP percentage is taken against all supplied cities.
pub fn exposure_for_zones(
    impact_lat: f64,
    impact_lon: f64,
    extents: &ExposureExtents,
    cities: &[CityRecord],
    exposure: &ExposureConfig,
) -> ExposureResult {
    let mut result = ExposureResult::default();

    for city in cities {
        let distance_km = haversine_km(impact_lat, impact_lon, city.latitude, city.longitude, exposure.earth_radius_km);
        let Some(level) = extents.classify(distance_km) else {
            continue;
        };
        let economic_loss = city.gdp() * level.loss_multiplier();
        result.population_affected = result.population_affected.saturating_add(city.population);
        result.total_economic_loss += economic_loss;
        result.cities_affected.push(AffectedCity {
            city: city.clone(),
            distance_km,
            exposure_level: level,
            economic_loss,
        });
    }

    let considered_gdp: f64 = cities.iter().map(CityRecord::gdp).sum();
    result.gdp_impact_percentage = guarded_ratio(result.total_economic_loss, considered_gdp) * 100.0;
    result
}
