// Loss Model - casualty, building and economic loss estimates
// Crater/blast/seismic rings scaled from the crater size, adjusted by coarse regional factors

use serde::{Deserialize, Serialize};

use crate::config::ImpactConfig;

/// Losses are accumulated in units of 1e8 USD and converted on output.
const USD_PER_LOSS_UNIT: f64 = 1.0e8;
/// Flat-earth degree length used by the regional lookups
const KM_PER_DEGREE: f64 = 111.0;

// =============================================================================
// REGIONS
// =============================================================================

/// Inclusive latitude/longitude box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl GeoBox {
    const fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat) && (self.min_lon..=self.max_lon).contains(&lon)
    }
}

fn in_any(regions: &[GeoBox], lat: f64, lon: f64) -> bool {
    regions.iter().any(|r| r.contains(lat, lon))
}

const COASTAL: [GeoBox; 6] = [
    GeoBox::new(30.0, 50.0, -180.0, -60.0),
    GeoBox::new(25.0, 50.0, -130.0, -60.0),
    GeoBox::new(30.0, 60.0, -10.0, 40.0),
    GeoBox::new(20.0, 50.0, 100.0, 180.0),
    GeoBox::new(-40.0, 20.0, -80.0, -30.0),
    GeoBox::new(-40.0, -10.0, 110.0, 160.0),
];

const DEVELOPED: [GeoBox; 4] = [
    GeoBox::new(35.0, 70.0, -180.0, -50.0),
    GeoBox::new(35.0, 70.0, -10.0, 40.0),
    GeoBox::new(30.0, 50.0, 120.0, 150.0),
    GeoBox::new(-40.0, -10.0, 110.0, 160.0),
];

const DEVELOPING: [GeoBox; 4] = [
    GeoBox::new(10.0, 50.0, 70.0, 140.0),
    GeoBox::new(5.0, 35.0, 70.0, 100.0),
    GeoBox::new(10.0, 30.0, -80.0, -30.0),
    GeoBox::new(10.0, 30.0, -20.0, 60.0),
];

const AGRICULTURAL: [GeoBox; 4] = [
    GeoBox::new(20.0, 50.0, 70.0, 140.0),
    GeoBox::new(20.0, 50.0, -130.0, -60.0),
    GeoBox::new(40.0, 60.0, -10.0, 40.0),
    GeoBox::new(10.0, 30.0, -80.0, -30.0),
];

const TOURISM: [GeoBox; 5] = [
    GeoBox::new(35.0, 45.0, -10.0, 40.0),
    GeoBox::new(25.0, 35.0, -120.0, -80.0),
    GeoBox::new(25.0, 35.0, -80.0, -60.0),
    GeoBox::new(20.0, 30.0, 100.0, 140.0),
    GeoBox::new(-40.0, -10.0, 110.0, 160.0),
];

/// Beijing, Shanghai, Tokyo, New York, London, Paris
const DENSE_CITIES: [(f64, f64); 6] = [
    (39.9042, 116.4074),
    (31.2304, 121.4737),
    (35.6762, 139.6503),
    (40.7128, -74.0060),
    (51.5074, -0.1278),
    (48.8566, 2.3522),
];

fn flat_distance_km(lat: f64, lon: f64, other: (f64, f64)) -> f64 {
    ((lat - other.0).powi(2) + (lon - other.1).powi(2)).sqrt() * KM_PER_DEGREE
}

pub fn is_coastal(lat: f64, lon: f64) -> bool {
    in_any(&COASTAL, lat, lon)
}

/// Mortality multiplier: 0.8 within 100 km of a dense metro, 1.2 on a coast, 0.7 elsewhere.
pub fn location_mortality_factor(lat: f64, lon: f64) -> f64 {
    if DENSE_CITIES.iter().any(|&c| flat_distance_km(lat, lon, c) < 100.0) {
        0.8
    } else if is_coastal(lat, lon) {
        1.2
    } else {
        0.7
    }
}

/// Asset value multiplier: 1.8 developed, 1.0 developing, 0.5 elsewhere.
pub fn economic_factor(lat: f64, lon: f64) -> f64 {
    if in_any(&DEVELOPED, lat, lon) {
        1.8
    } else if in_any(&DEVELOPING, lat, lon) {
        1.0
    } else {
        0.5
    }
}

// =============================================================================
// CASUALTIES
// =============================================================================

/// (blast, seismic) base mortality by yield in tons of TNT.
pub fn mortality_rates(tnt_tons: f64) -> (f64, f64) {
    if tnt_tons < 1e6 {
        (0.8, 0.1)
    } else if tnt_tons < 1e7 {
        (0.9, 0.2)
    } else if tnt_tons < 1e8 {
        (0.95, 0.3)
    } else if tnt_tons < 1e9 {
        (0.98, 0.4)
    } else {
        (0.99, 0.5)
    }
}

/// Fatalities among `affected_population`.
///
/// Up to 10% of the population sits in the crater (capped at 100/km²) and is
/// lost outright, up to 30% in the blast ring (5 crater diameters, capped at
/// 50/km²), and the rest in the seismic ring. Never exceeds the input.
pub fn population_loss(
    energy: f64,
    affected_population: u64,
    crater_diameter_km: f64,
    lat: f64,
    lon: f64,
    impact: &ImpactConfig,
) -> u64 {
    if affected_population == 0 {
        return 0;
    }
    let affected = affected_population as f64;
    let tnt_tons = energy / (impact.tnt_megaton_joules / 1e6);

    let crater_area = std::f64::consts::PI * (crater_diameter_km / 2.0).powi(2);
    let blast_radius = crater_diameter_km * 5.0;

    let crater_population = (affected * 0.1).min(crater_area * 100.0);
    let blast_population = (affected * 0.3).min(std::f64::consts::PI * blast_radius.powi(2) * 50.0);
    let seismic_population = affected - crater_population - blast_population;

    let factor = location_mortality_factor(lat, lon);
    let (blast_rate, seismic_rate) = mortality_rates(tnt_tons);

    let total = (crater_population as u64)
        .saturating_add((blast_population * (blast_rate * factor)) as u64)
        .saturating_add((seismic_population * (seismic_rate * factor)) as u64);
    total.min(affected_population)
}

// =============================================================================
// ECONOMIC LOSSES
// =============================================================================

/// Building and infrastructure loss (USD) over the crater, blast and seismic rings.
pub fn building_loss(crater_diameter_km: f64, affected_population: u64, lat: f64, lon: f64) -> f64 {
    use std::f64::consts::PI;

    if affected_population == 0 {
        return 0.0;
    }
    let crater_area = PI * (crater_diameter_km / 2.0).powi(2);
    let blast_radius = crater_diameter_km * 5.0;
    let seismic_radius = crater_diameter_km * 20.0;
    let factor = economic_factor(lat, lon);

    let crater = crater_area * 0.5 * factor;
    let blast = (PI * blast_radius.powi(2) - crater_area) * 0.1 * factor * 0.8;
    let seismic = (PI * seismic_radius.powi(2) - PI * blast_radius.powi(2)) * 0.01 * factor * 0.3;

    let infrastructure = (crater + blast + seismic) * (0.1 + (factor - 0.5) * 0.4);
    let landmarks_factor = if DENSE_CITIES[..5].iter().any(|&c| flat_distance_km(lat, lon, c) < 50.0) {
        0.2
    } else {
        0.1
    };
    let landmarks = (crater + blast) * landmarks_factor;

    (crater + blast + seismic + infrastructure + landmarks) / 100.0 * USD_PER_LOSS_UNIT
}

fn loss_rate_by_yield(energy_mt: f64, rates: [f64; 4]) -> f64 {
    if energy_mt < 1.0 {
        rates[0]
    } else if energy_mt < 10.0 {
        rates[1]
    } else if energy_mt < 100.0 {
        rates[2]
    } else {
        rates[3]
    }
}

/// Crop loss (loss units) inside 10 crater diameters, farm regions only.
fn agricultural_loss(energy_mt: f64, crater_diameter_km: f64, lat: f64, lon: f64) -> f64 {
    if !in_any(&AGRICULTURAL, lat, lon) {
        return 0.0;
    }
    let area = std::f64::consts::PI * (crater_diameter_km * 10.0).powi(2);
    let rate = loss_rate_by_yield(energy_mt, [0.3, 0.5, 0.7, 0.9]);
    area * 0.01 * economic_factor(lat, lon) * rate / 100.0
}

/// Lost tourism revenue (loss units), tourist regions only.
fn tourism_loss(energy_mt: f64, lat: f64, lon: f64) -> f64 {
    if !in_any(&TOURISM, lat, lon) {
        return 0.0;
    }
    10.0 * economic_factor(lat, lon) * loss_rate_by_yield(energy_mt, [0.2, 0.4, 0.6, 0.8])
}

/// Total economic loss (USD): direct building loss plus indirect, infrastructure,
/// long-term GDP, trade, agricultural and tourism components.
pub fn economic_loss(
    population_loss: u64,
    building_loss_usd: f64,
    energy: f64,
    crater_diameter_km: f64,
    lat: f64,
    lon: f64,
    impact: &ImpactConfig,
) -> f64 {
    if population_loss == 0 && building_loss_usd <= 0.0 {
        return 0.0;
    }
    let energy_mt = energy / impact.tnt_megaton_joules;
    let factor = economic_factor(lat, lon);

    let direct = building_loss_usd / USD_PER_LOSS_UNIT;
    let indirect = population_loss as f64 * 0.5 * factor / 100.0;
    let infrastructure = direct * 0.2;
    let gdp = (direct + indirect) * energy_mt.min(10.0) * 0.1 * factor;
    let trade = if is_coastal(lat, lon) { (direct + indirect) * 0.15 } else { 0.0 };

    let total = direct
        + indirect
        + infrastructure
        + gdp
        + trade
        + agricultural_loss(energy_mt, crater_diameter_km, lat, lon)
        + tourism_loss(energy_mt, lat, lon);
    total * USD_PER_LOSS_UNIT
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LossAssessment {
    pub casualties: u64,
    /// USD
    pub building_loss: f64,
    /// USD, building loss included
    pub economic_loss: f64,
}

/// Casualty, building and economic estimates for one impact site.
pub fn assess_losses(
    energy: f64,
    crater_diameter_km: f64,
    affected_population: u64,
    lat: f64,
    lon: f64,
    impact: &ImpactConfig,
) -> LossAssessment {
    let casualties = population_loss(energy, affected_population, crater_diameter_km, lat, lon, impact);
    let building = building_loss(crater_diameter_km, affected_population, lat, lon);
    LossAssessment {
        casualties,
        building_loss: building,
        economic_loss: economic_loss(casualties, building, energy, crater_diameter_km, lat, lon, impact),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE_ENERGY: f64 = 7.238e17;

    #[test]
    fn test_regional_factors() {
        // New York: dense metro inside a developed, coastal box
        assert_eq!(location_mortality_factor(40.7, -74.0), 0.8);
        assert_eq!(economic_factor(40.7, -74.0), 1.8);
        // Great Plains: coastal box, not near a metro
        assert_eq!(location_mortality_factor(45.0, -100.0), 1.2);
        // Gulf of Guinea
        assert_eq!(location_mortality_factor(-5.0, -5.0), 0.7);
        assert_eq!(economic_factor(-5.0, -5.0), 0.5);
        assert_eq!(economic_factor(25.0, 80.0), 1.0);
        assert!(GeoBox::new(0.0, 1.0, 0.0, 1.0).contains(1.0, 0.0));
    }

    #[test]
    fn test_mortality_tiers() {
        assert_eq!(mortality_rates(5e5), (0.8, 0.1));
        assert_eq!(mortality_rates(1e6), (0.9, 0.2));
        assert_eq!(mortality_rates(5e7), (0.95, 0.3));
        assert_eq!(mortality_rates(1.73e8), (0.98, 0.4));
        assert_eq!(mortality_rates(1e12), (0.99, 0.5));
    }

    #[test]
    fn test_population_loss_reference_values() {
        let impact = ImpactConfig::default();
        assert_eq!(population_loss(1e15, 1_000_000, 2.0, 0.0, 0.0, &impact), 77_988);
        assert_eq!(population_loss(1e15, 100, 2.0, 0.0, 0.0, &impact), 30);
        assert_eq!(population_loss(REFERENCE_ENERGY, 1_000_000, 2.0, 40.7, -74.0, &impact), 327_501);
        assert_eq!(population_loss(REFERENCE_ENERGY, 1_000_000, 2.0, 45.0, -100.0, &impact), 491_095);
    }

    #[test]
    fn test_population_loss_bounds() {
        let impact = ImpactConfig::default();
        assert_eq!(population_loss(REFERENCE_ENERGY, 0, 2.0, 0.0, 0.0, &impact), 0);
        for population in [1, 10, 1_000, 50_000_000, u64::MAX] {
            let lost = population_loss(1e25, population, 50.0, 45.0, -100.0, &impact);
            assert!(lost <= population);
        }
    }

    #[test]
    fn test_building_loss() {
        assert_eq!(building_loss(2.0, 0, 40.7, -74.0), 0.0);
        let nyc = building_loss(2.0, 1000, 40.7, -74.0);
        assert!((nyc / 1.2788141922961387e8 - 1.0).abs() < 1e-12, "{nyc}");
        let remote = building_loss(2.0, 1000, -5.0, -5.0);
        assert!((remote / 0.2364676790357038e8 - 1.0).abs() < 1e-12, "{remote}");
    }

    #[test]
    fn test_economic_loss() {
        let impact = ImpactConfig::default();
        let nyc = economic_loss(5000, 1.2788141922961387e8, REFERENCE_ENERGY, 2.0, 40.7, -74.0, &impact);
        assert!((nyc / 136.98183990968548e8 - 1.0).abs() < 1e-9, "{nyc}");
        let remote = economic_loss(5000, 0.2364676790357038e8, REFERENCE_ENERGY, 2.0, -5.0, -5.0, &impact);
        assert!((remote / 19.151995054360697e8 - 1.0).abs() < 1e-9, "{remote}");
        assert_eq!(economic_loss(0, 0.0, REFERENCE_ENERGY, 2.0, 40.7, -74.0, &impact), 0.0);
    }

    #[test]
    fn test_assess_losses_includes_buildings() {
        let impact = ImpactConfig::default();
        let losses = assess_losses(REFERENCE_ENERGY, 2.0, 1_000_000, 40.7, -74.0, &impact);
        assert_eq!(losses.casualties, 327_501);
        assert!(losses.economic_loss > losses.building_loss);

        let empty = assess_losses(REFERENCE_ENERGY, 2.0, 0, 40.7, -74.0, &impact);
        assert_eq!(empty, LossAssessment::default());
    }
}
