//! Shared fixtures for integration tests.

#![allow(dead_code)]

use impact_sim::{AsteroidProperties, DensityClass, ImpactScenario, OrbitalElements, TargetType};

pub fn near_earth_orbit() -> OrbitalElements {
    OrbitalElements {
        semi_major_axis: 1.2,
        eccentricity: 0.18,
        inclination: 6.0,
        longitude_ascending_node: 210.0,
        argument_periapsis: 75.0,
        mean_anomaly: 140.0,
        epoch: 2460200.5,
    }
}

/// 160 m stony body at 15 km/s, 45 degrees.
pub fn reference_scenario(target_type: TargetType, lat: f64, lon: f64) -> ImpactScenario {
    ImpactScenario {
        asteroid: AsteroidProperties::new(160.0, DensityClass::Stony),
        orbit: near_earth_orbit(),
        impact_angle: 45.0,
        impact_velocity: 15_000.0,
        target_type,
        impact_latitude: lat,
        impact_longitude: lon,
        impact_time: None,
    }
}
