//! End-to-end tests for the impact and deflection pipeline.

mod common;

use approx::assert_relative_eq;
use impact_sim::city_catalog::{cities_within, major_cities};
use impact_sim::config::ImpactConfig;
use impact_sim::exposure::ExposureLevel;
use impact_sim::impact_physics::{crater_diameter, kinetic_energy, mass};
use impact_sim::{
    simulate_deflection, simulate_impact, CityRecord, DeflectionKind, DeflectionStrategy, EffectToggles,
    EngineConfig, SimulationRequest, TargetType, Vector3,
};

#[test]
fn test_reference_impact_numbers() {
    let m = mass(160.0, 3000.0);
    let e = kinetic_energy(m, 15_000.0);
    assert_relative_eq!(m, 6.434e9, max_relative = 1e-3);
    assert_relative_eq!(e, 7.238e17, max_relative = 1e-3);

    let impact = ImpactConfig::default();
    let crater = crater_diameter(e, 45.0, 2500.0, 9.81, &impact).unwrap();
    let reference = 1.25 * (e / (2500.0 * 9.81)).powf(0.25) * 45f64.to_radians().sin().powf(1.0 / 3.0);
    assert_relative_eq!(crater.diameter_m, reference, max_relative = 1e-12);

    let request = SimulationRequest::new(common::reference_scenario(TargetType::ContinentalCrust, 0.0, 0.0));
    let baseline = simulate_impact(&request, &[], &EngineConfig::default()).unwrap().baseline;
    assert_relative_eq!(baseline.tnt_equivalent_megatons, 0.173, epsilon = 1e-3);
    assert_relative_eq!(baseline.crater_diameter_m, reference, max_relative = 1e-12);
    assert_relative_eq!(baseline.crater_depth_m, reference / 4.0, max_relative = 1e-12);
}

#[test]
fn test_remote_impact_has_no_exposure() {
    // South Pacific, far from every catalog city
    let request = SimulationRequest::new(common::reference_scenario(TargetType::Ocean, -48.0, -125.0));
    let baseline = simulate_impact(&request, &major_cities(), &EngineConfig::default())
        .unwrap()
        .baseline;

    assert_eq!(baseline.exposed_population, 0);
    assert_eq!(baseline.gdp_impact_percentage, 0.0);
    assert!(baseline.affected_cities.is_empty());
    assert!(baseline.tsunami_height_m.is_some());
}

#[test]
fn test_direct_hit_on_city_is_extreme() {
    let city = CityRecord::new("Target", "Nowhere", 10.0, 10.0, 100_000, 20_000.0);
    let request = SimulationRequest::new(common::reference_scenario(TargetType::ContinentalCrust, 10.0, 10.0));
    let baseline = simulate_impact(&request, &[city], &EngineConfig::default())
        .unwrap()
        .baseline;

    assert_eq!(baseline.affected_cities.len(), 1);
    assert_eq!(baseline.affected_cities[0].exposure_level, ExposureLevel::Extreme);
    assert_relative_eq!(baseline.total_economic_loss_usd, 100_000.0 * 20_000.0 * 0.95, max_relative = 1e-12);
    // The only considered city is fully counted in the denominator
    assert_relative_eq!(baseline.gdp_impact_percentage, 95.0, max_relative = 1e-12);
}

#[test]
fn test_seismic_off_keeps_default_exposure_extent() {
    // ~500 km east of the impact point
    let city = CityRecord::new("Distant", "Nowhere", 0.0, 4.5, 1_000_000, 10_000.0);
    let mut request = SimulationRequest::new(common::reference_scenario(TargetType::ContinentalCrust, 0.0, 0.0));
    request.effects = EffectToggles {
        seismic: false,
        ..EffectToggles::default()
    };
    let baseline = simulate_impact(&request, &[city], &EngineConfig::default())
        .unwrap()
        .baseline;

    assert!(baseline.mmi_zones.is_empty());
    assert_eq!(baseline.exposed_population, 1_000_000);
    assert_eq!(baseline.affected_cities.len(), 1);
    assert_eq!(baseline.affected_cities[0].exposure_level, ExposureLevel::Minimal);
    assert_relative_eq!(baseline.affected_cities[0].distance_km, 500.4, epsilon = 0.5);
}

#[test]
fn test_direct_hit_reports_losses() {
    let city = CityRecord::new("Target", "Nowhere", 10.0, 10.0, 100_000, 20_000.0);
    let request = SimulationRequest::new(common::reference_scenario(TargetType::ContinentalCrust, 10.0, 10.0));
    let baseline = simulate_impact(&request, &[city], &EngineConfig::default())
        .unwrap()
        .baseline;

    let losses = baseline.losses;
    assert!(losses.casualties > 0 && losses.casualties <= baseline.exposed_population);
    assert!(losses.building_loss > 0.0);
    assert!(losses.economic_loss > losses.building_loss);
    assert_eq!(baseline.damage_zones.len(), 5);
    assert_relative_eq!(
        baseline.damage_zones[0].radius_km,
        baseline.crater_diameter_m / 2000.0,
        max_relative = 1e-12
    );
}

#[test]
fn test_catalog_prefilter_matches_full_list() {
    let config = EngineConfig::default();
    let request = SimulationRequest::new(common::reference_scenario(TargetType::ContinentalCrust, 48.0, 5.0));

    let all = simulate_impact(&request, &major_cities(), &config).unwrap().baseline;
    let nearby = cities_within(48.0, 5.0, 1000.0, config.exposure.earth_radius_km);
    let filtered = simulate_impact(&request, &nearby, &config).unwrap().baseline;

    assert_eq!(all.exposed_population, filtered.exposed_population);
    assert_relative_eq!(all.total_economic_loss_usd, filtered.total_economic_loss_usd, max_relative = 1e-12);
    assert!(filtered.exposed_population > 0);
}

#[test]
fn test_geojson_export_shape() {
    let request = SimulationRequest::new(common::reference_scenario(TargetType::Ocean, 35.0, 140.0));
    let baseline = simulate_impact(&request, &[], &EngineConfig::default()).unwrap().baseline;

    let mmi = baseline.mmi_geojson();
    assert_eq!(mmi["type"], "FeatureCollection");
    let features = mmi["features"].as_array().unwrap();
    assert_eq!(features.len(), 19);
    let ring = features[0]["geometry"]["coordinates"][0].as_array().unwrap();
    assert_eq!(ring.len(), 32);
    // [lon, lat] order: first vertex is due north of the epicenter
    assert_relative_eq!(ring[0][0].as_f64().unwrap(), 140.0, epsilon = 1e-9);
    assert!(ring[0][1].as_f64().unwrap() > 35.0);

    let json = serde_json::to_value(&baseline).unwrap();
    assert!(json["tsunami_severity"].is_string());
}

#[test]
fn test_zero_delta_v_deflection_keeps_trajectory() {
    let config = EngineConfig::default();
    let scenario = common::reference_scenario(TargetType::ContinentalCrust, 0.0, 0.0);
    let idle = DeflectionStrategy::new(DeflectionKind::KineticImpactor, 0.0, Vector3::new(0.0, 0.0, 1.0), 100.0);
    let results = simulate_deflection(&scenario, &idle, &config).unwrap();

    let state = scenario.orbit.to_state_vector(&config.orbit).unwrap();
    let coast = state.position + state.velocity * (100.0 * 86400.0);
    let direct_km = (coast.magnitude() - config.exposure.earth_radius_km * 1000.0) / 1000.0;

    assert_relative_eq!(results.miss_distance_km, direct_km, max_relative = 1e-12);
    assert!(results.deflection_angle_deg < 1e-5);
    assert_eq!(results.strategy_efficiency, 0.0);
}

#[test]
fn test_config_from_toml_changes_output() {
    let config = EngineConfig::from_toml_str(
        r#"
        [impact]
        crater_scaling = 2.5
        "#,
    )
    .unwrap();
    let request = SimulationRequest::new(common::reference_scenario(TargetType::ContinentalCrust, 0.0, 0.0));
    let scaled = simulate_impact(&request, &[], &config).unwrap().baseline;
    let nominal = simulate_impact(&request, &[], &EngineConfig::default()).unwrap().baseline;
    assert_relative_eq!(scaled.crater_diameter_m, nominal.crater_diameter_m * 2.0, max_relative = 1e-12);
    assert_eq!(scaled.seismic_magnitude, nominal.seismic_magnitude);
}
