// Simulation - impact and deflection orchestration
// Sequences the physics components per request and assembles the combined result

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::config::EngineConfig;
use crate::deflection_physics::{
    apply_deflection, deflection_angle_deg, kinetic_impactor_delta_v, miss_distance, DeflectionStrategy,
};
use crate::error::ImpactResult;
use crate::exposure::{exposure_for_zones, guarded_ratio, AffectedCity, CityRecord, ExposureExtents, ExposureResult};
use crate::geometry::{clamp_latitude, wrap_longitude};
use crate::hazard_zone::{feature_collection, HazardZone};
use crate::impact_physics::{
    blast_effects, blast_radius_km, crater_diameter, damage_zones, kinetic_energy, mmi_zones,
    peak_ground_acceleration, seismic_magnitude, tnt_equivalent_megatons, BlastEffects, DamageZone,
};
use crate::loss_model::{assess_losses, LossAssessment};
use crate::monte_carlo::{run_ensemble, EnsembleSummary};
use crate::orbital_mechanics::{julian_date_to_utc, StateVector, Vector3};
use crate::scenario::{EffectToggles, ImpactScenario, SimulationRequest};
use crate::tsunami_physics::{
    arrival_time_minutes, ocean_depth_m, tsunami_bands, tsunami_height, tsunami_zones, TsunamiSeverity,
};

// =============================================================================
// RESULT RECORDS
// =============================================================================

/// (low, high) pairs around the nominal outputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UncertaintyBounds {
    pub crater_diameter_m: (f64, f64),
    pub seismic_magnitude: (f64, f64),
    pub tsunami_height_m: (f64, f64),
    pub exposed_population: (f64, f64),
}

impl UncertaintyBounds {
    fn new(crater_diameter_m: f64, magnitude: f64, tsunami_height_m: Option<f64>, exposed_population: u64) -> Self {
        let tsunami = tsunami_height_m.unwrap_or(0.0);
        let population = exposed_population as f64;
        Self {
            crater_diameter_m: (crater_diameter_m * 0.8, crater_diameter_m * 1.2),
            seismic_magnitude: (magnitude - 0.5, magnitude + 0.5),
            tsunami_height_m: (tsunami * 0.5, tsunami * 2.0),
            exposed_population: (population * 0.5, population * 2.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactResults {
    pub asteroid_mass_kg: f64,
    pub impact_energy_joules: f64,
    pub tnt_equivalent_megatons: f64,
    pub crater_diameter_m: f64,
    pub crater_depth_m: f64,
    pub crater_rim_height_m: f64,
    pub blast_radius_km: f64,
    pub blast_effects: BlastEffects,
    pub damage_zones: Vec<DamageZone>,

    // Seismic
    pub seismic_magnitude: f64,
    pub peak_ground_acceleration: f64,
    pub mmi_zones: Vec<HazardZone>,

    // Tsunami (water targets only)
    pub tsunami_height_m: Option<f64>,
    pub tsunami_severity: Option<TsunamiSeverity>,
    pub tsunami_arrival_minutes: Option<f64>,
    pub affected_coastline_km: Option<f64>,
    pub tsunami_zones: Vec<HazardZone>,

    // Exposure
    pub exposed_population: u64,
    pub affected_cities: Vec<AffectedCity>,
    pub estimated_damage_usd: f64,
    pub total_economic_loss_usd: f64,
    pub gdp_impact_percentage: f64,
    pub losses: LossAssessment,

    pub uncertainty_bounds: UncertaintyBounds,
    pub ensemble: Option<EnsembleSummary>,
}

impl ImpactResults {
    pub fn mmi_geojson(&self) -> Value {
        feature_collection(&self.mmi_zones)
    }

    pub fn tsunami_geojson(&self) -> Value {
        feature_collection(&self.tsunami_zones)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeflectionResults {
    /// Clearance above the surface after deflection (km), negative while impacting
    pub miss_distance_km: f64,
    pub deflection_angle_deg: f64,
    /// Residual impact probability [0, 1]
    pub impact_probability: f64,
    pub new_impact_latitude: Option<f64>,
    pub new_impact_longitude: Option<f64>,
    pub deflected_energy_joules: Option<f64>,
    pub energy_reduction_percent: f64,
    pub population_exposure_reduction: u64,
    /// [0, 1], relative to the reference Δv
    pub strategy_efficiency: f64,
    pub required_lead_time_days: f64,
    /// Δv a kinetic impactor with the given parameters would deliver (m/s)
    pub kinetic_impactor_delta_v: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationMetadata {
    pub generated_at: DateTime<Utc>,
    pub resolution_km: f64,
    pub effects: EffectToggles,
    pub physics_models: BTreeMap<String, String>,
    pub uncertainty_level: String,
    pub orbit_epoch_utc: Option<DateTime<Utc>>,
    pub impact_time_utc: Option<DateTime<Utc>>,
}

impl SimulationMetadata {
    fn new(request: &SimulationRequest) -> Self {
        let physics_models = [
            ("crater_scaling", "pi_scaling"),
            ("seismic", "simplified_attenuation"),
            ("tsunami", "energy_based"),
            ("population", "distance_based"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            generated_at: Utc::now(),
            resolution_km: request.resolution_km,
            effects: request.effects,
            physics_models,
            uncertainty_level: "medium".to_string(),
            orbit_epoch_utc: request.scenario.orbit.epoch_utc(),
            impact_time_utc: request.scenario.impact_time.and_then(julian_date_to_utc),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResponse {
    pub baseline: ImpactResults,
    pub deflection: Option<DeflectionResults>,
    pub metadata: SimulationMetadata,
}

// =============================================================================
// ORCHESTRATION
// =============================================================================

/// Run a full impact simulation against an already-resolved city list.
pub fn simulate_impact(
    request: &SimulationRequest,
    cities: &[CityRecord],
    config: &EngineConfig,
) -> ImpactResult<SimulationResponse> {
    config.validate()?;
    request.validate()?;

    let baseline = baseline_results(request, cities, config)?;
    let deflection = request
        .deflection
        .as_ref()
        .map(|strategy| deflection_results(&request.scenario, strategy, &baseline, config))
        .transpose()?;

    tracing::info!(
        energy_mt = baseline.tnt_equivalent_megatons,
        magnitude = baseline.seismic_magnitude,
        exposed = baseline.exposed_population,
        deflected = deflection.is_some(),
        "impact simulated"
    );

    Ok(SimulationResponse {
        baseline,
        deflection,
        metadata: SimulationMetadata::new(request),
    })
}

/// Deflection-only run: all effect categories off and no cities.
pub fn simulate_deflection(
    scenario: &ImpactScenario,
    strategy: &DeflectionStrategy,
    config: &EngineConfig,
) -> ImpactResult<DeflectionResults> {
    config.validate()?;
    let mut request = SimulationRequest::new(scenario.clone());
    request.effects = EffectToggles::none();
    request.deflection = Some(strategy.clone());
    request.validate()?;

    let baseline = baseline_results(&request, &[], config)?;
    deflection_results(scenario, strategy, &baseline, config)
}

fn baseline_results(
    request: &SimulationRequest,
    cities: &[CityRecord],
    config: &EngineConfig,
) -> ImpactResult<ImpactResults> {
    let scenario = &request.scenario;
    let effects = request.effects;
    let (lat, lon) = (scenario.impact_latitude, scenario.impact_longitude);

    let mass = scenario.asteroid.mass();
    let energy = kinetic_energy(mass, scenario.impact_velocity);
    let tnt = tnt_equivalent_megatons(energy, &config.impact);
    let crater = crater_diameter(
        energy,
        scenario.impact_angle,
        config.impact.target_density,
        config.impact.gravity,
        &config.impact,
    )?;
    let magnitude = seismic_magnitude(energy, &config.seismic)?;
    let blast_radius = blast_radius_km(energy, &config.impact);
    tracing::debug!(energy, tnt, crater_m = crater.diameter_m, magnitude, blast_radius, "impact scaling");

    let mmi = if effects.seismic {
        mmi_zones(magnitude, lat, lon, config.seismic.max_distance_km, config)?
    } else {
        Vec::new()
    };

    let mut tsunami_height_m = None;
    let mut tsunami_arrival = None;
    let mut coastline = None;
    let mut tsunami = Vec::new();
    if effects.tsunami && scenario.target_type.is_water() {
        let t = &config.tsunami;
        let depth = if t.regional_depth { ocean_depth_m(lat, lon) } else { t.water_depth_m };
        let height = tsunami_height(energy, depth, t.distance_to_shore_m, t.shore_slope, t)?;
        tsunami = tsunami_zones(lat, lon, height, t.max_distance_km, config)?;
        let bands = tsunami_bands(height, t.max_distance_km, t).len();
        coastline = Some(bands as f64 * t.coastline_km_per_band);
        tsunami_arrival = Some(arrival_time_minutes(t.distance_to_shore_m, depth));
        tsunami_height_m = Some(height);
        tracing::debug!(height, depth, zones = tsunami.len(), "tsunami");
    }

    let crater_km = crater.diameter_m / 1000.0;
    let exposure = if effects.population {
        let zones: Vec<HazardZone> = mmi.iter().chain(tsunami.iter()).cloned().collect();
        let mut extents = ExposureExtents::from_zones(crater_km, blast_radius, &zones);
        // no rings generated: keep the default seismic reach
        if mmi.is_empty() {
            extents.seismic_radius_km = config.seismic.max_distance_km;
        }
        let result = exposure_for_zones(lat, lon, &extents, cities, &config.exposure);
        tracing::debug!(
            outer_km = extents.outer_radius_km(),
            cities = result.cities_affected.len(),
            population = result.population_affected,
            "exposure"
        );
        result
    } else {
        ExposureResult::default()
    };

    let losses = assess_losses(energy, crater_km, exposure.population_affected, lat, lon, &config.impact);

    let damage_factor = (energy / config.exposure.energy_damage_reference_j).min(config.exposure.energy_damage_cap);
    let estimated_damage = exposure.population_affected as f64 * config.exposure.damage_per_person_usd * damage_factor;

    let ensemble = request
        .ensemble
        .as_ref()
        .map(|settings| run_ensemble(scenario, settings, config))
        .transpose()?;

    Ok(ImpactResults {
        asteroid_mass_kg: mass,
        impact_energy_joules: energy,
        tnt_equivalent_megatons: tnt,
        crater_diameter_m: crater.diameter_m,
        crater_depth_m: crater.depth_m,
        crater_rim_height_m: crater.rim_height_m,
        blast_radius_km: blast_radius,
        blast_effects: blast_effects(energy, &config.impact),
        damage_zones: damage_zones(crater_km / 2.0),
        seismic_magnitude: magnitude,
        peak_ground_acceleration: peak_ground_acceleration(magnitude, &config.seismic),
        mmi_zones: mmi,
        tsunami_height_m,
        tsunami_severity: tsunami_height_m.map(TsunamiSeverity::from_height),
        tsunami_arrival_minutes: tsunami_arrival,
        affected_coastline_km: coastline,
        tsunami_zones: tsunami,
        uncertainty_bounds: UncertaintyBounds::new(
            crater.diameter_m,
            magnitude,
            tsunami_height_m,
            exposure.population_affected,
        ),
        exposed_population: exposure.population_affected,
        affected_cities: exposure.cities_affected,
        estimated_damage_usd: estimated_damage,
        total_economic_loss_usd: exposure.total_economic_loss,
        gdp_impact_percentage: exposure.gdp_impact_percentage,
        losses,
        ensemble,
    })
}

fn deflection_results(
    scenario: &ImpactScenario,
    strategy: &DeflectionStrategy,
    baseline: &ImpactResults,
    config: &EngineConfig,
) -> ImpactResult<DeflectionResults> {
    let original = scenario.orbit.to_state_vector(&config.orbit)?;
    let deflected = apply_deflection(&original, &strategy.delta_v_vector(), strategy.lead_time_seconds());

    let kinetic_delta_v = match &strategy.impactor {
        Some(impactor) => Some(kinetic_impactor_delta_v(
            impactor.mass,
            impactor.velocity,
            baseline.asteroid_mass_kg,
            impactor.angle_deg,
            &config.deflection,
        )?),
        None => None,
    };

    let mut results = deflection_outcome(scenario, strategy, baseline, &original, &deflected, config);
    results.kinetic_impactor_delta_v = kinetic_delta_v;
    Ok(results)
}

/// Score a deflected trajectory against the undeflected baseline.
///
/// Earth sits at the frame origin. While the body still intersects Earth
/// the energy is recomputed from the deflected speed |v'| and the residual
/// probability is the retained share of impact energy, clamped to [0, 1].
fn deflection_outcome(
    scenario: &ImpactScenario,
    strategy: &DeflectionStrategy,
    baseline: &ImpactResults,
    original: &StateVector,
    deflected: &StateVector,
    config: &EngineConfig,
) -> DeflectionResults {
    let earth_radius_m = config.exposure.earth_radius_km * 1000.0;
    let miss_m = miss_distance(deflected, &Vector3::zero(), earth_radius_m);

    let (impact_probability, deflected_energy) = if miss_m > 0.0 {
        (0.0, None)
    } else {
        let energy = kinetic_energy(baseline.asteroid_mass_kg, deflected.velocity.magnitude());
        let reduction = 1.0 - guarded_ratio(energy, baseline.impact_energy_joules);
        ((1.0 - reduction).clamp(0.0, 1.0), Some(energy))
    };

    let (new_lat, new_lon) = if impact_probability > 0.0 {
        let dv = strategy.delta_v_vector();
        let shift = config.deflection.impact_shift_deg_per_m_s;
        (
            Some(clamp_latitude(scenario.impact_latitude + dv.y * shift)),
            Some(wrap_longitude(scenario.impact_longitude + dv.x * shift)),
        )
    } else {
        (None, None)
    };

    let retained = 1.0 - impact_probability;
    let results = DeflectionResults {
        miss_distance_km: miss_m / 1000.0,
        deflection_angle_deg: deflection_angle_deg(&original.velocity, &deflected.velocity),
        impact_probability,
        new_impact_latitude: new_lat,
        new_impact_longitude: new_lon,
        deflected_energy_joules: deflected_energy,
        energy_reduction_percent: (retained * 100.0).max(0.0),
        population_exposure_reduction: (baseline.exposed_population as f64 * retained) as u64,
        strategy_efficiency: (strategy.delta_v / config.deflection.reference_delta_v_m_s).min(1.0),
        required_lead_time_days: strategy.lead_time_days,
        kinetic_impactor_delta_v: None,
    };
    tracing::debug!(
        miss_km = results.miss_distance_km,
        probability = results.impact_probability,
        "deflection assessed"
    );
    results
}

// =============================================================================
// TESTS
// =============================================================================
