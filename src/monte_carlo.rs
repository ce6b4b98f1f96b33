// Monte Carlo - seeded uncertainty ensemble over entry parameters
// Gaussian perturbation of diameter, velocity and angle; percentiles of the outputs

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::config::EngineConfig;
use crate::error::ImpactResult;
use crate::impact_physics::{crater_diameter, kinetic_energy, mass, seismic_magnitude};
use crate::scenario::{EnsembleSettings, ImpactScenario};

/// Perturbed values never drop below this share of the nominal value.
const MIN_RELATIVE_SAMPLE: f64 = 0.01;

/// 5th / 50th / 95th percentile of one output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spread {
    pub p05: f64,
    pub p50: f64,
    pub p95: f64,
}

impl Spread {
    fn from_samples(samples: &mut [f64]) -> Self {
        samples.sort_by(f64::total_cmp);
        Self {
            p05: percentile(samples, 0.05),
            p50: percentile(samples, 0.50),
            p95: percentile(samples, 0.95),
        }
    }
}

/// Nearest-rank percentile of sorted data; 0 for an empty slice.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let index = (p * (sorted.len() - 1) as f64).round() as usize;
    sorted[index.min(sorted.len() - 1)]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleSummary {
    pub samples: usize,
    pub seed: u64,
    pub energy_joules: Spread,
    pub crater_diameter_m: Spread,
    pub seismic_magnitude: Spread,
}

/// Box-Muller standard normal draw.
fn standard_normal(rng: &mut StdRng) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(1e-10); // Avoid ln(0)
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

fn perturb_relative(rng: &mut StdRng, nominal: f64, sigma: f64) -> f64 {
    (nominal * (1.0 + sigma * standard_normal(rng))).max(nominal * MIN_RELATIVE_SAMPLE)
}

/// Run the ensemble. Identical seeds give identical summaries.
pub fn run_ensemble(
    scenario: &ImpactScenario,
    settings: &EnsembleSettings,
    config: &EngineConfig,
) -> ImpactResult<EnsembleSummary> {
    settings.validate()?;
    let mut rng = StdRng::seed_from_u64(settings.seed);
    let density = scenario.asteroid.density();

    let mut energies = Vec::with_capacity(settings.samples);
    let mut craters = Vec::with_capacity(settings.samples);
    let mut magnitudes = Vec::with_capacity(settings.samples);

    for _ in 0..settings.samples {
        let diameter = perturb_relative(&mut rng, scenario.asteroid.diameter, settings.diameter_sigma);
        let velocity = perturb_relative(&mut rng, scenario.impact_velocity, settings.velocity_sigma);
        let angle = scenario.impact_angle + settings.angle_sigma_deg * standard_normal(&mut rng);

        let energy = kinetic_energy(mass(diameter, density), velocity);
        let crater = crater_diameter(
            energy,
            angle,
            config.impact.target_density,
            config.impact.gravity,
            &config.impact,
        )?;

        energies.push(energy);
        craters.push(crater.diameter_m);
        magnitudes.push(seismic_magnitude(energy, &config.seismic)?);
    }

    tracing::debug!(samples = settings.samples, seed = settings.seed, "ensemble complete");

    Ok(EnsembleSummary {
        samples: settings.samples,
        seed: settings.seed,
        energy_joules: Spread::from_samples(&mut energies),
        crater_diameter_m: Spread::from_samples(&mut craters),
        seismic_magnitude: Spread::from_samples(&mut magnitudes),
    })
}
