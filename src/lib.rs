// ImpactSim - NEO Impact Hazard & Deflection Engine
// Pure, stateless physics core: callers supply scenarios and city data

pub mod city_catalog;
pub mod config;
pub mod deflection_physics;
pub mod error;
pub mod exposure;
pub mod geometry;
pub mod hazard_zone;
pub mod impact_physics;
pub mod loss_model;
pub mod monte_carlo;
pub mod orbital_mechanics;
pub mod scenario;
pub mod simulation;
pub mod tsunami_physics;

pub use config::EngineConfig;
pub use deflection_physics::{DeflectionKind, DeflectionStrategy, KineticImpactorParams};
pub use error::{ConfigError, ErrorKind, ImpactError, ImpactResult};
pub use exposure::{CityRecord, ExposureLevel, ExposureResult};
pub use hazard_zone::{HazardKind, HazardZone};
pub use impact_physics::{AsteroidProperties, DamageZone, DensityClass};
pub use loss_model::LossAssessment;
pub use orbital_mechanics::{OrbitalElements, StateVector, Vector3};
pub use scenario::{EffectToggles, EnsembleSettings, ImpactScenario, SimulationRequest, TargetType};
pub use simulation::{simulate_deflection, simulate_impact, DeflectionResults, ImpactResults, SimulationResponse};
