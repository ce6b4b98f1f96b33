// Error Types - Structured failures for the impact engine
// Every failure is a caller input error: kind + offending field

use thiserror::Error;

pub type ImpactResult<T> = Result<T, ImpactError>;

/// Coarse classification of an [`ImpactError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidOrbit,
    InvalidScenario,
    Config,
}

#[derive(Debug, Error)]
pub enum ImpactError {
    /// Non-positive semi-major axis or eccentricity outside [0, 1).
    #[error("invalid orbit: {field} = {value} ({reason})")]
    InvalidOrbit {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Non-physical scenario input (size, density, velocity, angle, energy...).
    #[error("invalid scenario: {field} = {value} ({reason})")]
    InvalidScenario {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ImpactError {
    pub fn invalid_orbit(field: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidOrbit {
            field,
            value,
            reason,
        }
    }

    pub fn invalid_scenario(field: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidScenario {
            field,
            value,
            reason,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidOrbit { .. } => ErrorKind::InvalidOrbit,
            Self::InvalidScenario { .. } => ErrorKind::InvalidScenario,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Name of the input field that caused the failure, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidOrbit { field, .. } | Self::InvalidScenario { field, .. } => Some(*field),
            Self::Config(ConfigError::Invalid { field, .. }) => Some(field.as_str()),
            Self::Config(ConfigError::Env { key, .. }) => Some(key.as_str()),
            Self::Config(_) => None,
        }
    }
}

/// Errors raised while loading or validating an engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("environment override {key}={value} is not a number")]
    Env { key: String, value: String },
    #[error("config value {field} = {value} must be positive and finite")]
    Invalid { field: String, value: f64 },
}

/// Reject NaN/inf and values `<= 0` for a scenario field.
pub(crate) fn require_positive(field: &'static str, value: f64) -> ImpactResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ImpactError::invalid_scenario(field, value, "must be positive"))
    }
}
