use rdw_verkenner::config::ConfigError;
use rdw_verkenner::rdw::{PlateError, RdwApiError};
use std::fmt;

use crate::telemetry::TelemetryError;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Api(RdwApiError),
    Plate(PlateError),
    Output(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuratiefout: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetriefout: {}", err),
            AppError::Api(err) => {
                write!(f, "RDW-aanvraag mislukt: {}. Probeer het later opnieuw.", err)
            }
            AppError::Plate(err) => {
                write!(f, "{}. Voer een geldig kenteken in (bijv. AB123C).", err)
            }
            AppError::Output(err) => write!(f, "JSON-uitvoer mislukt: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Api(err) => Some(err),
            AppError::Plate(err) => Some(err),
            AppError::Output(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<RdwApiError> for AppError {
    fn from(value: RdwApiError) -> Self {
        Self::Api(value)
    }
}

impl From<PlateError> for AppError {
    fn from(value: PlateError) -> Self {
        Self::Plate(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Output(value)
    }
}
