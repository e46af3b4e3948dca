//! Engine selection shared by the command-line front-ends.

use std::path::Path;

use log::info;
use nozzle_config::{ConfigError, load_engine_configs, select_engine};
use nozzle_engine::params::parse_override;
use nozzle_engine::{EngineConfiguration, ParameterError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Parameter(#[from] ParameterError),
}

/// Engine picked from a catalog, with command-line overrides applied.
#[derive(Debug, Clone)]
pub struct Selection {
    pub name: String,
    pub configuration: EngineConfiguration,
}

/// Load `catalog`, pick `engine` (or the first entry), and apply `key=value` overrides.
///
/// Overrides are written unclamped so out-of-range geometry can be inspected.
pub fn select<P: AsRef<Path>>(
    catalog: P,
    engine: Option<&str>,
    overrides: &[String],
) -> Result<Selection, SelectionError> {
    let configs = load_engine_configs(catalog)?;
    let chosen = select_engine(&configs, engine)?;
    let mut configuration = EngineConfiguration::from(chosen);
    for raw in overrides {
        let (parameter, value) = parse_override(raw)?;
        info!("override {parameter} = {}", parameter.to_display(value));
        configuration.set(parameter, value);
    }
    Ok(Selection {
        name: chosen.name.clone(),
        configuration,
    })
}
