//! Engine catalog models and loaders for the nozzle visualizer.

use std::fs::File;
use std::path::{Path, PathBuf};

use nozzle_core::units::{deg_to_rad, rad_to_deg};
use nozzle_engine::{EngineConfiguration, NozzleShape};
use nozzle_propellant::PropellantId;
use serde::Deserialize;
use thiserror::Error;

/// One engine entry in a catalog file. Angles are given in degrees.
#[derive(Debug, Deserialize, Clone)]
pub struct EngineConfig {
    pub name: String,
    pub throat_diameter_m: f64,
    pub nozzle_diameter_m: f64,
    pub nozzle_length_m: f64,
    pub chamber_diameter_m: f64,
    pub chamber_length_m: f64,
    pub propellant: PropellantId,
    #[serde(default)]
    pub nozzle: NozzleConfig,
}

/// Bell shaping block; missing fields fall back to the default nozzle shape.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct NozzleConfig {
    pub entrance_radius: f64,
    pub throat_radius: f64,
    pub divergent_radius: f64,
    pub inflection_angle_deg: f64,
    pub exit_angle_deg: f64,
}

impl Default for NozzleConfig {
    fn default() -> Self {
        let shape = NozzleShape::default();
        Self {
            entrance_radius: shape.entrance_radius,
            throat_radius: shape.throat_radius,
            divergent_radius: shape.divergent_radius,
            inflection_angle_deg: rad_to_deg(shape.inflection_angle_rad),
            exit_angle_deg: rad_to_deg(shape.exit_angle_rad),
        }
    }
}

impl From<&NozzleConfig> for NozzleShape {
    fn from(value: &NozzleConfig) -> Self {
        NozzleShape {
            entrance_radius: value.entrance_radius,
            throat_radius: value.throat_radius,
            divergent_radius: value.divergent_radius,
            inflection_angle_rad: deg_to_rad(value.inflection_angle_deg),
            exit_angle_rad: deg_to_rad(value.exit_angle_deg),
        }
    }
}

impl From<&EngineConfig> for EngineConfiguration {
    fn from(value: &EngineConfig) -> Self {
        EngineConfiguration::new(
            value.throat_diameter_m,
            value.nozzle_diameter_m,
            value.nozzle_length_m,
            value.chamber_diameter_m,
            value.chamber_length_m,
            NozzleShape::from(&value.nozzle),
            value.propellant.propellant(),
        )
    }
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("engine '{0}' not found in catalog")]
    NotFound(String),
    #[error("engine catalog is empty")]
    EmptyCatalog,
}

/// Load engine entries from a directory of TOML files, a single TOML file, or a YAML list.
pub fn load_engine_configs<P: AsRef<Path>>(path: P) -> Result<Vec<EngineConfig>, ConfigError> {
    load_records(path)
}

/// Select an engine by case-insensitive name, defaulting to the first catalog entry.
pub fn select_engine<'a>(
    configs: &'a [EngineConfig],
    requested: Option<&str>,
) -> Result<&'a EngineConfig, ConfigError> {
    let first = configs.first().ok_or(ConfigError::EmptyCatalog)?;
    match requested {
        Some(name) => configs
            .iter()
            .find(|cfg| cfg.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| ConfigError::NotFound(name.to_string())),
        None => Ok(first),
    }
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
