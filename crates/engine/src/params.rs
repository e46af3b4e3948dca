//! Editable parameter identifiers and the slider ranges the UI layer exposes.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use nozzle_core::units::{deg_to_rad, rad_to_deg};
use thiserror::Error;

use crate::EngineConfiguration;

/// One editable scalar of an [`EngineConfiguration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    ChamberDiameter,
    ChamberLength,
    ThroatDiameter,
    NozzleDiameter,
    NozzleLength,
    EntranceRadius,
    ThroatRadius,
    DivergentRadius,
    InflectionAngle,
    ExitAngle,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParameterError {
    #[error("unknown parameter '{0}'")]
    Unknown(String),
    #[error("override '{0}' must have the form key=value")]
    MalformedOverride(String),
    #[error("value '{value}' for {key} is not a number")]
    InvalidValue { key: String, value: String },
}

impl Parameter {
    /// All parameters, in slider order.
    pub const ALL: [Parameter; 10] = [
        Parameter::ChamberDiameter,
        Parameter::ChamberLength,
        Parameter::ThroatDiameter,
        Parameter::NozzleDiameter,
        Parameter::NozzleLength,
        Parameter::EntranceRadius,
        Parameter::ThroatRadius,
        Parameter::DivergentRadius,
        Parameter::InflectionAngle,
        Parameter::ExitAngle,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Parameter::ChamberDiameter => "chamber_diameter",
            Parameter::ChamberLength => "chamber_length",
            Parameter::ThroatDiameter => "throat_diameter",
            Parameter::NozzleDiameter => "nozzle_diameter",
            Parameter::NozzleLength => "nozzle_length",
            Parameter::EntranceRadius => "entrance_radius",
            Parameter::ThroatRadius => "throat_radius",
            Parameter::DivergentRadius => "divergent_radius",
            Parameter::InflectionAngle => "inflection_angle",
            Parameter::ExitAngle => "exit_angle",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Parameter::ChamberDiameter => "Chamber Diameter (m)",
            Parameter::ChamberLength => "Chamber Length (m)",
            Parameter::ThroatDiameter => "Throat Diameter (m)",
            Parameter::NozzleDiameter => "Nozzle Diameter (m)",
            Parameter::NozzleLength => "Nozzle Length (m)",
            Parameter::EntranceRadius => "Entrance Radius (x throat)",
            Parameter::ThroatRadius => "Throat Radius (x throat)",
            Parameter::DivergentRadius => "Divergent Radius (x throat)",
            Parameter::InflectionAngle => "Inflection Angle (deg)",
            Parameter::ExitAngle => "Exit Angle (deg)",
        }
    }

    pub const fn is_angle(self) -> bool {
        matches!(self, Parameter::InflectionAngle | Parameter::ExitAngle)
    }

    /// Slider bounds in stored units (metres, multiples, radians).
    pub fn range(self) -> RangeInclusive<f64> {
        match self {
            Parameter::ChamberDiameter
            | Parameter::ChamberLength
            | Parameter::ThroatDiameter
            | Parameter::NozzleDiameter
            | Parameter::NozzleLength => 0.1..=10.0,
            Parameter::EntranceRadius => 0.5..=3.0,
            Parameter::ThroatRadius => 0.2..=1.0,
            Parameter::DivergentRadius => 0.3..=1.5,
            Parameter::InflectionAngle => deg_to_rad(20.0)..=deg_to_rad(60.0),
            Parameter::ExitAngle => deg_to_rad(5.0)..=deg_to_rad(20.0),
        }
    }

    /// Stored value as shown to a user; angles become degrees.
    pub fn to_display(self, stored: f64) -> f64 {
        if self.is_angle() {
            rad_to_deg(stored)
        } else {
            stored
        }
    }

    /// Inverse of [`Parameter::to_display`].
    pub fn from_display(self, shown: f64) -> f64 {
        if self.is_angle() {
            deg_to_rad(shown)
        } else {
            shown
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Parameter {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        let key = key.strip_suffix("_deg").unwrap_or(&key);
        let key = key.strip_suffix("_m").unwrap_or(key);
        Parameter::ALL
            .into_iter()
            .find(|p| p.key() == key)
            .ok_or_else(|| ParameterError::Unknown(s.to_string()))
    }
}

/// Parse a `key=value` override. The value is in display units (degrees for angles).
pub fn parse_override(raw: &str) -> Result<(Parameter, f64), ParameterError> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| ParameterError::MalformedOverride(raw.to_string()))?;
    let parameter: Parameter = key.parse()?;
    let shown: f64 = value
        .trim()
        .parse()
        .map_err(|_| ParameterError::InvalidValue {
            key: key.trim().to_string(),
            value: value.trim().to_string(),
        })?;
    Ok((parameter, parameter.from_display(shown)))
}

impl EngineConfiguration {
    /// Current stored value of `parameter`.
    pub fn get(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::ChamberDiameter => self.chamber_diameter_m,
            Parameter::ChamberLength => self.chamber_length_m,
            Parameter::ThroatDiameter => self.throat_diameter_m,
            Parameter::NozzleDiameter => self.nozzle_diameter_m,
            Parameter::NozzleLength => self.nozzle_length_m,
            Parameter::EntranceRadius => self.nozzle.entrance_radius,
            Parameter::ThroatRadius => self.nozzle.throat_radius,
            Parameter::DivergentRadius => self.nozzle.divergent_radius,
            Parameter::InflectionAngle => self.nozzle.inflection_angle_rad,
            Parameter::ExitAngle => self.nozzle.exit_angle_rad,
        }
    }

    fn slot_mut(&mut self, parameter: Parameter) -> &mut f64 {
        match parameter {
            Parameter::ChamberDiameter => &mut self.chamber_diameter_m,
            Parameter::ChamberLength => &mut self.chamber_length_m,
            Parameter::ThroatDiameter => &mut self.throat_diameter_m,
            Parameter::NozzleDiameter => &mut self.nozzle_diameter_m,
            Parameter::NozzleLength => &mut self.nozzle_length_m,
            Parameter::EntranceRadius => &mut self.nozzle.entrance_radius,
            Parameter::ThroatRadius => &mut self.nozzle.throat_radius,
            Parameter::DivergentRadius => &mut self.nozzle.divergent_radius,
            Parameter::InflectionAngle => &mut self.nozzle.inflection_angle_rad,
            Parameter::ExitAngle => &mut self.nozzle.exit_angle_rad,
        }
    }

    /// Write `value` as-is. Out-of-range values are accepted.
    pub fn set(&mut self, parameter: Parameter, value: f64) {
        *self.slot_mut(parameter) = value;
    }

    /// Write `value` clamped to the slider range and return what was stored.
    pub fn set_clamped(&mut self, parameter: Parameter, value: f64) -> f64 {
        let range = parameter.range();
        let stored = value.clamp(*range.start(), *range.end());
        self.set(parameter, stored);
        stored
    }
}
