//! Conditions that still yield a drawable contour but describe a physically odd engine.

use std::fmt;
use std::mem::discriminant;

use nozzle_core::constants::LENGTH_EPSILON;
use nozzle_core::units::rad_to_deg;
use nozzle_engine::{EngineConfiguration, Parameter};

use crate::profile::Profile;

/// Relative tolerance on the bell's terminal radius against the requested exit radius.
const EXIT_RADIUS_TOLERANCE: f64 = 0.01;

const DIMENSIONS: [Parameter; 8] = [
    Parameter::ChamberDiameter,
    Parameter::ChamberLength,
    Parameter::ThroatDiameter,
    Parameter::NozzleDiameter,
    Parameter::NozzleLength,
    Parameter::EntranceRadius,
    Parameter::ThroatRadius,
    Parameter::DivergentRadius,
];

#[derive(Debug, Clone, PartialEq)]
pub enum GeometryWarning {
    NonPositiveDimension {
        parameter: Parameter,
        value: f64,
    },
    NozzleNarrowerThanThroat {
        nozzle_diameter_m: f64,
        throat_diameter_m: f64,
    },
    ChamberNarrowerThanThroat {
        chamber_diameter_m: f64,
        throat_diameter_m: f64,
    },
    InflectionNotSteeperThanExit {
        inflection_angle_rad: f64,
        exit_angle_rad: f64,
    },
    /// The convergent arc bulges downstream of the throat plane before returning to it.
    ConvergentOvershoot { overshoot_m: f64 },
    /// The cylindrical run is negative: the arc starts upstream of the injector face.
    ChamberShorterThanConvergent {
        chamber_length_m: f64,
        convergent_length_m: f64,
    },
    ExitRadiusMismatch { requested_m: f64, achieved_m: f64 },
}

impl fmt::Display for GeometryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryWarning::NonPositiveDimension { parameter, value } => {
                write!(f, "{parameter} is not positive ({value})")
            }
            GeometryWarning::NozzleNarrowerThanThroat {
                nozzle_diameter_m,
                throat_diameter_m,
            } => write!(
                f,
                "nozzle exit diameter {nozzle_diameter_m:.3} m is smaller than throat diameter {throat_diameter_m:.3} m"
            ),
            GeometryWarning::ChamberNarrowerThanThroat {
                chamber_diameter_m,
                throat_diameter_m,
            } => write!(
                f,
                "chamber diameter {chamber_diameter_m:.3} m is smaller than throat diameter {throat_diameter_m:.3} m"
            ),
            GeometryWarning::InflectionNotSteeperThanExit {
                inflection_angle_rad,
                exit_angle_rad,
            } => write!(
                f,
                "inflection angle {:.1}° does not exceed exit angle {:.1}°",
                rad_to_deg(*inflection_angle_rad),
                rad_to_deg(*exit_angle_rad)
            ),
            GeometryWarning::ConvergentOvershoot { overshoot_m } => write!(
                f,
                "convergent arc extends {overshoot_m:.4} m past the throat plane"
            ),
            GeometryWarning::ChamberShorterThanConvergent {
                chamber_length_m,
                convergent_length_m,
            } => write!(
                f,
                "chamber length {chamber_length_m:.3} m is shorter than the convergent section {convergent_length_m:.3} m"
            ),
            GeometryWarning::ExitRadiusMismatch {
                requested_m,
                achieved_m,
            } => write!(
                f,
                "bell ends at radius {achieved_m:.3} m instead of the requested {requested_m:.3} m"
            ),
        }
    }
}

/// Warnings in `current` whose kind does not appear in `previous`.
///
/// Kinds are compared without their payloads, so a warning whose values drift while a
/// parameter is being dragged is only raised once.
pub fn newly_raised<'a>(
    previous: &[GeometryWarning],
    current: &'a [GeometryWarning],
) -> impl Iterator<Item = &'a GeometryWarning> {
    let seen: Vec<_> = previous.iter().map(discriminant).collect();
    current
        .iter()
        .filter(move |warning| !seen.contains(&discriminant(*warning)))
}

/// Configuration-level checks that need no geometry.
pub fn inspect(config: &EngineConfiguration) -> Vec<GeometryWarning> {
    let mut warnings: Vec<GeometryWarning> = DIMENSIONS
        .into_iter()
        .filter_map(|parameter| {
            let value = config.get(parameter);
            (value <= 0.0).then_some(GeometryWarning::NonPositiveDimension { parameter, value })
        })
        .collect();

    if config.nozzle_diameter_m < config.throat_diameter_m {
        warnings.push(GeometryWarning::NozzleNarrowerThanThroat {
            nozzle_diameter_m: config.nozzle_diameter_m,
            throat_diameter_m: config.throat_diameter_m,
        });
    }
    if config.chamber_diameter_m < config.throat_diameter_m {
        warnings.push(GeometryWarning::ChamberNarrowerThanThroat {
            chamber_diameter_m: config.chamber_diameter_m,
            throat_diameter_m: config.throat_diameter_m,
        });
    }
    if config.nozzle.inflection_angle_rad <= config.nozzle.exit_angle_rad {
        warnings.push(GeometryWarning::InflectionNotSteeperThanExit {
            inflection_angle_rad: config.nozzle.inflection_angle_rad,
            exit_angle_rad: config.nozzle.exit_angle_rad,
        });
    }
    warnings
}

/// Checks on the built profile: axial ordering and the bell's terminal radius.
pub(crate) fn inspect_profile(
    config: &EngineConfiguration,
    profile: &Profile,
) -> Vec<GeometryWarning> {
    let mut warnings = Vec::new();

    let overshoot = profile.arc.max_x();
    if overshoot > LENGTH_EPSILON {
        warnings.push(GeometryWarning::ConvergentOvershoot {
            overshoot_m: overshoot,
        });
    }

    if config.chamber_length_m < profile.arc.half_length_m {
        warnings.push(GeometryWarning::ChamberShorterThanConvergent {
            chamber_length_m: config.chamber_length_m,
            convergent_length_m: profile.arc.half_length_m,
        });
    }

    let requested = config.exit_radius_m();
    let achieved = profile.parabola.exit_radius_m();
    if (achieved - requested).abs() > EXIT_RADIUS_TOLERANCE * requested.abs().max(LENGTH_EPSILON) {
        warnings.push(GeometryWarning::ExitRadiusMismatch {
            requested_m: requested,
            achieved_m: achieved,
        });
    }

    warnings
}
