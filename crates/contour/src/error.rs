use std::fmt;

use nozzle_engine::Parameter;
use thiserror::Error;

/// Which length collapsed to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthKind {
    /// Divergent section length; divides the parabola coefficient.
    NozzleLength,
    /// Chamber plus nozzle length; divides the horizontal fit scale.
    OverallLength,
    /// Chamber radius; divides the vertical fit scale.
    ChamberRadius,
}

impl fmt::Display for LengthKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LengthKind::NozzleLength => "nozzle length",
            LengthKind::OverallLength => "overall engine length",
            LengthKind::ChamberRadius => "chamber radius",
        })
    }
}

/// Reasons a contour cannot be computed at all.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ContourError {
    #[error(
        "convergent arc of radius {curvature_radius_m:.4} m cannot bridge chamber radius {chamber_radius_m:.4} m to throat radius {throat_radius_m:.4} m"
    )]
    GeometryInfeasible {
        chamber_radius_m: f64,
        throat_radius_m: f64,
        curvature_radius_m: f64,
    },
    #[error("{0} is zero")]
    DegenerateLength(LengthKind),
    #[error("{parameter} must be finite (got {value})")]
    NonFiniteParameter { parameter: Parameter, value: f64 },
    #[error("viewport {width_px}x{height_px} with margin {margin_px} leaves no drawable area")]
    InvalidViewport {
        width_px: f64,
        height_px: f64,
        margin_px: f64,
    },
    #[error("fit scale {0} is not positive")]
    NonPositiveScale(f64),
    #[error("contour sample {0} is not finite")]
    NonFiniteSample(usize),
}
