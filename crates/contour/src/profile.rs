//! Engine-local upper profile: cylindrical chamber, circular convergent arc, parabolic bell.
//!
//! Coordinates are metres with the origin on the centerline at the throat plane. The
//! chamber lies at negative x and the exit plane at `x = nozzle_length_m`.

use std::f64::consts::FRAC_PI_2;

use nozzle_core::constants::LENGTH_EPSILON;
use nozzle_core::vector::Point2;
use nozzle_engine::{EngineConfiguration, Parameter};

use crate::error::{ContourError, LengthKind};

/// Sampling resolution of the curved segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContourOptions {
    /// Points strictly between the arc endpoints, spaced evenly in angle.
    pub arc_interior_samples: usize,
    /// Parabola points after the throat seam, spaced evenly in x.
    pub parabola_samples: usize,
}

impl Default for ContourOptions {
    fn default() -> Self {
        Self {
            arc_interior_samples: 20,
            parabola_samples: 50,
        }
    }
}

/// Which analytic piece of the wall a profile point belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Chamber,
    Convergent,
    Divergent,
}

impl Segment {
    pub const fn as_str(self) -> &'static str {
        match self {
            Segment::Chamber => "chamber",
            Segment::Convergent => "convergent",
            Segment::Divergent => "divergent",
        }
    }
}

/// Circular arc joining the chamber wall to the throat.
///
/// The circle is tangent to the chamber wall at its top point and passes through the
/// throat point `(0, R_t)`. It is swept clockwise from the wall direction (π/2).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergentArc {
    pub center: Point2,
    pub radius_m: f64,
    pub start_angle_rad: f64,
    pub end_angle_rad: f64,
    /// Axial distance from the arc start to the throat plane.
    pub half_length_m: f64,
    pub start: Point2,
    pub end: Point2,
}

impl ConvergentArc {
    pub fn from_configuration(config: &EngineConfiguration) -> Result<Self, ContourError> {
        let throat_radius = config.throat_radius_m();
        let chamber_radius = config.chamber_radius_m();
        let radius = config.nozzle.entrance_radius * throat_radius;

        let diff = throat_radius - chamber_radius + radius;
        let radicand = (radius - diff) * (radius + diff);
        if radicand < 0.0 {
            return Err(ContourError::GeometryInfeasible {
                chamber_radius_m: chamber_radius,
                throat_radius_m: throat_radius,
                curvature_radius_m: radius,
            });
        }
        let half_length = radicand.sqrt();

        let center = Point2::new(-half_length, chamber_radius - radius);
        let end_angle = (throat_radius - center.y).atan2(0.0 - center.x);

        Ok(Self {
            center,
            radius_m: radius,
            start_angle_rad: FRAC_PI_2,
            end_angle_rad: end_angle,
            half_length_m: half_length,
            start: Point2::new(-half_length, chamber_radius),
            end: Point2::new(0.0, throat_radius),
        })
    }

    pub fn point_at(&self, angle_rad: f64) -> Point2 {
        Point2::new(
            self.center.x + self.radius_m * angle_rad.cos(),
            self.center.y + self.radius_m * angle_rad.sin(),
        )
    }

    /// Largest x reached anywhere on the swept arc.
    pub fn max_x(&self) -> f64 {
        let lo = self.start_angle_rad.min(self.end_angle_rad);
        let hi = self.start_angle_rad.max(self.end_angle_rad);
        let endpoints = self.start.x.max(self.end.x);
        if lo <= 0.0 && 0.0 <= hi && self.radius_m > 0.0 {
            endpoints.max(self.center.x + self.radius_m)
        } else {
            endpoints
        }
    }

    /// Endpoints plus `interior` points evenly spaced in angle. Endpoints are exact.
    pub fn sample(&self, interior: usize) -> Vec<Point2> {
        let segments = interior + 1;
        let sweep = self.end_angle_rad - self.start_angle_rad;
        let mut points = Vec::with_capacity(segments + 1);
        points.push(self.start);
        for k in 1..segments {
            let t = k as f64 / segments as f64;
            points.push(self.point_at(self.start_angle_rad + sweep * t));
        }
        points.push(self.end);
        points
    }
}

/// Divergent wall `y(x) = R_t + a·x + b·x²` on `[0, length]`.
///
/// `a` is the slope at the throat (inflection angle); `b` makes the slope at the exit
/// plane equal `tan(exit_angle)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DivergentParabola {
    pub throat_radius_m: f64,
    pub initial_slope: f64,
    pub curvature: f64,
    pub length_m: f64,
}

impl DivergentParabola {
    pub fn from_configuration(config: &EngineConfiguration) -> Result<Self, ContourError> {
        let length = config.nozzle_length_m;
        if length.abs() < LENGTH_EPSILON {
            return Err(ContourError::DegenerateLength(LengthKind::NozzleLength));
        }
        let a = config.nozzle.inflection_angle_rad.tan();
        let b = (config.nozzle.exit_angle_rad.tan() - a) / (2.0 * length);
        Ok(Self {
            throat_radius_m: config.throat_radius_m(),
            initial_slope: a,
            curvature: b,
            length_m: length,
        })
    }

    pub fn y_at(&self, x: f64) -> f64 {
        self.throat_radius_m + self.initial_slope * x + self.curvature * x * x
    }

    pub fn slope_at(&self, x: f64) -> f64 {
        self.initial_slope + 2.0 * self.curvature * x
    }

    /// Wall radius reached at the exit plane.
    pub fn exit_radius_m(&self) -> f64 {
        self.y_at(self.length_m)
    }

    /// Throat seam plus `samples` points evenly spaced in x, ending exactly at `length_m`.
    pub fn sample(&self, samples: usize) -> Vec<Point2> {
        let samples = samples.max(1);
        (0..=samples)
            .map(|k| {
                let x = self.length_m * (k as f64 / samples as f64);
                Point2::new(x, self.y_at(x))
            })
            .collect()
    }
}

/// Upper wall of the engine in engine-local coordinates, ordered chamber to exit.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    points: Vec<Point2>,
    convergent_start: usize,
    divergent_start: usize,
    pub arc: ConvergentArc,
    pub parabola: DivergentParabola,
}

impl Profile {
    /// Build the upper profile. Fails before emitting any point if the inputs are not finite,
    /// the nozzle length is zero, or the convergent arc cannot be constructed.
    pub fn build(
        config: &EngineConfiguration,
        options: &ContourOptions,
    ) -> Result<Self, ContourError> {
        ensure_finite(config)?;
        let arc = ConvergentArc::from_configuration(config)?;
        let parabola = DivergentParabola::from_configuration(config)?;

        let chamber_radius = config.chamber_radius_m();
        let arc_points = arc.sample(options.arc_interior_samples);
        let bell_points = parabola.sample(options.parabola_samples);

        let mut points = Vec::with_capacity(arc_points.len() + bell_points.len());
        points.push(Point2::new(-config.chamber_length_m, chamber_radius));
        points.push(arc.start);
        let convergent_start = points.len();
        // First arc point is the chamber seam, first bell point is the throat seam.
        points.extend_from_slice(&arc_points[1..]);
        let divergent_start = points.len();
        points.extend_from_slice(&bell_points[1..]);

        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(ContourError::NonFiniteSample(index));
        }

        Ok(Self {
            points,
            convergent_start,
            divergent_start,
            arc,
            parabola,
        })
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Lower wall: every point reflected across the centerline, order preserved.
    pub fn mirrored(&self) -> Vec<Point2> {
        mirror(&self.points)
    }

    pub fn segment_of(&self, index: usize) -> Segment {
        if index < self.convergent_start {
            Segment::Chamber
        } else if index < self.divergent_start {
            Segment::Convergent
        } else {
            Segment::Divergent
        }
    }

    /// Index of the throat point `(0, R_t)`.
    pub fn throat_index(&self) -> usize {
        self.divergent_start - 1
    }
}

pub fn mirror(points: &[Point2]) -> Vec<Point2> {
    points.iter().map(|p| p.mirrored()).collect()
}

fn ensure_finite(config: &EngineConfiguration) -> Result<(), ContourError> {
    for parameter in Parameter::ALL {
        let value = config.get(parameter);
        if !value.is_finite() {
            return Err(ContourError::NonFiniteParameter { parameter, value });
        }
    }
    Ok(())
}
