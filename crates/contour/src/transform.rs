//! Uniform, aspect-preserving fit of the engine profile into a pixel viewport.

use nozzle_core::constants::LENGTH_EPSILON;
use nozzle_core::vector::Point2;
use nozzle_engine::EngineConfiguration;

use crate::error::{ContourError, LengthKind};

/// Target drawing surface in pixels. Screen y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width_px: f64,
    pub height_px: f64,
    /// Empty border kept on every side.
    pub margin_px: f64,
}

impl Viewport {
    pub const fn new(width_px: f64, height_px: f64, margin_px: f64) -> Self {
        Self {
            width_px,
            height_px,
            margin_px,
        }
    }

    pub fn center(&self) -> Point2 {
        Point2::new(self.width_px / 2.0, self.height_px / 2.0)
    }

    /// Horizontal room for the whole engine length.
    pub fn drawable_width(&self) -> f64 {
        self.width_px - 2.0 * self.margin_px
    }

    /// Vertical room for one half of the profile (centerline to wall).
    pub fn drawable_half_height(&self) -> f64 {
        self.height_px / 2.0 - self.margin_px
    }

    pub fn validate(&self) -> Result<(), ContourError> {
        let finite = self.width_px.is_finite()
            && self.height_px.is_finite()
            && self.margin_px.is_finite();
        if !finite
            || self.margin_px < 0.0
            || self.drawable_width() <= 0.0
            || self.drawable_half_height() <= 0.0
        {
            return Err(ContourError::InvalidViewport {
                width_px: self.width_px,
                height_px: self.height_px,
                margin_px: self.margin_px,
            });
        }
        Ok(())
    }
}

/// Maps engine-local metres to screen pixels: `(cx + s·x, cy − s·y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTransform {
    pub scale: f64,
    /// Screen position of the engine-local origin (throat plane on the centerline).
    pub origin: Point2,
}

impl ScreenTransform {
    /// Axial and radial scales `(s_x, s_y)` before taking the smaller one.
    pub fn axis_scales(
        config: &EngineConfiguration,
        viewport: &Viewport,
    ) -> Result<(f64, f64), ContourError> {
        viewport.validate()?;
        let overall_length = config.chamber_length_m + config.nozzle_length_m;
        if overall_length.abs() < LENGTH_EPSILON {
            return Err(ContourError::DegenerateLength(LengthKind::OverallLength));
        }
        let chamber_radius = config.chamber_radius_m();
        if chamber_radius.abs() < LENGTH_EPSILON {
            return Err(ContourError::DegenerateLength(LengthKind::ChamberRadius));
        }
        Ok((
            viewport.drawable_width() / overall_length,
            viewport.drawable_half_height() / chamber_radius,
        ))
    }

    /// Largest uniform scale that keeps the profile inside the margins on both axes.
    pub fn fit(config: &EngineConfiguration, viewport: &Viewport) -> Result<Self, ContourError> {
        let (scale_x, scale_y) = Self::axis_scales(config, viewport)?;
        let scale = scale_x.min(scale_y);
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ContourError::NonPositiveScale(scale));
        }
        Ok(Self {
            scale,
            origin: viewport.center(),
        })
    }

    #[inline]
    pub fn apply(&self, p: Point2) -> Point2 {
        Point2::new(self.origin.x + self.scale * p.x, self.origin.y - self.scale * p.y)
    }

    pub fn apply_all(&self, points: &[Point2]) -> Vec<Point2> {
        points.iter().map(|&p| self.apply(p)).collect()
    }

    /// Screen-space centerline from the injector face to the exit plane.
    pub fn centerline(&self, config: &EngineConfiguration) -> [Point2; 2] {
        [
            self.apply(Point2::new(-config.chamber_length_m, 0.0)),
            self.apply(Point2::new(config.nozzle_length_m, 0.0)),
        ]
    }
}
