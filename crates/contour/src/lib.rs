//! Contour generation for rocket engine cross-sections.
//!
//! [`generate`] turns an [`EngineConfiguration`] and a [`Viewport`] into the upper and
//! lower wall polylines in screen space, plus the transform used to place them. The
//! computation is a pure function of its inputs and is meant to be re-run every frame.

pub mod diagnostics;
pub mod error;
pub mod profile;
pub mod transform;

use log::debug;
use nozzle_core::vector::Point2;
use nozzle_engine::EngineConfiguration;

pub use diagnostics::{GeometryWarning, inspect, newly_raised};
pub use error::{ContourError, LengthKind};
pub use profile::{ContourOptions, ConvergentArc, DivergentParabola, Profile, Segment, mirror};
pub use transform::{ScreenTransform, Viewport};

/// Everything a renderer needs to draw one frame of the engine outline.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourFrame {
    /// Upper wall in engine-local metres.
    pub profile: Profile,
    /// Lower wall in engine-local metres (`profile` reflected across the centerline).
    pub local_lower: Vec<Point2>,
    /// Upper wall in screen pixels.
    pub upper: Vec<Point2>,
    /// Lower wall in screen pixels.
    pub lower: Vec<Point2>,
    pub transform: ScreenTransform,
    pub centerline: [Point2; 2],
    pub warnings: Vec<GeometryWarning>,
}

impl ContourFrame {
    pub fn local_upper(&self) -> &[Point2] {
        self.profile.points()
    }
}

/// Generate a frame with the default sampling resolution.
pub fn generate(
    config: &EngineConfiguration,
    viewport: Viewport,
) -> Result<ContourFrame, ContourError> {
    generate_with(config, viewport, &ContourOptions::default())
}

pub fn generate_with(
    config: &EngineConfiguration,
    viewport: Viewport,
    options: &ContourOptions,
) -> Result<ContourFrame, ContourError> {
    let profile = Profile::build(config, options)?;
    let transform = ScreenTransform::fit(config, &viewport)?;

    let local_lower = profile.mirrored();
    let upper = transform.apply_all(profile.points());
    let lower = transform.apply_all(&local_lower);
    let centerline = transform.centerline(config);

    let mut warnings = inspect(config);
    warnings.extend(diagnostics::inspect_profile(config, &profile));

    debug!(
        "generated contour: {} points per side, scale {:.3} px/m, {} warning(s)",
        profile.len(),
        transform.scale,
        warnings.len()
    );

    Ok(ContourFrame {
        profile,
        local_lower,
        upper,
        lower,
        transform,
        centerline,
        warnings,
    })
}
