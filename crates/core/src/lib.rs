//! Core units, constants, and shared primitives for the nozzle visualizer workspace.

/// Numeric tolerances shared across crates.
pub mod constants {
    /// Lengths (metres) with a smaller magnitude are treated as zero.
    pub const LENGTH_EPSILON: f64 = 1.0e-12;
}

/// Basic unit conversion helpers.
pub mod units {
    /// Convert degrees to radians.
    #[inline]
    pub fn deg_to_rad(v: f64) -> f64 {
        v.to_radians()
    }

    /// Convert radians to degrees.
    #[inline]
    pub fn rad_to_deg(v: f64) -> f64 {
        v.to_degrees()
    }

    /// Half of a diameter.
    #[inline]
    pub fn radius_of(diameter: f64) -> f64 {
        diameter / 2.0
    }
}

/// Minimal 2D point type shared by the contour and export crates.
pub mod vector {
    /// A point in engine-local metres or in screen pixels depending on context.
    #[derive(Debug, Clone, Copy, Default, PartialEq)]
    pub struct Point2 {
        pub x: f64,
        pub y: f64,
    }

    impl Point2 {
        #[inline]
        pub const fn new(x: f64, y: f64) -> Self {
            Self { x, y }
        }

        /// Reflection across the x axis.
        #[inline]
        pub fn mirrored(self) -> Self {
            Self::new(self.x, -self.y)
        }

        #[inline]
        pub fn is_finite(self) -> bool {
            self.x.is_finite() && self.y.is_finite()
        }
    }
}
