//! Engine configuration: chamber, throat, and nozzle dimensions plus the propellant.
//!
//! The structs here are plain value holders. Nothing is validated on write; the
//! contour generator decides what is drawable and what is not.

pub mod params;

use std::f64::consts::PI;

use nozzle_core::units::{deg_to_rad, radius_of};

pub use nozzle_propellant::{Propellant, PropellantError, PropellantId};
pub use params::{Parameter, ParameterError};

/// Rao-style shaping parameters for the convergent arc and divergent bell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NozzleShape {
    /// Convergent arc curvature radius, as a multiple of the throat radius.
    pub entrance_radius: f64,
    /// Throat curvature radius, as a multiple of the throat radius.
    pub throat_radius: f64,
    /// Initial divergent curvature radius, as a multiple of the throat radius.
    pub divergent_radius: f64,
    /// Wall angle just downstream of the throat (radians).
    pub inflection_angle_rad: f64,
    /// Wall angle at the nozzle exit plane (radians).
    pub exit_angle_rad: f64,
}

impl Default for NozzleShape {
    fn default() -> Self {
        Self {
            entrance_radius: 1.5,
            throat_radius: 0.4,
            divergent_radius: 0.5,
            inflection_angle_rad: 0.785,
            exit_angle_rad: 0.262,
        }
    }
}

impl NozzleShape {
    /// Thrust-optimized bell approximation: 45° inflection, 15° exit.
    pub fn optimal_rao() -> Self {
        Self {
            entrance_radius: 1.5,
            throat_radius: 0.4,
            divergent_radius: 0.5,
            inflection_angle_rad: deg_to_rad(45.0),
            exit_angle_rad: deg_to_rad(15.0),
        }
    }
}

/// Full parameter set for one engine. Lengths and diameters are in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfiguration {
    pub throat_diameter_m: f64,
    /// Diameter of the nozzle exit plane.
    pub nozzle_diameter_m: f64,
    pub nozzle_length_m: f64,
    pub chamber_diameter_m: f64,
    pub chamber_length_m: f64,
    pub nozzle: NozzleShape,
    pub propellant: Propellant,
}

impl Default for EngineConfiguration {
    fn default() -> Self {
        Self {
            throat_diameter_m: 1.0,
            nozzle_diameter_m: 1.0,
            nozzle_length_m: 1.0,
            chamber_diameter_m: 1.0,
            chamber_length_m: 2.0,
            nozzle: NozzleShape::default(),
            propellant: PropellantId::Kerolox.propellant(),
        }
    }
}

impl EngineConfiguration {
    pub fn new(
        throat_diameter_m: f64,
        nozzle_diameter_m: f64,
        nozzle_length_m: f64,
        chamber_diameter_m: f64,
        chamber_length_m: f64,
        nozzle: NozzleShape,
        propellant: Propellant,
    ) -> Self {
        Self {
            throat_diameter_m,
            nozzle_diameter_m,
            nozzle_length_m,
            chamber_diameter_m,
            chamber_length_m,
            nozzle,
            propellant,
        }
    }

    /// Methalox engine with the optimal Rao bell, sized for on-screen inspection.
    pub fn optimal_rao() -> Self {
        Self::new(
            0.5,
            1.0,
            1.0,
            1.5,
            2.0,
            NozzleShape::optimal_rao(),
            PropellantId::Methalox.propellant(),
        )
    }

    /// Exit area over throat area, from the diameter ratio squared.
    pub fn expansion_ratio(&self) -> f64 {
        (self.nozzle_diameter_m * self.nozzle_diameter_m)
            / (self.throat_diameter_m * self.throat_diameter_m)
    }

    /// Cylindrical chamber volume in m³.
    pub fn chamber_volume(&self) -> f64 {
        let radius = self.chamber_radius_m();
        PI * radius * radius * self.chamber_length_m
    }

    pub fn throat_radius_m(&self) -> f64 {
        radius_of(self.throat_diameter_m)
    }

    pub fn chamber_radius_m(&self) -> f64 {
        radius_of(self.chamber_diameter_m)
    }

    pub fn exit_radius_m(&self) -> f64 {
        radius_of(self.nozzle_diameter_m)
    }

    /// Copy a catalog propellant into this configuration.
    pub fn select_propellant(&mut self, id: PropellantId) {
        self.propellant = id.propellant();
    }
}
