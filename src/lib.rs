//! Rocket engine cross-section visualizer core.
//!
//! The workspace crates hold the engine model, the contour generator, catalog
//! loading, and export. This crate ties them into a [`session::Session`] that a
//! front-end drives once per frame, and hosts the command-line front-ends.

pub mod catalog;
pub mod logging;
pub mod session;

pub use nozzle_config as config;
pub use nozzle_contour as contour;
pub use nozzle_core::{units, vector};
pub use nozzle_engine as engine;
pub use nozzle_export as export;
pub use nozzle_propellant as propellant;
