//! Session state: the single owner of the live engine configuration.
//!
//! The UI phase of a frame edits the configuration through [`Session::edit`] or
//! [`Session::set_parameter`]; the render phase then calls [`Session::refresh`], which
//! regenerates the contour from the current values. A failed regeneration keeps the
//! last good frame so the caller can keep drawing it.

use std::mem::discriminant;
use std::sync::{Arc, PoisonError, RwLock};

use log::warn;
use nozzle_contour::{
    ContourError, ContourFrame, ContourOptions, Viewport, generate_with, newly_raised,
};
use nozzle_engine::{EngineConfiguration, Parameter, PropellantId};

/// Outcome of one [`Session::refresh`].
#[derive(Debug, Clone, PartialEq)]
pub enum FrameStatus {
    /// The frame now matches the current configuration.
    Fresh,
    /// Generation failed; [`Session::frame`] still holds the previous frame, if any.
    Stale(ContourError),
}

#[derive(Debug, Clone)]
pub struct Session {
    config: EngineConfiguration,
    viewport: Viewport,
    options: ContourOptions,
    frame: Option<ContourFrame>,
    last_error: Option<ContourError>,
}

impl Session {
    pub fn new(config: EngineConfiguration, viewport: Viewport) -> Self {
        Self {
            config,
            viewport,
            options: ContourOptions::default(),
            frame: None,
            last_error: None,
        }
    }

    pub fn with_options(mut self, options: ContourOptions) -> Self {
        self.options = options;
        self
    }

    pub fn configuration(&self) -> &EngineConfiguration {
        &self.config
    }

    /// Exclusive access for the edit phase of a frame.
    pub fn edit(&mut self) -> &mut EngineConfiguration {
        &mut self.config
    }

    /// Copy of the current configuration, safe to hand to another thread.
    pub fn snapshot(&self) -> EngineConfiguration {
        self.config
    }

    /// Slider-style edit: the value is clamped to the parameter's range.
    pub fn set_parameter(&mut self, parameter: Parameter, value: f64) -> f64 {
        self.config.set_clamped(parameter, value)
    }

    pub fn select_propellant(&mut self, id: PropellantId) {
        self.config.select_propellant(id);
    }

    /// Replace the configuration with the latest value written by other threads.
    pub fn sync_from(&mut self, shared: &SharedConfiguration) {
        self.config = shared.snapshot();
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Regenerate the contour from the current configuration and viewport.
    pub fn refresh(&mut self) -> FrameStatus {
        match generate_with(&self.config, self.viewport, &self.options) {
            Ok(frame) => {
                let previous = self.frame.as_ref().map_or(&[][..], |f| &f.warnings[..]);
                for warning in newly_raised(previous, &frame.warnings) {
                    warn!("{warning}");
                }
                self.frame = Some(frame);
                self.last_error = None;
                FrameStatus::Fresh
            }
            Err(err) => {
                let repeated = self
                    .last_error
                    .as_ref()
                    .is_some_and(|last| discriminant(last) == discriminant(&err));
                if !repeated {
                    warn!("contour generation failed, keeping previous frame: {err}");
                }
                self.last_error = Some(err.clone());
                FrameStatus::Stale(err)
            }
        }
    }

    /// Most recent successfully generated frame.
    pub fn frame(&self) -> Option<&ContourFrame> {
        self.frame.as_ref()
    }

    /// Error from the latest refresh, cleared by the next successful one.
    pub fn last_error(&self) -> Option<&ContourError> {
        self.last_error.as_ref()
    }
}

/// Configuration handle for editing from a thread other than the one rendering.
///
/// Writers go through [`SharedConfiguration::update`]; the renderer takes a
/// [`SharedConfiguration::snapshot`] and generates from the copy without holding the lock.
#[derive(Debug, Clone, Default)]
pub struct SharedConfiguration {
    inner: Arc<RwLock<EngineConfiguration>>,
}

impl SharedConfiguration {
    pub fn new(config: EngineConfiguration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    pub fn update<R>(&self, edit: impl FnOnce(&mut EngineConfiguration) -> R) -> R {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        edit(&mut *guard)
    }

    pub fn snapshot(&self) -> EngineConfiguration {
        *self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }
}
