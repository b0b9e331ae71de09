//! Hardware module for telescope and camera configurations

pub mod imaging_system;
pub mod sensor;
pub mod telescope;

use thiserror::Error;

pub use imaging_system::ImagingSystem;
pub use sensor::{resolve_camera, RawCamera, ResolvedCamera};
pub use telescope::{
    resolve_telescope, resolve_telescopes, Fallback, FallbackPolicy, RawTelescope,
    ResolvedTelescope,
};

/// Errors raised while turning partial user input into resolved hardware
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ResolveError {
    #[error(
        "Need ONLY 2 out of 3 of Telescope {telescope} aperture Diameter, Focal length, Focal ratio"
    )]
    Overspecified { telescope: usize },

    #[error("Need 2 out of 3 of Telescope {telescope} aperture Diameter, Focal length, Focal ratio")]
    Underspecified { telescope: usize },

    #[error("{subject} {name} must be {reason}, got {value}")]
    InvalidParameter {
        subject: String,
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Check that an optional input is finite and strictly positive
pub(crate) fn positive(
    subject: &str,
    name: &'static str,
    value: Option<f64>,
) -> Result<Option<f64>, ResolveError> {
    match value {
        Some(v) if !(v.is_finite() && v > 0.0) => Err(ResolveError::InvalidParameter {
            subject: subject.to_string(),
            name,
            value: v,
            reason: "a positive number",
        }),
        other => Ok(other),
    }
}

/// Check that a fraction lies in (0, 1], or [0, 1) when `allow_zero` is set
pub(crate) fn fraction(
    subject: &str,
    name: &'static str,
    value: Option<f64>,
    allow_zero: bool,
) -> Result<Option<f64>, ResolveError> {
    let Some(v) = value else {
        return Ok(None);
    };
    let ok = if allow_zero {
        (0.0..1.0).contains(&v)
    } else {
        v > 0.0 && v <= 1.0
    };
    if ok {
        Ok(Some(v))
    } else {
        Err(ResolveError::InvalidParameter {
            subject: subject.to_string(),
            name,
            value: v,
            reason: if allow_zero {
                "in the range [0, 1)"
            } else {
                "in the range (0, 1]"
            },
        })
    }
}
