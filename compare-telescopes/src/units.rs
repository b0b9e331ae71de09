//! Type-safe length units for telescope parameters
//!
//! Aperture diameters arrive in millimeters or inches. This module wraps the
//! `uom` crate so the inch conversion is done once, in one place.

use std::f64::consts::PI;

use uom::si::length::{inch, millimeter};

/// Type alias for length measurements with convenient methods
pub type Length = uom::si::f64::Length;

/// Arcseconds in one radian: (360 / 2π) · 3600 ≈ 206264.806
pub const ARCSEC_PER_RADIAN: f64 = (360.0 / (2.0 * PI)) * 60.0 * 60.0;

/// Extension trait for the length conversions used by amateur optics
pub trait LengthExt {
    /// Create length from inches (catalog apertures such as 8" SCTs)
    fn from_inches(inches: f64) -> Self;

    /// Get length in millimeters
    fn as_millimeters(&self) -> f64;
}

impl LengthExt for Length {
    fn from_inches(inches: f64) -> Self {
        Length::new::<inch>(inches)
    }

    fn as_millimeters(&self) -> f64 {
        self.get::<millimeter>()
    }
}

/// Convert an aperture given in inches to millimeters
pub fn inches_to_mm(inches: f64) -> f64 {
    Length::from_inches(inches).as_millimeters()
}
