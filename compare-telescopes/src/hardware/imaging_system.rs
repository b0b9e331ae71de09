use super::{sensor::ResolvedCamera, telescope::ResolvedTelescope};
use crate::units::ARCSEC_PER_RADIAN;

/// A telescope with a camera at its focus
#[derive(Debug, Clone, PartialEq)]
pub struct ImagingSystem {
    /// Resolved telescope optics
    pub telescope: ResolvedTelescope,
    /// Resolved camera
    pub camera: ResolvedCamera,
}

impl ImagingSystem {
    /// Create a new imaging system
    pub fn new(telescope: ResolvedTelescope, camera: ResolvedCamera) -> Self {
        Self { telescope, camera }
    }

    /// Get the pixel scale in arcseconds per (binned) pixel
    pub fn pixel_scale_arcsec(&self) -> f64 {
        ARCSEC_PER_RADIAN / self.telescope.focal_length_mm * self.camera.effective_pixel_size_um()
            / 1000.0
    }

    /// Get the field of view in arcseconds for the sensor
    pub fn field_of_view_arcsec(&self) -> (f64, f64) {
        let arcsec_per_pixel = self.pixel_scale_arcsec();
        (
            self.camera.effective_h() * arcsec_per_pixel,
            self.camera.effective_v() * arcsec_per_pixel,
        )
    }

    /// Get the field of view in arcminutes for the sensor
    pub fn field_of_view_arcmin(&self) -> (f64, f64) {
        let (width, height) = self.field_of_view_arcsec();
        (width / 60.0, height / 60.0)
    }

    /// Solid angle covered by the sensor in square arcseconds
    pub fn fov_area_arcsec2(&self) -> f64 {
        let (width, height) = self.field_of_view_arcsec();
        width * height
    }

    /// Etendue of the whole system in m²·arcsec²
    pub fn etendue_m2arcsec2(&self) -> f64 {
        self.telescope.aperture_area_mm2 * self.fov_area_arcsec2() / 1e6
    }

    /// Etendue of a single pixel in mm²·arcsec²
    pub fn pixel_etendue_mm2arcsec2(&self) -> f64 {
        self.telescope.aperture_area_mm2 * self.pixel_scale_arcsec().powi(2)
    }

    /// Pixel etendue corrected for QE and optical transmittance
    pub fn pixel_signal(&self) -> f64 {
        self.pixel_etendue_mm2arcsec2()
            * self.camera.quantum_efficiency
            * self.telescope.transmittance_factor
    }
}
