//! Comparison metrics between two imaging systems.
//!
//! Every metric is reported as an absolute value per system (where one exists)
//! and as a [`Ratio`] between the two systems. Both directions of each ratio
//! are evaluated from the operands rather than by taking a reciprocal, so the
//! printed "A vs B" and "B vs A" numbers are each as exact as the inputs allow.

use crate::hardware::ImagingSystem;

/// A ratio between the first and second system, in both directions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ratio {
    pub first_over_second: f64,
    pub second_over_first: f64,
}

impl Ratio {
    /// Ratio of two absolute quantities
    pub fn between(first: f64, second: f64) -> Self {
        Self {
            first_over_second: first / second,
            second_over_first: second / first,
        }
    }

    /// Build from a function evaluated once with each system in front
    fn directional<F>(first: &ImagingSystem, second: &ImagingSystem, f: F) -> Self
    where
        F: Fn(&ImagingSystem, &ImagingSystem) -> f64,
    {
        Self {
            first_over_second: f(first, second),
            second_over_first: f(second, first),
        }
    }

    /// The ratio seen from the requested side (1 for first, anything else for second)
    pub fn from_side(&self, index: usize) -> f64 {
        if index == 1 {
            self.first_over_second
        } else {
            self.second_over_first
        }
    }
}

/// Absolute metrics of a single telescope and camera combination
#[derive(Debug, Clone, PartialEq)]
pub struct SystemMetrics {
    /// Arcseconds per (binned) pixel
    pub pixel_scale_arcsec: f64,
    pub fov_h_arcsec: f64,
    pub fov_v_arcsec: f64,
    pub fov_h_arcmin: f64,
    pub fov_v_arcmin: f64,
    pub fov_area_arcsec2: f64,
    pub etendue_m2arcsec2: f64,
    pub pixel_etendue_mm2arcsec2: f64,
    /// Pixel etendue × QE × transmittance
    pub pixel_signal: f64,
}

impl SystemMetrics {
    pub fn of(system: &ImagingSystem) -> Self {
        let (fov_h_arcsec, fov_v_arcsec) = system.field_of_view_arcsec();
        let (fov_h_arcmin, fov_v_arcmin) = system.field_of_view_arcmin();
        Self {
            pixel_scale_arcsec: system.pixel_scale_arcsec(),
            fov_h_arcsec,
            fov_v_arcsec,
            fov_h_arcmin,
            fov_v_arcmin,
            fov_area_arcsec2: system.fov_area_arcsec2(),
            etendue_m2arcsec2: system.etendue_m2arcsec2(),
            pixel_etendue_mm2arcsec2: system.pixel_etendue_mm2arcsec2(),
            pixel_signal: system.pixel_signal(),
        }
    }
}

/// Full comparison of two imaging systems
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSet {
    pub first: SystemMetrics,
    pub second: SystemMetrics,
    pub fov_area: Ratio,
    /// Speed for area-filling targets; depends on focal ratio only
    pub extended_object_irradiance: Ratio,
    /// Speed for stars; focal ratio and aperture area
    pub point_object_irradiance: Ratio,
    pub aperture_area: Ratio,
    pub sensor_area: Ratio,
    pub etendue: Ratio,
    pub pixel_etendue: Ratio,
    pub pixel_signal: Ratio,
    /// Aperture area × QE × transmittance
    pub object_signal: Ratio,
}

impl MetricSet {
    /// Absolute metrics for system 1 or 2
    pub fn system(&self, index: usize) -> &SystemMetrics {
        if index == 1 {
            &self.first
        } else {
            &self.second
        }
    }
}

fn extended_object_irradiance(a: &ImagingSystem, b: &ImagingSystem) -> f64 {
    (b.telescope.focal_ratio / a.telescope.focal_ratio).powi(2)
}

fn object_signal(a: &ImagingSystem, b: &ImagingSystem) -> f64 {
    a.telescope.aperture_area_mm2 / b.telescope.aperture_area_mm2
        * (a.camera.quantum_efficiency / b.camera.quantum_efficiency)
        * (a.telescope.transmittance_factor / b.telescope.transmittance_factor)
}

/// Compute every metric for a pair of imaging systems
pub fn compute_metrics(first: &ImagingSystem, second: &ImagingSystem) -> MetricSet {
    let m1 = SystemMetrics::of(first);
    let m2 = SystemMetrics::of(second);

    let extended = Ratio::directional(first, second, extended_object_irradiance);
    let aperture_area = Ratio::between(
        first.telescope.aperture_area_mm2,
        second.telescope.aperture_area_mm2,
    );
    let point_object_irradiance = Ratio {
        first_over_second: extended.first_over_second * aperture_area.first_over_second,
        second_over_first: extended.second_over_first * aperture_area.second_over_first,
    };

    MetricSet {
        fov_area: Ratio::between(m1.fov_area_arcsec2, m2.fov_area_arcsec2),
        extended_object_irradiance: extended,
        point_object_irradiance,
        aperture_area,
        sensor_area: Ratio::between(
            first.camera.sensor_area_um2(),
            second.camera.sensor_area_um2(),
        ),
        etendue: Ratio::between(m1.etendue_m2arcsec2, m2.etendue_m2arcsec2),
        pixel_etendue: Ratio::between(m1.pixel_etendue_mm2arcsec2, m2.pixel_etendue_mm2arcsec2),
        pixel_signal: Ratio::between(m1.pixel_signal, m2.pixel_signal),
        object_signal: Ratio::directional(first, second, object_signal),
        first: m1,
        second: m2,
    }
}
