//! Camera sensor configuration and defaulting

use log::debug;

use super::{fraction, positive, ResolveError};

/// Horizontal and vertical pixel count of the default camera
pub const DEFAULT_PIXELS: u32 = 1000;

/// Pixel size of the default camera in microns
pub const DEFAULT_PIXEL_SIZE_UM: f64 = 3.8;

/// Quantum efficiency of the default camera
pub const DEFAULT_QUANTUM_EFFICIENCY: f64 = 1.0;

/// Partially specified camera, as supplied by the user or the gear catalog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCamera {
    /// Width of sensor in pixels
    pub horizontal_pixels: Option<u32>,
    /// Height of sensor in pixels
    pub vertical_pixels: Option<u32>,
    /// Pixel size in microns
    pub pixel_size_um: Option<f64>,
    /// Quantum efficiency (0.0-1.0)
    pub quantum_efficiency: Option<f64>,
    /// Binning factor, 1 for unbinned
    pub binning: Option<f64>,
}

impl RawCamera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pixels(mut self, horizontal: u32, vertical: u32) -> Self {
        self.horizontal_pixels = Some(horizontal);
        self.vertical_pixels = Some(vertical);
        self
    }

    pub fn with_pixel_size_um(mut self, pixel_size_um: f64) -> Self {
        self.pixel_size_um = Some(pixel_size_um);
        self
    }

    pub fn with_quantum_efficiency(mut self, qe: f64) -> Self {
        self.quantum_efficiency = Some(qe);
        self
    }

    pub fn with_binning(mut self, binning: f64) -> Self {
        self.binning = Some(binning);
        self
    }
}

/// Resolved camera.
///
/// Stores the native (unbinned) sensor geometry. Binning is applied through
/// the `effective_*` accessors: it trades resolution for larger pixels and
/// leaves the physical sensor area alone.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCamera {
    /// Native width of sensor in pixels
    pub horizontal_pixels: u32,
    /// Native height of sensor in pixels
    pub vertical_pixels: u32,
    /// Native pixel size in microns
    pub pixel_size_um: f64,
    /// Quantum efficiency (0.0-1.0)
    pub quantum_efficiency: f64,
    /// Binning factor
    pub binning: f64,
}

impl ResolvedCamera {
    /// Width in binned pixels
    pub fn effective_h(&self) -> f64 {
        self.horizontal_pixels as f64 / self.binning
    }

    /// Height in binned pixels
    pub fn effective_v(&self) -> f64 {
        self.vertical_pixels as f64 / self.binning
    }

    /// Size of one binned pixel in microns
    pub fn effective_pixel_size_um(&self) -> f64 {
        self.pixel_size_um * self.binning
    }

    /// Get sensor dimensions in millimeters
    pub fn dimensions_mm(&self) -> (f64, f64) {
        let pixel_mm = self.effective_pixel_size_um() / 1e3;
        (self.effective_h() * pixel_mm, self.effective_v() * pixel_mm)
    }

    /// Sensor area in square microns
    pub fn sensor_area_um2(&self) -> f64 {
        let pixel = self.effective_pixel_size_um();
        self.effective_h() * pixel * self.effective_v() * pixel
    }
}

/// Resolve one camera.
///
/// Without a fallback the defaults are a 1000x1000 sensor of 3.8μm pixels at
/// 100% QE. With a fallback, every missing value except binning is copied from
/// the fallback camera's native values. Binning always defaults to 1.
pub fn resolve_camera(
    index: usize,
    raw: &RawCamera,
    fallback: Option<&ResolvedCamera>,
) -> Result<ResolvedCamera, ResolveError> {
    let subject = format!("Camera {index}");

    positive(&subject, "horizontal pixels", raw.horizontal_pixels.map(f64::from))?;
    positive(&subject, "vertical pixels", raw.vertical_pixels.map(f64::from))?;
    let pixel_size_um = positive(&subject, "pixel size", raw.pixel_size_um)?;
    let quantum_efficiency =
        fraction(&subject, "quantum efficiency", raw.quantum_efficiency, false)?;

    let binning = raw.binning.unwrap_or(1.0);
    if !(binning.is_finite() && binning >= 1.0) {
        return Err(ResolveError::InvalidParameter {
            subject,
            name: "binning factor",
            value: binning,
            reason: "at least 1",
        });
    }

    let (base_h, base_v, base_p, base_q) = match fallback {
        Some(c) => (
            c.horizontal_pixels,
            c.vertical_pixels,
            c.pixel_size_um,
            c.quantum_efficiency,
        ),
        None => (
            DEFAULT_PIXELS,
            DEFAULT_PIXELS,
            DEFAULT_PIXEL_SIZE_UM,
            DEFAULT_QUANTUM_EFFICIENCY,
        ),
    };

    let camera = ResolvedCamera {
        horizontal_pixels: raw.horizontal_pixels.unwrap_or(base_h),
        vertical_pixels: raw.vertical_pixels.unwrap_or(base_v),
        pixel_size_um: pixel_size_um.unwrap_or(base_p),
        quantum_efficiency: quantum_efficiency.unwrap_or(base_q),
        binning,
    };

    debug!(
        "{subject}: {}x{} px of {}μm, QE {}, bin {}",
        camera.horizontal_pixels,
        camera.vertical_pixels,
        camera.pixel_size_um,
        camera.quantum_efficiency,
        camera.binning
    );

    Ok(camera)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_camera() {
        let c = resolve_camera(1, &RawCamera::new(), None).unwrap();
        assert_eq!(c.horizontal_pixels, 1000);
        assert_eq!(c.vertical_pixels, 1000);
        assert_eq!(c.pixel_size_um, 3.8);
        assert_eq!(c.quantum_efficiency, 1.0);
        assert_eq!(c.binning, 1.0);
    }

    #[test]
    fn test_second_inherits_native_values() {
        let first = resolve_camera(
            1,
            &RawCamera::new()
                .with_pixels(6248, 4176)
                .with_pixel_size_um(3.76)
                .with_quantum_efficiency(0.8)
                .with_binning(2.0),
            None,
        )
        .unwrap();

        let second = resolve_camera(2, &RawCamera::new(), Some(&first)).unwrap();
        assert_eq!(second.horizontal_pixels, 6248);
        assert_eq!(second.vertical_pixels, 4176);
        assert_eq!(second.pixel_size_um, 3.76);
        assert_eq!(second.quantum_efficiency, 0.8);
        // binning is never inherited
        assert_eq!(second.binning, 1.0);
    }

    #[test]
    fn test_second_overrides_single_field() {
        let first = resolve_camera(1, &RawCamera::new(), None).unwrap();
        let second = resolve_camera(
            2,
            &RawCamera::new().with_pixel_size_um(2.4),
            Some(&first),
        )
        .unwrap();
        assert_eq!(second.pixel_size_um, 2.4);
        assert_eq!(second.horizontal_pixels, 1000);
    }

    #[test]
    fn test_binning_preserves_sensor_area() {
        let raw = RawCamera::new().with_pixels(4656, 3520).with_pixel_size_um(3.8);
        let unbinned = resolve_camera(1, &raw, None).unwrap();
        let binned = resolve_camera(1, &raw.clone().with_binning(2.0), None).unwrap();

        assert_eq!(binned.effective_h(), 2328.0);
        assert_eq!(binned.effective_v(), 1760.0);
        assert_eq!(binned.effective_pixel_size_um(), 7.6);
        assert_relative_eq!(
            binned.sensor_area_um2(),
            unbinned.sensor_area_um2(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_sensor_dimensions() {
        let c = resolve_camera(
            1,
            &RawCamera::new().with_pixels(1000, 500).with_pixel_size_um(4.0),
            None,
        )
        .unwrap();
        let (w, h) = c.dimensions_mm();
        assert_relative_eq!(w, 4.0, epsilon = 1e-12);
        assert_relative_eq!(h, 2.0, epsilon = 1e-12);
        assert_relative_eq!(c.sensor_area_um2(), 8.0e6, max_relative = 1e-12);
    }

    #[test]
    fn test_invalid_camera_values() {
        let bad = [
            RawCamera::new().with_pixels(0, 1000),
            RawCamera::new().with_pixel_size_um(-1.0),
            RawCamera::new().with_quantum_efficiency(1.1),
            RawCamera::new().with_binning(0.5),
        ];
        for raw in bad {
            assert!(matches!(
                resolve_camera(1, &raw, None),
                Err(ResolveError::InvalidParameter { .. })
            ));
        }
    }
}
