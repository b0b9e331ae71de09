//! Telescope optical configuration and parameter resolution.
//!
//! Users rarely describe a telescope completely. A refractor is usually quoted
//! as aperture plus focal length, a Celestron SCT as aperture plus focal ratio,
//! and a reducer multiplies whichever focal quantity was given. This module
//! fills in the rest of the {aperture, focal length, focal ratio} triplet from
//! whatever two values are available, and rejects input that gives all three.
//!
//! # Resolution rules
//!
//! With `r` the effective focal reducer (user reducer × camera reducer):
//!
//! | aperture | length | ratio | result                                   |
//! |----------|--------|-------|------------------------------------------|
//! | D        | L      | F     | overspecified                            |
//! | D        | L      | -     | L' = L·r, F = L'/D                       |
//! | D        | -      | F?    | F' = (F or 10)·r, L = D·F'               |
//! | -        | L      | F     | L' = L·r, F' = F·r, D = L'/F'            |
//! | -        | L      | -     | L' = L·r, D = 100 mm, F = L'/D           |
//! | -        | -      | F?    | defaults (100 mm, f/10) or inherit       |
//!
//! The last row is where the two telescopes differ: the first one falls back
//! to a 100 mm f/10 instrument, the second one copies the first.
//!
//! # Examples
//!
//! ```rust
//! use compare_telescopes::hardware::telescope::{resolve_telescope, Fallback, RawTelescope};
//!
//! let raw = RawTelescope::new().with_aperture_mm(80.0).with_focal_length_mm(600.0);
//! let ed80 = resolve_telescope(1, &raw, Fallback::Defaults)?;
//!
//! assert_eq!(ed80.focal_ratio, 7.5);
//! println!("Plate scale: {:.1} arcsec/mm", ed80.plate_scale_arcsec_per_mm);
//! # Ok::<(), compare_telescopes::hardware::ResolveError>(())
//! ```

use log::debug;
use std::f64::consts::PI;

use super::{fraction, positive, ResolveError};
use crate::units::{inches_to_mm, ARCSEC_PER_RADIAN};

/// Aperture assumed when neither aperture nor a ratio+length pair is given
pub const DEFAULT_APERTURE_MM: f64 = 100.0;

/// Focal ratio assumed when neither ratio nor focal length is given
pub const DEFAULT_FOCAL_RATIO: f64 = 10.0;

/// Reference wavelength for the quoted resolving power (green light)
const REFERENCE_WAVELENGTH_M: f64 = 500e-9;

/// Partially specified telescope, as supplied by the user or the gear catalog.
///
/// Every field is optional; [`resolve_telescope`] decides what the missing
/// ones become.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTelescope {
    /// Aperture diameter in millimeters
    pub aperture_diameter_mm: Option<f64>,
    /// Aperture diameter in inches, used only when no millimeter value is set
    pub aperture_diameter_in: Option<f64>,
    /// Native focal length in millimeters
    pub focal_length_mm: Option<f64>,
    /// Native focal ratio (focal length / aperture)
    pub focal_ratio: Option<f64>,
    /// Focal reducer or extender factor supplied by the user
    pub focal_reducer: Option<f64>,
    /// Reducer factor contributed by the attached camera's catalog entry
    pub camera_reducer: Option<f64>,
    /// Central obstruction as a fraction of the aperture diameter
    pub obstruction_ratio: Option<f64>,
    /// Total optical transmittance (0.0-1.0)
    pub transmittance_factor: Option<f64>,
}

impl RawTelescope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_aperture_mm(mut self, aperture_mm: f64) -> Self {
        self.aperture_diameter_mm = Some(aperture_mm);
        self
    }

    pub fn with_aperture_in(mut self, aperture_in: f64) -> Self {
        self.aperture_diameter_in = Some(aperture_in);
        self
    }

    pub fn with_focal_length_mm(mut self, focal_length_mm: f64) -> Self {
        self.focal_length_mm = Some(focal_length_mm);
        self
    }

    pub fn with_focal_ratio(mut self, focal_ratio: f64) -> Self {
        self.focal_ratio = Some(focal_ratio);
        self
    }

    pub fn with_reducer(mut self, reducer: f64) -> Self {
        self.focal_reducer = Some(reducer);
        self
    }

    pub fn with_obstruction(mut self, ratio: f64) -> Self {
        self.obstruction_ratio = Some(ratio);
        self
    }

    pub fn with_transmittance(mut self, factor: f64) -> Self {
        self.transmittance_factor = Some(factor);
        self
    }

    /// Aperture in millimeters, preferring the millimeter value over inches
    pub fn aperture_mm(&self) -> Option<f64> {
        self.aperture_diameter_mm
            .or_else(|| self.aperture_diameter_in.map(inches_to_mm))
    }

    /// Number of {aperture, focal length, focal ratio} values supplied
    pub fn supplied_count(&self) -> usize {
        [
            self.aperture_mm(),
            self.focal_length_mm,
            self.focal_ratio,
        ]
        .iter()
        .filter(|v| v.is_some())
        .count()
    }
}

/// Fully resolved telescope optics.
///
/// Built once by [`resolve_telescope`] and never modified afterwards. All
/// derived quantities are stored so that reports can print them directly.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTelescope {
    /// Clear aperture diameter in millimeters
    pub aperture_diameter_mm: f64,
    /// Effective focal length in millimeters, reducer included
    pub focal_length_mm: f64,
    /// Effective focal ratio, reducer included
    pub focal_ratio: f64,
    /// Effective reducer that was applied
    pub focal_reducer: f64,
    /// Central obstruction as a fraction of the aperture diameter
    pub obstruction_ratio: f64,
    /// Central obstruction diameter in millimeters
    pub obstruction_diameter_mm: f64,
    /// Unobstructed collecting area in square millimeters
    pub aperture_area_mm2: f64,
    /// Diffraction limit at 500nm in arcseconds
    pub resolving_power_arcsec: f64,
    /// Plate scale in arcseconds per millimeter
    pub plate_scale_arcsec_per_mm: f64,
    /// Total optical transmittance (0.0-1.0)
    pub transmittance_factor: f64,
}

impl ResolvedTelescope {
    fn from_optics(
        aperture_diameter_mm: f64,
        focal_length_mm: f64,
        focal_ratio: f64,
        focal_reducer: f64,
        obstruction_ratio: f64,
        transmittance_factor: f64,
    ) -> Self {
        let obstruction_diameter_mm = obstruction_ratio * aperture_diameter_mm;
        let obstruction_area = PI * (obstruction_diameter_mm / 2.0).powi(2);
        let aperture_area_mm2 = PI * (aperture_diameter_mm / 2.0).powi(2) - obstruction_area;

        // 1.22 λ / D in radians, converted to arcseconds
        let resolving_power_arcsec = 1.22 * REFERENCE_WAVELENGTH_M * 180.0
            / (aperture_diameter_mm / 1000.0 * PI)
            * 3600.0;
        let plate_scale_arcsec_per_mm = ARCSEC_PER_RADIAN / (focal_ratio * aperture_diameter_mm);

        Self {
            aperture_diameter_mm,
            focal_length_mm,
            focal_ratio,
            focal_reducer,
            obstruction_ratio,
            obstruction_diameter_mm,
            aperture_area_mm2,
            resolving_power_arcsec,
            plate_scale_arcsec_per_mm,
            transmittance_factor,
        }
    }

    /// Plate scale expressed as micrometers on the sensor per arcsecond
    pub fn um_per_arcsec(&self) -> f64 {
        1000.0 / self.plate_scale_arcsec_per_mm
    }
}

/// What to do with a telescope that gives neither aperture nor focal length
#[derive(Debug, Clone, Copy)]
pub enum Fallback<'a> {
    /// Assume a 100 mm aperture and, without a ratio, f/10
    Defaults,
    /// Copy aperture, focal ratio, obstruction and transmittance from another telescope
    Inherit(&'a ResolvedTelescope),
    /// Refuse anything with fewer than two of the three optics values
    Strict,
}

/// How the second telescope treats missing optics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Fill the gaps from the first telescope
    #[default]
    InheritFirst,
    /// Fail with [`ResolveError::Underspecified`]
    Strict,
}

/// Resolve one telescope.
///
/// `index` only labels errors and log output.
///
/// # Errors
///
/// * [`ResolveError::Overspecified`] when aperture, focal length and focal ratio are all given
/// * [`ResolveError::Underspecified`] under [`Fallback::Strict`] with fewer than two given
/// * [`ResolveError::InvalidParameter`] for non-positive values or out-of-range fractions
pub fn resolve_telescope(
    index: usize,
    raw: &RawTelescope,
    fallback: Fallback<'_>,
) -> Result<ResolvedTelescope, ResolveError> {
    let subject = format!("Telescope {index}");

    let aperture = positive(&subject, "aperture diameter", raw.aperture_mm())?;
    let length = positive(&subject, "focal length", raw.focal_length_mm)?;
    let ratio = positive(&subject, "focal ratio", raw.focal_ratio)?;
    let user_reducer = positive(&subject, "focal reducer", raw.focal_reducer)?;
    let camera_reducer = positive(&subject, "camera reducer", raw.camera_reducer)?;
    let obstruction = fraction(&subject, "obstruction ratio", raw.obstruction_ratio, true)?;
    let transmittance = fraction(
        &subject,
        "transmittance factor",
        raw.transmittance_factor,
        false,
    )?;

    let reducer = user_reducer.unwrap_or(1.0) * camera_reducer.unwrap_or(1.0);

    if matches!(fallback, Fallback::Strict) && raw.supplied_count() < 2 {
        return Err(ResolveError::Underspecified { telescope: index });
    }

    let mut obstruction_ratio = obstruction.unwrap_or(0.0);
    let mut transmittance_factor = transmittance.unwrap_or(1.0);

    let (aperture_mm, focal_length_mm, focal_ratio) = match (aperture, length, ratio) {
        (Some(_), Some(_), Some(_)) => {
            return Err(ResolveError::Overspecified { telescope: index });
        }
        (Some(d), Some(l), None) => {
            let l = l * reducer;
            (d, l, l / d)
        }
        (Some(d), None, f) => {
            if f.is_none() {
                debug!("{subject}: no focal ratio or length, assuming f/{DEFAULT_FOCAL_RATIO}");
            }
            let f = f.unwrap_or(DEFAULT_FOCAL_RATIO) * reducer;
            (d, d * f, f)
        }
        (None, Some(l), Some(f)) => {
            let l = l * reducer;
            let f = f * reducer;
            (l / f, l, f)
        }
        (None, Some(l), None) => {
            debug!("{subject}: no aperture, assuming {DEFAULT_APERTURE_MM}mm");
            let l = l * reducer;
            (DEFAULT_APERTURE_MM, l, l / DEFAULT_APERTURE_MM)
        }
        (None, None, f) => match fallback {
            Fallback::Inherit(first) => {
                debug!("{subject}: no aperture or focal length, inheriting from telescope 1");
                let f = match f {
                    Some(f) => f * reducer,
                    // Swap the first telescope's reducer for ours
                    None if user_reducer.is_some() => {
                        first.focal_ratio / first.focal_reducer * reducer
                    }
                    None => first.focal_ratio,
                };
                // The copied optics carry their obstruction and transmittance with them
                if obstruction.is_some() || transmittance.is_some() {
                    debug!("{subject}: obstruction and transmittance taken from telescope 1");
                }
                obstruction_ratio = first.obstruction_ratio;
                transmittance_factor = first.transmittance_factor;
                let d = first.aperture_diameter_mm;
                (d, d * f, f)
            }
            Fallback::Defaults | Fallback::Strict => {
                debug!(
                    "{subject}: no aperture or focal length, assuming {DEFAULT_APERTURE_MM}mm"
                );
                let f = f.unwrap_or(DEFAULT_FOCAL_RATIO) * reducer;
                (DEFAULT_APERTURE_MM, DEFAULT_APERTURE_MM * f, f)
            }
        },
    };

    debug!(
        "{subject}: D={aperture_mm:.1}mm L={focal_length_mm:.1}mm f/{focal_ratio:.2} (reducer {reducer})"
    );

    Ok(ResolvedTelescope::from_optics(
        aperture_mm,
        focal_length_mm,
        focal_ratio,
        reducer,
        obstruction_ratio,
        transmittance_factor,
    ))
}

/// Resolve both telescopes of a comparison, the second against the first
pub fn resolve_telescopes(
    first: &RawTelescope,
    second: &RawTelescope,
    policy: FallbackPolicy,
) -> Result<(ResolvedTelescope, ResolvedTelescope), ResolveError> {
    let t1 = resolve_telescope(1, first, Fallback::Defaults)?;
    let fallback = match policy {
        FallbackPolicy::InheritFirst => Fallback::Inherit(&t1),
        FallbackPolicy::Strict => Fallback::Strict,
    };
    let t2 = resolve_telescope(2, second, fallback)?;
    Ok((t1, t2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use float_cmp::approx_eq;

    fn resolve(raw: RawTelescope) -> ResolvedTelescope {
        resolve_telescope(1, &raw, Fallback::Defaults).unwrap()
    }

    #[test]
    fn test_aperture_and_length() {
        let t = resolve(RawTelescope::new().with_aperture_mm(130.0).with_focal_length_mm(650.0));
        assert_eq!(t.aperture_diameter_mm, 130.0);
        assert_eq!(t.focal_length_mm, 650.0);
        assert_eq!(t.focal_ratio, 5.0);
    }

    #[test]
    fn test_aperture_and_ratio() {
        let t = resolve(RawTelescope::new().with_aperture_mm(100.0).with_focal_ratio(5.5));
        assert_eq!(t.focal_length_mm, 550.0);
        assert_eq!(t.focal_ratio, 5.5);
    }

    #[test]
    fn test_length_and_ratio() {
        let t = resolve(RawTelescope::new().with_focal_length_mm(1200.0).with_focal_ratio(8.0));
        assert_eq!(t.aperture_diameter_mm, 150.0);
    }

    #[test]
    fn test_aperture_only_defaults_to_f10() {
        let t = resolve(RawTelescope::new().with_aperture_mm(200.0));
        assert_eq!(t.focal_ratio, DEFAULT_FOCAL_RATIO);
        assert_eq!(t.focal_length_mm, 2000.0);
    }

    #[test]
    fn test_length_only_defaults_to_100mm() {
        let t = resolve(RawTelescope::new().with_focal_length_mm(400.0));
        assert_eq!(t.aperture_diameter_mm, DEFAULT_APERTURE_MM);
        assert_eq!(t.focal_ratio, 4.0);
    }

    #[test]
    fn test_nothing_given_defaults() {
        let t = resolve(RawTelescope::new());
        assert_eq!(t.aperture_diameter_mm, 100.0);
        assert_eq!(t.focal_ratio, 10.0);
        assert_eq!(t.focal_length_mm, 1000.0);
        assert_eq!(t.obstruction_ratio, 0.0);
        assert_eq!(t.transmittance_factor, 1.0);
    }

    #[test]
    fn test_ratio_only_uses_default_aperture() {
        let t = resolve(RawTelescope::new().with_focal_ratio(4.0));
        assert_eq!(t.aperture_diameter_mm, 100.0);
        assert_eq!(t.focal_length_mm, 400.0);
    }

    #[test]
    fn test_inches_convert_to_mm() {
        let t = resolve(RawTelescope::new().with_aperture_in(8.0).with_focal_ratio(10.0));
        assert_relative_eq!(t.aperture_diameter_mm, 203.2, epsilon = 1e-9);
        assert_relative_eq!(t.focal_length_mm, 2032.0, epsilon = 1e-9);
    }

    #[test]
    fn test_mm_preferred_over_inches() {
        let raw = RawTelescope::new()
            .with_aperture_mm(200.0)
            .with_aperture_in(8.0)
            .with_focal_ratio(10.0);
        assert_eq!(resolve(raw).aperture_diameter_mm, 200.0);
    }

    #[test]
    fn test_overspecified() {
        let raw = RawTelescope::new()
            .with_aperture_mm(80.0)
            .with_focal_length_mm(600.0)
            .with_focal_ratio(7.5);
        assert_eq!(
            resolve_telescope(1, &raw, Fallback::Defaults),
            Err(ResolveError::Overspecified { telescope: 1 })
        );

        let first = resolve(RawTelescope::new());
        assert_eq!(
            resolve_telescope(2, &raw, Fallback::Inherit(&first)),
            Err(ResolveError::Overspecified { telescope: 2 })
        );
    }

    #[test]
    fn test_overspecified_with_inches() {
        let raw = RawTelescope::new()
            .with_aperture_in(8.0)
            .with_focal_length_mm(2000.0)
            .with_focal_ratio(10.0);
        assert!(matches!(
            resolve_telescope(1, &raw, Fallback::Defaults),
            Err(ResolveError::Overspecified { .. })
        ));
    }

    #[test]
    fn test_reducer_scales_length() {
        let t = resolve(
            RawTelescope::new()
                .with_aperture_mm(200.0)
                .with_focal_length_mm(2000.0)
                .with_reducer(0.63),
        );
        assert_relative_eq!(t.focal_length_mm, 1260.0, epsilon = 1e-9);
        assert_relative_eq!(t.focal_ratio, 6.3, epsilon = 1e-9);
        assert_eq!(t.focal_reducer, 0.63);
    }

    #[test]
    fn test_reducer_scales_ratio() {
        let t = resolve(
            RawTelescope::new()
                .with_aperture_in(11.0)
                .with_focal_ratio(10.0)
                .with_reducer(0.7),
        );
        assert_relative_eq!(t.focal_ratio, 7.0, epsilon = 1e-9);
    }

    #[test]
    fn test_camera_reducer_multiplies_user_reducer() {
        let raw = RawTelescope {
            camera_reducer: Some(1.5),
            ..RawTelescope::new()
                .with_aperture_mm(100.0)
                .with_focal_ratio(10.0)
                .with_reducer(0.5)
        };
        let t = resolve(raw);
        assert_relative_eq!(t.focal_reducer, 0.75, epsilon = 1e-12);
        assert_relative_eq!(t.focal_ratio, 7.5, epsilon = 1e-12);
    }

    #[test]
    fn test_ratio_matches_length_over_aperture() {
        let cases = [
            RawTelescope::new().with_aperture_mm(80.0).with_focal_length_mm(600.0),
            RawTelescope::new().with_aperture_mm(102.0).with_focal_ratio(6.96),
            RawTelescope::new().with_focal_length_mm(3951.0).with_focal_ratio(7.77),
            RawTelescope::new()
                .with_aperture_in(9.25)
                .with_focal_ratio(10.0)
                .with_reducer(0.63),
            RawTelescope::new().with_focal_length_mm(854.0).with_reducer(0.8),
        ];

        for raw in cases {
            let t = resolve(raw);
            assert_relative_eq!(
                t.focal_ratio,
                t.focal_length_mm / t.aperture_diameter_mm,
                max_relative = 1e-9
            );
        }
    }

    #[test]
    fn test_length_and_derived_ratio_agree() {
        let by_length =
            resolve(RawTelescope::new().with_aperture_mm(130.0).with_focal_length_mm(650.0));
        let by_ratio = resolve(
            RawTelescope::new()
                .with_aperture_mm(130.0)
                .with_focal_ratio(by_length.focal_ratio),
        );
        assert_eq!(by_length, by_ratio);

        let by_length =
            resolve(RawTelescope::new().with_aperture_mm(80.0).with_focal_length_mm(600.0));
        let by_ratio = resolve(
            RawTelescope::new()
                .with_aperture_mm(80.0)
                .with_focal_ratio(by_length.focal_ratio),
        );
        assert_eq!(by_length, by_ratio);
    }

    #[test]
    fn test_obstructed_aperture_area() {
        let t = resolve(
            RawTelescope::new()
                .with_aperture_mm(200.0)
                .with_focal_ratio(8.0)
                .with_obstruction(0.35),
        );
        assert!(approx_eq!(f64, t.obstruction_diameter_mm, 70.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, t.aperture_area_mm2, PI * 8775.0, epsilon = 1e-6));
    }

    #[test]
    fn test_resolving_power_and_plate_scale() {
        let t = resolve(RawTelescope::new().with_aperture_mm(100.0).with_focal_length_mm(1000.0));

        // 1.22 * 500nm / 0.1m in arcseconds
        let expected = 1.22 * 500e-9 / 0.1 * ARCSEC_PER_RADIAN;
        assert_relative_eq!(t.resolving_power_arcsec, expected, max_relative = 1e-12);
        assert_relative_eq!(t.resolving_power_arcsec, 1.258, epsilon = 1e-3);

        assert_relative_eq!(
            t.plate_scale_arcsec_per_mm,
            ARCSEC_PER_RADIAN / 1000.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(t.um_per_arcsec(), 4.848, epsilon = 1e-3);
    }

    #[test]
    fn test_second_inherits_first() {
        let first = resolve(
            RawTelescope::new()
                .with_aperture_mm(200.0)
                .with_focal_length_mm(1600.0)
                .with_obstruction(0.56)
                .with_transmittance(0.9),
        );
        let second = resolve_telescope(2, &RawTelescope::new(), Fallback::Inherit(&first)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_second_inherits_aperture_with_own_ratio() {
        let first = resolve(RawTelescope::new().with_aperture_mm(150.0).with_focal_ratio(7.0));
        let second = resolve_telescope(
            2,
            &RawTelescope::new().with_focal_ratio(5.0),
            Fallback::Inherit(&first),
        )
        .unwrap();
        assert_eq!(second.aperture_diameter_mm, 150.0);
        assert_eq!(second.focal_length_mm, 750.0);
    }

    #[test]
    fn test_second_swaps_reducer() {
        let first = resolve(
            RawTelescope::new()
                .with_aperture_mm(200.0)
                .with_focal_ratio(10.0)
                .with_reducer(0.5),
        );
        assert_relative_eq!(first.focal_ratio, 5.0, epsilon = 1e-12);

        let second = resolve_telescope(
            2,
            &RawTelescope::new().with_reducer(0.8),
            Fallback::Inherit(&first),
        )
        .unwrap();
        assert_relative_eq!(second.focal_ratio, 8.0, epsilon = 1e-12);
        assert_relative_eq!(second.focal_length_mm, 1600.0, epsilon = 1e-9);
    }

    #[test]
    fn test_inherited_optics_override_obstruction_and_transmittance() {
        let first = resolve(
            RawTelescope::new()
                .with_aperture_mm(200.0)
                .with_focal_ratio(8.0)
                .with_obstruction(0.4),
        );
        let second = resolve_telescope(
            2,
            &RawTelescope::new()
                .with_obstruction(0.2)
                .with_transmittance(0.5),
            Fallback::Inherit(&first),
        )
        .unwrap();
        assert_eq!(second, first);
        assert_eq!(second.obstruction_ratio, 0.4);
        assert_eq!(second.transmittance_factor, 1.0);

        // A telescope that names its own optics keeps its own obstruction
        let second = resolve_telescope(
            2,
            &RawTelescope::new()
                .with_aperture_mm(200.0)
                .with_focal_ratio(8.0)
                .with_obstruction(0.2),
            Fallback::Inherit(&first),
        )
        .unwrap();
        assert_eq!(second.obstruction_ratio, 0.2);
    }

    #[test]
    fn test_second_with_aperture_does_not_inherit() {
        let first = resolve(RawTelescope::new().with_aperture_mm(200.0).with_obstruction(0.4));
        let second = resolve_telescope(
            2,
            &RawTelescope::new().with_aperture_mm(80.0),
            Fallback::Inherit(&first),
        )
        .unwrap();
        assert_eq!(second.obstruction_ratio, 0.0);
        assert_eq!(second.focal_ratio, DEFAULT_FOCAL_RATIO);
    }

    #[test]
    fn test_strict_policy() {
        let first = RawTelescope::new().with_aperture_mm(80.0).with_focal_length_mm(600.0);

        let err = resolve_telescopes(&first, &RawTelescope::new(), FallbackPolicy::Strict);
        assert_eq!(err, Err(ResolveError::Underspecified { telescope: 2 }));

        let err = resolve_telescopes(
            &first,
            &RawTelescope::new().with_aperture_mm(150.0),
            FallbackPolicy::Strict,
        );
        assert_eq!(err, Err(ResolveError::Underspecified { telescope: 2 }));

        let (_, t2) = resolve_telescopes(
            &first,
            &RawTelescope::new().with_aperture_mm(150.0).with_focal_ratio(7.0),
            FallbackPolicy::Strict,
        )
        .unwrap();
        assert_eq!(t2.focal_length_mm, 1050.0);
    }

    #[test]
    fn test_permissive_policy_copies_first() {
        let first = RawTelescope::new().with_aperture_mm(130.0).with_focal_length_mm(650.0);
        let (t1, t2) =
            resolve_telescopes(&first, &RawTelescope::new(), FallbackPolicy::default()).unwrap();
        assert_eq!(t1, t2);
    }

    #[test]
    fn test_invalid_parameters() {
        let bad = [
            RawTelescope::new().with_aperture_mm(-80.0),
            RawTelescope::new().with_focal_ratio(0.0),
            RawTelescope::new().with_obstruction(1.0),
            RawTelescope::new().with_transmittance(1.5),
            RawTelescope::new().with_reducer(f64::NAN),
        ];
        for raw in bad {
            assert!(matches!(
                resolve_telescope(1, &raw, Fallback::Defaults),
                Err(ResolveError::InvalidParameter { .. })
            ));
        }
    }
}
