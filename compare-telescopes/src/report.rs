//! Text rendering of a comparison.
//!
//! Every renderer returns a `String` so the binary only has to print it.

use log::debug;
use std::fmt::Write;
use thiserror::Error;
use url::Url;

use crate::args::Args;
use crate::catalog::{nonzero, Catalog, CatalogError};
use crate::comparison::Comparison;
use crate::hardware::ResolveError;

/// Web version of the calculator; the share URL points here
pub const SHARE_BASE_URL: &str = "https://lambermont.dyndns.org/astro/code/compare-telescopes.html?a";

/// Column key for the brief output
pub const LEGEND: &str = "# F-number focalLength apertureDiameter Obstruction RESolution FieldOfView \
ExtendedObjectIrradiance PixelOI Etendue PixelEtendue PixelSignal ObjectSignal";

const SEPARATOR: &str = "---";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Invalid share URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Complete program output for a comparison: share URL, blank line, report.
///
/// Both systems are resolved before anything is rendered, so invalid input
/// yields only the error.
pub fn render(args: &Args, catalog: Option<&Catalog>) -> Result<String, ReportError> {
    let inputs = args.inputs(catalog)?;
    debug!("Comparison inputs: {inputs:?}");
    let comparison = Comparison::resolve(&inputs)?;

    let mut out = format!("{}\n\n", share_url(args)?);
    if args.brief || !args.detail {
        out.push_str(&brief(&comparison, args.legend));
    } else {
        out.push_str(&detail(&comparison));
    }
    Ok(out)
}

/// Link that reproduces the command line in the web calculator.
///
/// Only flags the user actually gave (and that are not zero) are included,
/// in a fixed order: telescope 1, camera 1, telescope 2, camera 2.
pub fn share_url(args: &Args) -> Result<Url, url::ParseError> {
    let pairs: [(&str, Option<f64>); 24] = [
        ("d1", nonzero(args.d1)),
        ("di1", nonzero(args.di1)),
        ("o1", nonzero(args.o1)),
        ("l1", nonzero(args.l1)),
        ("f1", nonzero(args.f1)),
        ("r1", nonzero(args.r1)),
        ("t1", nonzero(args.t1)),
        ("c1h", nonzero(args.c1h.map(f64::from))),
        ("c1v", nonzero(args.c1v.map(f64::from))),
        ("c1p", nonzero(args.c1p)),
        ("c1q", nonzero(args.c1q)),
        ("c1b", nonzero(args.c1b)),
        ("d2", nonzero(args.d2)),
        ("di2", nonzero(args.di2)),
        ("o2", nonzero(args.o2)),
        ("l2", nonzero(args.l2)),
        ("f2", nonzero(args.f2)),
        ("r2", nonzero(args.r2)),
        ("t2", nonzero(args.t2)),
        ("c2h", nonzero(args.c2h.map(f64::from))),
        ("c2v", nonzero(args.c2v.map(f64::from))),
        ("c2p", nonzero(args.c2p)),
        ("c2q", nonzero(args.c2q)),
        ("c2b", nonzero(args.c2b)),
    ];

    let mut url = Url::parse(SHARE_BASE_URL)?;
    {
        let mut query = url.query_pairs_mut();
        for (key, value) in pairs {
            if let Some(value) = value {
                query.append_pair(key, &value.to_string());
            }
        }
    }
    Ok(url)
}

/// One summary line per telescope, optionally followed by the legend
pub fn brief(comparison: &Comparison, legend: bool) -> String {
    let mut out = String::new();
    for index in [1, 2] {
        out.push_str(&brief_line(comparison, index));
        out.push('\n');
    }
    if legend {
        out.push_str(LEGEND);
        out.push('\n');
    }
    out
}

fn brief_line(comparison: &Comparison, index: usize) -> String {
    let telescope = &comparison.system(index).telescope;
    let m = &comparison.metrics;
    let own = m.system(index);

    format!(
        "Telescope {index} f/{:<5.2} l={:4.0}mm D={:3.0}mm O={:2.0}% res={:3.2}\"/p \
         FOV={:2.0}'x{:2.0}'={:5.2}x eoi={:5.2}x poi={:5.2}x e={:5.2}x pe={:5.2}x ps={:5.2}x os={:5.2}x",
        telescope.focal_ratio,
        telescope.focal_length_mm,
        telescope.aperture_diameter_mm,
        100.0 * telescope.obstruction_ratio,
        own.pixel_scale_arcsec,
        own.fov_h_arcmin,
        own.fov_v_arcmin,
        m.fov_area.from_side(index),
        m.extended_object_irradiance.from_side(index),
        m.point_object_irradiance.from_side(index),
        m.etendue.from_side(index),
        m.pixel_etendue.from_side(index),
        m.pixel_signal.from_side(index),
        m.object_signal.from_side(index),
    )
}

/// Full per-system breakdown, sections separated by `---`
pub fn detail(comparison: &Comparison) -> String {
    let mut out = String::new();
    for index in [1, 2] {
        out.push_str(SEPARATOR);
        out.push('\n');
        detail_section(&mut out, comparison, index);
    }
    out.push_str(SEPARATOR);
    out.push('\n');
    out
}

fn detail_section(out: &mut String, comparison: &Comparison, index: usize) {
    let system = comparison.system(index);
    let (t, c) = (&system.telescope, &system.camera);
    let m = &comparison.metrics;
    let own = m.system(index);
    let (width_mm, height_mm) = c.dimensions_mm();

    // Writing into a String cannot fail
    let _ = writeln!(
        out,
        "OTA {index} resolving power {:.3} [arcsec], plate scale {:.3} [arcsec/mm] = {:.1} [μm/arcsec]",
        t.resolving_power_arcsec,
        t.plate_scale_arcsec_per_mm,
        t.um_per_arcsec()
    );
    let _ = writeln!(
        out,
        "OTA {index} focal ratio f/{:.1}, focal length {:.0} [mm], aperture diameter {:.0} [mm], \
         central obstruction ratio {:.2}, diameter {:.0} [mm]",
        t.focal_ratio,
        t.focal_length_mm,
        t.aperture_diameter_mm,
        t.obstruction_ratio,
        t.obstruction_diameter_mm
    );
    let _ = writeln!(
        out,
        "OTA {index} aperture area {:.2} [mm^2], collects {:.2}x more photons",
        t.aperture_area_mm2,
        m.aperture_area.from_side(index)
    );
    let _ = writeln!(
        out,
        "Camera {index} pixel size {:.3} [μm], sensor size {:.0}x{:.0} [pixels*pixels], \
         {:.1}x{:.1} [mm*mm], sensor area {:.2} [mm^2] ={:.2}x larger",
        c.effective_pixel_size_um(),
        c.effective_h(),
        c.effective_v(),
        width_mm,
        height_mm,
        c.sensor_area_um2() / 1e6,
        m.sensor_area.from_side(index)
    );
    let _ = writeln!(
        out,
        "Camera {index} quantum efficiency factor {:.2}",
        c.quantum_efficiency
    );
    let _ = writeln!(
        out,
        "Telescope {index} resolution {:.4} [arcsec/pixel], FOV {:.3}x{:.3} [arcsec*arcsec]=\
         {:.2}x{:.2} [arcmin*arcmin] ={:.4}x larger, optical transmittance factor {:.2}",
        own.pixel_scale_arcsec,
        own.fov_h_arcsec,
        own.fov_v_arcsec,
        own.fov_h_arcmin,
        own.fov_v_arcmin,
        m.fov_area.from_side(index),
        t.transmittance_factor
    );
    let _ = writeln!(
        out,
        "Telescope {index} extended object irradiance is {:.2}x more",
        m.extended_object_irradiance.from_side(index)
    );
    let _ = writeln!(
        out,
        "Telescope {index}    point object irradiance is {:.2}x more",
        m.point_object_irradiance.from_side(index)
    );
    let _ = writeln!(
        out,
        "Telescope {index}       etendue {:.2} [m^2arcsec^2] ={:.2}x more",
        own.etendue_m2arcsec2,
        m.etendue.from_side(index)
    );
    let _ = writeln!(
        out,
        "Telescope {index} pixel etendue {:.2} [mm^2arcsec^2] ={:.2}x more",
        own.pixel_etendue_mm2arcsec2,
        m.pixel_etendue.from_side(index)
    );
    let _ = writeln!(
        out,
        "Telescope {index} pixel signal is {:.2}x more",
        m.pixel_signal.from_side(index)
    );
    let _ = writeln!(
        out,
        "Telescope {index} object signal is {:.2}x more",
        m.object_signal.from_side(index)
    );
}

/// How each reported number is computed
pub fn formulas() -> &'static str {
    "\
- Pixel scale (res) is the angle of sky that lands on one pixel, in arcseconds per pixel.
  pixel scale [\"/pixel] = 206.265 * pixel size [μm] / focal length [mm]
  206.265 is the number of arcseconds in a radian divided by 1000;
  one radian is (360 / 2π) * 3600 = 206264.806... arcseconds.
  Binning multiplies the pixel size by the binning factor.
- FOV, the field of view, is the angle of sky covered by the whole sensor.
  width  [\"] = horizontal pixels * pixel scale
  height [\"] = vertical pixels * pixel scale
  The brief output shows it in arcminutes (\" / 60).
- Extended object irradiance (eoi) compares how much light per unit sensor area
  an extended object (a nebula, a galaxy, anything larger than a star image)
  delivers. Only the focal ratio matters, the aperture does not.
  eoi(1 vs 2) = (focal ratio 2 / focal ratio 1)^2
  This is the photographic speed: f/4 needs half the exposure of f/5.6.
- Point object irradiance (poi) does the same for stars and other point sources.
  Here both the focal ratio and the unobstructed aperture area count.
  poi(1 vs 2) = eoi(1 vs 2) * (aperture area 1 / aperture area 2)
- Etendue (e) is the light gathering power of the telescope and sensor together,
  a purely geometric quantity.
  etendue [m^2\"^2] = aperture area [m^2] * FOV area [\"^2]
- Pixel etendue (pe) is the etendue of a single pixel.
  pixel etendue [mm^2\"^2] = aperture area [mm^2] * pixel scale^2 [\"^2]
- Pixel signal (ps) is the pixel etendue after losses in the sensor and optics.
  pixel signal = pixel etendue * QE * transmittance
- Object signal (os) is the light collected from an object that fits in both
  fields of view, after the same losses.
  object signal = aperture area * QE * transmittance
All ratios read as \"telescope N gets this many times more than the other one\".
"
}
