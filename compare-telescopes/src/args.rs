//! Command line arguments and their translation into comparison inputs

use clap::Parser;
use std::path::PathBuf;

use crate::catalog::{default_gear_file, nonzero, Catalog, CatalogError};
use crate::comparison::ComparisonInputs;
use crate::hardware::{FallbackPolicy, RawCamera, RawTelescope};

const ABOUT: &str = "\
Compare the imaging performance of 2 telescopes for astrophotography.
Performance indicators are: pixel scale (res), FOV, extended object irradiance (eoi),
point object irradiance (poi), etendue (e), pixel etendue (pe), pixel signal (ps)
and object signal (os).";

/// Telescope and camera comparison arguments
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "compare-telescopes",
    version,
    about = ABOUT,
    after_help = "Use --formulas to read about the math behind the performance indicators."
)]
pub struct Args {
    /// Brief output (the default)
    #[arg(long)]
    pub brief: bool,

    /// Detail output
    #[arg(long)]
    pub detail: bool,

    /// Print a legend below the brief output
    #[arg(long)]
    pub legend: bool,

    /// Show the used formulas
    #[arg(long)]
    pub formulas: bool,

    /// Print list of known telescopes and cameras
    #[arg(long)]
    pub list: bool,

    /// Print list of known telescopes and cameras as json
    #[arg(long)]
    pub json: bool,

    /// Fail instead of copying telescope 1 when telescope 2 is underspecified
    #[arg(long)]
    pub strict: bool,

    /// Extra telescopes and cameras [default: telescopes-and-cameras.json next to the executable]
    #[arg(long)]
    pub gear_file: Option<PathBuf>,

    /// Scope 1
    #[arg(long)]
    pub s1: Option<String>,
    /// Telescope 1 aperture Diameter [mm]
    #[arg(long)]
    pub d1: Option<f64>,
    /// Telescope 1 aperture Diameter [inch]
    #[arg(long)]
    pub di1: Option<f64>,
    /// Telescope 1 central Obstruction ratio [float, 0-1]
    #[arg(long)]
    pub o1: Option<f64>,
    /// Telescope 1 focal Length [mm]
    #[arg(long)]
    pub l1: Option<f64>,
    /// Telescope 1 Focal ratio, defined as focal Length / aperture Diameter [dimensionless]
    #[arg(long)]
    pub f1: Option<f64>,
    /// Telescope 1 focal Reducer factor [float]
    #[arg(long)]
    pub r1: Option<f64>,
    /// Telescope 1 total Transmittance factor [float, 0-1]
    #[arg(long)]
    pub t1: Option<f64>,
    /// Camera 1
    #[arg(long)]
    pub c1: Option<String>,
    /// Camera 1 Horizontal pixels [count]
    #[arg(long)]
    pub c1h: Option<u32>,
    /// Camera 1 Vertical pixels [count]
    #[arg(long)]
    pub c1v: Option<u32>,
    /// Camera 1 Pixel size [μm]
    #[arg(long)]
    pub c1p: Option<f64>,
    /// Camera 1 QE ratio [float, 0-1]
    #[arg(long)]
    pub c1q: Option<f64>,
    /// Camera 1 binning factor [integer, 1-]
    #[arg(long)]
    pub c1b: Option<f64>,

    /// Scope 2
    #[arg(long)]
    pub s2: Option<String>,
    /// Telescope 2 aperture Diameter [mm]
    #[arg(long)]
    pub d2: Option<f64>,
    /// Telescope 2 aperture Diameter [inch]
    #[arg(long)]
    pub di2: Option<f64>,
    /// Telescope 2 central Obstruction ratio [float, 0-1]
    #[arg(long)]
    pub o2: Option<f64>,
    /// Telescope 2 focal Length [mm]
    #[arg(long)]
    pub l2: Option<f64>,
    /// Telescope 2 Focal ratio, defined as focal Length / aperture Diameter [dimensionless]
    #[arg(long)]
    pub f2: Option<f64>,
    /// Telescope 2 focal Reducer factor [float]
    #[arg(long)]
    pub r2: Option<f64>,
    /// Telescope 2 total Transmittance factor [float, 0-1]
    #[arg(long)]
    pub t2: Option<f64>,
    /// Camera 2
    #[arg(long)]
    pub c2: Option<String>,
    /// Camera 2 Horizontal pixels [count]
    #[arg(long)]
    pub c2h: Option<u32>,
    /// Camera 2 Vertical pixels [count]
    #[arg(long)]
    pub c2v: Option<u32>,
    /// Camera 2 Pixel size [μm]
    #[arg(long)]
    pub c2p: Option<f64>,
    /// Camera 2 QE ratio [float, 0-1]
    #[arg(long)]
    pub c2q: Option<f64>,
    /// Camera 2 binning factor [integer, 1-]
    #[arg(long)]
    pub c2b: Option<f64>,
}

impl Args {
    /// True when a gear name or a catalog listing was requested
    pub fn needs_catalog(&self) -> bool {
        self.s1.is_some()
            || self.s2.is_some()
            || self.c1.is_some()
            || self.c2.is_some()
            || self.list
            || self.json
    }

    /// Load the catalog from `--gear-file`, or from beside the executable
    pub fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        match self.gear_file.clone().or_else(default_gear_file) {
            Some(path) => Catalog::load(&path),
            None => Catalog::builtin(),
        }
    }

    /// Build the raw inputs, substituting catalog entries for gear names.
    ///
    /// Zero-valued flags count as not given.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownTelescope`] or [`CatalogError::UnknownCamera`]
    /// for names missing from `catalog`. Without a catalog, built-in gear is used.
    pub fn inputs(&self, catalog: Option<&Catalog>) -> Result<ComparisonInputs, CatalogError> {
        let builtin;
        let catalog = match catalog {
            Some(catalog) => catalog,
            None if self.needs_catalog() => {
                builtin = Catalog::builtin()?;
                &builtin
            }
            None => return Ok(self.flag_inputs()),
        };

        let mut inputs = self.flag_inputs();
        let sides = [
            (
                &self.s1,
                &self.c1,
                &mut inputs.first_telescope,
                &mut inputs.first_camera,
            ),
            (
                &self.s2,
                &self.c2,
                &mut inputs.second_telescope,
                &mut inputs.second_camera,
            ),
        ];
        for (scope, camera, telescope_raw, camera_raw) in sides {
            if let Some(name) = scope {
                *telescope_raw = catalog.scope(name)?.apply(telescope_raw.clone());
            }
            if let Some(name) = camera {
                let entry = catalog.camera(name)?;
                *camera_raw = entry.apply(camera_raw.clone());
                telescope_raw.camera_reducer = entry.reducer();
            }
        }
        Ok(inputs)
    }

    fn flag_inputs(&self) -> ComparisonInputs {
        ComparisonInputs {
            first_telescope: RawTelescope {
                aperture_diameter_mm: nonzero(self.d1),
                aperture_diameter_in: nonzero(self.di1),
                focal_length_mm: nonzero(self.l1),
                focal_ratio: nonzero(self.f1),
                focal_reducer: nonzero(self.r1),
                camera_reducer: None,
                obstruction_ratio: nonzero(self.o1),
                transmittance_factor: nonzero(self.t1),
            },
            first_camera: RawCamera {
                horizontal_pixels: self.c1h.filter(|&h| h != 0),
                vertical_pixels: self.c1v.filter(|&v| v != 0),
                pixel_size_um: nonzero(self.c1p),
                quantum_efficiency: nonzero(self.c1q),
                binning: nonzero(self.c1b),
            },
            second_telescope: RawTelescope {
                aperture_diameter_mm: nonzero(self.d2),
                aperture_diameter_in: nonzero(self.di2),
                focal_length_mm: nonzero(self.l2),
                focal_ratio: nonzero(self.f2),
                focal_reducer: nonzero(self.r2),
                camera_reducer: None,
                obstruction_ratio: nonzero(self.o2),
                transmittance_factor: nonzero(self.t2),
            },
            second_camera: RawCamera {
                horizontal_pixels: self.c2h.filter(|&h| h != 0),
                vertical_pixels: self.c2v.filter(|&v| v != 0),
                pixel_size_um: nonzero(self.c2p),
                quantum_efficiency: nonzero(self.c2q),
                binning: nonzero(self.c2b),
            },
            policy: if self.strict {
                FallbackPolicy::Strict
            } else {
                FallbackPolicy::InheritFirst
            },
        }
    }
}
