//! Resolution and metric computation for a pair of imaging systems

use log::debug;

use crate::hardware::{
    resolve_camera, resolve_telescopes, FallbackPolicy, ImagingSystem, RawCamera, RawTelescope,
    ResolveError,
};
use crate::metrics::{compute_metrics, MetricSet};

/// Raw inputs for both sides of a comparison, after catalog substitution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonInputs {
    pub first_telescope: RawTelescope,
    pub first_camera: RawCamera,
    pub second_telescope: RawTelescope,
    pub second_camera: RawCamera,
    /// How the second telescope fills in missing optics
    pub policy: FallbackPolicy,
}

/// Two resolved imaging systems and the metrics between them
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub first: ImagingSystem,
    pub second: ImagingSystem,
    pub metrics: MetricSet,
}

impl Comparison {
    /// Resolve all four components and compute the metrics.
    ///
    /// Fails on the first resolution error; no partial comparison is produced.
    pub fn resolve(inputs: &ComparisonInputs) -> Result<Self, ResolveError> {
        let (t1, t2) = resolve_telescopes(
            &inputs.first_telescope,
            &inputs.second_telescope,
            inputs.policy,
        )?;
        let c1 = resolve_camera(1, &inputs.first_camera, None)?;
        let c2 = resolve_camera(2, &inputs.second_camera, Some(&c1))?;

        let first = ImagingSystem::new(t1, c1);
        let second = ImagingSystem::new(t2, c2);
        let metrics = compute_metrics(&first, &second);
        debug!(
            "Pixel scales {:.3}\"/p vs {:.3}\"/p",
            metrics.first.pixel_scale_arcsec, metrics.second.pixel_scale_arcsec
        );

        Ok(Self {
            first,
            second,
            metrics,
        })
    }

    /// Imaging system 1 or 2
    pub fn system(&self, index: usize) -> &ImagingSystem {
        if index == 1 {
            &self.first
        } else {
            &self.second
        }
    }
}
