//! Imaging performance comparison of two telescope and camera combinations.
//!
//! Partial descriptions of the optics (any two of aperture, focal length and
//! focal ratio) and of the cameras are completed with defaults, then compared
//! on pixel scale, field of view, irradiance, etendue and signal ratios.
//!
//! ```
//! use compare_telescopes::comparison::{Comparison, ComparisonInputs};
//! use compare_telescopes::hardware::RawTelescope;
//!
//! let inputs = ComparisonInputs {
//!     first_telescope: RawTelescope::new().with_aperture_mm(80.0).with_focal_length_mm(600.0),
//!     second_telescope: RawTelescope::new().with_aperture_mm(150.0).with_focal_length_mm(1050.0),
//!     ..Default::default()
//! };
//! let comparison = Comparison::resolve(&inputs).unwrap();
//! let poi = comparison.metrics.point_object_irradiance.first_over_second;
//! assert!((poi - 0.2478).abs() < 1e-4);
//! ```

pub mod args;
pub mod catalog;
pub mod comparison;
pub mod hardware;
pub mod metrics;
pub mod report;
pub mod units;

pub use catalog::{Catalog, CatalogError};
pub use comparison::{Comparison, ComparisonInputs};
pub use hardware::ResolveError;
pub use metrics::{compute_metrics, MetricSet, Ratio};
pub use report::ReportError;
