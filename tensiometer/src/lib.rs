//! Surface tension estimation from a photographed pendant droplet.
//!
//! The pipeline takes a decoded still image, finds the droplet silhouette,
//! measures its extent against a pipette-diameter reference and applies a
//! simplified `rho * g * de * h` estimate. Camera capture and display are
//! left to the caller: it hands over a [`RawImage`] and shows the returned
//! string, substituting [`MEASUREMENT_FAILED`] on error.

pub mod config;
pub mod detection;
pub mod error;
pub mod export_svg;
pub mod geometry;
pub mod ingest;
pub mod overlay;
pub mod pipeline;
pub mod tension;

pub use config::AnalysisConfig;
pub use detection::{select_droplet, ContourBackend, ContourDetector, DetectorConfig, ImageprocBackend};
pub use error::MeasurementError;
pub use ingest::RawImage;
pub use pipeline::{analyze, Analyzer, Measurement, Traced};
pub use tension::{format_tension, TensionEstimate, MEASUREMENT_FAILED};
