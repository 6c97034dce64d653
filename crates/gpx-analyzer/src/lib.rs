//! Distance and elevation statistics for GPX tracks.
//!
//! The workflow is a single linear pipeline: [`gpx_loader`] reads a file into
//! a [`Track`], [`metrics`] derives [`TrackMetrics`] from it, and the sinks in
//! [`report`] print the summary, draw the elevation chart and write the map.

pub mod config;
pub mod errors;
pub mod gpx_loader;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod report;

pub use config::AnalyzerConfig;
pub use errors::AnalyzerError;
pub use metrics::{DistanceMethod, compute_metrics, compute_metrics_with};
pub use models::{Track, TrackMetrics, TrackPoint};
pub use pipeline::{Analysis, analyze, run};
