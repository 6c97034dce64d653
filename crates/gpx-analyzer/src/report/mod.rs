//! Presentation of computed results.
//!
//! Each output channel is a [`ResultSink`]. The pipeline hands every sink the
//! same track and metrics, so nothing upstream depends on a display.

mod chart;
mod map;
mod summary;
mod viewer;

use std::fmt;
use std::path::PathBuf;

pub use chart::{ElevationChart, render_elevation_chart};
pub use map::{TrackMap, render_map_html};
pub use summary::{ConsoleSummary, format_summary};
pub use viewer::{SystemViewer, Viewer};

use crate::errors::AnalyzerError;
use crate::models::{Track, TrackMetrics};

/// A file written by a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub label: &'static str,
    pub path: PathBuf,
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} saved to file '{}'.", self.label, self.path.display())
    }
}

pub trait ResultSink {
    fn name(&self) -> &'static str;

    /// Presents the results, returning the file written, if any.
    fn present(
        &mut self,
        track: &Track,
        metrics: &TrackMetrics,
    ) -> Result<Option<Artifact>, AnalyzerError>;
}
