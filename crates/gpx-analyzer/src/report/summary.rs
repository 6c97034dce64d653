use std::io::{self, Write};

use crate::errors::AnalyzerError;
use crate::models::{Track, TrackMetrics};

use super::{Artifact, ResultSink};

/// Writes the four headline figures as plain text.
pub struct ConsoleSummary<W: Write> {
    out: W,
}

impl ConsoleSummary<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleSummary<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ResultSink for ConsoleSummary<W> {
    fn name(&self) -> &'static str {
        "summary"
    }

    fn present(
        &mut self,
        _track: &Track,
        metrics: &TrackMetrics,
    ) -> Result<Option<Artifact>, AnalyzerError> {
        self.out.write_all(format_summary(metrics).as_bytes())?;
        self.out.flush()?;
        Ok(None)
    }
}

pub fn format_summary(metrics: &TrackMetrics) -> String {
    format!(
        "Total distance: {}\nMax elevation: {}\nMin elevation: {}\nElevation gain: {}\n",
        meters(Some(metrics.total_distance)),
        meters(metrics.max_elevation),
        meters(metrics.min_elevation),
        meters(Some(metrics.elevation_gain)),
    )
}

fn meters(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2} meters"),
        None => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::compute_metrics;
    use crate::models::TrackPoint;

    #[test]
    fn test_summary_lines() {
        let track = Track::new(vec![
            TrackPoint::new(0.0, 0.0, Some(100.0)),
            TrackPoint::new(0.0, 0.01, Some(150.0)),
            TrackPoint::new(0.0, 0.02, Some(120.0)),
        ])
        .unwrap();
        let metrics = compute_metrics(&track);

        let mut sink = ConsoleSummary::new(Vec::new());
        let artifact = sink.present(&track, &metrics).unwrap();
        assert!(artifact.is_none());

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Total distance: 222"));
        assert!(lines[0].ends_with(" meters"));
        assert_eq!(lines[1], "Max elevation: 150.00 meters");
        assert_eq!(lines[2], "Min elevation: 100.00 meters");
        assert_eq!(lines[3], "Elevation gain: 50.00 meters");
    }

    #[test]
    fn test_unknown_elevation() {
        let track = Track::new(vec![TrackPoint::new(1.0, 1.0, None)]).unwrap();
        let text = format_summary(&compute_metrics(&track));

        assert!(text.contains("Total distance: 0.00 meters"));
        assert!(text.contains("Max elevation: unknown"));
        assert!(text.contains("Min elevation: unknown"));
        assert!(text.contains("Elevation gain: 0.00 meters"));
    }
}
