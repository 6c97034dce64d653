//! Elevation vs. distance line chart.

use std::panic;
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::{info, warn};

use crate::errors::AnalyzerError;
use crate::models::{Track, TrackMetrics};

use super::{Artifact, ResultSink};

const CHART_SIZE: (u32, u32) = (1000, 600);

/// Renders the elevation profile to an SVG file.
pub struct ElevationChart {
    path: PathBuf,
}

impl ElevationChart {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ResultSink for ElevationChart {
    fn name(&self) -> &'static str {
        "chart"
    }

    fn present(
        &mut self,
        _track: &Track,
        metrics: &TrackMetrics,
    ) -> Result<Option<Artifact>, AnalyzerError> {
        if !metrics.has_elevation() {
            warn!("Track has no elevation data, skipping elevation chart");
            return Ok(None);
        }

        render_elevation_chart(metrics, &self.path)?;
        info!("Wrote elevation chart to {}", self.path.display());

        Ok(Some(Artifact {
            label: "Elevation chart",
            path: self.path.clone(),
        }))
    }
}

pub fn render_elevation_chart(metrics: &TrackMetrics, path: &Path) -> Result<(), AnalyzerError> {
    let profile = metrics.elevation_profile();
    if profile.is_empty() {
        return Err(AnalyzerError::Render(
            "no elevation data to plot".to_string(),
        ));
    }

    let x_max = metrics.total_distance.max(1.0);
    let y_range = elevation_range(&profile);

    let render = || {
        let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
        draw_profile(root, &profile, x_max, y_range)
            .map_err(|e| AnalyzerError::Render(format!("plotting error: {e}")))
    };

    panic::catch_unwind(panic::AssertUnwindSafe(render))
        .map_err(|_| AnalyzerError::Render("plotting backend panicked".to_string()))?
}

fn elevation_range(profile: &[(f64, f64)]) -> (f64, f64) {
    let (min, max) = profile
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, e)| {
            (lo.min(e), hi.max(e))
        });
    let span = max - min;
    let pad = if span < 1.0 { 10.0 } else { span * 0.05 };
    (min - pad, max + pad)
}

fn draw_profile<DB>(
    root: DrawingArea<DB, Shift>,
    profile: &[(f64, f64)],
    x_max: f64,
    (y_min, y_max): (f64, f64),
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Elevation profile", ("sans-serif", 26))
        .margin(25)
        .set_label_area_size(LabelAreaPosition::Left, 70)
        .set_label_area_size(LabelAreaPosition::Bottom, 50)
        .build_cartesian_2d(0.0..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Distance (m)")
        .y_desc("Elevation (m)")
        .x_label_formatter(&|v| format!("{:.0}", v))
        .y_label_formatter(&|v| format!("{:.0}", v))
        .draw()?;

    chart
        .draw_series(LineSeries::new(profile.iter().copied(), &BLUE))?
        .label("Elevation")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::compute_metrics;
    use crate::models::TrackPoint;

    #[test]
    fn test_renders_svg() {
        let track = Track::new(vec![
            TrackPoint::new(0.0, 0.0, Some(100.0)),
            TrackPoint::new(0.0, 0.01, Some(150.0)),
            TrackPoint::new(0.0, 0.02, Some(120.0)),
        ])
        .unwrap();
        let metrics = compute_metrics(&track);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.svg");

        let artifact = ElevationChart::new(&path)
            .present(&track, &metrics)
            .unwrap()
            .unwrap();

        assert_eq!(artifact.label, "Elevation chart");
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Elevation profile"));
    }

    #[test]
    fn test_skips_without_elevation() {
        let track = Track::new(vec![
            TrackPoint::new(0.0, 0.0, None),
            TrackPoint::new(0.0, 0.01, None),
        ])
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.svg");

        let artifact = ElevationChart::new(&path)
            .present(&track, &compute_metrics(&track))
            .unwrap();

        assert!(artifact.is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_flat_profile_gets_padding() {
        let (lo, hi) = elevation_range(&[(0.0, 50.0), (10.0, 50.0)]);
        assert_eq!((lo, hi), (40.0, 60.0));

        let (lo, hi) = elevation_range(&[(0.0, 100.0), (10.0, 200.0)]);
        assert_eq!((lo, hi), (95.0, 205.0));
    }
}
