//! Load, compute, present.

use std::path::Path;

use tracing::{debug, info};

use crate::config::AnalyzerConfig;
use crate::errors::AnalyzerError;
use crate::gpx_loader;
use crate::metrics::{DistanceMethod, compute_metrics_with};
use crate::models::{Track, TrackMetrics};
use crate::report::{Artifact, ConsoleSummary, ElevationChart, ResultSink, SystemViewer, TrackMap};

/// A loaded track together with its metrics.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub track: Track,
    pub metrics: TrackMetrics,
}

pub fn analyze(path: impl AsRef<Path>, method: DistanceMethod) -> Result<Analysis, AnalyzerError> {
    let track = gpx_loader::load(path)?;
    let metrics = compute_metrics_with(&track, method);

    info!(
        points = track.len(),
        total_distance = metrics.total_distance,
        elevation_gain = metrics.elevation_gain,
        "Computed track metrics"
    );

    Ok(Analysis { track, metrics })
}

/// Hands the analysis to every sink in order, stopping at the first failure.
pub fn present(
    analysis: &Analysis,
    sinks: &mut [Box<dyn ResultSink>],
) -> Result<Vec<Artifact>, AnalyzerError> {
    let mut artifacts = Vec::new();
    for sink in sinks.iter_mut() {
        debug!("Presenting to {}", sink.name());
        if let Some(artifact) = sink.present(&analysis.track, &analysis.metrics)? {
            artifacts.push(artifact);
        }
    }
    Ok(artifacts)
}

/// Runs the whole pipeline. Nothing is presented unless loading and
/// computation both succeed.
pub fn run(
    path: impl AsRef<Path>,
    config: &AnalyzerConfig,
    sinks: &mut [Box<dyn ResultSink>],
) -> Result<Vec<Artifact>, AnalyzerError> {
    let analysis = analyze(path, config.distance_method)?;
    present(&analysis, sinks)
}

/// Map, chart (if configured) and console summary, in that order, so the
/// summary is only printed once every file has been written.
pub fn default_sinks(config: &AnalyzerConfig) -> Vec<Box<dyn ResultSink>> {
    let mut map = TrackMap::new(&config.map_path);
    if config.open_viewer {
        map = map.with_viewer(Box::new(SystemViewer));
    }

    let mut sinks: Vec<Box<dyn ResultSink>> = vec![Box::new(map)];
    if let Some(chart_path) = &config.chart_path {
        sinks.push(Box::new(ElevationChart::new(chart_path)));
    }
    sinks.push(Box::new(ConsoleSummary::stdout()));
    sinks
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const GPX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="pipeline-tests" xmlns="http://www.topografix.com/GPX/1/1">
  <trk><trkseg>
    <trkpt lat="0.0" lon="0.0"><ele>100.0</ele></trkpt>
    <trkpt lat="0.0" lon="0.01"><ele>150.0</ele></trkpt>
    <trkpt lat="0.0" lon="0.02"><ele>120.0</ele></trkpt>
  </trkseg></trk>
</gpx>
"#;

    struct Failing;

    impl ResultSink for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn present(
            &mut self,
            _track: &Track,
            _metrics: &TrackMetrics,
        ) -> Result<Option<Artifact>, AnalyzerError> {
            Err(AnalyzerError::Render("boom".to_string()))
        }
    }

    fn config_in(dir: &Path) -> AnalyzerConfig {
        AnalyzerConfig {
            map_path: dir.join("track_map.html"),
            chart_path: Some(dir.join("elevation_profile.svg")),
            open_viewer: false,
            ..AnalyzerConfig::default()
        }
    }

    #[test]
    fn test_run_writes_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("track.gpx");
        std::fs::write(&input, GPX).unwrap();
        let config = config_in(dir.path());

        let mut sinks: Vec<Box<dyn ResultSink>> = vec![
            Box::new(TrackMap::new(&config.map_path)),
            Box::new(ElevationChart::new(dir.path().join("elevation_profile.svg"))),
        ];
        let artifacts = run(&input, &config, &mut sinks).unwrap();

        let paths: Vec<PathBuf> = artifacts.into_iter().map(|a| a.path).collect();
        assert_eq!(
            paths,
            vec![
                dir.path().join("track_map.html"),
                dir.path().join("elevation_profile.svg")
            ]
        );
        assert!(paths.iter().all(|p| p.exists()));
    }

    #[test]
    fn test_missing_input_produces_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let mut sinks: Vec<Box<dyn ResultSink>> = vec![Box::new(TrackMap::new(&config.map_path))];

        let result = run(dir.path().join("absent.gpx"), &config, &mut sinks);

        assert!(matches!(result, Err(AnalyzerError::NotFound(_))));
        assert!(!config.map_path.exists());
    }

    #[test]
    fn test_sink_error_stops_presentation() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("track.gpx");
        std::fs::write(&input, GPX).unwrap();
        let config = config_in(dir.path());

        let mut sinks: Vec<Box<dyn ResultSink>> =
            vec![Box::new(Failing), Box::new(TrackMap::new(&config.map_path))];
        let result = run(&input, &config, &mut sinks);

        assert!(matches!(result, Err(AnalyzerError::Render(_))));
        assert!(!config.map_path.exists());
    }

    #[test]
    fn test_default_sinks_respect_chart_setting() {
        let mut config = AnalyzerConfig {
            open_viewer: false,
            ..AnalyzerConfig::default()
        };
        let names: Vec<&str> = default_sinks(&config).iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["map", "chart", "summary"]);

        config.chart_path = None;
        let names: Vec<&str> = default_sinks(&config).iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["map", "summary"]);
    }
}
