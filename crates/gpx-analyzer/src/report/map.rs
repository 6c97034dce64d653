//! Standalone Leaflet map of the track.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AnalyzerError;
use crate::models::{Track, TrackMetrics};

use super::{Artifact, ResultSink, Viewer};

const ZOOM_START: u8 = 13;

#[derive(Debug, Serialize)]
struct MapData {
    path: Vec<[f64; 2]>,
    start: [f64; 2],
    finish: [f64; 2],
    zoom: u8,
    total_distance: f64,
    elevation_gain: f64,
}

/// Writes the map document and optionally opens it.
pub struct TrackMap {
    path: PathBuf,
    viewer: Option<Box<dyn Viewer>>,
}

impl TrackMap {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            viewer: None,
        }
    }

    pub fn with_viewer(mut self, viewer: Box<dyn Viewer>) -> Self {
        self.viewer = Some(viewer);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for TrackMap {
    fn name(&self) -> &'static str {
        "map"
    }

    fn present(
        &mut self,
        track: &Track,
        metrics: &TrackMetrics,
    ) -> Result<Option<Artifact>, AnalyzerError> {
        let html = render_map_html(track, metrics)?;
        std::fs::write(&self.path, html)?;
        info!("Wrote map to {}", self.path.display());

        if let Some(viewer) = &self.viewer {
            if let Err(e) = viewer.open(&self.path) {
                warn!("Could not open {} in a viewer: {e}", self.path.display());
            }
        }

        Ok(Some(Artifact {
            label: "Map",
            path: self.path.clone(),
        }))
    }
}

/// Renders the full HTML document: path polyline plus start and finish markers.
pub fn render_map_html(track: &Track, metrics: &TrackMetrics) -> Result<String, AnalyzerError> {
    let first = track.first();
    let last = track.last();
    let data = MapData {
        path: track.iter().map(|p| [p.lat, p.lon]).collect(),
        start: [first.lat, first.lon],
        finish: [last.lat, last.lon],
        zoom: ZOOM_START,
        total_distance: metrics.total_distance,
        elevation_gain: metrics.elevation_gain,
    };
    let json = serde_json::to_string(&data)
        .map_err(|e| AnalyzerError::Render(format!("map data: {e}")))?;

    Ok(TEMPLATE.replace("__TRACK_DATA__", &json))
}

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Track map</title>
  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
  <style>
    html, body, #map { width: 100%; height: 100%; margin: 0; padding: 0; }
  </style>
</head>
<body>
  <div id="map"></div>
  <script>
    const track = __TRACK_DATA__;

    const map = L.map("map").setView(track.start, track.zoom);
    L.tileLayer("https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png", {
      maxZoom: 19,
      attribution: "&copy; OpenStreetMap contributors"
    }).addTo(map);

    L.polyline(track.path, { color: "blue", weight: 4, opacity: 0.7 }).addTo(map);

    function pin(color) {
      return L.divIcon({
        className: "",
        html: `<div style="background:${color};width:14px;height:14px;border-radius:7px;border:2px solid white;box-shadow:0 0 3px #333"></div>`,
        iconSize: [18, 18],
        iconAnchor: [9, 9]
      });
    }

    L.marker(track.start, { icon: pin("green") }).bindPopup("Start").addTo(map);
    L.marker(track.finish, { icon: pin("red") })
      .bindPopup(`Finish<br>${track.total_distance.toFixed(2)} m, +${track.elevation_gain.toFixed(2)} m`)
      .addTo(map);
  </script>
</body>
</html>
"#;
