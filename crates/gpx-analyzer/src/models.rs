use time::OffsetDateTime;

use crate::errors::AnalyzerError;

/// A single recorded position along a track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPoint {
    pub lat: f64,
    pub lon: f64,
    /// Meters above sea level, `None` when the receiver did not record it.
    pub elevation: Option<f64>,
    pub timestamp: Option<OffsetDateTime>,
}

impl TrackPoint {
    pub fn new(lat: f64, lon: f64, elevation: Option<f64>) -> Self {
        Self {
            lat,
            lon,
            elevation,
            timestamp: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: OffsetDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Position as a `geo` point (x = longitude, y = latitude).
    pub fn point(&self) -> geo::Point<f64> {
        geo::Point::new(self.lon, self.lat)
    }
}

/// Ordered, non-empty sequence of points in recorded order.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    points: Vec<TrackPoint>,
}

impl Track {
    pub fn new(points: Vec<TrackPoint>) -> Result<Self, AnalyzerError> {
        if points.is_empty() {
            return Err(AnalyzerError::EmptyTrack);
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> &TrackPoint {
        &self.points[0]
    }

    pub fn last(&self) -> &TrackPoint {
        &self.points[self.points.len() - 1]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrackPoint> {
        self.points.iter()
    }

    /// `(lat, lon)` pairs in track order.
    pub fn coordinates(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.lat, p.lon)).collect()
    }
}

impl<'a> IntoIterator for &'a Track {
    type Item = &'a TrackPoint;
    type IntoIter = std::slice::Iter<'a, TrackPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Statistics derived from a [`Track`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrackMetrics {
    /// Surface distance of each step between consecutive points, in meters.
    pub step_distances: Vec<f64>,
    /// Distance from the start up to each point; first entry is always 0.
    pub cumulative_distances: Vec<f64>,
    pub total_distance: f64,
    pub max_elevation: Option<f64>,
    pub min_elevation: Option<f64>,
    /// Sum of positive elevation deltas between consecutive points that both
    /// carry an elevation.
    pub elevation_gain: f64,
    /// Elevation of each point, parallel to `cumulative_distances`.
    pub(crate) elevations: Vec<Option<f64>>,
}

impl TrackMetrics {
    pub fn point_count(&self) -> usize {
        self.cumulative_distances.len()
    }

    /// `(cumulative distance, elevation)` for every point that has an elevation.
    pub fn elevation_profile(&self) -> Vec<(f64, f64)> {
        self.cumulative_distances
            .iter()
            .zip(&self.elevations)
            .filter_map(|(distance, elevation)| elevation.map(|e| (*distance, e)))
            .collect()
    }

    pub fn has_elevation(&self) -> bool {
        self.max_elevation.is_some()
    }
}
