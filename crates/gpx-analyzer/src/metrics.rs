use geo::{Distance as _, Geodesic, Haversine, Point};
use serde::{Deserialize, Serialize};

use crate::models::{Track, TrackMetrics, TrackPoint};

/// Formula used for the surface distance between two points. Elevation is
/// never part of the distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMethod {
    /// Ellipsoidal (WGS84) geodesic after Karney.
    #[default]
    Geodesic,
    /// Great-circle distance on a sphere of mean earth radius.
    Haversine,
}

impl DistanceMethod {
    pub fn distance(self, from: Point, to: Point) -> f64 {
        match self {
            DistanceMethod::Geodesic => Geodesic.distance(from, to),
            DistanceMethod::Haversine => Haversine.distance(from, to),
        }
    }
}

impl std::str::FromStr for DistanceMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "geodesic" => Ok(DistanceMethod::Geodesic),
            "haversine" => Ok(DistanceMethod::Haversine),
            other => Err(format!("unknown distance method '{other}'")),
        }
    }
}

pub trait TrackMetric {
    type Output;
    fn next_point(&mut self, point: &TrackPoint);
    fn finish(self) -> Self::Output;
}

/// Computes metrics using the ellipsoidal geodesic.
pub fn compute_metrics(track: &Track) -> TrackMetrics {
    compute_metrics_with(track, DistanceMethod::default())
}

pub fn compute_metrics_with(track: &Track, method: DistanceMethod) -> TrackMetrics {
    let mut distance = DistanceMetric::new(method, track.len());
    let mut range = ElevationRangeMetric::default();
    let mut gain = ElevationGainMetric::default();
    let mut elevations = Vec::with_capacity(track.len());

    for point in track {
        distance.next_point(point);
        range.next_point(point);
        gain.next_point(point);
        elevations.push(point.elevation);
    }

    let (step_distances, cumulative_distances) = distance.finish();
    // Empty float sums are -0.0; a single point must report +0.0.
    let total_distance = step_distances.iter().fold(0.0, |acc, d| acc + d);
    let (min_elevation, max_elevation) = range.finish();

    TrackMetrics {
        step_distances,
        cumulative_distances,
        total_distance,
        max_elevation,
        min_elevation,
        elevation_gain: gain.finish(),
        elevations,
    }
}

#[derive(Debug, Clone)]
struct DistanceMetric {
    method: DistanceMethod,
    step_distances: Vec<f64>,
    cumulative_distances: Vec<f64>,
    last_point: Option<Point>,
}

impl DistanceMetric {
    fn new(method: DistanceMethod, capacity: usize) -> Self {
        Self {
            method,
            step_distances: Vec::with_capacity(capacity.saturating_sub(1)),
            cumulative_distances: Vec::with_capacity(capacity),
            last_point: None,
        }
    }
}

impl TrackMetric for DistanceMetric {
    type Output = (Vec<f64>, Vec<f64>);

    fn next_point(&mut self, point: &TrackPoint) {
        let current = point.point();
        let running = match self.last_point {
            Some(prev) => {
                let step = self.method.distance(prev, current);
                self.step_distances.push(step);
                self.cumulative_distances.last().copied().unwrap_or(0.0) + step
            }
            None => 0.0,
        };
        self.cumulative_distances.push(running);
        self.last_point = Some(current);
    }

    fn finish(self) -> Self::Output {
        (self.step_distances, self.cumulative_distances)
    }
}

#[derive(Debug, Clone, Default)]
struct ElevationRangeMetric {
    min: Option<f64>,
    max: Option<f64>,
}

impl TrackMetric for ElevationRangeMetric {
    type Output = (Option<f64>, Option<f64>);

    fn next_point(&mut self, point: &TrackPoint) {
        if let Some(elevation) = point.elevation {
            self.min = Some(self.min.map_or(elevation, |m| m.min(elevation)));
            self.max = Some(self.max.map_or(elevation, |m| m.max(elevation)));
        }
    }

    fn finish(self) -> Self::Output {
        (self.min, self.max)
    }
}

/// Only steps with an elevation on both ends count; a missing elevation
/// breaks the chain instead of being carried forward.
#[derive(Debug, Clone, Default)]
struct ElevationGainMetric {
    total_gain: f64,
    last_elevation: Option<f64>,
}

impl TrackMetric for ElevationGainMetric {
    type Output = f64;

    fn next_point(&mut self, point: &TrackPoint) {
        if let (Some(last), Some(elevation)) = (self.last_elevation, point.elevation) {
            let delta = elevation - last;
            if delta > 0.0 {
                self.total_gain += delta;
            }
        }
        self.last_elevation = point.elevation;
    }

    fn finish(self) -> f64 {
        self.total_gain
    }
}
