//! Procedural track generation.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use time::{Duration, OffsetDateTime};

use gpx_analyzer::TrackPoint;

use crate::config::{BoundingBox, Region};
use crate::terrain::ElevationGenerator;

/// 2024-06-01T08:00:00Z
const START_TIME_UNIX: i64 = 1_717_228_800;

/// Meters per degree of latitude, good enough for placing synthetic points.
const METERS_PER_DEGREE: f64 = 111_000.0;

/// Configuration for procedural track generation.
#[derive(Debug, Clone)]
pub struct TrackConfig {
    /// Target distance in meters.
    pub distance_meters: f64,
    /// Starting point (lat, lon). If None, random within bounds.
    pub start_point: Option<(f64, f64)>,
    pub bounds: BoundingBox,
    /// Approximate distance between track points in meters.
    pub point_spacing_m: f64,
    /// GPS elevation noise standard deviation in meters.
    pub elevation_jitter_m: f64,
    /// Probability (0.0 - 1.0) that a point is written without elevation.
    pub elevation_gap_probability: f64,
    /// Seconds between consecutive samples.
    pub sample_interval_s: f64,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            distance_meters: 5000.0,
            start_point: None,
            bounds: Region::BOULDER,
            point_spacing_m: 10.0,
            elevation_jitter_m: 2.0,
            elevation_gap_probability: 0.0,
            sample_interval_s: 3.0,
        }
    }
}

/// Generates synthetic GPS tracks.
pub struct TrackGenerator {
    config: TrackConfig,
    elevation: ElevationGenerator,
}

impl TrackGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            config: TrackConfig::default(),
            elevation: ElevationGenerator::new(seed),
        }
    }

    pub fn for_region(bounds: BoundingBox, seed: u32) -> Self {
        Self {
            config: TrackConfig {
                bounds,
                ..Default::default()
            },
            elevation: ElevationGenerator::new(seed),
        }
    }

    pub fn with_distance(mut self, meters: f64) -> Self {
        self.config.distance_meters = meters;
        self
    }

    pub fn with_start(mut self, lat: f64, lon: f64) -> Self {
        self.config.start_point = Some((lat, lon));
        self
    }

    pub fn with_point_spacing(mut self, meters: f64) -> Self {
        self.config.point_spacing_m = meters;
        self
    }

    pub fn with_elevation_jitter(mut self, meters: f64) -> Self {
        self.config.elevation_jitter_m = meters;
        self
    }

    pub fn with_elevation_gaps(mut self, probability: f64) -> Self {
        self.config.elevation_gap_probability = probability;
        self
    }

    pub fn with_elevation(mut self, elevation: ElevationGenerator) -> Self {
        self.elevation = elevation;
        self
    }

    pub fn config(&self) -> &TrackConfig {
        &self.config
    }

    pub fn generate(&self, rng: &mut impl Rng) -> Vec<TrackPoint> {
        let start = self
            .config
            .start_point
            .unwrap_or_else(|| self.config.bounds.random_point(rng));

        let path = self.generate_path(start, rng);
        self.apply_elevation_and_time(path, rng)
    }

    /// Random walk with momentum; returns `(lat, lon, distance from start)`.
    pub fn generate_path(&self, start: (f64, f64), rng: &mut impl Rng) -> Vec<(f64, f64, f64)> {
        let mut path = vec![(start.0, start.1, 0.0)];
        let mut current = start;
        let mut total_distance = 0.0;
        let mut heading = rng.gen_range(0.0..std::f64::consts::TAU);

        while total_distance < self.config.distance_meters {
            heading += rng.gen_range(-0.3..0.3);
            let step = self.config.point_spacing_m * rng.gen_range(0.8..1.2);

            let lat_delta = (step * heading.cos()) / METERS_PER_DEGREE;
            let lon_delta =
                (step * heading.sin()) / (METERS_PER_DEGREE * current.0.to_radians().cos());

            let (lat, lon, bounced) =
                self.apply_bounds(current.0 + lat_delta, current.1 + lon_delta, heading);
            heading = bounced;

            current = (lat, lon);
            total_distance += step;
            path.push((lat, lon, total_distance));
        }

        path
    }

    fn apply_bounds(&self, lat: f64, lon: f64, heading: f64) -> (f64, f64, f64) {
        let b = &self.config.bounds;
        let mut new_heading = heading;

        let lat = if lat < b.min_lat || lat > b.max_lat {
            new_heading = std::f64::consts::PI - new_heading;
            lat.clamp(b.min_lat, b.max_lat)
        } else {
            lat
        };

        let lon = if lon < b.min_lon || lon > b.max_lon {
            new_heading = -new_heading;
            lon.clamp(b.min_lon, b.max_lon)
        } else {
            lon
        };

        (lat, lon, new_heading)
    }

    fn apply_elevation_and_time(
        &self,
        path: Vec<(f64, f64, f64)>,
        rng: &mut impl Rng,
    ) -> Vec<TrackPoint> {
        let jitter = Normal::new(0.0, self.config.elevation_jitter_m.max(0.0)).ok();
        let start = OffsetDateTime::from_unix_timestamp(START_TIME_UNIX)
            .unwrap_or(OffsetDateTime::UNIX_EPOCH);

        path.into_iter()
            .enumerate()
            .map(|(i, (lat, lon, distance))| {
                let elevation = if rng.r#gen::<f64>() < self.config.elevation_gap_probability {
                    None
                } else {
                    let noise = jitter.as_ref().map_or(0.0, |j| j.sample(rng));
                    Some(self.elevation.elevation_at(distance) + noise)
                };
                let offset = Duration::seconds_f64(i as f64 * self.config.sample_interval_s);
                TrackPoint::new(lat, lon, elevation).with_timestamp(start + offset)
            })
            .collect()
    }
}

/// `count` points along the equator, `spacing_deg` degrees of longitude apart,
/// carrying the given elevations (`None` where the slice runs out).
pub fn straight_line(count: usize, spacing_deg: f64, elevations: &[Option<f64>]) -> Vec<TrackPoint> {
    (0..count)
        .map(|i| {
            let elevation = elevations.get(i).copied().flatten();
            TrackPoint::new(0.0, i as f64 * spacing_deg, elevation)
        })
        .collect()
}
