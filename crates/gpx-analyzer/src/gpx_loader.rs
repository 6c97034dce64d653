//! GPX track loading.
//!
//! Every segment of every track is flattened, in file order, into a single
//! [`Track`]. Segment and track boundaries are not preserved.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use gpx::{Gpx, read};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::errors::AnalyzerError;
use crate::models::{Track, TrackPoint};

/// Loads a track from a GPX file on disk.
///
/// A missing path, or one that is not a regular file, yields
/// [`AnalyzerError::NotFound`]. The file handle is released before the
/// points are validated.
pub fn load(path: impl AsRef<Path>) -> Result<Track, AnalyzerError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(AnalyzerError::NotFound(path.to_path_buf()));
    }

    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => AnalyzerError::NotFound(path.to_path_buf()),
        _ => AnalyzerError::Io(e),
    })?;

    info!("Loading GPX file {}", path.display());
    let gpx = read(BufReader::new(file))?;

    extract_track(&gpx)
}

/// Loads a track from GPX data supplied by any reader.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Track, AnalyzerError> {
    let gpx: Gpx = read(reader)?;
    extract_track(&gpx)
}

/// Loads a track from GPX data in memory.
pub fn load_bytes(data: &[u8]) -> Result<Track, AnalyzerError> {
    load_from_reader(std::io::Cursor::new(data))
}

fn extract_track(gpx: &Gpx) -> Result<Track, AnalyzerError> {
    if gpx.tracks.is_empty() {
        return Err(AnalyzerError::EmptyTrack);
    }

    let mut points = Vec::new();
    let mut segment_count = 0;

    for track in &gpx.tracks {
        for segment in &track.segments {
            segment_count += 1;
            for waypoint in &segment.points {
                points.push(convert_waypoint(waypoint)?);
            }
        }
    }

    info!(
        "Loaded {} points from {} tracks / {} segments",
        points.len(),
        gpx.tracks.len(),
        segment_count
    );

    Track::new(points)
}

fn convert_waypoint(waypoint: &gpx::Waypoint) -> Result<TrackPoint, AnalyzerError> {
    let point = waypoint.point();
    let (lat, lon) = (point.y(), point.x());

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(AnalyzerError::Parse(format!(
            "coordinates out of range: lat={lat}, lon={lon}"
        )));
    }

    let elevation = waypoint.elevation.filter(|e| e.is_finite());
    if waypoint.elevation.is_some() && elevation.is_none() {
        debug!("Dropping non-finite elevation at lat={lat}, lon={lon}");
    }

    Ok(TrackPoint {
        lat,
        lon,
        elevation,
        timestamp: waypoint.time.map(OffsetDateTime::from),
    })
}
