//! GPX 1.1 document generation.

use std::io;
use std::path::{Path, PathBuf};

use gpx_analyzer::TrackPoint;

#[derive(Debug, Clone, Default)]
struct TrackSpec {
    name: Option<String>,
    segments: Vec<Vec<TrackPoint>>,
}

/// Builds GPX documents with any number of tracks and segments.
#[derive(Debug, Clone, Default)]
pub struct GpxBuilder {
    name: Option<String>,
    tracks: Vec<TrackSpec>,
}

impl GpxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the document name written to `<metadata>`.
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Starts a new `<trk>`; following segments are added to it.
    pub fn track(mut self, name: &str) -> Self {
        self.tracks.push(TrackSpec {
            name: Some(name.to_string()),
            segments: Vec::new(),
        });
        self
    }

    /// Appends a `<trkseg>` to the current track, starting an unnamed one if
    /// there is none yet.
    pub fn segment(mut self, points: &[TrackPoint]) -> Self {
        if self.tracks.is_empty() {
            self.tracks.push(TrackSpec::default());
        }
        if let Some(track) = self.tracks.last_mut() {
            track.segments.push(points.to_vec());
        }
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut gpx = String::new();

        gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        gpx.push('\n');
        gpx.push_str(r#"<gpx version="1.1" creator="gpx-analyzer-test-data""#);
        gpx.push_str(r#" xmlns="http://www.topografix.com/GPX/1/1""#);
        gpx.push_str(r#" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance""#);
        gpx.push_str(r#" xsi:schemaLocation="http://www.topografix.com/GPX/1/1 http://www.topografix.com/GPX/1/1/gpx.xsd">"#);
        gpx.push('\n');

        if let Some(name) = &self.name {
            gpx.push_str("  <metadata>\n");
            gpx.push_str(&format!("    <name>{}</name>\n", escape_xml(name)));
            gpx.push_str("  </metadata>\n");
        }

        for track in &self.tracks {
            gpx.push_str("  <trk>\n");
            if let Some(name) = &track.name {
                gpx.push_str(&format!("    <name>{}</name>\n", escape_xml(name)));
            }
            for segment in &track.segments {
                gpx.push_str("    <trkseg>\n");
                for point in segment {
                    push_point(&mut gpx, point);
                }
                gpx.push_str("    </trkseg>\n");
            }
            gpx.push_str("  </trk>\n");
        }

        gpx.push_str("</gpx>\n");
        gpx.into_bytes()
    }
}

fn push_point(gpx: &mut String, point: &TrackPoint) {
    gpx.push_str(&format!(
        r#"      <trkpt lat="{:.7}" lon="{:.7}">"#,
        point.lat, point.lon
    ));
    gpx.push('\n');

    if let Some(ele) = point.elevation {
        gpx.push_str(&format!("        <ele>{:.2}</ele>\n", ele));
    }

    if let Some(ts) = point.timestamp {
        let formatted = ts
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_default();
        gpx.push_str(&format!("        <time>{}</time>\n", formatted));
    }

    gpx.push_str("      </trkpt>\n");
}

/// Single track, single segment document.
pub fn generate_gpx(points: &[TrackPoint], name: &str) -> Vec<u8> {
    GpxBuilder::new().name(name).track(name).segment(points).build()
}

/// Writes `contents` to `dir/file_name` and returns the full path.
pub fn write_fixture(dir: &Path, file_name: &str, contents: &[u8]) -> io::Result<PathBuf> {
    let path = dir.join(file_name);
    std::fs::write(&path, contents)?;
    Ok(path)
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpx_analyzer::gpx_loader;
    use time::OffsetDateTime;

    fn points() -> Vec<TrackPoint> {
        let start = OffsetDateTime::from_unix_timestamp(1_717_228_800).unwrap();
        vec![
            TrackPoint::new(40.0150, -105.2705, Some(1650.0)).with_timestamp(start),
            TrackPoint::new(40.0160, -105.2695, Some(1660.0))
                .with_timestamp(start + time::Duration::seconds(60)),
        ]
    }

    #[test]
    fn test_generate_gpx_basic() {
        let gpx_str = String::from_utf8(generate_gpx(&points(), "Test Activity")).unwrap();

        assert!(gpx_str.contains(r#"version="1.1""#));
        assert!(gpx_str.contains("<name>Test Activity</name>"));
        assert!(gpx_str.contains(r#"lat="40.0150000""#));
        assert!(gpx_str.contains(r#"lon="-105.2705000""#));
        assert!(gpx_str.contains("<ele>1650.00</ele>"));
        assert!(gpx_str.contains("<time>2024-06-01T08:00:00Z</time>"));
    }

    #[test]
    fn test_escapes_special_chars() {
        let gpx_str =
            String::from_utf8(generate_gpx(&points(), "Test & <Activity> \"Name\"")).unwrap();
        assert!(gpx_str.contains("Test &amp; &lt;Activity&gt; &quot;Name&quot;"));
    }

    #[test]
    fn test_omits_missing_elevation() {
        let gpx_str =
            String::from_utf8(generate_gpx(&[TrackPoint::new(40.0, -105.0, None)], "x")).unwrap();
        assert!(!gpx_str.contains("<ele>"));
        assert!(!gpx_str.contains("<time>"));
    }

    #[test]
    fn test_documents_load_back() {
        let pts = points();
        let gpx = GpxBuilder::new()
            .track("first")
            .segment(&pts[..1])
            .segment(&pts[1..])
            .track("second")
            .segment(&pts)
            .build();

        let track = gpx_loader::load_bytes(&gpx).unwrap();
        assert_eq!(track.len(), 4);
        assert_eq!(track.points()[1].elevation, Some(1660.0));
        assert_eq!(track.first().timestamp, pts[0].timestamp);
    }

    #[test]
    fn test_empty_documents() {
        let no_tracks = GpxBuilder::new().name("empty").build();
        let no_points = GpxBuilder::new().track("empty").segment(&[]).build();

        assert!(gpx_loader::load_bytes(&no_tracks).is_err());
        assert!(gpx_loader::load_bytes(&no_points).is_err());
    }
}
