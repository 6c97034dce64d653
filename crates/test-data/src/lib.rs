//! Test data generation for gpx-analyzer.
//!
//! Synthetic GPS tracks and the GPX documents that carry them, used to
//! exercise the loader, the metrics engine and the report sinks end to end.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use test_data::prelude::*;
//!
//! let points = TrackGenerator::for_region(Region::OBERLAND, 7)
//!     .with_distance(5000.0)
//!     .with_elevation(ElevationGenerator::alpine(7))
//!     .with_elevation_gaps(0.05)
//!     .generate(&mut rng);
//! let gpx = generate_gpx(&points, "Morning hike");
//! ```

pub mod config;
pub mod generators;
pub mod gpx;
pub mod terrain;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{BoundingBox, Region};
    pub use crate::generators::{TrackConfig, TrackGenerator, straight_line};
    pub use crate::gpx::{GpxBuilder, generate_gpx, write_fixture};
    pub use crate::terrain::ElevationGenerator;
    pub use gpx_analyzer::TrackPoint;
}
