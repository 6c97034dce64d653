//! Synthetic track generators.
//!
//! - [`TrackGenerator`]: random-walk tracks with noise-based elevation
//! - [`straight_line`]: evenly spaced points along the equator, for tests
//!   that need known distances

mod track;

pub use track::{TrackConfig, TrackGenerator, straight_line};
