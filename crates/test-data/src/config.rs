//! Geographic areas used when generating tracks.

use rand::Rng;

/// Geographic bounding box defined by southwest and northeast corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub const fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    /// Returns a random point within the bounding box.
    pub fn random_point(&self, rng: &mut impl Rng) -> (f64, f64) {
        let lat = rng.gen_range(self.min_lat..self.max_lat);
        let lon = rng.gen_range(self.min_lon..self.max_lon);
        (lat, lon)
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat) && (self.min_lon..=self.max_lon).contains(&lon)
    }
}

/// Pre-defined regions.
#[derive(Debug, Clone, Copy)]
pub struct Region;

impl Region {
    /// Boulder, CO foothills.
    pub const BOULDER: BoundingBox = BoundingBox::new(39.9, -105.5, 40.1, -105.2);

    /// Bernese Oberland, steep alpine terrain.
    pub const OBERLAND: BoundingBox = BoundingBox::new(46.5, 7.6, 46.7, 8.1);

    /// A patch of ocean on the equator around the prime meridian, where a
    /// degree of longitude is longest.
    pub const EQUATOR: BoundingBox = BoundingBox::new(-0.5, -0.5, 0.5, 0.5);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_point_inside() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let (lat, lon) = Region::BOULDER.random_point(&mut rng);
            assert!(Region::BOULDER.contains(lat, lon));
        }
    }

    #[test]
    fn test_center() {
        assert_eq!(Region::EQUATOR.center(), (0.0, 0.0));
    }
}
