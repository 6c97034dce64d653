//! Perlin noise elevation along a track.

use noise::{NoiseFn, Perlin};

/// Generates a smooth elevation profile as a function of distance travelled.
///
/// Multiple octaves of Perlin noise give long climbs with small bumps on top.
#[derive(Debug, Clone)]
pub struct ElevationGenerator {
    perlin: Perlin,
    /// Elevation the profile oscillates around, in meters.
    base_elevation: f64,
    /// Maximum deviation from the base, in meters.
    height_scale: f64,
    /// Length of the longest terrain feature, in meters.
    wavelength_m: f64,
    octaves: u32,
}

impl ElevationGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            base_elevation: 1650.0,
            height_scale: 150.0,
            wavelength_m: 4000.0,
            octaves: 4,
        }
    }

    /// Steep alpine terrain.
    pub fn alpine(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            base_elevation: 1900.0,
            height_scale: 600.0,
            wavelength_m: 6000.0,
            octaves: 5,
        }
    }

    /// Rolling hills with little variation.
    pub fn flat(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            base_elevation: 300.0,
            height_scale: 20.0,
            wavelength_m: 2000.0,
            octaves: 2,
        }
    }

    pub fn with_base_elevation(mut self, elevation: f64) -> Self {
        self.base_elevation = elevation;
        self
    }

    pub fn with_height_scale(mut self, scale: f64) -> Self {
        self.height_scale = scale;
        self
    }

    pub fn base_elevation(&self) -> f64 {
        self.base_elevation
    }

    pub fn height_scale(&self) -> f64 {
        self.height_scale
    }

    /// Elevation after `distance_m` meters along the track.
    pub fn elevation_at(&self, distance_m: f64) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0 / self.wavelength_m;
        let mut max_amplitude = 0.0;

        for octave in 0..self.octaves {
            // Offset each octave so they don't share lattice points.
            let noise_val = self
                .perlin
                .get([distance_m * frequency, f64::from(octave) * 17.3 + 0.5]);
            total += noise_val * amplitude;
            max_amplitude += amplitude;
            amplitude *= 0.5;
            frequency *= 2.0;
        }

        let normalized = (total / max_amplitude).clamp(-1.0, 1.0);
        self.base_elevation + normalized * self.height_scale
    }

    pub fn profile(&self, distances: &[f64]) -> Vec<f64> {
        distances.iter().map(|d| self.elevation_at(*d)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elevation_is_deterministic() {
        let elev_gen = ElevationGenerator::new(42);
        assert_eq!(elev_gen.elevation_at(1234.5), elev_gen.elevation_at(1234.5));
    }

    #[test]
    fn test_elevation_within_scale() {
        let elev_gen = ElevationGenerator::alpine(7);
        for d in (0..20_000).step_by(250) {
            let e = elev_gen.elevation_at(d as f64);
            assert!(e >= elev_gen.base_elevation() - elev_gen.height_scale());
            assert!(e <= elev_gen.base_elevation() + elev_gen.height_scale());
        }
    }

    #[test]
    fn test_profile_length() {
        let profile = ElevationGenerator::flat(1).profile(&[0.0, 10.0, 20.0]);
        assert_eq!(profile.len(), 3);
    }
}
