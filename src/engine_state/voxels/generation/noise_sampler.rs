//! # Noise Sampler Module
//!
//! Multi-octave coherent noise. The same sampler serves as the terrain heightmap
//! ([`NoiseSampler::sample`]) and as a raw single-octave source for caves and dirt
//! depth ([`NoiseSampler::noise3`]).

use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

use crate::core::ConfigError;

/// One layer of the heightmap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Octave {
    /// Multiplier applied to the coordinates before sampling.
    pub frequency: f64,
    /// Multiplier applied to the raw noise value.
    pub amplitude: f64,
    /// Constant added after scaling.
    pub offset: f64,
}

impl Octave {
    /// Creates an octave.
    pub const fn new(frequency: f64, amplitude: f64, offset: f64) -> Self {
        Octave {
            frequency,
            amplitude,
            offset,
        }
    }
}

/// A pure function of `(x, y, z)` built from a list of octaves over a seeded Perlin
/// source.
#[derive(Clone)]
pub struct NoiseSampler {
    octaves: Vec<Octave>,
    perlin: Perlin,
}

impl NoiseSampler {
    /// Creates a sampler from a seed and octave list.
    ///
    /// # Errors
    /// [`ConfigError::InvalidOctaves`] if the list is empty or holds a non-finite value.
    pub fn new(seed: u32, octaves: Vec<Octave>) -> Result<Self, ConfigError> {
        if octaves.is_empty() {
            return Err(ConfigError::InvalidOctaves("no octaves".to_owned()));
        }
        if let Some(bad) = octaves.iter().find(|o| {
            !(o.frequency.is_finite() && o.amplitude.is_finite() && o.offset.is_finite())
        }) {
            return Err(ConfigError::InvalidOctaves(format!("{bad:?}")));
        }
        Ok(NoiseSampler {
            octaves,
            perlin: Perlin::new(seed),
        })
    }

    /// A heightmap that is `height` everywhere. Its [`noise3`](Self::noise3) still
    /// samples real noise.
    pub fn flat(seed: u32, height: f64) -> Self {
        NoiseSampler {
            octaves: vec![Octave::new(0.0, 0.0, height)],
            perlin: Perlin::new(seed),
        }
    }

    /// Sums `amplitude * noise3(freq * x, freq * y, freq * z) + offset` over all octaves.
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        self.octaves
            .iter()
            .map(|o| {
                o.amplitude * self.noise3(o.frequency * x, o.frequency * y, o.frequency * z)
                    + o.offset
            })
            .sum()
    }

    /// Raw single-octave Perlin noise, roughly in `[-1, 1]`.
    pub fn noise3(&self, x: f64, y: f64, z: f64) -> f64 {
        self.perlin.get([x, y, z])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_sampler_is_constant() {
        let sampler = NoiseSampler::flat(3, 40.0);
        for (x, y) in [(0.0, 0.0), (17.0, 250.0), (-3.5, 9.25)] {
            assert_eq!(sampler.sample(x, y, 0.0), 40.0);
        }
    }

    #[test]
    fn sample_is_a_pure_function_of_position() {
        let a = NoiseSampler::new(7, vec![Octave::new(0.01, 8.0, 30.0), Octave::new(0.06, 1.0, 0.0)])
            .unwrap();
        let b = a.clone();
        for i in 0..50 {
            let (x, y) = (i as f64 * 3.7, i as f64 * 11.3);
            assert_eq!(a.sample(x, y, 0.0), b.sample(x, y, 0.0));
        }
    }

    #[test]
    fn offsets_add_up_and_amplitudes_bound_the_variation() {
        let sampler =
            NoiseSampler::new(0, vec![Octave::new(0.01, 8.0, 30.0), Octave::new(0.06, 1.0, 0.0)])
                .unwrap();
        for i in 0..200 {
            let h = sampler.sample(i as f64 * 1.3, i as f64 * 0.7, 0.0);
            assert!((30.0 - 9.0..=30.0 + 9.0).contains(&h), "height {h} out of range");
        }
    }

    #[test]
    fn empty_or_non_finite_octaves_are_rejected() {
        assert!(matches!(
            NoiseSampler::new(0, Vec::new()),
            Err(ConfigError::InvalidOctaves(_))
        ));
        assert!(matches!(
            NoiseSampler::new(0, vec![Octave::new(f64::NAN, 1.0, 0.0)]),
            Err(ConfigError::InvalidOctaves(_))
        ));
    }
}
