//! Procedural starfield generation: deterministic star placement inside a
//! cube volume surrounding the globe.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Side length of the cube volume stars are scattered in. Coordinates lie
/// in `[-CUBE_SIDE / 2, CUBE_SIDE / 2)` on each axis.
pub const CUBE_SIDE: f32 = 100.0;

/// Generates a deterministic cloud of star positions from a seed.
pub struct StarfieldGenerator {
    seed: u64,
    star_count: u32,
}

impl StarfieldGenerator {
    /// Create a new generator with the given seed and star count.
    pub fn new(seed: u64, star_count: u32) -> Self {
        Self { seed, star_count }
    }

    /// Generate the star positions. Deterministic for a given seed.
    pub fn generate(&self) -> Vec<glam::Vec3> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut stars = Vec::with_capacity(self.star_count as usize);

        for _ in 0..self.star_count {
            // random::<f32>() is in [0, 1), so each coordinate lands in
            // [-CUBE_SIDE / 2, CUBE_SIDE / 2).
            let x = (rng.random::<f32>() - 0.5) * CUBE_SIDE;
            let y = (rng.random::<f32>() - 0.5) * CUBE_SIDE;
            let z = (rng.random::<f32>() - 0.5) * CUBE_SIDE;
            stars.push(glam::Vec3::new(x, y, z));
        }

        stars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_count_is_exact() {
        let generator = StarfieldGenerator::new(42, 10_000);
        let stars = generator.generate();
        assert_eq!(stars.len(), 10_000);
    }

    #[test]
    fn test_star_coordinates_within_cube() {
        let generator = StarfieldGenerator::new(42, 10_000);
        let stars = generator.generate();
        let half = CUBE_SIDE / 2.0;
        for (i, star) in stars.iter().enumerate() {
            for (axis, val) in [("x", star.x), ("y", star.y), ("z", star.z)] {
                assert!(
                    (-half..half).contains(&val),
                    "Star {i} {axis} = {val} is outside [-{half}, {half})"
                );
            }
        }
    }

    #[test]
    fn test_star_distribution_covers_all_octants() {
        let generator = StarfieldGenerator::new(42, 8000);
        let stars = generator.generate();
        let mut octant_counts = [0u32; 8];

        for star in &stars {
            let octant = ((star.x >= 0.0) as usize)
                | (((star.y >= 0.0) as usize) << 1)
                | (((star.z >= 0.0) as usize) << 2);
            octant_counts[octant] += 1;
        }

        for (i, &count) in octant_counts.iter().enumerate() {
            assert!(
                (700..=1300).contains(&count),
                "Octant {i} has {count} stars, expected roughly 1000 (range 700-1300)"
            );
        }
    }

    #[test]
    fn test_same_seed_produces_same_starfield() {
        let gen_a = StarfieldGenerator::new(123, 1000);
        let gen_b = StarfieldGenerator::new(123, 1000);
        let stars_a = gen_a.generate();
        let stars_b = gen_b.generate();

        assert_eq!(stars_a.len(), stars_b.len());
        for (i, (a, b)) in stars_a.iter().zip(stars_b.iter()).enumerate() {
            assert!(
                (*a - *b).length() < 1e-6,
                "Star {i} position differs between identical seeds"
            );
        }
    }

    #[test]
    fn test_different_seed_produces_different_starfield() {
        let gen_a = StarfieldGenerator::new(1, 1000);
        let gen_b = StarfieldGenerator::new(9999, 1000);
        let stars_a = gen_a.generate();
        let stars_b = gen_b.generate();

        let differences = stars_a
            .iter()
            .zip(stars_b.iter())
            .filter(|(a, b)| (**a - **b).length() > 0.01)
            .count();
        assert!(
            differences > 500,
            "Expected most stars to differ between seeds, only {differences}/1000 differed"
        );
    }
}
