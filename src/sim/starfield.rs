//! Drifting starfield
//!
//! Particles move at a constant velocity and wrap around the viewport edges.
//! Twinkle is a pure function of time and position so no per-star timers are
//! kept.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::StarfieldConfig;

/// Star palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StarColor {
    White,
    Indigo,
    Faint,
}

impl StarColor {
    pub const ALL: [StarColor; 3] = [StarColor::White, StarColor::Indigo, StarColor::Faint];

    pub fn rgba(&self) -> [f32; 4] {
        match self {
            StarColor::White => [1.0, 1.0, 1.0, 0.6],
            StarColor::Indigo => [99.0 / 255.0, 102.0 / 255.0, 241.0 / 255.0, 0.6],
            StarColor::Faint => [1.0, 1.0, 1.0, 0.3],
        }
    }
}

/// A single point sprite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarParticle {
    pub x: f32,
    pub y: f32,
    /// Spawn position
    pub original_x: f32,
    pub original_y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Radius in logical pixels
    pub size: f32,
    pub color: StarColor,
}

impl StarParticle {
    /// Move one tick and wrap to the opposite edge when leaving the viewport
    pub fn advance(&mut self, width: f32, height: f32) {
        self.x += self.vx;
        self.y += self.vy;

        if self.x < 0.0 {
            self.x = width;
        }
        if self.x > width {
            self.x = 0.0;
        }
        if self.y < 0.0 {
            self.y = height;
        }
        if self.y > height {
            self.y = 0.0;
        }
    }

    /// Opacity multiplier in [0.2, 1.0]
    #[inline]
    pub fn twinkle(&self, time: f32) -> f32 {
        (time * 0.5 + self.x).sin().abs() * 0.8 + 0.2
    }
}

/// Number of stars for a viewport
pub fn star_count(width: f32, height: f32, area_per_star: f32) -> usize {
    if !(width > 0.0 && height > 0.0) {
        return 0;
    }
    (width * height / area_per_star).floor() as usize
}

/// The particle population for the current viewport
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Starfield {
    pub particles: Vec<StarParticle>,
    width: f32,
    height: f32,
}

impl Starfield {
    /// Discard every particle and spawn a fresh population sized to the area
    pub fn regenerate<R: Rng>(
        &mut self,
        width: f32,
        height: f32,
        config: &StarfieldConfig,
        rng: &mut R,
    ) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);

        let count = star_count(self.width, self.height, config.area_per_star);
        self.particles.clear();
        self.particles.reserve(count);

        let drift = config.max_drift.abs();
        for _ in 0..count {
            let x = rng.random::<f32>() * self.width;
            let y = rng.random::<f32>() * self.height;
            let color = StarColor::ALL[rng.random_range(0..StarColor::ALL.len())];
            self.particles.push(StarParticle {
                x,
                y,
                original_x: x,
                original_y: y,
                vx: (rng.random::<f32>() - 0.5) * 2.0 * drift,
                vy: (rng.random::<f32>() - 0.5) * 2.0 * drift,
                size: config.min_size + rng.random::<f32>() * (config.max_size - config.min_size),
                color,
            });
        }
    }

    /// Advance every particle one tick
    pub fn advance(&mut self) {
        let (width, height) = (self.width, self.height);
        for particle in &mut self.particles {
            particle.advance(width, height);
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn star(x: f32, y: f32, vx: f32, vy: f32) -> StarParticle {
        StarParticle {
            x,
            y,
            original_x: x,
            original_y: y,
            vx,
            vy,
            size: 1.0,
            color: StarColor::White,
        }
    }

    #[test]
    fn test_star_count() {
        assert_eq!(star_count(800.0, 600.0, 7000.0), 68);
        assert_eq!(star_count(1600.0, 1200.0, 7000.0), 274);
        assert_eq!(star_count(0.0, 600.0, 7000.0), 0);
    }

    #[test]
    fn test_wraps_left_to_right() {
        let mut p = star(0.05, 10.0, -0.1, 0.0);
        p.advance(100.0, 100.0);
        assert_eq!(p.x, 100.0);
    }

    #[test]
    fn test_wraps_right_to_left() {
        let mut p = star(99.95, 10.0, 0.1, 0.0);
        p.advance(100.0, 100.0);
        assert_eq!(p.x, 0.0);
    }

    #[test]
    fn test_wraps_vertically() {
        let mut p = star(10.0, 0.02, 0.0, -0.05);
        p.advance(100.0, 50.0);
        assert_eq!(p.y, 50.0);
        let mut p = star(10.0, 49.99, 0.0, 0.05);
        p.advance(100.0, 50.0);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn test_twinkle_range() {
        let p = star(0.0, 0.0, 0.0, 0.0);
        assert!((p.twinkle(0.0) - 0.2).abs() < 1e-6);
        for i in 0..100 {
            let a = p.twinkle(i as f32 * 0.37);
            assert!((0.2..=1.0 + 1e-6).contains(&a));
        }
    }

    #[test]
    fn test_regenerate_within_bounds() {
        let mut rng = Pcg32::seed_from_u64(7);
        let config = StarfieldConfig::default();
        let mut stars = Starfield::default();
        stars.regenerate(800.0, 600.0, &config, &mut rng);
        assert_eq!(stars.len(), 68);
        for p in &stars.particles {
            assert!((0.0..=800.0).contains(&p.x));
            assert!((0.0..=600.0).contains(&p.y));
            assert!(p.vx.abs() <= 0.075 && p.vy.abs() <= 0.075);
            assert!(p.size >= 0.5 && p.size <= 2.0);
            assert_eq!((p.x, p.y), (p.original_x, p.original_y));
        }
    }

    #[test]
    fn test_same_seed_same_population() {
        let config = StarfieldConfig::default();
        let mut a = Starfield::default();
        let mut b = Starfield::default();
        a.regenerate(400.0, 300.0, &config, &mut Pcg32::seed_from_u64(42));
        b.regenerate(400.0, 300.0, &config, &mut Pcg32::seed_from_u64(42));
        assert_eq!(a.particles, b.particles);
    }
}
