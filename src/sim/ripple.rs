//! Ripple sources spawned by clicks
//!
//! A bounded, oldest-first queue. Sources age once per tick and expire at
//! the configured lifetime.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::{FieldConfig, RippleConfig};

/// A single damped circular wave
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RippleSource {
    pub x: f32,
    pub y: f32,
    /// Ticks since spawn
    pub age: u32,
    pub strength: f32,
}

impl RippleSource {
    pub fn new(x: f32, y: f32, strength: f32) -> Self {
        Self {
            x,
            y,
            age: 0,
            strength,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Amplitude of the wave at `distance` ignoring its phase:
    /// `strength * exp(-age / decay) * max(0, 1 - distance / max_radius)`
    pub fn envelope(&self, distance: f32, params: &FieldConfig, lifetime: u32) -> f32 {
        if self.age >= lifetime {
            return 0.0;
        }
        let dist_decay = (1.0 - distance / params.ripple_max_radius).max(0.0);
        if dist_decay <= 0.0 {
            return 0.0;
        }
        let age_decay = (-(self.age as f32) / params.ripple_decay).exp();
        self.strength * age_decay * dist_decay
    }

    /// Field contribution at `pos`
    pub fn contribution(&self, pos: Vec2, params: &FieldConfig, lifetime: u32) -> f32 {
        let distance = pos.distance(self.position());
        let envelope = self.envelope(distance, params, lifetime);
        if envelope == 0.0 {
            return 0.0;
        }
        let phase = distance * params.ripple_frequency - self.age as f32 * params.ripple_speed;
        phase.sin() * envelope
    }
}

/// Bounded set of live ripple sources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RippleRegistry {
    sources: VecDeque<RippleSource>,
    lifetime: u32,
    max_sources: usize,
    strength: f32,
}

impl RippleRegistry {
    pub fn new(config: &RippleConfig) -> Self {
        Self {
            sources: VecDeque::with_capacity(config.max_sources),
            lifetime: config.lifetime,
            max_sources: config.max_sources,
            strength: config.strength,
        }
    }

    /// Add a fresh source, evicting the oldest when full. A zero bound
    /// keeps the registry empty.
    pub fn spawn(&mut self, x: f32, y: f32) {
        if self.max_sources == 0 {
            return;
        }
        if self.sources.len() >= self.max_sources {
            self.sources.pop_front();
        }
        self.sources.push_back(RippleSource::new(x, y, self.strength));
    }

    /// Age every source by one tick and drop the expired ones
    pub fn tick(&mut self) {
        let lifetime = self.lifetime;
        for source in self.sources.iter_mut() {
            source.age = source.age.saturating_add(1);
        }
        self.sources.retain(|s| s.age < lifetime);
    }

    pub fn iter(&self) -> impl Iterator<Item = &RippleSource> {
        self.sources.iter()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn lifetime(&self) -> u32 {
        self.lifetime
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> RippleRegistry {
        RippleRegistry::new(&RippleConfig::default())
    }

    #[test]
    fn test_spawn_starts_at_age_zero() {
        let mut ripples = registry();
        ripples.spawn(10.0, 20.0);
        let source = ripples.iter().next().unwrap();
        assert_eq!(source.age, 0);
        assert_eq!(source.strength, 4.0);
        assert_eq!(source.position(), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_bound_evicts_oldest() {
        let mut ripples = registry();
        for i in 0..10 {
            ripples.spawn(i as f32, 0.0);
        }
        assert_eq!(ripples.len(), 9);
        // First spawn (x = 0) was evicted
        assert_eq!(ripples.iter().next().unwrap().x, 1.0);
        assert_eq!(ripples.iter().last().unwrap().x, 9.0);
    }

    #[test]
    fn test_zero_bound_spawns_nothing() {
        let mut ripples = RippleRegistry::new(&RippleConfig {
            max_sources: 0,
            ..RippleConfig::default()
        });
        ripples.spawn(1.0, 1.0);
        ripples.spawn(2.0, 2.0);
        assert!(ripples.is_empty());
        ripples.tick();
        assert!(ripples.is_empty());
    }

    #[test]
    fn test_expires_at_lifetime() {
        let mut ripples = registry();
        ripples.spawn(0.0, 0.0);
        for _ in 0..299 {
            ripples.tick();
        }
        assert_eq!(ripples.len(), 1);
        assert_eq!(ripples.iter().next().unwrap().age, 299);

        ripples.tick();
        assert!(ripples.is_empty());
    }

    #[test]
    fn test_expired_source_contributes_nothing() {
        let params = FieldConfig::default();
        let source = RippleSource {
            x: 0.0,
            y: 0.0,
            age: 300,
            strength: 4.0,
        };
        for d in [1.0, 13.0, 62.8, 400.0] {
            assert_eq!(source.contribution(Vec2::new(d, 0.0), &params, 300), 0.0);
        }
    }

    #[test]
    fn test_contribution_zero_beyond_radius() {
        let params = FieldConfig::default();
        let source = RippleSource::new(0.0, 0.0, 4.0);
        assert_eq!(source.contribution(Vec2::new(800.0, 0.0), &params, 300), 0.0);
        assert_eq!(source.contribution(Vec2::new(0.0, 1500.0), &params, 300), 0.0);
    }

    #[test]
    fn test_envelope_decays_with_age_and_distance() {
        let params = FieldConfig::default();
        let mut source = RippleSource::new(0.0, 0.0, 4.0);
        let young = source.envelope(100.0, &params, 300);
        source.age = 50;
        let old = source.envelope(100.0, &params, 300);
        assert!(old < young);
        assert!(source.envelope(400.0, &params, 300) < old);
    }
}
