//! Spawn source for coins and slimes
//!
//! All randomness in a session goes through one seeded `StdRng`, so a
//! given seed replays the exact same coin positions, bounces and slime
//! trajectories.

use macroquad::prelude::{vec2, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{GameConfig, HazardSettings, StarSettings};

/// Where and how a new coin enters play.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarSpawn {
    pub position: Vec2,
    pub bounce_y: f32,
}

/// A new slime: gravity-free, bounces off everything.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardSpawn {
    pub position: Vec2,
    pub velocity: Vec2,
    pub bounce: f32,
    pub collide_world_bounds: bool,
    pub allow_gravity: bool,
}

pub struct Spawner {
    rng: StdRng,
    seed: u64,
    /// Spawn area, `[0, width] x [0, height]`
    width: i32,
    height: i32,
    stars: StarSettings,
    hazards: HazardSettings,
}

impl Spawner {
    pub fn new(seed: u64, config: &GameConfig) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            width: config.canvas.width as i32,
            height: config.canvas.height as i32,
            stars: config.stars.clone(),
            hazards: config.hazards.clone(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Integer point anywhere on the canvas, edges included.
    fn canvas_point(&mut self) -> Vec2 {
        let x = self.rng.gen_range(0..=self.width);
        let y = self.rng.gen_range(0..=self.height);
        vec2(x as f32, y as f32)
    }

    fn star_bounce(&mut self) -> f32 {
        let (min, max) = (self.stars.bounce_y_min, self.stars.bounce_y_max);
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    /// Replacement coin at a random spot.
    pub fn star(&mut self) -> StarSpawn {
        let position = self.canvas_point();
        StarSpawn { position, bounce_y: self.star_bounce() }
    }

    /// The opening row of coins along the top edge.
    pub fn star_row(&mut self) -> Vec<StarSpawn> {
        (0..self.stars.initial_count)
            .map(|i| StarSpawn {
                position: vec2(self.stars.start_x + self.stars.step_x * i as f32, 0.0),
                bounce_y: self.star_bounce(),
            })
            .collect()
    }

    pub fn hazard(&mut self) -> HazardSpawn {
        let position = self.canvas_point();
        let max = self.hazards.speed_x_max as i32;
        let speed_x = self.rng.gen_range(-max..=max);
        HazardSpawn {
            position,
            velocity: vec2(speed_x as f32, self.hazards.speed_y),
            bounce: self.hazards.bounce,
            collide_world_bounds: true,
            allow_gravity: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawner(seed: u64) -> Spawner {
        Spawner::new(seed, &GameConfig::default())
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = spawner(99);
        let mut b = spawner(99);
        for _ in 0..20 {
            assert_eq!(a.star(), b.star());
            assert_eq!(a.hazard(), b.hazard());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = spawner(1);
        let mut b = spawner(2);
        let sa: Vec<_> = (0..10).map(|_| a.star()).collect();
        let sb: Vec<_> = (0..10).map(|_| b.star()).collect();
        assert_ne!(sa, sb);
    }

    #[test]
    fn test_star_ranges() {
        let mut s = spawner(7);
        for _ in 0..500 {
            let star = s.star();
            assert!((0.0..=800.0).contains(&star.position.x));
            assert!((0.0..=600.0).contains(&star.position.y));
            assert_eq!(star.position.x.fract(), 0.0);
            assert!((0.4..=0.8).contains(&star.bounce_y));
        }
    }

    #[test]
    fn test_hazard_ranges() {
        let mut s = spawner(7);
        for _ in 0..500 {
            let hazard = s.hazard();
            assert!((0.0..=800.0).contains(&hazard.position.x));
            assert!((0.0..=600.0).contains(&hazard.position.y));
            assert!((-200.0..=200.0).contains(&hazard.velocity.x));
            assert_eq!(hazard.velocity.y, 20.0);
            assert_eq!(hazard.bounce, 1.0);
            assert!(hazard.collide_world_bounds);
            assert!(!hazard.allow_gravity);
        }
    }

    #[test]
    fn test_star_row_layout() {
        let mut s = spawner(3);
        let row = s.star_row();
        assert_eq!(row.len(), 12);
        assert_eq!(row[0].position, vec2(12.0, 0.0));
        assert_eq!(row[1].position, vec2(82.0, 0.0));
        assert_eq!(row[11].position, vec2(782.0, 0.0));
        assert!(row.iter().all(|star| (0.4..=0.8).contains(&star.bounce_y)));
    }

    #[test]
    fn test_fixed_bounce_when_range_collapses() {
        let mut config = GameConfig::default();
        config.stars.bounce_y_min = 0.5;
        config.stars.bounce_y_max = 0.5;
        let mut s = Spawner::new(0, &config);
        assert_eq!(s.star().bounce_y, 0.5);
    }
}
