//! Application state and frame orchestration
//!
//! One frame, in order:
//! 1. physics step (frame time clamped so a stalled tab does not tunnel)
//! 2. coin contacts, then slime contacts, handed to the scene
//! 3. scene update with the grounded flag from this step
//! 4. animations and timers on unclamped frame time
//!
//! Input polling and drawing stay in `main`, so a frame can be driven
//! headless from tests.

use crate::config::GameConfig;
use crate::game::{ArcadeWorld, Contact, GameplayController, Scene, Textures, TickInput};
use crate::input::Controls;

/// Longest physics step taken in one frame (seconds)
const MAX_STEP: f32 = 1.0 / 30.0;

pub struct AppState {
    pub config: GameConfig,
    pub world: ArcadeWorld,
    pub scene: GameplayController,
    pub textures: Textures,
}

impl AppState {
    /// Build the world and run the scene's setup hook.
    pub fn new(config: GameConfig, seed: u64, textures: Textures) -> Self {
        let mut world = ArcadeWorld::new(&config);
        let mut scene = GameplayController::new(config.clone(), seed);
        scene.create(&mut world);
        Self { config, world, scene, textures }
    }

    /// Advance the game by one frame of `dt` seconds.
    pub fn tick(&mut self, dt: f32, controls: Controls) {
        let dt = dt.max(0.0);
        self.world.step(dt.min(MAX_STEP));

        for contact in self.world.take_contacts() {
            match contact {
                Contact::Star(star) => self.scene.on_collectible(star, &mut self.world),
                Contact::Hazard(hazard) => self.scene.on_hazard(hazard, &mut self.world),
            }
        }

        let input = TickInput { controls, grounded: self.world.player_grounded() };
        self.scene.update(&input, &mut self.world);

        self.world.advance_animations(dt);
        self.world.advance_timers(dt * 1000.0);
    }

    pub fn draw(&self) {
        crate::game::draw_world(&self.world, &self.textures, &self.config);
    }

    /// Release the world. Pending timers are dropped.
    pub fn shutdown(&mut self) {
        self.world.teardown();
    }
}
