//! Scene / Host seam
//!
//! A `Scene` is driven by the app once per frame and reacts to contacts.
//! It never touches engine storage directly; everything it wants done goes
//! through the `Host` command interface, which `ArcadeWorld` implements.

use macroquad::prelude::Vec2;

use super::animation::AnimKey;
use super::components::TextElement;
use super::entity::Entity;
use super::spawn::{HazardSpawn, StarSpawn};
use super::timer::{TimerAction, TimerHandle};
use crate::input::Controls;

/// Per-frame input handed to `Scene::update`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub controls: Controls,
    /// Player landed on a platform during this frame's physics step
    pub grounded: bool,
}

/// Lifecycle hooks of a playable scene.
pub trait Scene {
    /// Build the level. Called once before the first frame.
    fn create(&mut self, host: &mut dyn Host);

    /// Per-frame tick, after contacts were dispatched.
    fn update(&mut self, input: &TickInput, host: &mut dyn Host);

    /// The player overlaps an active coin.
    fn on_collectible(&mut self, star: Entity, host: &mut dyn Host);

    /// The player touched a slime.
    fn on_hazard(&mut self, hazard: Entity, host: &mut dyn Host);
}

/// Commands a scene can issue to the engine.
///
/// Handles that are stale, or that name an entity of the wrong kind, are
/// ignored.
pub trait Host {
    fn spawn_platform(&mut self, position: Vec2, scale: f32) -> Entity;
    fn spawn_player(&mut self, position: Vec2, bounce: f32) -> Entity;
    fn spawn_star(&mut self, spawn: StarSpawn) -> Entity;
    fn spawn_hazard(&mut self, spawn: HazardSpawn) -> Entity;

    fn set_player_velocity_x(&mut self, vx: f32);
    fn set_player_velocity_y(&mut self, vy: f32);
    fn play_player_animation(&mut self, key: AnimKey, ignore_if_playing: bool);
    fn set_player_tint(&mut self, tint: u32);
    fn set_player_scale(&mut self, scale: f32);

    /// Freeze the whole simulation. Timers keep running.
    fn pause_physics(&mut self);
    /// Take a coin out of play: no body, not drawn.
    fn disable_star(&mut self, star: Entity);

    fn add_text(&mut self, text: TextElement) -> Entity;
    fn set_text(&mut self, text: Entity, content: &str);
    fn remove_text(&mut self, text: Entity);

    fn delayed_call(&mut self, delay_ms: u32, action: TimerAction) -> TimerHandle;
}
