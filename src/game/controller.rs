//! Gameplay Controller
//!
//! Owns the session state and turns engine events into commands:
//! - every frame: run, idle or jump
//! - coin pickup: score, tint cycle, growth, slime release, replacement coin
//! - slime contact: freeze and show the game over message
//!
//! Game over is a one-way latch. Once set, every handler is a no-op.

use macroquad::logging::info;
use macroquad::prelude::vec2;

use super::animation::AnimKey;
use super::components::TextElement;
use super::entity::Entity;
use super::host::{Host, Scene, TickInput};
use super::spawn::Spawner;
use super::timer::TimerAction;
use crate::config::GameConfig;

/// Session state, mutated only by the controller's handlers.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub score: u32,
    pub stars_collected: u32,
    /// Next palette entry to tint the player with
    pub current_color_index: usize,
    pub scale_factor: f32,
    pub game_over: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            score: 0,
            stars_collected: 0,
            current_color_index: 0,
            scale_factor: 1.0,
            game_over: false,
        }
    }
}

pub struct GameplayController {
    state: GameState,
    spawner: Spawner,
    config: GameConfig,
    score_text: Entity,
    game_over_text: Entity,
}

impl GameplayController {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            state: GameState::default(),
            spawner: Spawner::new(seed, &config),
            config,
            score_text: Entity::NULL,
            game_over_text: Entity::NULL,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn seed(&self) -> u64 {
        self.spawner.seed()
    }

    pub fn score_text(&self) -> Entity {
        self.score_text
    }

    pub fn game_over_text(&self) -> Entity {
        self.game_over_text
    }

    fn score_label(&self) -> String {
        format!("{}{}", self.config.hud.score_prefix, self.state.score)
    }
}

impl Scene for GameplayController {
    fn create(&mut self, host: &mut dyn Host) {
        for platform in &self.config.platforms {
            host.spawn_platform(vec2(platform.x, platform.y), platform.scale);
        }

        let player = &self.config.player;
        host.spawn_player(vec2(player.spawn.0, player.spawn.1), player.bounce);

        for star in self.spawner.star_row() {
            host.spawn_star(star);
        }

        let hud = &self.config.hud;
        self.score_text = host.add_text(TextElement {
            content: self.score_label(),
            position: vec2(self.config.canvas.width - hud.score_margin, hud.score_margin),
            font_size: hud.score_font_size,
            color: hud.text_color,
            origin: vec2(1.0, 0.0),
        });
    }

    fn update(&mut self, input: &TickInput, host: &mut dyn Host) {
        if self.state.game_over {
            return;
        }

        let speed = self.config.player.run_speed;
        let controls = &input.controls;
        if controls.left {
            host.set_player_velocity_x(-speed);
            host.play_player_animation(AnimKey::Left, true);
        } else if controls.right {
            host.set_player_velocity_x(speed);
            host.play_player_animation(AnimKey::Right, true);
        } else {
            host.set_player_velocity_x(0.0);
            host.play_player_animation(AnimKey::Turn, false);
        }

        if controls.up && input.grounded {
            host.set_player_velocity_y(-self.config.player.jump_speed);
        }
    }

    fn on_collectible(&mut self, star: Entity, host: &mut dyn Host) {
        if self.state.game_over {
            return;
        }

        host.disable_star(star);

        self.state.score += 1;
        let label = self.score_label();
        host.set_text(self.score_text, &label);

        let palette = &self.config.palette;
        host.set_player_tint(palette[self.state.current_color_index]);
        self.state.current_color_index = (self.state.current_color_index + 1) % palette.len();

        self.state.stars_collected += 1;
        if self.state.stars_collected % self.config.hazards.every_n_stars == 0 {
            self.state.scale_factor += self.config.scale_step;
            host.set_player_scale(self.state.scale_factor);

            let hazard = self.spawner.hazard();
            host.spawn_hazard(hazard);
            info!(
                "Slime released at ({}, {}) after {} coins",
                hazard.position.x, hazard.position.y, self.state.stars_collected
            );
        }

        let replacement = self.spawner.star();
        host.spawn_star(replacement);
    }

    fn on_hazard(&mut self, _hazard: Entity, host: &mut dyn Host) {
        if self.state.game_over {
            return;
        }

        host.pause_physics();
        host.set_player_tint(self.config.game_over.tint);
        host.play_player_animation(AnimKey::Turn, false);
        self.state.game_over = true;

        let game_over = &self.config.game_over;
        let canvas = &self.config.canvas;
        self.game_over_text = host.add_text(TextElement {
            content: game_over.message.clone(),
            position: vec2(canvas.width * 0.5, canvas.height * 0.5),
            font_size: game_over.font_size,
            color: self.config.hud.text_color,
            origin: vec2(0.5, 0.5),
        });
        host.delayed_call(game_over.text_delay_ms, TimerAction::RemoveText(self.game_over_text));

        info!("Game over with {} coins", self.state.score);
    }
}
