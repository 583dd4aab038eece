//! Arcade World
//!
//! The engine side of the game: entity allocation, component storage,
//! the player's animator, pending timers and the physics settings.
//! Implements `Host`, so a scene drives it purely through commands.
//!
//! Every entity gets a `Kind` marker. Components are stored in typed
//! fields rather than a type map; the set of components is known up front.

use macroquad::logging::info;
use macroquad::prelude::{vec2, Rect, Vec2};

use super::animation::{AnimKey, AnimationSet, Animator};
use super::component::ComponentStorage;
use super::components::{Body, Kind, Sprite, TextElement, TextureKey};
use super::entity::{Entity, EntityAllocator};
use super::event::Events;
use super::host::Host;
use super::physics::{self, PhysicsSettings};
use super::spawn::{HazardSpawn, StarSpawn};
use super::timer::{Scheduler, TimerAction, TimerHandle};
use crate::config::GameConfig;

/// A player contact found by the last physics step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Star(Entity),
    Hazard(Entity),
}

/// Unscaled body sizes per entity kind.
#[derive(Debug, Clone, Copy, PartialEq)]
struct BodySizes {
    platform: Vec2,
    player: Vec2,
    star: Vec2,
    hazard: Vec2,
}

impl BodySizes {
    fn from_config(config: &GameConfig) -> Self {
        let v = |(x, y): (f32, f32)| vec2(x, y);
        Self {
            platform: v(config.platform_size),
            player: v(config.player.frame_size),
            star: v(config.stars.size),
            hazard: v(config.hazards.size),
        }
    }
}

pub struct ArcadeWorld {
    entities: EntityAllocator,

    pub bodies: ComponentStorage<Body>,
    pub sprites: ComponentStorage<Sprite>,
    pub kinds: ComponentStorage<Kind>,
    pub texts: ComponentStorage<TextElement>,

    player: Entity,
    animator: Animator,
    animations: AnimationSet,

    scheduler: Scheduler,
    events: Events,
    physics: PhysicsSettings,
    paused: bool,
    sizes: BodySizes,
}

impl ArcadeWorld {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            entities: EntityAllocator::new(),
            bodies: ComponentStorage::new(),
            sprites: ComponentStorage::new(),
            kinds: ComponentStorage::new(),
            texts: ComponentStorage::new(),
            player: Entity::NULL,
            animator: Animator::new(),
            animations: AnimationSet::knight(),
            scheduler: Scheduler::new(),
            events: Events::new(),
            physics: PhysicsSettings {
                gravity: config.gravity,
                bounds: Rect::new(0.0, 0.0, config.canvas.width, config.canvas.height),
            },
            paused: false,
            sizes: BodySizes::from_config(config),
        }
    }

    // =========================================================================
    // Entity Management
    // =========================================================================

    fn spawn(&mut self, kind: Kind, body: Body, texture: TextureKey) -> Entity {
        let entity = self.entities.allocate();
        self.kinds.insert(entity, kind);
        self.bodies.insert(entity, body);
        self.sprites.insert(entity, Sprite::new(texture));
        entity
    }

    /// Remove an entity and all of its components. Returns false for stale handles.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        if !self.entities.free(entity) {
            return false;
        }
        self.kinds.remove(entity);
        self.bodies.remove(entity);
        self.sprites.remove(entity);
        self.texts.remove(entity);
        if entity == self.player {
            self.player = Entity::NULL;
        }
        true
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    pub fn entity_count(&self) -> u32 {
        self.entities.alive_count()
    }

    /// Live entities of `kind`, in storage order.
    pub fn entities_of(&self, kind: Kind) -> Vec<Entity> {
        self.kinds
            .iter()
            .filter(|(_, k)| **k == kind)
            .map(|(entity, _)| entity)
            .collect()
    }

    /// Live entities of `kind` whose body still takes part in the simulation.
    pub fn active_of(&self, kind: Kind) -> Vec<Entity> {
        self.entities_of(kind)
            .into_iter()
            .filter(|e| self.bodies.get(*e).is_some_and(|b| b.enabled))
            .collect()
    }

    fn is_kind(&self, entity: Entity, kind: Kind) -> bool {
        self.kinds.get(entity) == Some(&kind)
    }

    // =========================================================================
    // Player Accessors
    // =========================================================================

    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn player_body(&self) -> Option<&Body> {
        self.bodies.get(self.player)
    }

    pub fn player_sprite(&self) -> Option<&Sprite> {
        self.sprites.get(self.player)
    }

    pub fn player_grounded(&self) -> bool {
        self.player_body().is_some_and(|body| body.touching_down)
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// Sprite-sheet frame the player is showing.
    pub fn player_frame(&self) -> Option<u32> {
        self.animator.frame(&self.animations)
    }

    // =========================================================================
    // Simulation
    // =========================================================================

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Run one physics step of `dt` seconds. Does nothing while paused.
    pub fn step(&mut self, dt: f32) {
        if self.paused {
            return;
        }
        physics::step(&mut self.bodies, &self.kinds, &self.physics, dt, &mut self.events);
    }

    /// Contacts from the last step: coins first, then slimes.
    pub fn take_contacts(&mut self) -> Vec<Contact> {
        let stars = self.events.star_overlap.drain().map(|e| Contact::Star(e.star));
        let mut contacts: Vec<Contact> = stars.collect();
        contacts.extend(self.events.hazard_hit.drain().map(|e| Contact::Hazard(e.hazard)));
        contacts
    }

    pub fn advance_animations(&mut self, dt: f32) {
        self.animator.advance(dt, &self.animations);
    }

    /// Count timers down and apply whatever fired.
    pub fn advance_timers(&mut self, dt_ms: f32) {
        for action in self.scheduler.advance(dt_ms) {
            match action {
                TimerAction::RemoveText(text) => self.remove_text(text),
            }
        }
    }

    /// Shut the world down: pending timers are dropped so nothing fires
    /// against a world that is going away, then every entity is released.
    pub fn teardown(&mut self) {
        let pending = self.scheduler.len();
        self.scheduler.cancel_all();
        self.events.clear_all();
        self.bodies.clear();
        self.sprites.clear();
        self.kinds.clear();
        self.texts.clear();
        self.entities.clear();
        self.player = Entity::NULL;
        info!("World torn down ({} pending timers cancelled)", pending);
    }
}

impl Host for ArcadeWorld {
    fn spawn_platform(&mut self, position: Vec2, scale: f32) -> Entity {
        let body = Body::fixed(position, self.sizes.platform, scale);
        self.spawn(Kind::Platform, body, TextureKey::Ground)
    }

    fn spawn_player(&mut self, position: Vec2, bounce: f32) -> Entity {
        if self.player != Entity::NULL {
            self.despawn(self.player);
        }
        let mut body = Body::dynamic(position, self.sizes.player);
        body.bounce = vec2(bounce, bounce);
        body.collide_world_bounds = true;
        self.player = self.spawn(Kind::Player, body, TextureKey::Knight);
        self.player
    }

    fn spawn_star(&mut self, spawn: StarSpawn) -> Entity {
        let mut body = Body::dynamic(spawn.position, self.sizes.star);
        body.bounce.y = spawn.bounce_y;
        self.spawn(Kind::Star, body, TextureKey::Star)
    }

    fn spawn_hazard(&mut self, spawn: HazardSpawn) -> Entity {
        let mut body = Body::dynamic(spawn.position, self.sizes.hazard);
        body.velocity = spawn.velocity;
        body.bounce = vec2(spawn.bounce, spawn.bounce);
        body.collide_world_bounds = spawn.collide_world_bounds;
        body.allow_gravity = spawn.allow_gravity;
        self.spawn(Kind::Hazard, body, TextureKey::Slime)
    }

    fn set_player_velocity_x(&mut self, vx: f32) {
        if let Some(body) = self.bodies.get_mut(self.player) {
            body.velocity.x = vx;
        }
    }

    fn set_player_velocity_y(&mut self, vy: f32) {
        if let Some(body) = self.bodies.get_mut(self.player) {
            body.velocity.y = vy;
        }
    }

    fn play_player_animation(&mut self, key: AnimKey, ignore_if_playing: bool) {
        if self.entities.is_alive(self.player) {
            self.animator.play(key, ignore_if_playing);
        }
    }

    fn set_player_tint(&mut self, tint: u32) {
        if let Some(sprite) = self.sprites.get_mut(self.player) {
            sprite.tint = Some(tint);
        }
    }

    fn set_player_scale(&mut self, scale: f32) {
        if let Some(body) = self.bodies.get_mut(self.player) {
            body.scale = scale;
        }
    }

    fn pause_physics(&mut self) {
        self.paused = true;
    }

    fn disable_star(&mut self, star: Entity) {
        if !self.is_kind(star, Kind::Star) {
            return;
        }
        if let Some(body) = self.bodies.get_mut(star) {
            body.enabled = false;
            body.velocity = Vec2::ZERO;
        }
        if let Some(sprite) = self.sprites.get_mut(star) {
            sprite.visible = false;
        }
    }

    fn add_text(&mut self, text: TextElement) -> Entity {
        let entity = self.entities.allocate();
        self.texts.insert(entity, text);
        entity
    }

    fn set_text(&mut self, text: Entity, content: &str) {
        if let Some(element) = self.texts.get_mut(text) {
            element.content.clear();
            element.content.push_str(content);
        }
    }

    fn remove_text(&mut self, text: Entity) {
        if self.texts.contains(text) {
            self.despawn(text);
        }
    }

    fn delayed_call(&mut self, delay_ms: u32, action: TimerAction) -> TimerHandle {
        self.scheduler.delayed_call(delay_ms, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> ArcadeWorld {
        let mut world = ArcadeWorld::new(&GameConfig::default());
        world.spawn_platform(vec2(400.0, 568.0), 2.0);
        world
    }

    fn label(content: &str) -> TextElement {
        TextElement {
            content: content.to_string(),
            position: vec2(400.0, 300.0),
            font_size: 64.0,
            color: 0xffffff,
            origin: vec2(0.5, 0.5),
        }
    }

    #[test]
    fn test_player_lands_and_reports_grounded() {
        let mut world = world();
        world.spawn_player(vec2(100.0, 450.0), 0.2);
        assert!(!world.player_grounded());

        for _ in 0..180 {
            world.step(1.0 / 60.0);
        }
        assert!(world.player_grounded());
    }

    #[test]
    fn test_paused_world_does_not_move() {
        let mut world = world();
        world.spawn_player(vec2(100.0, 100.0), 0.2);
        world.pause_physics();

        world.step(1.0 / 60.0);
        assert_eq!(world.player_body().unwrap().position, vec2(100.0, 100.0));
        assert!(world.take_contacts().is_empty());
    }

    #[test]
    fn test_contacts_list_stars_before_hazards() {
        let mut world = world();
        world.spawn_player(vec2(300.0, 300.0), 0.0);
        let hazard = world.spawn_hazard(HazardSpawn {
            position: vec2(300.0, 300.0),
            velocity: Vec2::ZERO,
            bounce: 1.0,
            collide_world_bounds: true,
            allow_gravity: false,
        });
        let star = world.spawn_star(StarSpawn { position: vec2(300.0, 300.0), bounce_y: 0.5 });

        world.step(1.0 / 60.0);
        assert_eq!(world.take_contacts(), vec![Contact::Star(star), Contact::Hazard(hazard)]);
        assert!(world.take_contacts().is_empty());
    }

    #[test]
    fn test_disabled_star_leaves_play() {
        let mut world = world();
        let star = world.spawn_star(StarSpawn { position: vec2(200.0, 100.0), bounce_y: 0.5 });
        world.disable_star(star);

        assert!(!world.bodies.get(star).unwrap().enabled);
        assert!(!world.sprites.get(star).unwrap().visible);
        assert!(world.active_of(Kind::Star).is_empty());
        assert_eq!(world.entities_of(Kind::Star), vec![star]);
    }

    #[test]
    fn test_collected_star_keeps_its_slot() {
        let mut world = world();
        let star = world.spawn_star(StarSpawn { position: vec2(200.0, 100.0), bounce_y: 0.5 });
        let before = world.entity_count();
        world.disable_star(star);

        assert!(world.is_alive(star));
        assert_eq!(world.entity_count(), before);

        // The replacement gets a fresh slot instead of recycling the old one
        let next = world.spawn_star(StarSpawn { position: vec2(300.0, 100.0), bounce_y: 0.5 });
        assert_ne!(next.index(), star.index());
        assert_eq!(world.entities_of(Kind::Star).len(), 2);
    }

    #[test]
    fn test_disable_star_ignores_other_kinds() {
        let mut world = world();
        let player = world.spawn_player(vec2(100.0, 100.0), 0.2);
        world.disable_star(player);
        assert!(world.player_body().unwrap().enabled);
    }

    #[test]
    fn test_player_scale_grows_body() {
        let mut world = world();
        world.spawn_player(vec2(100.0, 100.0), 0.2);
        world.set_player_scale(1.5);
        assert_eq!(world.player_body().unwrap().size(), vec2(48.0, 37.5));
    }

    #[test]
    fn test_respawning_player_replaces_old_one() {
        let mut world = world();
        let first = world.spawn_player(vec2(100.0, 100.0), 0.2);
        let second = world.spawn_player(vec2(200.0, 100.0), 0.2);
        assert!(!world.is_alive(first));
        assert_eq!(world.entities_of(Kind::Player), vec![second]);
    }

    #[test]
    fn test_timer_removes_text_once() {
        let mut world = world();
        let text = world.add_text(label("Game Over"));
        world.delayed_call(2000, TimerAction::RemoveText(text));

        world.advance_timers(1999.0);
        assert!(world.texts.contains(text));
        world.advance_timers(1.0);
        assert!(!world.texts.contains(text));
        assert!(world.scheduler().is_empty());
    }

    #[test]
    fn test_remove_text_on_stale_handle_is_noop() {
        let mut world = world();
        let text = world.add_text(label("Game Over"));
        world.remove_text(text);
        let count = world.entity_count();

        // Slot is reused by the next allocation; the old handle must not touch it
        let other = world.add_text(label("Coins: 0"));
        world.remove_text(text);
        world.set_text(text, "changed");
        assert_eq!(world.entity_count(), count + 1);
        assert_eq!(world.texts.get(other).unwrap().content, "Coins: 0");
    }

    #[test]
    fn test_teardown_cancels_pending_timers() {
        let mut world = world();
        let text = world.add_text(label("Game Over"));
        world.delayed_call(2000, TimerAction::RemoveText(text));

        world.teardown();
        assert!(world.scheduler().is_empty());
        assert_eq!(world.entity_count(), 0);

        // Nothing left to fire and nothing to act on
        world.advance_timers(5000.0);
        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn test_player_commands_without_player_are_noops() {
        let mut world = world();
        world.set_player_velocity_x(160.0);
        world.set_player_tint(0xff0000);
        world.play_player_animation(AnimKey::Left, true);
        assert!(world.animator().current().is_none());
        assert!(world.player_sprite().is_none());
    }
}
