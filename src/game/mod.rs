//! Game Module
//!
//! A small arcade layer tailored for one 2D platformer scene, plus the
//! gameplay controller that runs on top of it.
//!
//! Key concepts:
//! - Entity: Generational index for safe entity references
//! - Component: Plain data structs attached to entities
//! - ArcadeWorld: Container for all entities, timers and the player's animator
//! - Scene / Host: the controller reacts to events and issues commands
//!
//! Design philosophy:
//! - Simple over flexible (we know what game we're making)
//! - No runtime type registration (compile-time known components)

// Accessors kept for tests and tooling
#![allow(dead_code)]

pub mod entity;
pub mod component;
pub mod components;
pub mod event;
pub mod physics;
pub mod animation;
pub mod timer;
pub mod spawn;
pub mod host;
pub mod world;
pub mod controller;
pub mod assets;
pub mod renderer;

// Re-export main types
pub use animation::AnimKey;
pub use assets::Textures;
pub use components::Kind;
pub use controller::{GameState, GameplayController};
pub use entity::Entity;
pub use host::{Host, Scene, TickInput};
pub use renderer::draw_world;
pub use spawn::{HazardSpawn, StarSpawn};
pub use world::{ArcadeWorld, Contact};
