//! Arcade Physics
//!
//! Axis-aligned boxes, constant gravity, static platforms. One step:
//! 1. Integrate every enabled dynamic body (gravity first, then velocity)
//! 2. Resolve each body against every platform, choosing the separation
//!    axis from where the body was before the step
//! 3. Keep bodies that collide with world bounds inside the canvas
//! 4. Report player contacts with coins and slimes as events
//!
//! Nothing here knows about score or game over; contacts only become
//! gameplay once the app hands the events to the scene.

use macroquad::prelude::{Rect, Vec2};

use super::component::ComponentStorage;
use super::components::{Body, Kind};
use super::entity::Entity;
use super::event::{Events, HazardHitEvent, StarOverlapEvent};

/// Slop when deciding which side a body came from (pixels)
const SIDE_EPSILON: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsSettings {
    /// Downward acceleration in px/s²
    pub gravity: f32,
    /// Area bodies with `collide_world_bounds` are kept inside
    pub bounds: Rect,
}

/// Which face of a platform a body was pushed out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

fn integrate(body: &mut Body, gravity: f32, dt: f32) {
    if body.allow_gravity {
        body.velocity.y += gravity * dt;
    }
    body.position += body.velocity * dt;
}

fn side_from_previous(body: &Body, previous: Vec2, platform: &Body) -> Option<Side> {
    let half = body.half_size();
    if previous.y + half.y <= platform.top() + SIDE_EPSILON {
        Some(Side::Top)
    } else if previous.y - half.y >= platform.bottom() - SIDE_EPSILON {
        Some(Side::Bottom)
    } else if previous.x + half.x <= platform.left() + SIDE_EPSILON {
        Some(Side::Left)
    } else if previous.x - half.x >= platform.right() - SIDE_EPSILON {
        Some(Side::Right)
    } else {
        None
    }
}

/// For bodies that were already inside the platform (spawned there, or
/// just grew): the face with the shallowest penetration.
fn side_of_least_penetration(body: &Body, platform: &Body) -> Side {
    let candidates = [
        (Side::Top, body.bottom() - platform.top()),
        (Side::Bottom, platform.bottom() - body.top()),
        (Side::Left, body.right() - platform.left()),
        (Side::Right, platform.right() - body.left()),
    ];
    candidates
        .iter()
        .copied()
        .fold((Side::Top, f32::INFINITY), |best, c| if c.1 < best.1 { c } else { best })
        .0
}

fn resolve_platform(body: &mut Body, previous: Vec2, platform: &Body) {
    if !body.overlaps(platform) {
        return;
    }

    let side = side_from_previous(body, previous, platform)
        .unwrap_or_else(|| side_of_least_penetration(body, platform));
    let half = body.half_size();

    match side {
        Side::Top => {
            body.position.y = platform.top() - half.y;
            if body.velocity.y > 0.0 {
                body.velocity.y = -body.velocity.y * body.bounce.y;
            }
            body.touching_down = true;
        }
        Side::Bottom => {
            body.position.y = platform.bottom() + half.y;
            if body.velocity.y < 0.0 {
                body.velocity.y = -body.velocity.y * body.bounce.y;
            }
        }
        Side::Left => {
            body.position.x = platform.left() - half.x;
            if body.velocity.x > 0.0 {
                body.velocity.x = -body.velocity.x * body.bounce.x;
            }
        }
        Side::Right => {
            body.position.x = platform.right() + half.x;
            if body.velocity.x < 0.0 {
                body.velocity.x = -body.velocity.x * body.bounce.x;
            }
        }
    }
}

fn resolve_world_bounds(body: &mut Body, bounds: Rect) {
    let half = body.half_size();

    if body.left() < bounds.left() {
        body.position.x = bounds.left() + half.x;
        if body.velocity.x < 0.0 {
            body.velocity.x = -body.velocity.x * body.bounce.x;
        }
    } else if body.right() > bounds.right() {
        body.position.x = bounds.right() - half.x;
        if body.velocity.x > 0.0 {
            body.velocity.x = -body.velocity.x * body.bounce.x;
        }
    }

    if body.top() < bounds.top() {
        body.position.y = bounds.top() + half.y;
        if body.velocity.y < 0.0 {
            body.velocity.y = -body.velocity.y * body.bounce.y;
        }
    } else if body.bottom() > bounds.bottom() {
        body.position.y = bounds.bottom() - half.y;
        if body.velocity.y > 0.0 {
            body.velocity.y = -body.velocity.y * body.bounce.y;
        }
    }
}

/// Advance every dynamic body by `dt` seconds and record player contacts.
pub fn step(
    bodies: &mut ComponentStorage<Body>,
    kinds: &ComponentStorage<Kind>,
    settings: &PhysicsSettings,
    dt: f32,
    events: &mut Events,
) {
    // Platforms never move, so a snapshot is safe to collide against
    let platforms: Vec<Body> = bodies
        .iter()
        .filter(|(_, body)| body.is_static && body.enabled)
        .map(|(_, body)| *body)
        .collect();

    for (_, body) in bodies.iter_mut() {
        if body.is_static || !body.enabled {
            continue;
        }

        body.touching_down = false;
        let previous = body.position;
        integrate(body, settings.gravity, dt);

        for platform in &platforms {
            resolve_platform(body, previous, platform);
        }

        if body.collide_world_bounds {
            resolve_world_bounds(body, settings.bounds);
        }
    }

    collect_contacts(bodies, kinds, events);
}

/// Enabled entities of `kind` whose body overlaps `player`.
fn touching<'a>(
    kind: Kind,
    player: &'a Body,
    bodies: &'a ComponentStorage<Body>,
    kinds: &'a ComponentStorage<Kind>,
) -> impl Iterator<Item = Entity> + 'a {
    kinds
        .iter()
        .filter(move |(_, k)| **k == kind)
        .map(|(entity, _)| entity)
        .filter(move |entity| {
            bodies
                .get(*entity)
                .is_some_and(|body| body.enabled && body.overlaps(player))
        })
}

fn collect_contacts(bodies: &ComponentStorage<Body>, kinds: &ComponentStorage<Kind>, events: &mut Events) {
    let Some(player) = kinds
        .iter()
        .find(|(_, kind)| **kind == Kind::Player)
        .and_then(|(entity, _)| bodies.get(entity))
    else {
        return;
    };
    if !player.enabled {
        return;
    }

    for star in touching(Kind::Star, player, bodies, kinds) {
        events.star_overlap.send(StarOverlapEvent { star });
    }
    for hazard in touching(Kind::Hazard, player, bodies, kinds) {
        events.hazard_hit.send(HazardHitEvent { hazard });
    }
}
