//! Arcade Components
//!
//! Plain data attached to entities. Behavior lives in `physics`,
//! `animation` and the gameplay controller.

use macroquad::prelude::{Color, Rect, Vec2, WHITE};

// =============================================================================
// Physics
// =============================================================================

/// Axis-aligned arcade body. `position` is the center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Unscaled size; the effective size is `base_size * scale`
    pub base_size: Vec2,
    pub scale: f32,
    /// Restitution per axis (0 = stop dead, 1 = perfect reflection)
    pub bounce: Vec2,
    pub allow_gravity: bool,
    pub collide_world_bounds: bool,
    /// Static bodies are never integrated (platforms)
    pub is_static: bool,
    /// Disabled bodies neither move nor collide (collected stars)
    pub enabled: bool,
    /// Landed on a platform during the last physics step
    pub touching_down: bool,
}

impl Body {
    pub fn dynamic(position: Vec2, base_size: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            base_size,
            scale: 1.0,
            bounce: Vec2::ZERO,
            allow_gravity: true,
            collide_world_bounds: false,
            is_static: false,
            enabled: true,
            touching_down: false,
        }
    }

    pub fn fixed(position: Vec2, base_size: Vec2, scale: f32) -> Self {
        Self {
            scale,
            allow_gravity: false,
            is_static: true,
            ..Self::dynamic(position, base_size)
        }
    }

    pub fn size(&self) -> Vec2 {
        self.base_size * self.scale
    }

    pub fn half_size(&self) -> Vec2 {
        self.size() * 0.5
    }

    pub fn top(&self) -> f32 {
        self.position.y - self.half_size().y
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.half_size().y
    }

    pub fn left(&self) -> f32 {
        self.position.x - self.half_size().x
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.half_size().x
    }

    /// World-space bounds, top-left origin.
    pub fn rect(&self) -> Rect {
        let size = self.size();
        Rect::new(self.left(), self.top(), size.x, size.y)
    }

    /// Strict overlap test; touching edges does not count.
    pub fn overlaps(&self, other: &Body) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Which loaded texture a sprite draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKey {
    Sky,
    Ground,
    Star,
    Slime,
    Knight,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub texture: TextureKey,
    /// Multiplicative tint as 0xRRGGBB; `None` draws untinted
    pub tint: Option<u32>,
    pub visible: bool,
}

impl Sprite {
    pub fn new(texture: TextureKey) -> Self {
        Self { texture, tint: None, visible: true }
    }

    pub fn color(&self) -> Color {
        self.tint.map(hex_color).unwrap_or(WHITE)
    }
}

/// Convert 0xRRGGBB into an opaque macroquad color.
pub fn hex_color(hex: u32) -> Color {
    Color::from_rgba(
        ((hex >> 16) & 0xff) as u8,
        ((hex >> 8) & 0xff) as u8,
        (hex & 0xff) as u8,
        255,
    )
}

/// A line of on-screen text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub content: String,
    pub position: Vec2,
    pub font_size: f32,
    pub color: u32,
    /// Anchor within the text box: (0,0) top-left, (1,0) top-right, (0.5,0.5) center
    pub origin: Vec2,
}

// =============================================================================
// Entity Type Markers
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Player,
    Platform,
    Star,
    Hazard,
}
