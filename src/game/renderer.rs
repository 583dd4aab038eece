//! Scene Renderer
//!
//! Draws the arcade world into a fixed-size canvas scaled to fit the
//! window, with black bars on the long axis. Drawing happens in screen
//! coordinates through `Viewport`, so no camera is involved.

use macroquad::prelude::*;

use super::assets::{fallback_color, frame_rect, Textures};
use super::components::{hex_color, Kind, TextElement, TextureKey};
use super::world::ArcadeWorld;
use crate::config::GameConfig;

/// Canvas-to-screen mapping: uniform scale, centered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f32,
    pub offset: Vec2,
    pub canvas: Vec2,
}

impl Viewport {
    pub fn fit(screen: Vec2, canvas: Vec2) -> Self {
        let scale = (screen.x / canvas.x).min(screen.y / canvas.y).max(0.0);
        let offset = (screen - canvas * scale) * 0.5;
        Self { scale, offset, canvas }
    }

    pub fn to_screen(&self, point: Vec2) -> Vec2 {
        self.offset + point * self.scale
    }

    pub fn rect_to_screen(&self, rect: Rect) -> Rect {
        let origin = self.to_screen(vec2(rect.x, rect.y));
        Rect::new(origin.x, origin.y, rect.w * self.scale, rect.h * self.scale)
    }
}

/// Top-left corner of a `size` box anchored at `anchor` with `origin`.
fn anchored(anchor: Vec2, size: Vec2, origin: Vec2) -> Vec2 {
    anchor - origin * size
}

fn draw_textured(texture: Option<&Texture2D>, key: TextureKey, dest: Rect, source: Option<Rect>, tint: Color) {
    match texture {
        Some(texture) => draw_texture_ex(
            texture,
            dest.x,
            dest.y,
            tint,
            DrawTextureParams {
                dest_size: Some(vec2(dest.w, dest.h)),
                source,
                ..Default::default()
            },
        ),
        None => {
            let base = fallback_color(key);
            let color = Color::new(base.r * tint.r, base.g * tint.g, base.b * tint.b, base.a * tint.a);
            draw_rectangle(dest.x, dest.y, dest.w, dest.h, color);
        }
    }
}

fn draw_sprite(world: &ArcadeWorld, textures: &Textures, viewport: &Viewport, kind: Kind) {
    for entity in world.entities_of(kind) {
        let (Some(body), Some(sprite)) = (world.bodies.get(entity), world.sprites.get(entity)) else {
            continue;
        };
        if !sprite.visible {
            continue;
        }
        let dest = viewport.rect_to_screen(body.rect());
        draw_textured(textures.get(sprite.texture), sprite.texture, dest, None, sprite.color());
    }
}

/// Sheet region for the player's current frame; frame 0 before any clip plays.
fn player_source(frame: Option<u32>, frame_size: (f32, f32), sheet_width: f32) -> Rect {
    let (w, h) = frame_size;
    frame_rect(frame.unwrap_or(0), w, h, sheet_width)
}

fn draw_player(world: &ArcadeWorld, textures: &Textures, viewport: &Viewport, frame_size: (f32, f32)) {
    let (Some(body), Some(sprite)) = (world.player_body(), world.player_sprite()) else {
        return;
    };
    if !sprite.visible {
        return;
    }
    let dest = viewport.rect_to_screen(body.rect());
    let texture = textures.get(sprite.texture);
    let source = texture.map(|t| player_source(world.player_frame(), frame_size, t.width()));
    draw_textured(texture, sprite.texture, dest, source, sprite.color());
}

fn draw_label(text: &TextElement, viewport: &Viewport) {
    let font_size = (text.font_size * viewport.scale).round().max(1.0) as u16;
    let dims = measure_text(&text.content, None, font_size, 1.0);
    let top_left = anchored(
        viewport.to_screen(text.position),
        vec2(dims.width, dims.height),
        text.origin,
    );
    draw_text(&text.content, top_left.x, top_left.y + dims.offset_y, font_size as f32, hex_color(text.color));
}

/// Draw one frame of the scene.
pub fn draw_world(world: &ArcadeWorld, textures: &Textures, config: &GameConfig) {
    let canvas = vec2(config.canvas.width, config.canvas.height);
    let viewport = Viewport::fit(vec2(screen_width(), screen_height()), canvas);

    clear_background(BLACK);
    let area = viewport.rect_to_screen(Rect::new(0.0, 0.0, canvas.x, canvas.y));
    draw_rectangle(area.x, area.y, area.w, area.h, hex_color(config.canvas.background));

    // Background stretched over the whole canvas, no placeholder needed
    if let Some(sky) = textures.get(TextureKey::Sky) {
        draw_textured(Some(sky), TextureKey::Sky, area, None, WHITE);
    }

    draw_sprite(world, textures, &viewport, Kind::Platform);
    draw_sprite(world, textures, &viewport, Kind::Star);
    draw_sprite(world, textures, &viewport, Kind::Hazard);
    draw_player(world, textures, &viewport, config.player.frame_size);

    for (_, text) in world.texts.iter() {
        draw_label(text, &viewport);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_exact_fit() {
        let vp = Viewport::fit(vec2(800.0, 600.0), vec2(800.0, 600.0));
        assert_eq!(vp.scale, 1.0);
        assert_eq!(vp.offset, Vec2::ZERO);
    }

    #[test]
    fn test_viewport_pillarbox() {
        // Wider window: bars left and right
        let vp = Viewport::fit(vec2(1920.0, 1200.0), vec2(800.0, 600.0));
        assert_eq!(vp.scale, 2.0);
        assert_eq!(vp.offset, vec2(160.0, 0.0));
        assert_eq!(vp.to_screen(vec2(800.0, 600.0)), vec2(1760.0, 1200.0));
    }

    #[test]
    fn test_viewport_letterbox() {
        let vp = Viewport::fit(vec2(400.0, 600.0), vec2(800.0, 600.0));
        assert_eq!(vp.scale, 0.5);
        assert_eq!(vp.offset, vec2(0.0, 150.0));
    }

    #[test]
    fn test_rect_to_screen_scales_size() {
        let vp = Viewport::fit(vec2(1600.0, 1200.0), vec2(800.0, 600.0));
        let r = vp.rect_to_screen(Rect::new(10.0, 20.0, 30.0, 40.0));
        assert_eq!(r, Rect::new(20.0, 40.0, 60.0, 80.0));
    }

    #[test]
    fn test_player_source_follows_frame_size() {
        // 9 frames of 40x30 in one row
        let sheet = 9.0 * 40.0;
        assert_eq!(player_source(Some(5), (40.0, 30.0), sheet), Rect::new(200.0, 0.0, 40.0, 30.0));
        assert_eq!(player_source(None, (40.0, 30.0), sheet), Rect::new(0.0, 0.0, 40.0, 30.0));
    }

    #[test]
    fn test_anchored_origins() {
        let size = vec2(100.0, 20.0);
        assert_eq!(anchored(vec2(784.0, 16.0), size, vec2(1.0, 0.0)), vec2(684.0, 16.0));
        assert_eq!(anchored(vec2(400.0, 300.0), size, vec2(0.5, 0.5)), vec2(350.0, 290.0));
    }
}
