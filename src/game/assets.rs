//! Texture loading
//!
//! Every texture is optional. A file that fails to load is logged once
//! and the renderer draws a flat colored box in its place, so the game is
//! playable without any art in `assets/`.

use macroquad::logging::{info, warn};
use macroquad::prelude::*;

use super::components::TextureKey;

fn path_for(key: TextureKey) -> &'static str {
    match key {
        TextureKey::Sky => "assets/background.png",
        TextureKey::Ground => "assets/platform.png",
        TextureKey::Star => "assets/coin.png",
        TextureKey::Slime => "assets/slime_green.png",
        TextureKey::Knight => "assets/knight.png",
    }
}

/// Stand-in color when a texture is missing.
pub fn fallback_color(key: TextureKey) -> Color {
    match key {
        TextureKey::Sky => Color::from_rgba(0x5c, 0x94, 0xfc, 255),
        TextureKey::Ground => Color::from_rgba(0x6b, 0x8e, 0x23, 255),
        TextureKey::Star => GOLD,
        TextureKey::Slime => LIME,
        TextureKey::Knight => LIGHTGRAY,
    }
}

async fn load(key: TextureKey) -> Option<Texture2D> {
    let path = path_for(key);
    match load_texture(path).await {
        Ok(texture) => {
            // Pixel art: no smoothing
            texture.set_filter(FilterMode::Nearest);
            Some(texture)
        }
        Err(e) => {
            warn!("Failed to load {}: {}, drawing a placeholder", path, e);
            None
        }
    }
}

pub struct Textures {
    sky: Option<Texture2D>,
    ground: Option<Texture2D>,
    star: Option<Texture2D>,
    slime: Option<Texture2D>,
    knight: Option<Texture2D>,
}

impl Textures {
    /// Load every texture the scene uses.
    pub async fn load() -> Self {
        let textures = Self {
            sky: load(TextureKey::Sky).await,
            ground: load(TextureKey::Ground).await,
            star: load(TextureKey::Star).await,
            slime: load(TextureKey::Slime).await,
            knight: load(TextureKey::Knight).await,
        };
        info!("Loaded {}/5 textures", textures.loaded_count());
        textures
    }

    /// No textures at all; everything draws as placeholders.
    pub fn empty() -> Self {
        Self { sky: None, ground: None, star: None, slime: None, knight: None }
    }

    pub fn get(&self, key: TextureKey) -> Option<&Texture2D> {
        match key {
            TextureKey::Sky => self.sky.as_ref(),
            TextureKey::Ground => self.ground.as_ref(),
            TextureKey::Star => self.star.as_ref(),
            TextureKey::Slime => self.slime.as_ref(),
            TextureKey::Knight => self.knight.as_ref(),
        }
    }

    fn loaded_count(&self) -> usize {
        [&self.sky, &self.ground, &self.star, &self.slime, &self.knight]
            .iter()
            .filter(|t| t.is_some())
            .count()
    }
}

/// Source rectangle of frame `index` in a sheet laid out left to right,
/// top to bottom.
pub fn frame_rect(index: u32, frame_w: f32, frame_h: f32, sheet_width: f32) -> Rect {
    let columns = ((sheet_width / frame_w).floor() as u32).max(1);
    let col = index % columns;
    let row = index / columns;
    Rect::new(col as f32 * frame_w, row as f32 * frame_h, frame_w, frame_h)
}
