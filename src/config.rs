//! Game configuration
//!
//! Uses RON, same as the level files this project grew out of. Every field
//! has a default matching the shipped game, so a config file only needs to
//! name what it changes:
//!
//! ```ron
//! (
//!     gravity: 450.0,
//!     seed: Some(7),
//! )
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default location, relative to the working directory (native) or page (web)
pub const DEFAULT_CONFIG_PATH: &str = "assets/config.ron";

/// Validation limits to keep a hand-edited file from doing anything silly
pub mod limits {
    pub const MAX_CANVAS: f32 = 8192.0;
    pub const MAX_PLATFORMS: usize = 64;
    pub const MAX_INITIAL_STARS: u32 = 256;
    pub const MAX_BOUNCE: f32 = 2.0;
    pub const MAX_SPEED: f32 = 10_000.0;
    pub const MAX_TEXT_LEN: usize = 64;
}

#[derive(Debug)]
pub enum ConfigError {
    NotFound(String),
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
    ValidationError(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl From<ron::Error> for ConfigError {
    fn from(e: ron::Error) -> Self {
        ConfigError::SerializeError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(path) => write!(f, "Config not found: {}", path),
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            ConfigError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub width: f32,
    pub height: f32,
    /// Clear color outside the letterbox and behind a missing sky texture
    pub background: u32,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self { width: 800.0, height: 600.0, background: 0x5c94fc }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub spawn: (f32, f32),
    /// One frame of the knight sheet
    pub frame_size: (f32, f32),
    pub bounce: f32,
    pub run_speed: f32,
    pub jump_speed: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            spawn: (100.0, 450.0),
            frame_size: (32.0, 25.0),
            bounce: 0.2,
            run_speed: 160.0,
            jump_speed: 330.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformDef {
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_platform_scale")]
    pub scale: f32,
}

fn default_platform_scale() -> f32 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarSettings {
    pub initial_count: u32,
    pub start_x: f32,
    pub step_x: f32,
    pub size: (f32, f32),
    pub bounce_y_min: f32,
    pub bounce_y_max: f32,
}

impl Default for StarSettings {
    fn default() -> Self {
        Self {
            initial_count: 12,
            start_x: 12.0,
            step_x: 70.0,
            size: (24.0, 22.0),
            bounce_y_min: 0.4,
            bounce_y_max: 0.8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardSettings {
    /// A slime appears (and the player grows) every this many coins
    pub every_n_stars: u32,
    /// Horizontal speed is drawn from `-speed_x_max..=speed_x_max`
    pub speed_x_max: f32,
    pub speed_y: f32,
    pub bounce: f32,
    pub size: (f32, f32),
}

impl Default for HazardSettings {
    fn default() -> Self {
        Self {
            every_n_stars: 5,
            speed_x_max: 200.0,
            speed_y: 20.0,
            bounce: 1.0,
            size: (28.0, 20.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudSettings {
    pub score_prefix: String,
    pub score_font_size: f32,
    /// Distance of the score from the top-right corner
    pub score_margin: f32,
    pub text_color: u32,
}

impl Default for HudSettings {
    fn default() -> Self {
        Self {
            score_prefix: "Coins: ".to_string(),
            score_font_size: 32.0,
            score_margin: 16.0,
            text_color: 0xffffff,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOverSettings {
    pub message: String,
    pub font_size: f32,
    pub tint: u32,
    /// How long the message stays up
    pub text_delay_ms: u32,
}

impl Default for GameOverSettings {
    fn default() -> Self {
        Self {
            message: "Game Over".to_string(),
            font_size: 64.0,
            tint: 0xff0000,
            text_delay_ms: 2000,
        }
    }
}

/// Tints cycled through on each coin: red, orange, yellow, green, blue, indigo, violet
pub const DEFAULT_PALETTE: [u32; 7] = [0xff0000, 0xffa500, 0xffff00, 0x00ff00, 0x0000ff, 0x4b0082, 0x8a2be2];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub canvas: CanvasSettings,
    pub gravity: f32,
    /// Fixed spawn seed; `None` seeds from the clock
    pub seed: Option<u64>,
    pub player: PlayerSettings,
    /// Unscaled platform sprite size
    pub platform_size: (f32, f32),
    pub platforms: Vec<PlatformDef>,
    pub stars: StarSettings,
    pub hazards: HazardSettings,
    pub palette: [u32; 7],
    /// Added to the player scale every `hazards.every_n_stars` coins
    pub scale_step: f32,
    pub hud: HudSettings,
    pub game_over: GameOverSettings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasSettings::default(),
            gravity: 300.0,
            seed: None,
            player: PlayerSettings::default(),
            platform_size: (400.0, 32.0),
            platforms: vec![
                // Ground, stretched across the whole canvas
                PlatformDef { x: 400.0, y: 568.0, scale: 2.0 },
                PlatformDef { x: 600.0, y: 400.0, scale: 1.0 },
                PlatformDef { x: 50.0, y: 250.0, scale: 1.0 },
                PlatformDef { x: 750.0, y: 220.0, scale: 1.0 },
            ],
            stars: StarSettings::default(),
            hazards: HazardSettings::default(),
            palette: DEFAULT_PALETTE,
            scale_step: 0.1,
            hud: HudSettings::default(),
            game_over: GameOverSettings::default(),
        }
    }
}

// =============================================================================
// Validation
// =============================================================================

fn check_size(value: (f32, f32), name: &str, max: f32) -> Result<(), String> {
    for v in [value.0, value.1] {
        if !v.is_finite() || v <= 0.0 || v > max {
            return Err(format!("{} must be positive and at most {} (got {:?})", name, max, value));
        }
    }
    Ok(())
}

fn check_range(value: f32, name: &str, min: f32, max: f32) -> Result<(), String> {
    if !value.is_finite() || value < min || value > max {
        return Err(format!("{} must be in {}..={} (got {})", name, min, max, value));
    }
    Ok(())
}

pub fn validate_config(config: &GameConfig) -> Result<(), String> {
    check_size((config.canvas.width, config.canvas.height), "canvas", limits::MAX_CANVAS)?;
    check_range(config.gravity, "gravity", -limits::MAX_SPEED, limits::MAX_SPEED)?;

    let player = &config.player;
    check_size(player.frame_size, "player.frame_size", limits::MAX_CANVAS)?;
    check_range(player.bounce, "player.bounce", 0.0, limits::MAX_BOUNCE)?;
    check_range(player.run_speed, "player.run_speed", 0.0, limits::MAX_SPEED)?;
    check_range(player.jump_speed, "player.jump_speed", 0.0, limits::MAX_SPEED)?;
    if !player.spawn.0.is_finite() || !player.spawn.1.is_finite() {
        return Err("player.spawn must be finite".to_string());
    }

    check_size(config.platform_size, "platform_size", limits::MAX_CANVAS)?;
    if config.platforms.len() > limits::MAX_PLATFORMS {
        return Err(format!("too many platforms ({} > {})", config.platforms.len(), limits::MAX_PLATFORMS));
    }
    for (i, platform) in config.platforms.iter().enumerate() {
        if !platform.x.is_finite() || !platform.y.is_finite() {
            return Err(format!("platform {} has a non-finite position", i));
        }
        check_range(platform.scale, &format!("platform {} scale", i), f32::MIN_POSITIVE, 64.0)?;
    }

    let stars = &config.stars;
    if stars.initial_count > limits::MAX_INITIAL_STARS {
        return Err(format!("stars.initial_count must be at most {}", limits::MAX_INITIAL_STARS));
    }
    check_size(stars.size, "stars.size", limits::MAX_CANVAS)?;
    check_range(stars.bounce_y_min, "stars.bounce_y_min", 0.0, limits::MAX_BOUNCE)?;
    check_range(stars.bounce_y_max, "stars.bounce_y_max", 0.0, limits::MAX_BOUNCE)?;
    if stars.bounce_y_min > stars.bounce_y_max {
        return Err("stars.bounce_y_min must not exceed stars.bounce_y_max".to_string());
    }

    let hazards = &config.hazards;
    if hazards.every_n_stars == 0 {
        return Err("hazards.every_n_stars must be at least 1".to_string());
    }
    check_range(hazards.speed_x_max, "hazards.speed_x_max", 0.0, limits::MAX_SPEED)?;
    check_range(hazards.speed_y, "hazards.speed_y", -limits::MAX_SPEED, limits::MAX_SPEED)?;
    check_range(hazards.bounce, "hazards.bounce", 0.0, limits::MAX_BOUNCE)?;
    check_size(hazards.size, "hazards.size", limits::MAX_CANVAS)?;

    check_range(config.scale_step, "scale_step", 0.0, 10.0)?;
    check_range(config.hud.score_font_size, "hud.score_font_size", 1.0, 512.0)?;
    check_range(config.game_over.font_size, "game_over.font_size", 1.0, 512.0)?;
    if config.hud.score_prefix.len() > limits::MAX_TEXT_LEN
        || config.game_over.message.len() > limits::MAX_TEXT_LEN
    {
        return Err(format!("HUD strings must be at most {} bytes", limits::MAX_TEXT_LEN));
    }

    Ok(())
}

// =============================================================================
// Loading / saving
// =============================================================================

pub fn load_config_from_str(s: &str) -> Result<GameConfig, ConfigError> {
    let config: GameConfig = ron::from_str(s)?;
    validate_config(&config).map_err(ConfigError::ValidationError)?;
    Ok(config)
}

/// Load from the filesystem (native).
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<GameConfig, ConfigError> {
    let path = path.as_ref();
    let contents = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        Err(e) => return Err(e.into()),
    };
    load_config_from_str(&contents)
}

pub fn save_config<P: AsRef<Path>>(config: &GameConfig, path: P) -> Result<(), ConfigError> {
    let pretty = ron::ser::PrettyConfig::new()
        .depth_limit(3)
        .indentor("    ".to_string());
    let ron_string = ron::ser::to_string_pretty(config, pretty)?;
    fs::write(path, ron_string)?;
    Ok(())
}

/// Load the config for the current platform, falling back to defaults.
///
/// Web builds cannot touch the filesystem, so the file is fetched relative
/// to the page instead.
pub async fn load_or_default(path: &str) -> GameConfig {
    #[cfg(not(target_arch = "wasm32"))]
    let result = load_config(path);

    #[cfg(target_arch = "wasm32")]
    let result = match macroquad::file::load_string(path).await {
        Ok(contents) => load_config_from_str(&contents),
        Err(_) => Err(ConfigError::NotFound(path.to_string())),
    };

    match result {
        Ok(config) => {
            macroquad::logging::info!("Loaded config from {}", path);
            config
        }
        Err(ConfigError::NotFound(_)) => {
            macroquad::logging::info!("No config at {}, using defaults", path);
            GameConfig::default()
        }
        Err(e) => {
            macroquad::logging::error!("Failed to load config {}: {}, using defaults", path, e);
            GameConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert_eq!(validate_config(&GameConfig::default()), Ok(()));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = load_config_from_str("(gravity: 450.0, seed: Some(7), hazards: (every_n_stars: 3))").unwrap();
        assert_eq!(config.gravity, 450.0);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.hazards.every_n_stars, 3);
        assert_eq!(config.hazards.speed_x_max, 200.0);
        assert_eq!(config.palette, DEFAULT_PALETTE);
        assert_eq!(config.platforms.len(), 4);
    }

    #[test]
    fn test_hex_palette_literals() {
        let config = load_config_from_str(
            "(palette: (0x111111, 0x222222, 0x333333, 0x444444, 0x555555, 0x666666, 0x777777))",
        )
        .unwrap();
        assert_eq!(config.palette[6], 0x777777);
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let shipped = load_config_from_str(include_str!("../assets/config.ron")).unwrap();
        assert_eq!(shipped, GameConfig::default());
    }

    #[test]
    fn test_rejects_zero_hazard_interval() {
        let err = load_config_from_str("(hazards: (every_n_stars: 0))").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_rejects_inverted_bounce_range() {
        let mut config = GameConfig::default();
        config.stars.bounce_y_min = 0.9;
        config.stars.bounce_y_max = 0.4;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_bad_canvas() {
        let mut config = GameConfig::default();
        config.canvas.width = f32::NAN;
        assert!(validate_config(&config).is_err());
        config.canvas.width = 0.0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_parse_error() {
        let err = load_config_from_str("(gravity: \"heavy\")").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ron");

        let mut config = GameConfig::default();
        config.seed = Some(42);
        config.platforms.push(PlatformDef { x: 300.0, y: 120.0, scale: 0.5 });
        save_config(&config, &path).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(dir.path().join("nope.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
