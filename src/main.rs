//! ASPERA: a tiny coin-collecting platformer
//!
//! Run and jump across four platforms, pick up coins, and keep away from
//! the slimes every fifth coin lets loose. One touch and it's over.
//!
//! Runs natively and in the browser (wasm32).

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod config;
mod game;
mod input;

use app::AppState;
use config::{GameConfig, DEFAULT_CONFIG_PATH};
use game::Textures;
use input::InputState;
use macroquad::logging::info;
use macroquad::prelude::*;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Aspera v{}", VERSION),
        window_width: 800,
        window_height: 600,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// What the command line asked for (native only).
#[derive(Debug, PartialEq, Eq)]
enum Launch {
    Play { config_path: String },
    /// Dump the default config to a file and exit
    WriteConfig { path: String },
}

/// Arguments after the program name.
fn parse_launch<I: IntoIterator<Item = String>>(args: I) -> Launch {
    let mut args = args.into_iter();
    match args.next() {
        Some(flag) if flag == "--write-config" => Launch::WriteConfig {
            path: args.next().unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string()),
        },
        Some(path) => Launch::Play { config_path: path },
        None => Launch::Play { config_path: DEFAULT_CONFIG_PATH.to_string() },
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_args() -> Launch {
    parse_launch(std::env::args().skip(1))
}

#[cfg(target_arch = "wasm32")]
fn parse_args() -> Launch {
    parse_launch(std::iter::empty())
}

/// Seed from the config, or from the wall clock when none is set.
fn session_seed(config: &GameConfig) -> u64 {
    config
        .seed
        .unwrap_or_else(|| (macroquad::miniquad::date::now() * 1000.0) as u64)
}

/// Handles `--write-config` before any window exists, then opens the game.
fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    match parse_args() {
        Launch::Play { config_path } => macroquad::Window::from_config(window_conf(), run(config_path)),
        Launch::WriteConfig { path } => match config::save_config(&GameConfig::default(), &path) {
            Ok(()) => println!("Wrote default config to {}", path),
            Err(e) => eprintln!("Failed to write config {}: {}", path, e),
        },
    }
}

async fn run(config_path: String) {
    let config = config::load_or_default(&config_path).await;
    let seed = session_seed(&config);
    info!("Spawn seed: {}", seed);

    let textures = Textures::load().await;
    let mut input = InputState::new();

    let mut app = AppState::new(config, seed, textures);

    info!("=== ASPERA v{} ===", VERSION);

    loop {
        #[cfg(not(target_arch = "wasm32"))]
        {
            if is_key_pressed(KeyCode::Escape) {
                app.shutdown();
                break;
            }
        }

        input.poll();
        app.tick(get_frame_time(), input.controls());
        app.draw();

        next_frame().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_args_plays_default_config() {
        assert_eq!(
            parse_launch(args(&[])),
            Launch::Play { config_path: DEFAULT_CONFIG_PATH.to_string() }
        );
    }

    #[test]
    fn test_config_path_argument() {
        assert_eq!(
            parse_launch(args(&["levels/hard.ron"])),
            Launch::Play { config_path: "levels/hard.ron".to_string() }
        );
    }

    #[test]
    fn test_write_config_is_recognized_without_a_window() {
        assert_eq!(
            parse_launch(args(&["--write-config", "out.ron"])),
            Launch::WriteConfig { path: "out.ron".to_string() }
        );
        assert_eq!(
            parse_launch(args(&["--write-config"])),
            Launch::WriteConfig { path: DEFAULT_CONFIG_PATH.to_string() }
        );
    }
}
