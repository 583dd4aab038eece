//! Build automation tasks for Aspera
//!
//! Usage:
//!   cargo xtask build-web       # Release WASM + page + assets into dist/web
//!   cargo xtask package-itch    # Zip dist/web for itch.io upload

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// macroquad JS loader matching the macroquad version in Cargo.toml
const MQ_JS_BUNDLE_URL: &str = "https://raw.githubusercontent.com/not-fl3/macroquad/v0.4.14/js/mq_js_bundle.js";
const WASM_NAME: &str = "aspera.wasm";
const ITCH_ZIP: &str = "aspera-itch.zip";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for Aspera")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the browser version into dist/web
    BuildWeb {
        /// Mark as dev build (adds DEV banner to index.html)
        #[arg(long)]
        dev: bool,
    },
    /// Build the browser version and zip it for itch.io
    PackageItch,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let layout = Layout::discover()?;

    match cli.command {
        Commands::BuildWeb { dev } => build_web(&layout, dev),
        Commands::PackageItch => {
            build_web(&layout, false)?;
            package_itch(&layout)
        }
    }
}

/// Where everything lives, relative to the workspace root.
struct Layout {
    root: PathBuf,
}

impl Layout {
    fn discover() -> Result<Self> {
        let root = Path::new(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .context("xtask must live one level below the workspace root")?
            .to_path_buf();
        Ok(Self { root })
    }

    fn web_dist(&self) -> PathBuf {
        self.root.join("dist/web")
    }

    fn wasm_artifact(&self) -> PathBuf {
        self.root.join("target/wasm32-unknown-unknown/release").join(WASM_NAME)
    }
}

/// Run a command and fail on a non-zero exit.
fn run(cmd: &mut Command) -> Result<()> {
    let status = cmd
        .status()
        .with_context(|| format!("failed to launch {:?}", cmd.get_program()))?;
    if !status.success() {
        bail!("{:?} exited with {}", cmd.get_program(), status);
    }
    Ok(())
}

fn copy_tree(src: &Path, dst: &Path) -> Result<usize> {
    fs::create_dir_all(dst)?;
    let mut copied = 0;
    for entry in fs::read_dir(src).with_context(|| format!("reading {}", src.display()))? {
        let entry = entry?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        if from.is_dir() {
            copied += copy_tree(&from, &to)?;
        } else {
            fs::copy(&from, &to).with_context(|| format!("copying {}", from.display()))?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Reject a broken shipped config before it reaches a player.
fn check_config(layout: &Layout) -> Result<()> {
    let path = layout.root.join("assets/config.ron");
    if !path.exists() {
        println!("No assets/config.ron, the game will use its defaults");
        return Ok(());
    }
    let text = fs::read_to_string(&path)?;
    if text.trim().is_empty() {
        bail!("{} is empty", path.display());
    }
    Ok(())
}

fn build_web(layout: &Layout, dev: bool) -> Result<()> {
    check_config(layout)?;

    println!("Building {}...", WASM_NAME);
    run(Command::new("cargo")
        .current_dir(&layout.root)
        .args(["build", "--release", "--target", "wasm32-unknown-unknown", "--bin", "aspera"]))?;

    let dist = layout.web_dist();
    if dist.exists() {
        fs::remove_dir_all(&dist)?;
    }
    fs::create_dir_all(&dist)?;

    fs::copy(layout.wasm_artifact(), dist.join(WASM_NAME)).context("wasm binary missing after build")?;

    let page = fs::read_to_string(layout.root.join("web/index.html")).context("web/index.html not found")?;
    let page = if dev {
        page.replace("Loading Aspera", "Loading Aspera (DEV)")
            .replace("<title>Aspera", "<title>[DEV] Aspera")
    } else {
        page
    };
    fs::write(dist.join("index.html"), page)?;

    let bundle = dist.join("mq_js_bundle.js");
    println!("Downloading {}...", MQ_JS_BUNDLE_URL);
    run(Command::new("curl").args(["-fL", "-o"]).arg(&bundle).arg(MQ_JS_BUNDLE_URL))?;

    let assets = layout.root.join("assets");
    if assets.exists() {
        let count = copy_tree(&assets, &dist.join("assets"))?;
        println!("Copied {} asset files", count);
    }

    println!("Web build complete: {}", dist.display());
    Ok(())
}

fn package_itch(layout: &Layout) -> Result<()> {
    let zip_path = layout.root.join("dist").join(ITCH_ZIP);
    if zip_path.exists() {
        fs::remove_file(&zip_path)?;
    }

    println!("Creating {}...", ITCH_ZIP);
    run(Command::new("zip")
        .current_dir(layout.web_dist())
        .arg("-r")
        .arg(&zip_path)
        .arg("."))?;

    println!("itch.io package ready: {}", zip_path.display());
    Ok(())
}
