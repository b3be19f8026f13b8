mod app;
mod headless;
mod input;
mod screen;
mod settings;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ripple::{BoundaryMode, SimConfig};
use std::{
    fs::File,
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ripple")]
#[command(about = "Damped ripples on a terminal surface. Click to poke; r reset, j jostle, i interference, a auto, q quit")]
struct Args {
    /// settings file (defaults to the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// save the effective settings to the settings file and exit
    #[arg(long, default_value_t = false)]
    write_config: bool,

    /// frame rate cap
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// per-step damping in (0, 1]
    #[arg(long)]
    damping: Option<f32>,

    /// what the edges do to waves
    #[arg(long, value_enum)]
    boundary: Option<Boundary>,

    /// amplitude mapped to the full color range
    #[arg(long)]
    scale: Option<f32>,

    /// start with automatic ripples on
    #[arg(long, default_value_t = false)]
    auto: bool,

    /// start in signed color mode instead of interference
    #[arg(long, default_value_t = false)]
    signed: bool,

    /// seed for automatic ripples
    #[arg(long)]
    seed: Option<u64>,

    /// run without a terminal
    #[arg(long, default_value_t = false)]
    headless: bool,

    /// headless grid width
    #[arg(long)]
    width: Option<usize>,

    /// headless grid height
    #[arg(long)]
    height: Option<usize>,

    /// headless frame count
    #[arg(long, default_value_t = 300)]
    frames: u64,

    /// write the last headless frame to this PNG
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// append logs to this file (RUST_LOG sets the level)
    #[arg(long)]
    log: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Boundary {
    Zero,
    Wrap,
    Replicate,
}

impl From<Boundary> for BoundaryMode {
    fn from(b: Boundary) -> Self {
        match b {
            Boundary::Zero => BoundaryMode::Zero,
            Boundary::Wrap => BoundaryMode::Wrap,
            Boundary::Replicate => BoundaryMode::Replicate,
        }
    }
}

impl Args {
    fn apply(&self, mut cfg: SimConfig) -> SimConfig {
        if let Some(d) = self.damping {
            cfg.damping = d;
        }
        if let Some(b) = self.boundary {
            cfg.boundary = b.into();
        }
        if let Some(s) = self.scale {
            cfg.scale = s;
        }
        if let Some(seed) = self.seed {
            cfg.seed = seed;
        }
        if let Some(w) = self.width {
            cfg.width = w;
        }
        if let Some(h) = self.height {
            cfg.height = h;
        }
        cfg.auto_ripples |= self.auto;
        if self.signed {
            cfg.interference = false;
        }
        cfg
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log {
        init_logging(path)?;
    }

    let settings_path = match &args.config {
        Some(p) => p.clone(),
        None => settings::default_settings_path()?,
    };
    let cfg = args.apply(settings::load_settings(&settings_path));
    cfg.validate().context("invalid configuration")?;

    if args.write_config {
        settings::save_settings_atomic(&settings_path, &cfg)?;
        println!("wrote {}", settings_path.display());
        return Ok(());
    }

    if args.headless {
        let session = headless::run(cfg, args.frames, args.fps, args.snapshot.as_deref())?;
        let stats = session.stats();
        println!(
            "{} frames  {}x{}  min:{:.4} max:{:.4} energy:{:.4}",
            session.frames(),
            session.width(),
            session.height(),
            stats.min,
            stats.max,
            stats.energy
        );
        return Ok(());
    }

    app::run(cfg, args.fps)
}
