//! Leverage CLI
//!
//! Replay scripted slider sessions headlessly.

use anyhow::Result;
use clap::{Parser, Subcommand};
use leverage_animation::SpringConfig;
use leverage_slider::{SliderConfig, FALLBACK_TRACK_LENGTH};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod session;

use config::SessionConfig;
use session::Session;

#[derive(Parser)]
#[command(name = "leverage")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Leverage slider session runner", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a session and render every step
    Run {
        /// Session file
        #[arg(default_value = "leverage.toml")]
        session: PathBuf,
    },

    /// Validate a session file without replaying it
    Check {
        /// Session file
        #[arg(default_value = "leverage.toml")]
        session: PathBuf,
    },

    /// Write a sample session file
    Init {
        /// Output path
        #[arg(default_value = "leverage.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show slider defaults
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Run { session } => cmd_run(&session),
        Commands::Check { session } => cmd_check(&session),
        Commands::Init { path, force } => cmd_init(&path, force),
        Commands::Info => cmd_info(),
    }
}

fn load_checked(path: &Path) -> Result<SessionConfig> {
    let config = SessionConfig::load(path)?;
    config.validate()?;
    Ok(config)
}

fn cmd_run(path: &Path) -> Result<()> {
    let config = load_checked(path)?;
    info!("Replaying {} ({} steps)", path.display(), config.steps.len());

    let session = Session::new(&config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = session.run(&config.steps, &mut out)?;
    out.flush()?;

    info!(
        "Done: {} steps, {} frames, {} callbacks, committed value {}",
        report.steps,
        report.frames,
        report.notifications.len(),
        report.committed_value
    );
    Ok(())
}

fn cmd_check(path: &Path) -> Result<()> {
    let config = load_checked(path)?;
    let session = Session::new(&config)?;
    let slider = session.slider();

    info!(
        "{}: OK ({:?} slider {}..={}, {} steps)",
        path.display(),
        slider.mode(),
        slider.range().min(),
        slider.range().max(),
        config.steps.len()
    );
    Ok(())
}

fn cmd_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "'{}' already exists. Use --force to overwrite it.",
            path.display()
        );
    }

    let content = SessionConfig::sample().to_toml()?;
    fs::write(path, content)?;

    info!("Sample session written to {}", path.display());
    info!("Run `leverage run {}` to replay it", path.display());
    Ok(())
}

fn cmd_info() -> Result<()> {
    let slider = SliderConfig::default();
    let spring = SpringConfig::default();

    println!("Leverage Slider");
    println!("===============");
    println!();
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Defaults:");
    println!("  - range: {}..={}", slider.min, slider.max);
    println!("  - value suffix: \"{}\"", slider.value_suffix);
    println!("  - fallback track length: {}px", FALLBACK_TRACK_LENGTH);
    println!(
        "  - settle spring: stiffness {}, damping {}, mass {}",
        spring.stiffness, spring.damping, spring.mass
    );
    println!();
    println!("Script actions:");
    println!("  - pointer_down / pointer_move {{ x }}, pointer_up, pointer_cancel");
    println!("  - global_pointer_up, hover {{ inside }}, tap {{ value }}, key {{ key }}");
    println!("  - set_value {{ value }}, resize {{ length }}, disable {{ disabled }}");
    println!("  - wait {{ frames }}, settle");

    Ok(())
}
