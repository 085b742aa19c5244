use anyhow::Context;
use clap::{Parser, Subcommand};
use parallax::config::{self, BackgroundKind, Overrides};
use parallax::geometry::Viewport;
use parallax::gui::app::{AppInit, AppModel};
use parallax::gui::presentation::Presentation;
use parallax::sys::runtime;
use relm4::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Config file to use instead of the per-user one
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Background to show (particles or grid)
    #[arg(short, long)]
    background: Option<BackgroundKind>,

    /// Number of particles in the particle background
    #[arg(short, long)]
    particles: Option<usize>,

    /// Seed for a reproducible particle field
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the default config file, keeping any existing one
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(path) => config::resolve_config_path(&path)
            .with_context(|| format!("Cannot resolve {}", path.display()))?,
        None => config::get_config_path().context("No config path given and none found")?,
    };

    if let Some(Command::InitConfig) = cli.command {
        let path = config::write_default_config(&config_path)?;
        println!("{}", path.display());
        return Ok(());
    }

    let overrides = Overrides {
        background: cli.background,
        particles: cli.particles,
        seed: cli.seed,
    };
    let mut config = config::load_or_default(&config_path);
    overrides.apply(&mut config);
    log::info!(
        "Loaded {} sections, {} background",
        config.sections.len(),
        config.background.kind
    );

    let presentation = Presentation::new(&config, Viewport::default());

    let (tx, rx) = async_channel::bounded(32);
    runtime::start_background_services(tx, config_path.clone());

    let app = RelmApp::new("org.parallax.Landing").with_args(Vec::new());
    app.run::<AppModel>(AppInit {
        presentation,
        config_path,
        overrides,
        events: rx,
    });

    Ok(())
}
