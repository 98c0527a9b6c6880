use anyhow::Result;
use clap::Parser;
use savanna_core::config::AppConfig;
use savanna_lib::app::{self, ShutdownManager};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Mode to run the simulation in
    #[arg(short, long, value_enum, default_value = "standard")]
    mode: Mode,

    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Starting herd size
    #[arg(long)]
    giraffes: Option<usize>,

    /// Frames to simulate in headless mode
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Write the final world state to this JSON file
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Directory for the log file in standard mode
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum Mode {
    Standard,
    Headless,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    match args.mode {
        Mode::Headless => savanna_core::init_logging(),
        Mode::Standard => savanna_lib::logging::init_file_logging(&args.log_dir)?,
    }

    let mut config = AppConfig::load(&args.config)?;
    if let Some(seed) = args.seed {
        config.world.seed = Some(seed);
    }
    if let Some(giraffes) = args.giraffes {
        config.world.initial_giraffes = giraffes;
    }
    config.validate()?;

    let mut shutdown = ShutdownManager::new();
    shutdown.set_snapshot_path(args.snapshot);
    shutdown.listen_for_ctrl_c();

    let res = match args.mode {
        Mode::Headless => app::run_headless(config, args.frames, &shutdown).await,
        Mode::Standard => app::run_tui(config, &shutdown).await,
    };

    if let Err(e) = res {
        eprintln!("Application error: {e:#}");
        shutdown.set_exit_code(1);
    }
    std::process::exit(shutdown.exit_code());
}
