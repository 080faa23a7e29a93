use std::{ fs::File, path::{ Path, PathBuf } };
use anyhow::Context;
use clap::Parser;
use log::info;
use psigrid::{
    checkpoint::JsonLinesStore,
    config::Config,
    monitor,
};

#[derive(Debug, clap::Parser)]
#[command(
    name = "psigrid",
    about = "Integrate the 2D time-dependent Schrödinger equation, resuming interrupted runs"
)]
pub struct Cli {
    /// Run configuration (JSON).
    #[arg(short = 'c', long = "config", default_value = "res/config.json")]
    pub config: PathBuf,

    /// Checkpoint store, one JSON document per line.
    #[arg(short = 's', long = "store", default_value = "res/checkpoints.jsonl")]
    pub store: PathBuf,

    /// Output directory for .vti files.
    #[arg(long = "vti-dir", default_value = "vti")]
    pub vti_dir: PathBuf,

    /// Log level; overridden by RUST_LOG.
    #[arg(short = 'l', long = "level", default_value = "info")]
    pub level: String,

    /// Write log records to this file instead of stderr.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Write the initial state and stop.
    #[arg(long = "init-only")]
    pub init_only: bool,
}

fn logger(level: &str, output: Option<&Path>) -> anyhow::Result<env_logger::Builder> {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(level)
    );
    if let Some(path) = output {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        builder
            .target(env_logger::Target::Pipe(Box::new(file)))
            .write_style(env_logger::WriteStyle::Never);
    }
    Ok(builder)
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    logger(&args.level, args.output.as_deref())?.init();

    let config = Config::from_file(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    info!("loaded {} ({} scheme)", args.config.display(), config.scheme);
    let mut store = JsonLinesStore::new(&args.store);

    let report = monitor::run(&config, &mut store, &args.vti_dir, args.init_only)?;
    if report.start.is_fresh() {
        println!("initial VTK generated in {}", args.vti_dir.display());
    } else {
        println!("restarted previous run {}", report.start.checksum());
    }
    match report.norm {
        Some(norm) => println!(
            "{} snapshots written to {}; final norm {:.6}",
            report.exported, args.vti_dir.display(), norm,
        ),
        None => println!("stopped after initialization"),
    }
    Ok(())
}
