use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "confgrid", version, about = "Render the two-day schedule board as SVG")]
struct Cli {
    /// Directory holding schedule-app.json, sessions.json and speakers.json.
    #[arg(long, default_value = "data/database")]
    data_dir: PathBuf,

    /// Directory speaker photo paths are resolved against.
    #[arg(long, default_value = ".")]
    assets_root: PathBuf,

    /// Output SVG path. Overwritten if it exists.
    #[arg(long, default_value = "tv.svg")]
    out: PathBuf,

    /// Optional JSON file overriding board settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Raise log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => confgrid::BoardConfig::from_path(path)?,
        None => confgrid::BoardConfig::default(),
    };

    let job = confgrid::RenderJob {
        data_dir: cli.data_dir,
        assets_root: cli.assets_root,
        out: cli.out,
        config,
    };
    let summary = confgrid::run(&job)
        .with_context(|| format!("render board from '{}'", job.data_dir.display()))?;

    eprintln!(
        "wrote {} ({} talks, {} photos)",
        job.out.display(),
        summary.talks,
        summary.photos
    );
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
