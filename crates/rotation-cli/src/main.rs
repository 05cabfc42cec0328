//! warp-rotate — draw from and inspect weighted round-robin rotations.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "warp-rotate",
    about = "WarpGrid rotation — weighted round-robin over a configured set",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw selections from a rotation loaded from a TOML file.
    Run {
        /// Path to the rotation config
        #[arg(short, long)]
        config: String,
        /// Total number of selections to draw
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,
        /// Draw in batches of this size instead of one at a time
        #[arg(short, long)]
        batch: Option<usize>,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Show the entries and weights of a rotation config.
    Inspect {
        #[arg(short, long)]
        config: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("warp_rotate=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            count,
            batch,
            format,
        } => commands::run::run(&config, count, batch, &format),
        Commands::Inspect { config } => commands::inspect::inspect(&config),
    }
}
