use clap::{CommandFactory, Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::{route_summary::RouteArgs, run::RunArgs};

mod bangkok;
mod fleet_file;
mod mae_chan;
mod parsers;
mod route_summary;
mod run;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream simulated GPS telemetry to the tracking service
    Run {
        #[command(flatten)]
        args: RunArgs,
    },
    /// Print a summary of the configured routes
    #[command(visible_alias = "r")]
    Route {
        #[command(flatten)]
        args: RouteArgs,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Some(Commands::Run { args }) => run::run(args).await?,
        Some(Commands::Route { args }) => route_summary::run(args)?,
        None => Cli::command().print_help()?,
    }

    Ok(())
}
