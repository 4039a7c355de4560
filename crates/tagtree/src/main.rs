mod cli;
mod commands;
mod output;
mod values;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result = match cli.command {
        Commands::Inspect {
            file,
            svg,
            json,
            config,
        } => commands::inspect::run(&file, svg, json, config.as_deref()),
        Commands::Render {
            file,
            values,
            svg,
            stats,
            json,
            config,
        } => commands::render::run(&file, &values, svg, stats, json, config.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
