//! CLI command structure using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tagtree")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show how a template parses: markup, hole paths and updaters
    Inspect {
        /// Template file, holes written as `{}`
        file: PathBuf,

        /// Parse in SVG context
        #[arg(long)]
        svg: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Engine configuration file (TOML)
        #[arg(long, env = "TAGTREE_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Render a template one or more times and print the result
    Render {
        /// Template file, holes written as `{}`
        file: PathBuf,

        /// JSON file holding an array of hole values; repeat to render again
        #[arg(long = "values", value_name = "FILE", required = true)]
        values: Vec<PathBuf>,

        /// Parse in SVG context
        #[arg(long)]
        svg: bool,

        /// Report DOM mutations for every pass
        #[arg(long)]
        stats: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Engine configuration file (TOML)
        #[arg(long, env = "TAGTREE_CONFIG")]
        config: Option<PathBuf>,
    },
}
