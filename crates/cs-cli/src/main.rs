//! Command-line tools for Corsair game content.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "corsair",
    about = "Corsair: validate, inspect, and play pirate dialogue content",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load all content files and report broken references
    Check {
        /// Directory containing the content JSON files
        #[arg(short, long, default_value = "data")]
        data: PathBuf,
    },

    /// List NPCs and the size of their dialogue trees
    Npcs {
        /// Directory containing the content JSON files
        #[arg(short, long, default_value = "data")]
        data: PathBuf,
    },

    /// Print an NPC's dialogue tree in source order
    Tree {
        /// NPC id
        npc: String,

        /// Directory containing the content JSON files
        #[arg(short, long, default_value = "data")]
        data: PathBuf,
    },

    /// Talk to an NPC interactively
    Talk {
        /// NPC id
        npc: String,

        /// Directory containing the content JSON files
        #[arg(short, long, default_value = "data")]
        data: PathBuf,

        /// Starting player stat, as name=value (repeatable)
        #[arg(long = "stat", value_name = "NAME=VALUE")]
        stats: Vec<String>,

        /// Starting game-state flag, as name=value (repeatable)
        #[arg(long = "flag", value_name = "NAME=VALUE")]
        flags: Vec<String>,

        /// Item the player starts with (repeatable)
        #[arg(long = "item", value_name = "ID")]
        items: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "corsair=debug,cs_core=debug,cs_dialogue=debug,cs_shell=debug"
    } else {
        "corsair=info,cs_dialogue=warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match cli.command {
        Commands::Check { data } => commands::check::run(&data),
        Commands::Npcs { data } => commands::npcs::run(&data),
        Commands::Tree { npc, data } => commands::tree::run(&data, &npc),
        Commands::Talk {
            npc,
            data,
            stats,
            flags,
            items,
        } => commands::talk::run(&data, &npc, &stats, &flags, &items),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
