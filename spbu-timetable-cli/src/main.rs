mod commands;

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::Context;

#[derive(Parser)]
#[command(name = "spbu-tt")]
#[command(about = "SPbU timetable browser")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON session config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// API root, overrides the config file
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Answer the command's main request from this JSON file instead of the network
    #[arg(long, global = true)]
    mock: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List faculties and institutes
    Divisions,

    /// List study levels and programs of a division
    Levels {
        /// Division alias, e.g. MATH
        alias: String,
    },

    /// List student groups of a study program
    Groups {
        /// Study program id from `levels`
        program_id: i64,
    },

    /// Show the timetable of a group for one week
    Week {
        group_id: i64,

        /// Monday of the week (YYYY-MM-DD), current week if omitted
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Also show the next and previous weeks
        #[arg(long)]
        neighbours: bool,
    },

    /// Search educators by name
    Educators { query: String },

    /// Show the events of an educator
    Educator {
        id: i64,

        /// First day (YYYY-MM-DD)
        #[arg(long, requires = "to")]
        from: Option<NaiveDate>,

        /// Last day (YYYY-MM-DD)
        #[arg(long, requires = "from")]
        to: Option<NaiveDate>,
    },

    /// List university buildings
    Addresses,

    /// List rooms of a building
    Rooms {
        /// Address oid from `addresses`
        oid: String,
    },

    /// Match every location of a group's week to a catalogued room
    Resolve {
        group_id: i64,

        /// Monday of the week (YYYY-MM-DD), current week if omitted
        #[arg(long)]
        from: Option<NaiveDate>,
    },

    /// Show an extracurricular event board
    Board {
        /// Board alias, e.g. MATH
        alias: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "spbu_timetable_cli={},spbu_timetable_core={}",
                    log_level, log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let ctx = Context::new(cli.config, cli.base_url, cli.mock)?;

    match cli.command {
        Commands::Divisions => commands::divisions_command(&ctx).await,
        Commands::Levels { alias } => commands::levels_command(&ctx, &alias).await,
        Commands::Groups { program_id } => commands::groups_command(&ctx, program_id).await,
        Commands::Week {
            group_id,
            from,
            neighbours,
        } => commands::week_command(&ctx, group_id, from, neighbours).await,
        Commands::Educators { query } => commands::educators_command(&ctx, &query).await,
        Commands::Educator { id, from, to } => {
            commands::educator_command(&ctx, id, from.zip(to)).await
        }
        Commands::Addresses => commands::addresses_command(&ctx).await,
        Commands::Rooms { oid } => commands::rooms_command(&ctx, &oid).await,
        Commands::Resolve { group_id, from } => {
            commands::resolve_command(&ctx, group_id, from).await
        }
        Commands::Board { alias } => commands::board_command(&ctx, &alias).await,
    }
}
