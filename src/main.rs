use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use wcseed::report::{inspect_database, OutputFormat, ReportKind};
use wcseed::seed::{seed_database, SeedSummary};
use wcseed::{AppError, Config, KeyMode, PlayerMode, YamlFiles};

#[derive(Parser, Debug)]
#[command(
    name = "wcseed",
    version,
    about = "Seed and inspect a World Cup fixtures database"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load teams, matches and players from YAML into the database
    Seed(SeedArgs),
    /// Print a read-only report from an existing database
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct SeedArgs {
    /// Teams file (sequence of name/group/code)
    #[arg(value_name = "TEAMS")]
    teams: Option<PathBuf>,

    /// Matches file (sequence of a/b/date/group, optional time)
    #[arg(value_name = "MATCHES")]
    matches: Option<PathBuf>,

    /// Players file
    #[arg(long, value_name = "PATH")]
    players: Option<PathBuf>,

    /// Database path, directory, or `memory` (overrides WC_DATABASE_PATH)
    #[arg(long = "db", value_name = "PATH")]
    database: Option<String>,

    /// Drop and recreate every table before seeding
    #[arg(long)]
    purge: bool,

    /// Number each country's group matches after seeding
    #[arg(long = "assign-days")]
    assign_days: bool,

    #[arg(long = "key-mode", value_enum)]
    key_mode: Option<KeyMode>,

    #[arg(long = "player-mode", value_enum)]
    player_mode: Option<PlayerMode>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Database to read
    #[arg(value_name = "DB")]
    database: String,

    #[arg(value_enum)]
    report: ReportKind,

    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

impl SeedArgs {
    fn source(&self) -> YamlFiles {
        let mut files = YamlFiles::new();
        if let Some(path) = &self.teams {
            files = files.with_teams(path);
        }
        if let Some(path) = &self.matches {
            files = files.with_matches(path);
        }
        if let Some(path) = &self.players {
            files = files.with_players(path);
        }
        files
    }
}

fn print_summary(summary: &SeedSummary) {
    println!(
        "countries: {} created, {} existing, {} updated",
        summary.countries.created, summary.countries.existing, summary.countries.updated
    );
    println!(
        "matches:   {} created, {} existing, {} updated",
        summary.matches.created, summary.matches.existing, summary.matches.updated
    );
    if summary.players_skipped > 0 {
        println!("players:   {} skipped", summary.players_skipped);
    } else {
        println!(
            "players:   {} created, {} existing",
            summary.players.created, summary.players.existing
        );
    }
    if summary.days_assigned > 0 {
        println!("match days assigned to {} matches", summary.days_assigned);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Seed(args) => {
            let config = Config::from_env().map_err(AppError::from)?.with_overrides(
                args.database.clone(),
                args.key_mode,
                args.player_mode,
                args.assign_days,
            );

            tracing::info!("Seeding {}", config.database_path);
            let summary = seed_database(&config, Arc::new(args.source()), args.purge)
                .await
                .map_err(AppError::from)
                .with_context(|| format!("seeding {}", config.database_path))?;
            print_summary(&summary);
        }
        Command::Inspect(args) => {
            let output = inspect_database(&args.database, args.report, args.format)
                .await
                .map_err(AppError::from)?;
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        let code = e.downcast_ref::<AppError>().map_or(1, AppError::exit_code);
        std::process::exit(code);
    }
}
