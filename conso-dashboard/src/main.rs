//! Point d'entrée CLI pour conso-dashboard

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

use conso_dashboard::charts::ChartKind;
use conso_dashboard::cli::{self, Commands};

// Charger .env au démarrage
fn load_env() {
    // Chercher .env dans le répertoire courant ou parent
    if dotenvy::dotenv().is_err() {
        // Essayer depuis le répertoire du binaire
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let _ = dotenvy::from_path(dir.join(".env"));
            }
        }
    }
}

/// Visualiser la consommation quotidienne de gaz par région
#[derive(Parser)]
#[command(name = "conso-dashboard")]
#[command(author, version)]
#[command(about = "Cartes, barres et camemberts de la consommation de gaz par région (GRTgaz)")]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    // Charger .env avant tout
    load_env();

    let cli = Cli::parse();

    // Configurer le logging
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Summary { sources, report } => {
            info!(config = %sources.config, "Préparation des données");
            cli::cmd_summary(&sources, report.as_deref())?;
        }
        Commands::Map {
            sources,
            selection,
            output,
        } => cli::cmd_chart(ChartKind::Map, &sources, &selection, output.as_deref())?,
        Commands::Bar {
            sources,
            selection,
            output,
        } => cli::cmd_chart(ChartKind::Bar, &sources, &selection, output.as_deref())?,
        Commands::Pie {
            sources,
            selection,
            output,
        } => cli::cmd_chart(ChartKind::Pie, &sources, &selection, output.as_deref())?,
        Commands::Dashboard {
            sources,
            selection,
            panels,
            output,
        } => {
            info!(output = %output.display(), "Tableau de bord HTML");
            cli::cmd_dashboard(&sources, &selection, panels.as_deref(), &output)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    // Les figures peuvent sortir sur stdout : logs sur stderr
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
