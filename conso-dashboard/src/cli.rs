//! Définition et implémentation des commandes CLI
//!
//! - `summary` : chargement et rapport de préparation
//! - `map`, `bar`, `pie` : une figure Plotly en JSON
//! - `dashboard` : page HTML avec les trois familles de graphiques

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{value_parser, Args, Subcommand};
use conso_gaz::{DateSelection, Hour, Level};
use serde::Deserialize;
use tracing::{info, warn};

use crate::charts::ChartKind;
use crate::config::{Config, DataSources, SelectionDefaults};
use crate::export::{self, Panel};
use crate::report::LoadReport;
use crate::session::Session;

#[derive(Subcommand)]
pub enum Commands {
    /// Load and prepare the data, then print the load report
    Summary {
        #[command(flatten)]
        sources: SourceArgs,

        /// Save the report as JSON
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Choropleth map of the regions (Plotly JSON)
    Map {
        #[command(flatten)]
        sources: SourceArgs,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Output file (stdout by default)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Horizontal bar chart per region (Plotly JSON)
    Bar {
        #[command(flatten)]
        sources: SourceArgs,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Output file (stdout by default)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Pie chart of the consumption split (Plotly JSON)
    Pie {
        #[command(flatten)]
        sources: SourceArgs,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Output file (stdout by default)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Standalone HTML dashboard with map, bars and pie
    Dashboard {
        #[command(flatten)]
        sources: SourceArgs,

        /// Common selection, used by every panel without its own
        #[command(flatten)]
        selection: SelectionArgs,

        /// JSON file with one selection per panel ({"map": {...}, "bar": {...}, "pie": {...}})
        #[arg(long)]
        panels: Option<PathBuf>,

        /// Output HTML file
        #[arg(short, long, default_value = "dashboard.html")]
        output: PathBuf,
    },
}

/// Fichiers sources et configuration
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Consumption CSV (env: CONSO_CSV)
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Regions GeoJSON (env: CONSO_GEOJSON)
    #[arg(long)]
    pub geojson: Option<PathBuf>,

    /// Config preset name (default) or path to a JSON config
    #[arg(long, default_value = "default")]
    pub config: String,
}

impl SourceArgs {
    /// Résout la configuration et les chemins puis ouvre la session
    pub fn open(&self) -> Result<(Session, LoadReport)> {
        let config = Config::resolve(&self.config)
            .context(format!("Failed to load config '{}'", self.config))?;
        let sources = DataSources::resolve(self.csv.clone(), self.geojson.clone());

        let (session, report) = Session::open(&sources, config)?;
        info!("{}", report.summary());
        if report.dropped_unmatched > 0 {
            warn!(
                dropped = report.dropped_unmatched,
                "Some consumption rows have no region polygon and were ignored"
            );
        }
        Ok((session, report))
    }
}

/// Sélecteurs de date
#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Aggregation level: tout, mensuel or annuel
    #[arg(long, default_value = "tout")]
    pub level: Level,

    /// Year (default from config: 2018)
    #[arg(long)]
    pub year: Option<i32>,

    /// Month 1-12 (default from config: 8)
    #[arg(long, value_parser = value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,

    /// Day 1-31, level tout only (default from config: 16)
    #[arg(long, value_parser = value_parser!(u32).range(1..=31))]
    pub day: Option<u32>,

    /// Hour 00-23, level tout only
    #[arg(long)]
    pub hour: Option<Hour>,
}

impl SelectionArgs {
    /// Sélection complète, valeurs manquantes prises dans la configuration
    pub fn to_selection(&self, defaults: &SelectionDefaults) -> Result<DateSelection> {
        let year = self.year.unwrap_or(defaults.year);
        let month = self.month.unwrap_or(defaults.month);

        if self.level != Level::Daily {
            if self.hour.is_some() {
                anyhow::bail!("--hour is only available with --level tout");
            }
            if self.day.is_some() {
                anyhow::bail!("--day is only available with --level tout");
            }
        }
        if self.level == Level::Yearly && self.month.is_some() {
            anyhow::bail!("--month is not available with --level annuel");
        }

        Ok(match self.level {
            Level::Daily => DateSelection::Daily {
                year,
                month,
                day: self.day.unwrap_or(defaults.day),
                hour: self.hour,
            },
            Level::Monthly => DateSelection::Monthly { year, month },
            Level::Yearly => DateSelection::Yearly { year },
        })
    }
}

/// Sélections propres à chaque panneau du tableau de bord
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PanelSelections {
    pub map: Option<DateSelection>,
    pub bar: Option<DateSelection>,
    pub pie: Option<DateSelection>,
}

impl PanelSelections {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read panels file: {}", path.display()))?;
        serde_json::from_str(&content).context("Failed to parse panels JSON")
    }

    /// Sélection du panneau, ou la sélection commune
    pub fn get(&self, kind: ChartKind, common: &DateSelection) -> DateSelection {
        let own = match kind {
            ChartKind::Map => &self.map,
            ChartKind::Bar => &self.bar,
            ChartKind::Pie => &self.pie,
        };
        own.unwrap_or(*common)
    }
}

/// Charge les données et affiche le rapport
pub fn cmd_summary(sources: &SourceArgs, report_path: Option<&Path>) -> Result<()> {
    let (_, report) = sources.open()?;
    report.display();

    if let Some(path) = report_path {
        report.save_to_file(path)?;
        info!(path = %path.display(), "Report saved");
    }
    Ok(())
}

/// Construit une figure et l'écrit en JSON
pub fn cmd_chart(
    kind: ChartKind,
    sources: &SourceArgs,
    selection: &SelectionArgs,
    output: Option<&Path>,
) -> Result<()> {
    let (session, _) = sources.open()?;
    let selection = selection.to_selection(&session.config().defaults)?;

    let figure = session.chart(kind, &selection)?;
    if figure.is_empty() {
        warn!(selection = %selection.title_fragment(), "No data for this selection");
    }

    export::write_figure(&figure, output)?;
    if let Some(path) = output {
        info!(chart = %kind, output = %path.display(), "Figure written");
    }
    Ok(())
}

/// Construit les trois panneaux et écrit la page HTML
pub fn cmd_dashboard(
    sources: &SourceArgs,
    selection: &SelectionArgs,
    panels_path: Option<&Path>,
    output: &Path,
) -> Result<()> {
    let (session, _) = sources.open()?;
    let common = selection.to_selection(&session.config().defaults)?;
    let selections = match panels_path {
        Some(path) => PanelSelections::load(path)?,
        None => PanelSelections::default(),
    };

    let mut panels = Vec::with_capacity(ChartKind::ALL.len());
    for kind in ChartKind::ALL {
        let selection = selections.get(kind, &common);
        let figure = session
            .chart(kind, &selection)
            .context(format!("Failed to build {} panel", kind))?;
        panels.push(Panel {
            kind,
            caption: format!("{} {}", selection.level(), selection.title_fragment()),
            figure,
        });
    }

    export::write_dashboard(output, "Consommation de gaz par région", &panels)?;
    info!(output = %output.display(), "Dashboard written");
    Ok(())
}
