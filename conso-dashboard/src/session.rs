//! Session du tableau de bord
//!
//! Les vues sont calculées une fois à l'ouverture puis partagées en lecture
//! seule. Chaque interaction refait seulement filtre puis construction de la
//! figure.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use conso_gaz::{DateSelection, Datasets, Table};
use tracing::{debug, info};

use crate::charts::{self, ChartKind, Figure};
use crate::config::{Config, DataSources};
use crate::report::LoadReport;

#[derive(Debug, Clone)]
pub struct Session {
    datasets: Datasets,
    config: Arc<Config>,
}

impl Session {
    pub fn new(datasets: Datasets, config: Config) -> Self {
        Self {
            datasets,
            config: Arc::new(config),
        }
    }

    /// Charge les deux fichiers et prépare les trois vues
    pub fn open(sources: &DataSources, config: Config) -> Result<(Self, LoadReport)> {
        let start = Instant::now();
        info!(
            csv = %sources.consumption.display(),
            geojson = %sources.regions.display(),
            operator = %config.pipeline.operator,
            "Loading consumption data"
        );

        let datasets = conso_gaz::load(&sources.consumption, &sources.regions, &config.pipeline)
            .context(format!(
                "Failed to prepare {} with {}",
                sources.consumption.display(),
                sources.regions.display()
            ))?;

        let mut report = LoadReport::new(&datasets, sources, &config.pipeline.operator);
        report.set_duration(start.elapsed());

        Ok((Self::new(datasets, config), report))
    }

    pub fn datasets(&self) -> &Datasets {
        &self.datasets
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Sous-ensemble de la vue correspondant à la sélection
    pub fn subset(&self, selection: &DateSelection) -> Result<Table> {
        selection.check_bounds(&self.config.years.range())?;
        let subset = self
            .datasets
            .select(selection.level(), &selection.predicates())?;
        debug!(level = %selection.level(), rows = subset.len(), "Subset selected");
        Ok(subset)
    }

    /// Filtre puis construit la figure demandée
    pub fn chart(&self, kind: ChartKind, selection: &DateSelection) -> Result<Figure> {
        let subset = self.subset(selection)?;
        let hour = selection.hour();
        let title = selection.title_fragment();

        match kind {
            ChartKind::Map => charts::choropleth(&subset, hour, &self.config.map),
            ChartKind::Bar => charts::horizontal_bar(&subset, hour, &title),
            ChartKind::Pie => charts::pie(&subset, hour, &title),
        }
    }

    pub fn map(&self, selection: &DateSelection) -> Result<Figure> {
        self.chart(ChartKind::Map, selection)
    }

    pub fn bar(&self, selection: &DateSelection) -> Result<Figure> {
        self.chart(ChartKind::Bar, selection)
    }

    pub fn pie(&self, selection: &DateSelection) -> Result<Figure> {
        self.chart(ChartKind::Pie, selection)
    }
}
