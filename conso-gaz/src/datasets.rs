//! Les trois vues d'une session, construites une seule fois

use std::sync::Arc;

use tracing::info;

use crate::aggregate::{aggregate_monthly, aggregate_yearly};
use crate::filter::{filter_rows, Predicate};
use crate::preprocess::{preprocess, JoinStats};
use crate::table::{Level, Table};
use crate::types::{ConsumptionData, Region};
use crate::ConsoError;

/// Vues journalière, mensuelle et annuelle, en lecture seule
///
/// Le clonage ne copie pas les données : plusieurs sessions peuvent partager
/// les mêmes vues sans verrou.
#[derive(Debug, Clone, PartialEq)]
pub struct Datasets {
    daily: Arc<Table>,
    monthly: Arc<Table>,
    yearly: Arc<Table>,
    stats: JoinStats,
}

impl Datasets {
    /// Prépare la vue journalière puis dérive les deux vues agrégées
    pub fn build(
        data: &ConsumptionData,
        regions: &[Region],
        operator: &str,
    ) -> Result<Self, ConsoError> {
        let joined = preprocess(data, regions, operator)?;
        let monthly = aggregate_monthly(&joined.table)?;
        let yearly = aggregate_yearly(&joined.table)?;

        info!(
            daily = joined.table.len(),
            monthly = monthly.len(),
            yearly = yearly.len(),
            dropped_unmatched = joined.stats.dropped_unmatched,
            "Datasets ready"
        );

        Ok(Self {
            daily: Arc::new(joined.table),
            monthly: Arc::new(monthly),
            yearly: Arc::new(yearly),
            stats: joined.stats,
        })
    }

    /// Vue correspondant à un niveau d'agrégation
    pub fn view(&self, level: Level) -> &Table {
        match level {
            Level::Daily => &self.daily,
            Level::Monthly => &self.monthly,
            Level::Yearly => &self.yearly,
        }
    }

    /// Filtre la vue d'un niveau
    pub fn select(&self, level: Level, predicates: &[Predicate]) -> Result<Table, ConsoError> {
        filter_rows(self.view(level), predicates)
    }

    pub fn daily(&self) -> &Table {
        &self.daily
    }

    pub fn monthly(&self) -> &Table {
        &self.monthly
    }

    pub fn yearly(&self) -> &Table {
        &self.yearly
    }

    /// Diagnostic de la jointure
    pub fn stats(&self) -> &JoinStats {
        &self.stats
    }

    /// Années présentes dans la vue journalière (min, max)
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let years = self.daily.iter().map(|row| row.year);
        let min = years.clone().min()?;
        let max = years.max()?;
        Some((min, max))
    }
}
