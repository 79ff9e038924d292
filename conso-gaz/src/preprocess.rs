//! Jointure consommation ↔ régions et mise en forme de la vue journalière

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::Datelike;
use serde::Serialize;
use tracing::{debug, warn};

use crate::table::{Level, Row, Table};
use crate::types::{ConsumptionData, Region};
use crate::ConsoError;

/// Diagnostic de la jointure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JoinStats {
    /// Lignes lues dans le CSV
    pub records: usize,

    /// Lignes conservées dans la vue journalière
    pub kept: usize,

    /// Lignes sans polygone correspondant
    pub dropped_unmatched: usize,

    /// Lignes d'un autre opérateur
    pub dropped_operator: usize,

    /// Codes région du CSV absents du GeoJSON
    pub unmatched_codes: BTreeSet<u32>,
}

impl JoinStats {
    /// Vrai si des lignes ont été écartées faute de polygone
    pub fn has_mismatch(&self) -> bool {
        self.dropped_unmatched > 0
    }
}

/// Résultat de la préparation
#[derive(Debug, Clone, PartialEq)]
pub struct Joined {
    /// Vue journalière ("Tout")
    pub table: Table,

    pub stats: JoinStats,
}

/// Construit la vue journalière
///
/// Jointure interne sur le code région : les lignes dont le code n'a pas de
/// polygone sont écartées sans erreur et comptées. Seules les lignes de
/// `operator` sont conservées. L'ordre du CSV est préservé.
pub fn preprocess(
    data: &ConsumptionData,
    regions: &[Region],
    operator: &str,
) -> Result<Joined, ConsoError> {
    let mut by_code: HashMap<u32, Arc<Region>> = HashMap::with_capacity(regions.len());
    for region in regions {
        if by_code
            .insert(region.code, Arc::new(region.clone()))
            .is_some()
        {
            return Err(ConsoError::DuplicateRegion(region.code));
        }
    }

    let mut stats = JoinStats {
        records: data.records.len(),
        ..Default::default()
    };
    let mut rows = Vec::with_capacity(data.records.len());

    for record in &data.records {
        let Some(region) = by_code.get(&record.code) else {
            stats.dropped_unmatched += 1;
            stats.unmatched_codes.insert(record.code);
            continue;
        };

        if record.operator != operator {
            stats.dropped_operator += 1;
            continue;
        }

        rows.push(Row {
            region: Arc::clone(region),
            parent: record.region.clone(),
            year: record.date.year(),
            month: Some(record.date.month()),
            day: Some(record.date.day()),
            operator: Some(record.operator.clone()),
            consumption: record.consumption,
            hourly: record.hourly,
        });
    }

    stats.kept = rows.len();

    if stats.has_mismatch() {
        warn!(
            dropped = stats.dropped_unmatched,
            codes = ?stats.unmatched_codes,
            "Consumption rows without matching region polygon"
        );
    }
    debug!(
        kept = stats.kept,
        dropped_operator = stats.dropped_operator,
        operator,
        "Daily view built"
    );

    Ok(Joined {
        table: Table::new(Level::Daily, data.hours, rows),
        stats,
    })
}
