//! Lecture du CSV de consommation journalière (séparateur `;`)

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::StringRecord;
use tracing::debug;

use crate::options::{ColumnNames, PipelineOptions};
use crate::types::{ConsumptionData, ConsumptionRecord, Hour, HourColumns, HOURS_PER_DAY};
use crate::ConsoError;

/// Charge le CSV de consommation
pub fn load(path: &Path, options: &PipelineOptions) -> Result<ConsumptionData, ConsoError> {
    let file = File::open(path)?;
    read(file, &path.display().to_string(), options)
}

/// Lit un CSV de consommation depuis n'importe quel `Read`
///
/// `source` sert uniquement aux messages d'erreur.
pub fn read<R: Read>(
    reader: R,
    source: &str,
    options: &PipelineOptions,
) -> Result<ConsumptionData, ConsoError> {
    if !options.delimiter.is_ascii() {
        return Err(ConsoError::invalid_value(
            source,
            0,
            "delimiter",
            options.delimiter.to_string(),
        ));
    }

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(options.delimiter as u8)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let layout = HeaderLayout::resolve(&headers, source, &options.columns)?;

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = result?;
        records.push(layout.parse_record(&record, source, &options.columns)?);
    }

    debug!(
        source,
        records = records.len(),
        hourly_columns = layout.hours.iter().filter(|h| h.is_some()).count(),
        "Consumption file read"
    );

    Ok(ConsumptionData {
        records,
        hours: layout.hour_columns(),
    })
}

/// Position des colonnes utiles dans l'en-tête
#[derive(Debug)]
struct HeaderLayout {
    code: usize,
    date: usize,
    region: usize,
    operator: usize,
    consumption: usize,
    sector: Option<usize>,
    status: Option<usize>,
    hours: [Option<usize>; HOURS_PER_DAY],
}

impl HeaderLayout {
    fn resolve(
        headers: &StringRecord,
        source: &str,
        columns: &ColumnNames,
    ) -> Result<Self, ConsoError> {
        let names: Vec<&str> = headers.iter().map(normalize_header).collect();
        let find = |name: &str| names.iter().position(|h| *h == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| ConsoError::missing_column(source, name))
        };

        let mut hours = [None; HOURS_PER_DAY];
        for hour in Hour::all() {
            hours[hour.index()] = find(&hour.column_name());
        }

        Ok(Self {
            code: require(&columns.code)?,
            date: require(&columns.date)?,
            region: require(&columns.region)?,
            operator: require(&columns.operator)?,
            consumption: require(&columns.consumption)?,
            sector: find(&columns.sector),
            status: find(&columns.status),
            hours,
        })
    }

    fn hour_columns(&self) -> HourColumns {
        self.hours.map(|h| h.is_some())
    }

    fn parse_record(
        &self,
        record: &StringRecord,
        source: &str,
        columns: &ColumnNames,
    ) -> Result<ConsumptionRecord, ConsoError> {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let cell = |idx: usize| record.get(idx).unwrap_or("").trim();
        let optional = |idx: Option<usize>| {
            idx.map(cell)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let number = |idx: usize, column: &str| {
            parse_number(cell(idx))
                .map_err(|_| ConsoError::invalid_value(source, line, column, cell(idx)))
        };

        let code = super::parse_code(cell(self.code))
            .ok_or_else(|| ConsoError::invalid_value(source, line, &columns.code, cell(self.code)))?;
        let date = parse_date(cell(self.date))
            .ok_or_else(|| ConsoError::invalid_value(source, line, &columns.date, cell(self.date)))?;

        let mut hourly = [None; HOURS_PER_DAY];
        for hour in Hour::all() {
            if let Some(idx) = self.hours[hour.index()] {
                hourly[hour.index()] = number(idx, &hour.column_name())?;
            }
        }

        Ok(ConsumptionRecord {
            code,
            date,
            region: cell(self.region).to_string(),
            operator: cell(self.operator).to_string(),
            sector: optional(self.sector),
            status: optional(self.status),
            consumption: number(self.consumption, &columns.consumption)?,
            hourly,
        })
    }
}

/// Supprime le BOM éventuel et les espaces autour d'un nom de colonne
fn normalize_header(header: &str) -> &str {
    header.trim_start_matches('\u{feff}').trim()
}

/// Lit une valeur numérique ; une cellule vide est une valeur manquante
fn parse_number(value: &str) -> Result<Option<f64>, std::num::ParseFloatError> {
    if value.is_empty() {
        return Ok(None);
    }
    let parsed = match value.parse::<f64>() {
        Ok(v) => v,
        // Virgule décimale
        Err(e) => value.replace(',', ".").parse::<f64>().map_err(|_| e)?,
    };
    Ok(Some(parsed).filter(|v| !v.is_nan()))
}

/// Extrait la date (jour) d'une cellule
///
/// Une date avec fuseau horaire garde son heure locale : le décalage est
/// simplement ignoré, sans conversion en UTC.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local().date());
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.date());
        }
    }

    ["%Y-%m-%d", "%d/%m/%Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}
