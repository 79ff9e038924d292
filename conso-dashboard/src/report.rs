//! Rapport de chargement
//!
//! Résume la préparation des données : lignes lues, retenues, écartées
//! (région inconnue ou autre opérateur), taille et empreinte de chaque vue.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use conso_gaz::{table_fingerprint_hex, Datasets, Level};
use serde::Serialize;

use crate::config::DataSources;

/// Statut global du chargement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoadStatus {
    /// Toutes les lignes de l'opérateur ont trouvé leur région
    Success,
    /// Des lignes ont été écartées faute de région correspondante
    PartialSuccess,
    /// Aucune ligne retenue
    Empty,
}

/// Résumé d'une vue
#[derive(Debug, Clone, Serialize)]
pub struct ViewSummary {
    pub level: Level,
    pub rows: usize,
    pub regions: usize,
    /// Empreinte blake3 (hex)
    pub fingerprint: String,
}

/// Statistiques par région de la vue journalière
#[derive(Debug, Clone, Default, Serialize)]
pub struct RegionStats {
    pub name: String,
    pub days: usize,
    /// Jours sans consommation renseignée
    pub missing: usize,
    pub mean: Option<f64>,
}

/// Rapport complet de chargement
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub consumption_file: String,
    pub regions_file: String,
    pub operator: String,
    pub duration_secs: f64,
    pub status: LoadStatus,

    /// Lignes lues dans le CSV
    pub records_read: usize,
    /// Lignes de la vue journalière
    pub rows_kept: usize,
    /// Lignes sans région correspondante
    pub dropped_unmatched: usize,
    /// Lignes d'un autre opérateur
    pub dropped_operator: usize,
    /// Codes région absents du GeoJSON
    pub unmatched_codes: Vec<u32>,

    /// Première et dernière année présentes
    pub years: Option<(i32, i32)>,

    pub views: Vec<ViewSummary>,

    /// Statistiques par code région
    pub by_region: BTreeMap<u32, RegionStats>,
}

impl LoadReport {
    /// Construit le rapport à partir des vues préparées
    pub fn new(datasets: &Datasets, sources: &DataSources, operator: &str) -> Self {
        let stats = datasets.stats();

        let views = Level::ALL
            .iter()
            .map(|&level| {
                let view = datasets.view(level);
                ViewSummary {
                    level,
                    rows: view.len(),
                    regions: view.regions().len(),
                    fingerprint: table_fingerprint_hex(view),
                }
            })
            .collect();

        let mut by_region: BTreeMap<u32, RegionStats> = BTreeMap::new();
        let mut sums: BTreeMap<u32, (f64, usize)> = BTreeMap::new();
        for row in datasets.daily() {
            let entry = by_region.entry(row.code()).or_insert_with(|| RegionStats {
                name: row.region.name.clone(),
                ..Default::default()
            });
            entry.days += 1;
            match row.consumption {
                Some(value) => {
                    let sum = sums.entry(row.code()).or_insert((0.0, 0));
                    sum.0 += value;
                    sum.1 += 1;
                }
                None => entry.missing += 1,
            }
        }
        for (code, (sum, count)) in sums {
            if let Some(entry) = by_region.get_mut(&code) {
                entry.mean = Some(sum / count as f64);
            }
        }

        let mut report = Self {
            consumption_file: sources.consumption.display().to_string(),
            regions_file: sources.regions.display().to_string(),
            operator: operator.to_string(),
            duration_secs: 0.0,
            status: LoadStatus::Success,
            records_read: stats.records,
            rows_kept: stats.kept,
            dropped_unmatched: stats.dropped_unmatched,
            dropped_operator: stats.dropped_operator,
            unmatched_codes: stats.unmatched_codes.iter().copied().collect(),
            years: datasets.year_span(),
            views,
            by_region,
        };
        report.finalize();
        report
    }

    /// Définit la durée du chargement
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = duration.as_secs_f64();
    }

    /// Détermine le statut final
    pub fn finalize(&mut self) {
        self.status = if self.rows_kept == 0 {
            LoadStatus::Empty
        } else if self.dropped_unmatched > 0 {
            LoadStatus::PartialSuccess
        } else {
            LoadStatus::Success
        };
    }

    /// Affiche le rapport sur la console
    pub fn display(&self) {
        println!("\n{}", "=".repeat(60));
        println!("LOAD REPORT - Opérateur {}", self.operator);
        println!("{}", "=".repeat(60));

        println!("\nStatus: {:?}", self.status);
        println!("Duration: {:.2}s", self.duration_secs);
        println!("Consumption: {}", self.consumption_file);
        println!("Regions: {}", self.regions_file);

        println!("\n--- SUMMARY ---");
        println!(
            "Records: {} read, {} kept, {} without region, {} other operator",
            self.records_read, self.rows_kept, self.dropped_unmatched, self.dropped_operator
        );
        if let Some((first, last)) = self.years {
            println!("Years: {} - {}", first, last);
        }

        println!("\n--- VIEWS ---");
        for view in &self.views {
            println!(
                "  {}: {} rows, {} regions, {}",
                view.level,
                view.rows,
                view.regions,
                &view.fingerprint[..16]
            );
        }

        if !self.by_region.is_empty() {
            println!("\n--- BY REGION ---");
            for (code, stats) in &self.by_region {
                let mean = stats
                    .mean
                    .map(|m| format!("{:.1} MWh", m))
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "  {} {}: {} days, {} missing, mean {}",
                    code, stats.name, stats.days, stats.missing, mean
                );
            }
        }

        if !self.unmatched_codes.is_empty() {
            println!("\n--- UNMATCHED CODES ({}) ---", self.unmatched_codes.len());
            let codes: Vec<String> = self.unmatched_codes.iter().map(u32::to_string).collect();
            println!("  {}", codes.join(", "));
        }

        println!("\n{}", "=".repeat(60));
    }

    /// Sauvegarde le rapport en JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Affichage compact pour le résumé
    pub fn summary(&self) -> String {
        format!(
            "{}: {} rows kept, {} without region, {} other operator",
            self.operator, self.rows_kept, self.dropped_unmatched, self.dropped_operator
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use conso_gaz::types::{ConsumptionData, ConsumptionRecord, Region, HOURS_PER_DAY};
    use geo::{polygon, Geometry};
    use std::path::PathBuf;

    fn record(code: u32, day: u32, operator: &str, consumption: Option<f64>) -> ConsumptionRecord {
        ConsumptionRecord {
            code,
            date: NaiveDate::from_ymd_opt(2020, 1, day).unwrap(),
            region: format!("Région {}", code),
            operator: operator.to_string(),
            sector: None,
            status: None,
            consumption,
            hourly: [None; HOURS_PER_DAY],
        }
    }

    fn datasets(records: Vec<ConsumptionRecord>) -> Datasets {
        let regions = vec![Region {
            code: 11,
            name: "Île-de-France".to_string(),
            geometry: Geometry::Polygon(polygon![
                (x: 0.0, y: 0.0),
                (x: 1.0, y: 0.0),
                (x: 1.0, y: 1.0),
            ]),
        }];
        let data = ConsumptionData {
            records,
            hours: [false; HOURS_PER_DAY],
        };
        Datasets::build(&data, &regions, "GRTgaz").unwrap()
    }

    fn sources() -> DataSources {
        DataSources {
            consumption: PathBuf::from("conso.csv"),
            regions: PathBuf::from("regions.geojson"),
        }
    }

    #[test]
    fn test_success() {
        let datasets = datasets(vec![
            record(11, 1, "GRTgaz", Some(10.0)),
            record(11, 2, "GRTgaz", Some(20.0)),
            record(11, 3, "GRTgaz", None),
            record(11, 3, "Teréga", Some(1.0)),
        ]);
        let report = LoadReport::new(&datasets, &sources(), "GRTgaz");

        assert_eq!(report.status, LoadStatus::Success);
        assert_eq!(report.records_read, 4);
        assert_eq!(report.rows_kept, 3);
        assert_eq!(report.dropped_operator, 1);
        assert_eq!(report.views.len(), 3);
        assert_eq!(report.views[0].fingerprint.len(), 64);

        let idf = &report.by_region[&11];
        assert_eq!(idf.days, 3);
        assert_eq!(idf.missing, 1);
        assert_eq!(idf.mean, Some(15.0));
    }

    #[test]
    fn test_partial_success() {
        let datasets = datasets(vec![
            record(11, 1, "GRTgaz", Some(10.0)),
            record(94, 1, "GRTgaz", Some(3.0)),
        ]);
        let report = LoadReport::new(&datasets, &sources(), "GRTgaz");

        assert_eq!(report.status, LoadStatus::PartialSuccess);
        assert_eq!(report.unmatched_codes, vec![94]);
        assert!(report.summary().contains("1 without region"));
    }

    #[test]
    fn test_empty() {
        let datasets = datasets(vec![record(11, 1, "Teréga", Some(10.0))]);
        let report = LoadReport::new(&datasets, &sources(), "GRTgaz");
        assert_eq!(report.status, LoadStatus::Empty);
    }

    #[test]
    fn test_save_to_file() {
        let datasets = datasets(vec![record(11, 1, "GRTgaz", Some(10.0))]);
        let report = LoadReport::new(&datasets, &sources(), "GRTgaz");

        let path = std::env::temp_dir().join(format!("conso-report-{}.json", std::process::id()));
        report.save_to_file(&path).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(json["status"], "Success");
        assert_eq!(json["views"][1]["level"], "Mensuel");
    }
}
