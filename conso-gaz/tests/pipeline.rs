//! Tests d'intégration du pipeline complet (fichiers CSV et GeoJSON réels)

use std::fmt::Write as _;
use std::path::PathBuf;

use conso_gaz::{
    filter_rows, load, table_fingerprint, ConsoError, Datasets, DateSelection, Level,
    PipelineOptions, Predicate,
};

const REGIONS: &str = r#"{"type": "FeatureCollection", "features": [
  {"type": "Feature", "properties": {"code": "11", "nom": "Île-de-France"},
   "geometry": {"type": "Polygon", "coordinates": [[[1.5, 48.1], [3.5, 48.1], [3.5, 49.2], [1.5, 49.2], [1.5, 48.1]]]}},
  {"type": "Feature", "properties": {"code": "53", "nom": "Bretagne"},
   "geometry": {"type": "Polygon", "coordinates": [[[-5.1, 47.3], [-1.0, 47.3], [-1.0, 48.9], [-5.1, 48.9], [-5.1, 47.3]]]}},
  {"type": "Feature", "properties": {"code": "84", "nom": "Auvergne-Rhône-Alpes"},
   "geometry": {"type": "MultiPolygon", "coordinates": [[[[2.1, 44.1], [7.2, 44.1], [7.2, 46.8], [2.1, 46.8], [2.1, 44.1]]]]}}
]}"#;

/// Écrit les deux fichiers de test dans un répertoire temporaire propre au test
struct Fixture {
    dir: PathBuf,
}

impl Fixture {
    fn new(name: &str, csv: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("conso-gaz-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("conso.csv"), csv).unwrap();
        std::fs::write(dir.join("regions.geojson"), REGIONS).unwrap();
        Self { dir }
    }

    fn load(&self) -> Result<Datasets, ConsoError> {
        load(
            &self.dir.join("conso.csv"),
            &self.dir.join("regions.geojson"),
            &PipelineOptions::default(),
        )
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.dir).ok();
    }
}

fn header() -> String {
    let mut header = String::from(
        "Date;Code Région;Région;Opérateur;Secteur d'activité;Statut;Consommation journalière (MWh - PCS 0°C)",
    );
    for hour in 0..24 {
        write!(header, ";{:02}:00", hour).unwrap();
    }
    header
}

fn line(date: &str, code: u32, region: &str, operator: &str, value: f64) -> String {
    let mut line = format!(
        "{}T00:00:00+01:00;{};{};{};Distribution publique;Définitive;{}",
        date, code, region, operator, value
    );
    for hour in 0..24u32 {
        write!(line, ";{}", value / 24.0 + f64::from(hour)).unwrap();
    }
    line
}

/// Janvier 2020 pour l'Île-de-France (100..130), quelques jours ailleurs,
/// des lignes Teréga et un code région inconnu
fn sample_csv() -> String {
    let mut lines = vec![header()];
    for day in 1..=31u32 {
        let date = format!("2020-01-{:02}", day);
        lines.push(line(&date, 11, "Île-de-France", "GRTgaz", f64::from(99 + day)));
        lines.push(line(&date, 53, "Bretagne", "Teréga", 1.0));
    }
    lines.push(line("2020-02-01", 11, "Île-de-France", "GRTgaz", 80.0));
    lines.push(line("2019-02-28", 53, "Bretagne", "GRTgaz", 12.0));
    lines.push(line("2019-03-01", 53, "Bretagne", "GRTgaz", 18.0));
    lines.push(line("2019-03-01", 84, "Auvergne-Rhône-Alpes", "GRTgaz", 50.0));
    lines.push(line("2019-03-01", 94, "Corse", "GRTgaz", 3.0));
    lines.join("\n")
}

#[test]
fn test_monthly_mean_scenario() {
    let fixture = Fixture::new("monthly", &sample_csv());
    let datasets = fixture.load().unwrap();

    let subset = filter_rows(
        datasets.monthly(),
        &[Predicate::year(2020), Predicate::month(1)],
    )
    .unwrap();
    let idf: Vec<_> = subset.rows_for_region(11).collect();

    assert_eq!(idf.len(), 1);
    assert_eq!(idf[0].consumption, Some(115.0));
}

#[test]
fn test_yearly_mean_matches_daily_values() {
    let fixture = Fixture::new("yearly", &sample_csv());
    let datasets = fixture.load().unwrap();

    for row in datasets.yearly().iter() {
        let days: Vec<f64> = datasets
            .daily()
            .rows_for_region(row.code())
            .filter(|d| d.year == row.year)
            .filter_map(|d| d.consumption)
            .collect();
        let expected = days.iter().sum::<f64>() / days.len() as f64;
        assert_eq!(row.consumption, Some(expected), "region {}", row.code());
    }
}

#[test]
fn test_only_grtgaz_rows_with_geometry() {
    let fixture = Fixture::new("operator", &sample_csv());
    let datasets = fixture.load().unwrap();

    assert!(!datasets.daily().is_empty());
    for row in datasets.daily().iter() {
        assert_eq!(row.operator.as_deref(), Some("GRTgaz"));
        assert!(matches!(
            row.region.geometry,
            geo::Geometry::Polygon(_) | geo::Geometry::MultiPolygon(_)
        ));
    }

    let stats = datasets.stats();
    assert_eq!(stats.dropped_operator, 31);
    assert_eq!(stats.dropped_unmatched, 1);
    assert!(stats.unmatched_codes.contains(&94));
    assert_eq!(stats.kept, datasets.daily().len());
}

#[test]
fn test_region_identity_stable_across_views() {
    let fixture = Fixture::new("identity", &sample_csv());
    let datasets = fixture.load().unwrap();

    for level in Level::ALL {
        let view = datasets.view(level);
        for region in view.regions() {
            for row in view.rows_for_region(region.code) {
                assert_eq!(row.region.name, region.name);
                assert_eq!(row.region.geometry, region.geometry);
            }
        }
    }
}

#[test]
fn test_idempotent_preparation() {
    let fixture = Fixture::new("idempotent", &sample_csv());
    let first = fixture.load().unwrap();
    let second = fixture.load().unwrap();

    assert_eq!(first, second);
    for level in Level::ALL {
        assert_eq!(
            table_fingerprint(first.view(level)),
            table_fingerprint(second.view(level))
        );
    }
}

#[test]
fn test_invalid_calendar_date_gives_empty_subset() {
    let fixture = Fixture::new("calendar", &sample_csv());
    let datasets = fixture.load().unwrap();

    let selection = DateSelection::Daily {
        year: 2019,
        month: 2,
        day: 30,
        hour: None,
    };
    let subset = datasets
        .select(selection.level(), &selection.predicates())
        .unwrap();
    assert!(subset.is_empty());
}

#[test]
fn test_daily_filter_exact() {
    let fixture = Fixture::new("daily", &sample_csv());
    let datasets = fixture.load().unwrap();

    let subset = datasets
        .select(
            Level::Daily,
            &[Predicate::year(2019), Predicate::month(3), Predicate::day(1)],
        )
        .unwrap();
    assert_eq!(subset.index().collect::<Vec<_>>(), vec![53, 84]);
    assert!(subset
        .iter()
        .all(|r| r.year == 2019 && r.month == Some(3) && r.day == Some(1)));
}

#[test]
fn test_hourly_columns_aggregated() {
    let fixture = Fixture::new("hourly", &sample_csv());
    let datasets = fixture.load().unwrap();

    let yearly = datasets.yearly();
    assert_eq!(yearly.hour_count(), 24);
    let bretagne_2019: Vec<_> = yearly
        .iter()
        .filter(|r| r.code() == 53 && r.year == 2019)
        .collect();
    // Colonne "05:00" : valeur / 24 + 5 pour les deux jours de 2019
    assert_eq!(bretagne_2019[0].hourly[5], Some((0.5 + 5.0 + 0.75 + 5.0) / 2.0));
}

#[test]
fn test_day_predicate_on_yearly_view_fails() {
    let fixture = Fixture::new("selection", &sample_csv());
    let datasets = fixture.load().unwrap();

    let err = datasets
        .select(Level::Yearly, &[Predicate::year(2020), Predicate::day(1)])
        .unwrap_err();
    assert!(matches!(err, ConsoError::InvalidSelection { .. }));
}

#[test]
fn test_missing_column_is_fatal() {
    let fixture = Fixture::new("schema", "Date;Code Région;Région\n2020-01-01;11;Île-de-France\n");
    assert!(matches!(
        fixture.load(),
        Err(ConsoError::MissingColumn { .. })
    ));
}
