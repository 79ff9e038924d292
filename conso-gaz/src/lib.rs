//! # conso-gaz
//!
//! Préparation des données de consommation quotidienne de gaz par région
//! (France métropolitaine, réseau GRTgaz).
//!
//! ## Features
//!
//! - Lecture du CSV de consommation (`csv`) et du GeoJSON des régions (`geojson`)
//! - Jointure par code région avec comptage des lignes écartées
//! - Vues journalière, moyenne mensuelle et moyenne annuelle sur un même type `Table`
//! - Filtrage par égalité sur l'année, le mois et le jour
//! - Empreinte blake3 des vues
//!
//! ## Usage
//!
//! ```rust,ignore
//! use conso_gaz::{load, DateSelection, PipelineOptions};
//! use std::path::Path;
//!
//! let datasets = load(
//!     Path::new("courbe-de-charge-eldgrd-regional-grtgaz-terega.csv"),
//!     Path::new("regions.geojson"),
//!     &PipelineOptions::default(),
//! )?;
//!
//! let selection = DateSelection::Monthly { year: 2020, month: 1 };
//! let subset = datasets.select(selection.level(), &selection.predicates())?;
//! println!("{} régions", subset.len());
//! ```

pub mod aggregate;
pub mod datasets;
pub mod error;
pub mod filter;
pub mod fingerprint;
pub mod loader;
pub mod options;
pub mod preprocess;
pub mod selection;
pub mod table;
pub mod types;

pub use aggregate::{aggregate_monthly, aggregate_yearly};
pub use datasets::Datasets;
pub use error::ConsoError;
pub use filter::{filter_rows, Predicate};
pub use fingerprint::{table_fingerprint, table_fingerprint_hex};
pub use options::{PipelineOptions, CONSUMPTION_COLUMN};
pub use preprocess::{preprocess, JoinStats, Joined};
pub use selection::DateSelection;
pub use table::{DateField, Level, Row, Table, ValueColumn};
pub use types::{ConsumptionData, ConsumptionRecord, Hour, Region};

use std::path::Path;

/// Charge les deux fichiers et construit les trois vues.
///
/// # Arguments
///
/// * `consumption_path` - CSV de consommation (séparateur `;` par défaut)
/// * `regions_path` - GeoJSON des régions
/// * `options` - noms de colonnes, séparateur et opérateur retenu
///
/// # Errors
///
/// Retourne `ConsoError` si un fichier est illisible ou si une colonne ou un
/// champ obligatoire manque. Les lignes sans région correspondante ne sont pas
/// une erreur : elles sont comptées dans `Datasets::stats`.
pub fn load(
    consumption_path: &Path,
    regions_path: &Path,
    options: &PipelineOptions,
) -> Result<Datasets, ConsoError> {
    let regions = loader::regions::load(regions_path, &options.region_fields)?;
    let data = loader::consumption::load(consumption_path, options)?;
    Datasets::build(&data, &regions, &options.operator)
}
