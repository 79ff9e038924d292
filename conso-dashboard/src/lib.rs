//! # conso-dashboard
//!
//! Tableau de bord de la consommation quotidienne de gaz par région.
//!
//! ## Features
//!
//! - Carte choroplèthe, barres horizontales et camembert (figures Plotly)
//! - Sélection par jour (et heure), mois ou année
//! - Page HTML autonome avec une sélection par famille de graphiques
//! - Rapport de chargement (console et JSON)
//!
//! ## Usage CLI
//!
//! ```bash
//! # Rapport de préparation
//! conso-dashboard summary --csv conso.csv --geojson regions.geojson
//!
//! # Carte du 16 août 2018 à 5h
//! conso-dashboard map --year 2018 --month 8 --day 16 --hour 05 -o carte.json
//!
//! # Moyenne mensuelle en barres
//! conso-dashboard bar --level mensuel --year 2020 --month 1
//!
//! # Tableau de bord complet
//! conso-dashboard dashboard --panels panels.json -o dashboard.html
//! ```

pub mod charts;
pub mod cli;
pub mod config;
pub mod export;
pub mod report;
pub mod session;

pub use charts::{ChartKind, Figure};
pub use config::{Config, DataSources};
pub use report::{LoadReport, LoadStatus};
pub use session::Session;
