//! Options de préparation des données
//!
//! Les noms de colonnes par défaut sont ceux du jeu de données
//! « courbe de charge eldgrd régional GRTgaz/Teréga » (opendata.reseaux-energies.fr)
//! et du GeoJSON des régions de france-geojson.

use serde::{Deserialize, Serialize};

/// Nom de la colonne de consommation journalière, partagé par les trois vues
pub const CONSUMPTION_COLUMN: &str = "Consommation journalière (MWh - PCS 0°C)";

/// Opérateur retenu par défaut
pub const DEFAULT_OPERATOR: &str = "GRTgaz";

/// Options du pipeline de préparation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Seul opérateur conservé après la jointure
    pub operator: String,

    /// Séparateur du CSV de consommation
    pub delimiter: char,

    /// Noms des colonnes du CSV
    pub columns: ColumnNames,

    /// Noms des propriétés du GeoJSON
    pub region_fields: RegionFields,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            operator: DEFAULT_OPERATOR.to_string(),
            delimiter: ';',
            columns: ColumnNames::default(),
            region_fields: RegionFields::default(),
        }
    }
}

/// Mapping des colonnes du CSV de consommation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ColumnNames {
    pub code: String,
    pub date: String,
    pub region: String,
    pub operator: String,
    pub sector: String,
    pub status: String,
    pub consumption: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            code: "Code Région".to_string(),
            date: "Date".to_string(),
            region: "Région".to_string(),
            operator: "Opérateur".to_string(),
            sector: "Secteur d'activité".to_string(),
            status: "Statut".to_string(),
            consumption: CONSUMPTION_COLUMN.to_string(),
        }
    }
}

/// Mapping des propriétés des features GeoJSON
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RegionFields {
    pub code: String,
    pub name: String,
}

impl Default for RegionFields {
    fn default() -> Self {
        Self {
            code: "code".to_string(),
            name: "nom".to_string(),
        }
    }
}
