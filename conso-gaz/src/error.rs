//! Types d'erreurs pour le crate conso-gaz

use thiserror::Error;

use crate::table::{DateField, Level};

/// Erreurs pouvant survenir lors du chargement et de la préparation des données
#[derive(Debug, Error)]
pub enum ConsoError {
    /// Erreur d'I/O lors de la lecture d'un fichier source
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Erreur de lecture du CSV de consommation
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Erreur de lecture du GeoJSON des régions
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// Colonne obligatoire absente d'une source tabulaire
    #[error("Missing required column '{column}' in {file}")]
    MissingColumn { file: String, column: String },

    /// Champ obligatoire absent d'une feature GeoJSON
    #[error("Missing required field '{field}' in feature #{feature}")]
    MissingField { feature: usize, field: String },

    /// Valeur illisible dans une colonne clé
    #[error("Invalid value '{value}' for column '{column}' in {file} (line {line})")]
    InvalidValue {
        file: String,
        line: u64,
        column: String,
        value: String,
    },

    /// Code région présent plusieurs fois dans le fichier des polygones
    #[error("Duplicate region code {0} in region file")]
    DuplicateRegion(u32),

    /// Prédicat sur un champ absent de la vue ciblée
    #[error("Invalid selection: field '{field}' is not available on the {level} view")]
    InvalidSelection { field: DateField, level: Level },

    /// Valeur de sélecteur hors bornes
    #[error("Selector value {value} out of range for field '{field}'")]
    OutOfRange { field: DateField, value: i64 },

    /// Opération appliquée à une vue du mauvais niveau
    #[error("Expected a {expected} view, got a {found} view")]
    InvalidLevel { expected: Level, found: Level },

    /// Identité de région variable à l'intérieur d'un groupe d'agrégation
    #[error("Inconsistent region {code}: {reason}")]
    InconsistentRegion { code: u32, reason: String },
}

impl ConsoError {
    /// Crée une erreur de colonne manquante
    pub fn missing_column(file: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            file: file.into(),
            column: column.into(),
        }
    }

    /// Crée une erreur de valeur illisible avec contexte
    pub fn invalid_value(
        file: impl Into<String>,
        line: u64,
        column: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            file: file.into(),
            line,
            column: column.into(),
            value: value.into(),
        }
    }

    /// Crée une erreur d'incohérence de région
    pub fn inconsistent_region(code: u32, reason: impl Into<String>) -> Self {
        Self::InconsistentRegion {
            code,
            reason: reason.into(),
        }
    }
}
