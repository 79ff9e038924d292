//! Types de données pour le crate conso-gaz

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use geo::Geometry;
use serde::{Deserialize, Serialize};

/// Nombre de colonnes horaires ("00:00" à "23:00")
pub const HOURS_PER_DAY: usize = 24;

/// Valeurs horaires d'une ligne, indexées par heure
pub type HourlyValues = [Option<f64>; HOURS_PER_DAY];

/// Présence des colonnes horaires dans une source, indexée par heure
pub type HourColumns = [bool; HOURS_PER_DAY];

/// Une région administrative avec son polygone (référentiel immuable)
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Code numérique de la région (clé unique)
    pub code: u32,

    /// Nom de la région (propriété `nom` du GeoJSON)
    pub name: String,

    /// Polygone (ou multipolygone) de la région
    pub geometry: Geometry,
}

/// Une ligne du fichier de consommation
#[derive(Debug, Clone, PartialEq)]
pub struct ConsumptionRecord {
    /// Code région (clé étrangère vers `Region`)
    pub code: u32,

    /// Date de la mesure (granularité journalière)
    pub date: NaiveDate,

    /// Nom de la région tel qu'écrit dans le CSV (colonne "Région")
    pub region: String,

    /// Opérateur du réseau (ex: "GRTgaz", "Teréga")
    pub operator: String,

    /// Secteur d'activité
    pub sector: Option<String>,

    /// Statut de la donnée (définitive, consolidée...)
    pub status: Option<String>,

    /// Consommation journalière (MWh - PCS 0°C)
    pub consumption: Option<f64>,

    /// Consommations horaires
    pub hourly: HourlyValues,
}

/// Contenu chargé du fichier de consommation
#[derive(Debug, Clone, PartialEq)]
pub struct ConsumptionData {
    /// Lignes lues, dans l'ordre du fichier
    pub records: Vec<ConsumptionRecord>,

    /// Colonnes horaires présentes dans l'en-tête
    pub hours: HourColumns,
}

/// Heure de la journée (0 à 23), utilisée pour choisir une colonne horaire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hour(u8);

impl Hour {
    /// Crée une heure si elle est comprise entre 0 et 23
    pub fn new(hour: u8) -> Option<Self> {
        (usize::from(hour) < HOURS_PER_DAY).then_some(Self(hour))
    }

    /// Toutes les heures de la journée, dans l'ordre
    pub fn all() -> impl Iterator<Item = Hour> {
        (0..HOURS_PER_DAY as u8).map(Hour)
    }

    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    /// Nom de la colonne horaire correspondante ("05:00")
    pub fn column_name(self) -> String {
        format!("{:02}:00", self.0)
    }
}

impl fmt::Display for Hour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

impl FromStr for Hour {
    type Err = String;

    /// Accepte "05", "5" ou "05:00"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_suffix(":00").unwrap_or(trimmed);
        digits
            .parse::<u8>()
            .ok()
            .and_then(Hour::new)
            .ok_or_else(|| format!("invalid hour '{}', expected 00-23", s))
    }
}

impl TryFrom<String> for Hour {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Hour> for String {
    fn from(hour: Hour) -> Self {
        hour.to_string()
    }
}
