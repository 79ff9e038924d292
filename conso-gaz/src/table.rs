//! Table commune aux trois vues (journalière, mensuelle, annuelle)
//!
//! Les trois niveaux d'agrégation partagent le même type `Table` : même colonne
//! de valeur, même index par code région, même géométrie. Les lignes d'une
//! région partagent un `Arc<Region>`, la géométrie est donc identique sur
//! toutes les lignes d'une même région.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::options::CONSUMPTION_COLUMN;
use crate::types::{Hour, HourColumns, HourlyValues, Region, HOURS_PER_DAY};

/// Niveau d'agrégation d'une vue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    /// Données journalières non agrégées ("Tout")
    #[serde(rename = "Tout", alias = "tout", alias = "daily")]
    Daily,
    /// Moyenne mensuelle ("Mensuel")
    #[serde(rename = "Mensuel", alias = "mensuel", alias = "monthly")]
    Monthly,
    /// Moyenne annuelle ("Annuel")
    #[serde(rename = "Annuel", alias = "annuel", alias = "yearly")]
    Yearly,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Daily, Level::Monthly, Level::Yearly];

    /// Libellé affiché dans les sélecteurs
    pub fn label(self) -> &'static str {
        match self {
            Level::Daily => "Tout",
            Level::Monthly => "Mensuel",
            Level::Yearly => "Annuel",
        }
    }

    /// Champs de date présents dans le schéma de la vue
    pub fn fields(self) -> &'static [DateField] {
        match self {
            Level::Daily => &[DateField::Year, DateField::Month, DateField::Day],
            Level::Monthly => &[DateField::Year, DateField::Month],
            Level::Yearly => &[DateField::Year],
        }
    }

    pub fn supports(self, field: DateField) -> bool {
        self.fields().contains(&field)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tout" | "daily" | "jour" => Ok(Level::Daily),
            "mensuel" | "monthly" | "mois" => Ok(Level::Monthly),
            "annuel" | "yearly" | "annee" | "année" => Ok(Level::Yearly),
            _ => Err(format!(
                "unknown level '{}', expected tout, mensuel or annuel",
                s
            )),
        }
    }
}

/// Champ de date filtrable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateField {
    Year,
    Month,
    Day,
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DateField::Year => "year",
            DateField::Month => "month",
            DateField::Day => "day",
        };
        f.write_str(name)
    }
}

/// Colonne de valeur tracée par les graphiques
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueColumn {
    /// Consommation journalière (ou moyenne pour les vues agrégées)
    Consumption,
    /// Consommation d'une heure donnée ("05:00")
    Hour(Hour),
}

impl ValueColumn {
    /// Choix de la colonne : l'heure si elle est fournie, sinon la consommation journalière
    pub fn select(hour: Option<Hour>) -> Self {
        match hour {
            Some(hour) => ValueColumn::Hour(hour),
            None => ValueColumn::Consumption,
        }
    }

    /// Nom logique de la colonne
    pub fn name(&self) -> String {
        match self {
            ValueColumn::Consumption => CONSUMPTION_COLUMN.to_string(),
            ValueColumn::Hour(hour) => hour.column_name(),
        }
    }

    /// Libellé court pour les axes et légendes
    pub fn label(&self) -> &'static str {
        match self {
            ValueColumn::Consumption => "Consommation journalière (MWh)",
            ValueColumn::Hour(_) => "Consommation (MWh)",
        }
    }

    pub fn hour(&self) -> Option<Hour> {
        match self {
            ValueColumn::Consumption => None,
            ValueColumn::Hour(hour) => Some(*hour),
        }
    }
}

/// Une ligne d'une vue : une région à une date (ou une période agrégée)
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Région jointe (code, nom, géométrie)
    pub region: Arc<Region>,

    /// Nom de la région issu du CSV (colonne "Région")
    pub parent: String,

    pub year: i32,

    /// Absent de la vue annuelle
    pub month: Option<u32>,

    /// Absent des vues agrégées
    pub day: Option<u32>,

    /// Opérateur, conservé uniquement dans la vue journalière
    pub operator: Option<String>,

    /// Consommation journalière ou moyenne
    pub consumption: Option<f64>,

    /// Consommations horaires ou moyennes horaires
    pub hourly: HourlyValues,
}

impl Row {
    /// Code région (index de la table)
    pub fn code(&self) -> u32 {
        self.region.code
    }

    /// Valeur d'un champ de date
    pub fn field(&self, field: DateField) -> Option<i64> {
        match field {
            DateField::Year => Some(i64::from(self.year)),
            DateField::Month => self.month.map(i64::from),
            DateField::Day => self.day.map(i64::from),
        }
    }

    /// Valeur de la colonne tracée
    pub fn value(&self, column: ValueColumn) -> Option<f64> {
        match column {
            ValueColumn::Consumption => self.consumption,
            ValueColumn::Hour(hour) => self.hourly[hour.index()],
        }
    }
}

/// Vue tabulaire indexée par code région
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    level: Level,
    hours: HourColumns,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(level: Level, hours: HourColumns, rows: Vec<Row>) -> Self {
        Self { level, hours, rows }
    }

    /// Table vide conservant le schéma
    pub fn empty(level: Level, hours: HourColumns) -> Self {
        Self::new(level, hours, Vec::new())
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Colonnes horaires disponibles
    pub fn hours(&self) -> &HourColumns {
        &self.hours
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Index (non unique) des lignes par code région
    pub fn index(&self) -> impl Iterator<Item = u32> + '_ {
        self.rows.iter().map(Row::code)
    }

    /// Vrai si la colonne fait partie du schéma de la vue
    pub fn has_column(&self, column: ValueColumn) -> bool {
        match column {
            ValueColumn::Consumption => true,
            ValueColumn::Hour(hour) => self.hours[hour.index()],
        }
    }

    /// Régions distinctes, dans l'ordre de première apparition
    pub fn regions(&self) -> Vec<Arc<Region>> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .filter(|row| seen.insert(row.code()))
            .map(|row| Arc::clone(&row.region))
            .collect()
    }

    /// Lignes d'une région
    pub fn rows_for_region(&self, code: u32) -> impl Iterator<Item = &Row> + '_ {
        self.rows.iter().filter(move |row| row.code() == code)
    }

    /// Nombre de colonnes horaires disponibles
    pub fn hour_count(&self) -> usize {
        self.hours.iter().filter(|&&present| present).count()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Aucune colonne horaire
pub const NO_HOURS: HourColumns = [false; HOURS_PER_DAY];
