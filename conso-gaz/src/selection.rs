//! Sélection de date commune aux trois familles de graphiques
//!
//! Un seul type remplace les blocs de sélecteurs (année, mois, jour, heure)
//! répétés pour la carte, les barres et le camembert. Chaque famille garde sa
//! propre sélection et en tire son jeu de prédicats.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::filter::Predicate;
use crate::table::{DateField, Level, ValueColumn};
use crate::types::Hour;
use crate::ConsoError;

/// Sélection de l'utilisateur pour une vue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "level", deny_unknown_fields)]
pub enum DateSelection {
    /// Un jour précis, éventuellement une heure précise
    #[serde(rename = "Tout", alias = "tout", alias = "daily")]
    Daily {
        year: i32,
        month: u32,
        day: u32,
        #[serde(default)]
        hour: Option<Hour>,
    },
    /// Moyenne d'un mois
    #[serde(rename = "Mensuel", alias = "mensuel", alias = "monthly")]
    Monthly { year: i32, month: u32 },
    /// Moyenne d'une année
    #[serde(rename = "Annuel", alias = "annuel", alias = "yearly")]
    Yearly { year: i32 },
}

impl Default for DateSelection {
    fn default() -> Self {
        DateSelection::Daily {
            year: 2018,
            month: 8,
            day: 16,
            hour: None,
        }
    }
}

impl DateSelection {
    /// Vue ciblée
    pub fn level(&self) -> Level {
        match self {
            DateSelection::Daily { .. } => Level::Daily,
            DateSelection::Monthly { .. } => Level::Monthly,
            DateSelection::Yearly { .. } => Level::Yearly,
        }
    }

    /// Prédicats applicables à la vue ciblée
    pub fn predicates(&self) -> Vec<Predicate> {
        match *self {
            DateSelection::Daily {
                year, month, day, ..
            } => vec![
                Predicate::year(year),
                Predicate::month(month),
                Predicate::day(day),
            ],
            DateSelection::Monthly { year, month } => {
                vec![Predicate::year(year), Predicate::month(month)]
            }
            DateSelection::Yearly { year } => vec![Predicate::year(year)],
        }
    }

    /// Heure choisie (uniquement en mode "Tout")
    pub fn hour(&self) -> Option<Hour> {
        match self {
            DateSelection::Daily { hour, .. } => *hour,
            _ => None,
        }
    }

    pub fn value_column(&self) -> ValueColumn {
        ValueColumn::select(self.hour())
    }

    /// Fragment de titre ("2018/8/16  05", "2018/8", "2018")
    pub fn title_fragment(&self) -> String {
        match self {
            DateSelection::Daily {
                year,
                month,
                day,
                hour,
            } => match hour {
                Some(hour) => format!("{}/{}/{}  {}", year, month, day, hour),
                None => format!("{}/{}/{}", year, month, day),
            },
            DateSelection::Monthly { year, month } => format!("{}/{}", year, month),
            DateSelection::Yearly { year } => year.to_string(),
        }
    }

    /// Vérifie les bornes des sélecteurs (année configurée, mois 1-12, jour 1-31)
    ///
    /// Le calendrier n'est pas vérifié : un 31 avril donne simplement une vue vide.
    pub fn check_bounds(&self, years: &RangeInclusive<i32>) -> Result<(), ConsoError> {
        let (year, month, day) = match *self {
            DateSelection::Daily {
                year, month, day, ..
            } => (year, Some(month), Some(day)),
            DateSelection::Monthly { year, month } => (year, Some(month), None),
            DateSelection::Yearly { year } => (year, None, None),
        };

        if !years.contains(&year) {
            return Err(ConsoError::OutOfRange {
                field: DateField::Year,
                value: i64::from(year),
            });
        }
        if let Some(month) = month.filter(|m| !(1..=12).contains(m)) {
            return Err(ConsoError::OutOfRange {
                field: DateField::Month,
                value: i64::from(month),
            });
        }
        if let Some(day) = day.filter(|d| !(1..=31).contains(d)) {
            return Err(ConsoError::OutOfRange {
                field: DateField::Day,
                value: i64::from(day),
            });
        }
        Ok(())
    }
}
