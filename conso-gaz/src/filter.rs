//! Filtrage des vues par égalité sur l'année, le mois et le jour

use serde::{Deserialize, Serialize};

use crate::table::{DateField, Table};
use crate::ConsoError;

/// Contrainte d'égalité sur un champ de date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    pub field: DateField,
    pub value: i64,
}

impl Predicate {
    pub fn year(value: i32) -> Self {
        Self {
            field: DateField::Year,
            value: i64::from(value),
        }
    }

    pub fn month(value: u32) -> Self {
        Self {
            field: DateField::Month,
            value: i64::from(value),
        }
    }

    pub fn day(value: u32) -> Self {
        Self {
            field: DateField::Day,
            value: i64::from(value),
        }
    }
}

/// Retourne les lignes satisfaisant toutes les contraintes (ET logique)
///
/// L'ordre des lignes est conservé ; le résultat peut être vide (par exemple
/// un 30 février). Un prédicat sur un champ absent de la vue est une erreur
/// d'appel et n'est jamais ignoré.
pub fn filter_rows(view: &Table, predicates: &[Predicate]) -> Result<Table, ConsoError> {
    if let Some(invalid) = predicates
        .iter()
        .find(|p| !view.level().supports(p.field))
    {
        return Err(ConsoError::InvalidSelection {
            field: invalid.field,
            level: view.level(),
        });
    }

    let rows = view
        .iter()
        .filter(|row| {
            predicates
                .iter()
                .all(|p| row.field(p.field) == Some(p.value))
        })
        .cloned()
        .collect();

    Ok(Table::new(view.level(), *view.hours(), rows))
}
