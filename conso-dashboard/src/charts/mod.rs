//! Construction des figures Plotly
//!
//! Les trois familles de graphiques prennent un sous-ensemble filtré et une
//! heure optionnelle. La colonne tracée est toujours choisie par
//! `ValueColumn::select` : l'heure si elle est fournie, sinon la consommation.

pub mod bar;
pub mod choropleth;
pub mod figure;
pub mod geometry;
pub mod pie;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use conso_gaz::{ConsoError, Hour, Table, ValueColumn};
use serde::{Deserialize, Serialize};

pub use bar::horizontal_bar;
pub use choropleth::choropleth;
pub use figure::{Figure, Trace};
pub use pie::pie;

/// Famille de graphique
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Map,
    Bar,
    Pie,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Map, ChartKind::Bar, ChartKind::Pie];

    /// Titre de panneau dans le tableau de bord
    pub fn heading(self) -> &'static str {
        match self {
            ChartKind::Map => "Carte des régions",
            ChartKind::Bar => "Consommation par région",
            ChartKind::Pie => "Répartition par région",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChartKind::Map => "map",
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
        };
        f.write_str(name)
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "map" | "carte" => Ok(ChartKind::Map),
            "bar" | "barres" => Ok(ChartKind::Bar),
            "pie" | "camembert" => Ok(ChartKind::Pie),
            _ => Err(format!("unknown chart '{}', expected map, bar or pie", s)),
        }
    }
}

/// Colonne tracée, qui doit exister dans le schéma du sous-ensemble
pub(crate) fn value_column(subset: &Table, hour: Option<Hour>) -> Result<ValueColumn> {
    let column = ValueColumn::select(hour);
    if !subset.has_column(column) {
        return Err(ConsoError::missing_column(
            format!("{} view", subset.level()),
            column.name(),
        )
        .into());
    }
    Ok(column)
}
