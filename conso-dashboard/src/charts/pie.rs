//! Répartition de la consommation entre régions

use anyhow::Result;
use conso_gaz::{Hour, Table, ValueColumn};

use super::figure::{Figure, Layout, PieTrace, Title, Trace};
use super::value_column;

/// Une part par ligne du sous-ensemble, libellée par le nom de région
pub fn pie(subset: &Table, hour: Option<Hour>, title: &str) -> Result<Figure> {
    let column = value_column(subset, hour)?;

    let title = match column {
        ValueColumn::Consumption => {
            format!("Répartition de la consommation selon les Régions {}", title)
        }
        ValueColumn::Hour(_) => {
            format!("Répartition de la consommation selon la Région {}", title)
        }
    };

    Ok(Figure {
        data: vec![Trace::Pie(PieTrace {
            values: subset.iter().map(|row| row.value(column)).collect(),
            labels: subset.iter().map(|row| row.parent.clone()).collect(),
            name: column.name(),
        })],
        layout: Layout {
            title: Some(Title::new(title)),
            ..Default::default()
        },
    })
}
