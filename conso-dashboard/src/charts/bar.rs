//! Barres horizontales par région

use anyhow::Result;
use conso_gaz::{Hour, Table, ValueColumn};

use super::figure::{Axis, BarTrace, Figure, Layout, Title, Trace};
use super::value_column;

/// Barres triées par valeur croissante (valeur manquante = 0 pour le tri)
pub fn horizontal_bar(subset: &Table, hour: Option<Hour>, title: &str) -> Result<Figure> {
    let column = value_column(subset, hour)?;

    let mut bars: Vec<(&str, Option<f64>)> = subset
        .iter()
        .map(|row| (row.parent.as_str(), row.value(column)))
        .collect();
    bars.sort_by(|a, b| a.1.unwrap_or(0.0).total_cmp(&b.1.unwrap_or(0.0)));

    let title = match column {
        ValueColumn::Consumption => format!(
            "Consommation journalière de gaz (MWh) pour chaque région -- {}",
            title
        ),
        ValueColumn::Hour(_) => {
            format!("Consommation de gaz (MWh) pour chaque région -- {}", title)
        }
    };

    Ok(Figure {
        data: vec![Trace::Bar(BarTrace {
            x: bars.iter().map(|(_, value)| *value).collect(),
            y: bars.iter().map(|(name, _)| name.to_string()).collect(),
            orientation: "h".to_string(),
            name: column.name(),
        })],
        layout: Layout {
            title: Some(Title::new(title)),
            xaxis: Some(Axis {
                title: Some(Title::new(column.label())),
                categoryorder: None,
            }),
            yaxis: Some(Axis {
                title: Some(Title::new("Région")),
                categoryorder: Some("total ascending".to_string()),
            }),
            ..Default::default()
        },
    })
}
