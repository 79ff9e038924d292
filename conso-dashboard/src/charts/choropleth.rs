//! Carte choroplèthe des régions

use anyhow::Result;
use conso_gaz::{Hour, Table};
use tracing::debug;

use super::figure::{ChoroplethTrace, ColorBar, Figure, Layout, Mapbox, Title, Trace};
use super::geometry::feature_collection;
use super::value_column;
use crate::config::MapStyle;

/// Carte colorée par la colonne tracée, une région par ligne du sous-ensemble
///
/// Un sous-ensemble vide donne une carte sans aucune région.
pub fn choropleth(subset: &Table, hour: Option<Hour>, style: &MapStyle) -> Result<Figure> {
    let column = value_column(subset, hour)?;

    let mut locations = Vec::with_capacity(subset.len());
    let mut z = Vec::with_capacity(subset.len());
    let mut text = Vec::with_capacity(subset.len());
    for row in subset {
        locations.push(row.code().to_string());
        z.push(row.value(column));
        text.push(row.region.name.clone());
    }

    debug!(regions = locations.len(), column = %column.name(), "Choropleth built");

    Ok(Figure {
        data: vec![Trace::Choroplethmapbox(ChoroplethTrace {
            geojson: feature_collection(subset)?,
            locations,
            z,
            text,
            featureidkey: "id".to_string(),
            colorbar: ColorBar {
                title: Title::new(column.label()),
            },
        })],
        layout: Layout {
            mapbox: Some(Mapbox {
                style: style.style.clone(),
                center: style.center,
                zoom: style.zoom_for(hour),
            }),
            ..Default::default()
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use conso_gaz::table::NO_HOURS;
    use conso_gaz::Level;

    #[test]
    fn test_empty_subset() {
        let subset = Table::empty(Level::Monthly, NO_HOURS);
        let figure = choropleth(&subset, None, &MapStyle::default()).unwrap();

        assert!(figure.is_empty());
        let json: serde_json::Value = serde_json::from_str(&figure.to_json().unwrap()).unwrap();
        assert_eq!(json["data"][0]["type"], "choroplethmapbox");
        assert_eq!(json["data"][0]["geojson"]["features"].as_array().unwrap().len(), 0);
        assert_eq!(json["layout"]["mapbox"]["style"], "carto-positron");
        assert_eq!(json["layout"]["mapbox"]["zoom"], 4.0);
    }
}
