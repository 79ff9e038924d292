//! GeoJSON des régions pour la carte (géométries écrites avec geozero)

use anyhow::{Context, Result};
use conso_gaz::{Region, Table};
use geozero::geojson::GeoJsonWriter;
use geozero::GeozeroGeometry;
use serde_json::{json, Value};

/// FeatureCollection des régions distinctes d'une vue, `id` = code région
pub fn feature_collection(table: &Table) -> Result<Value> {
    let features = table
        .regions()
        .iter()
        .map(|region| region_feature(region))
        .collect::<Result<Vec<_>>>()?;

    Ok(json!({
        "type": "FeatureCollection",
        "features": features,
    }))
}

fn region_feature(region: &Region) -> Result<Value> {
    Ok(json!({
        "type": "Feature",
        "id": region.code.to_string(),
        "properties": {
            "code": region.code,
            "nom": region.name,
        },
        "geometry": geometry_to_json(&region.geometry)
            .context(format!("Failed to write geometry of region {}", region.code))?,
    }))
}

/// Géométrie `geo` vers valeur GeoJSON
pub fn geometry_to_json(geometry: &geo::Geometry<f64>) -> Result<Value> {
    let mut buf = Vec::new();
    {
        let mut writer = GeoJsonWriter::new(&mut buf);
        geometry.process_geom(&mut writer)?;
    }
    serde_json::from_slice(&buf).context("geozero produced invalid GeoJSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, Geometry};

    #[test]
    fn test_polygon_to_json() {
        let geometry = Geometry::Polygon(polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
        ]);

        let value = geometry_to_json(&geometry).unwrap();
        assert_eq!(value["type"], "Polygon");
        assert_eq!(value["coordinates"][0][1][0], 1.0);
    }
}
