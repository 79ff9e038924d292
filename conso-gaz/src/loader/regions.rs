//! Lecture du GeoJSON des régions (une feature polygonale par région)

use std::collections::HashSet;
use std::path::Path;

use geo::Geometry;
use geojson::{Feature, GeoJson};
use serde_json::Value;
use tracing::debug;

use crate::options::RegionFields;
use crate::types::Region;
use crate::ConsoError;

/// Charge le fichier GeoJSON des régions
pub fn load(path: &Path, fields: &RegionFields) -> Result<Vec<Region>, ConsoError> {
    let content = std::fs::read_to_string(path)?;
    parse(&content, fields)
}

/// Parse un GeoJSON (FeatureCollection ou Feature unique)
pub fn parse(content: &str, fields: &RegionFields) -> Result<Vec<Region>, ConsoError> {
    let geojson: GeoJson = content.parse()?;

    let features = match geojson {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(_) => {
            return Err(ConsoError::MissingField {
                feature: 0,
                field: "features".to_string(),
            })
        }
    };

    let mut seen = HashSet::new();
    let mut regions = Vec::with_capacity(features.len());

    for (idx, feature) in features.into_iter().enumerate() {
        let region = parse_feature(idx, feature, fields)?;
        if !seen.insert(region.code) {
            return Err(ConsoError::DuplicateRegion(region.code));
        }
        regions.push(region);
    }

    debug!(regions = regions.len(), "Region file parsed");

    Ok(regions)
}

fn parse_feature(
    idx: usize,
    feature: Feature,
    fields: &RegionFields,
) -> Result<Region, ConsoError> {
    let missing = |field: &str| ConsoError::MissingField {
        feature: idx,
        field: field.to_string(),
    };

    let code = feature
        .property(&fields.code)
        .and_then(json_code)
        .ok_or_else(|| missing(&fields.code))?;

    let name = feature
        .property(&fields.name)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .ok_or_else(|| missing(&fields.name))?;

    let geometry = feature.geometry.ok_or_else(|| missing("geometry"))?;
    let geometry = Geometry::<f64>::try_from(geometry)?;

    Ok(Region {
        code,
        name,
        geometry,
    })
}

/// Le code peut être une chaîne ("11") ou un nombre (11, 11.0)
fn json_code(value: &Value) -> Option<u32> {
    match value {
        Value::String(s) => super::parse_code(s),
        Value::Number(n) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .or_else(|| n.as_f64().and_then(|f| super::parse_code(&f.to_string()))),
        _ => None,
    }
}
