//! Empreinte blake3 d'une vue
//!
//! Deux préparations des mêmes fichiers doivent produire des vues identiques
//! au bit près ; l'empreinte permet de le vérifier et de le journaliser.

use blake3::Hasher;
use geo::{Coord, Geometry, LineString, Polygon};

use crate::table::{Row, Table};

/// Calcule l'empreinte d'une table (niveau, schéma, lignes dans l'ordre)
pub fn table_fingerprint(table: &Table) -> [u8; 32] {
    let mut hasher = Hasher::new();

    hasher.update(table.level().label().as_bytes());
    for present in table.hours() {
        hasher.update(&[u8::from(*present)]);
    }
    hasher.update(&(table.len() as u64).to_le_bytes());

    for row in table {
        hash_row(&mut hasher, row);
    }

    *hasher.finalize().as_bytes()
}

/// Empreinte en hexadécimal
pub fn table_fingerprint_hex(table: &Table) -> String {
    hex::encode(table_fingerprint(table))
}

fn hash_row(hasher: &mut Hasher, row: &Row) {
    hasher.update(b"ROW");
    hasher.update(&row.code().to_le_bytes());
    hash_str(hasher, &row.region.name);
    hash_str(hasher, &row.parent);
    hasher.update(&row.year.to_le_bytes());
    hash_opt_u32(hasher, row.month);
    hash_opt_u32(hasher, row.day);
    match &row.operator {
        Some(op) => hash_str(hasher, op),
        None => {
            hasher.update(b"-");
        }
    }
    hash_value(hasher, row.consumption);
    for value in row.hourly {
        hash_value(hasher, value);
    }
    hash_geometry(hasher, &row.region.geometry);
}

fn hash_str(hasher: &mut Hasher, s: &str) {
    hasher.update(&(s.len() as u64).to_le_bytes());
    hasher.update(s.as_bytes());
}

fn hash_opt_u32(hasher: &mut Hasher, value: Option<u32>) {
    match value {
        Some(v) => {
            hasher.update(&[1]);
            hasher.update(&v.to_le_bytes());
        }
        None => {
            hasher.update(&[0]);
        }
    }
}

fn hash_value(hasher: &mut Hasher, value: Option<f64>) {
    match value {
        Some(v) => {
            hasher.update(&[1]);
            hasher.update(&v.to_bits().to_le_bytes());
        }
        None => {
            hasher.update(&[0]);
        }
    }
}

fn hash_geometry(hasher: &mut Hasher, geom: &Geometry) {
    match geom {
        Geometry::Point(p) => {
            hasher.update(b"POINT");
            hash_coord(hasher, p.0);
        }
        Geometry::Polygon(p) => {
            hasher.update(b"POLYGON");
            hash_polygon(hasher, p);
        }
        Geometry::MultiPolygon(mp) => {
            hasher.update(b"MULTIPOLYGON");
            for poly in mp.0.iter() {
                hasher.update(b"POLY");
                hash_polygon(hasher, poly);
            }
        }
        Geometry::LineString(ls) => {
            hasher.update(b"LINESTRING");
            hash_ring(hasher, ls);
        }
        _ => {
            hasher.update(format!("{:?}", geom).as_bytes());
        }
    }
}

fn hash_polygon(hasher: &mut Hasher, polygon: &Polygon) {
    hasher.update(b"EXT");
    hash_ring(hasher, polygon.exterior());
    for interior in polygon.interiors() {
        hasher.update(b"INT");
        hash_ring(hasher, interior);
    }
}

fn hash_ring(hasher: &mut Hasher, ring: &LineString) {
    for coord in ring.0.iter() {
        hash_coord(hasher, *coord);
    }
}

fn hash_coord(hasher: &mut Hasher, coord: Coord) {
    hasher.update(&coord.x.to_bits().to_le_bytes());
    hasher.update(&coord.y.to_bits().to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Level, NO_HOURS};
    use crate::types::{Region, HOURS_PER_DAY};
    use geo::polygon;
    use std::sync::Arc;

    fn table(value: f64) -> Table {
        let region = Arc::new(Region {
            code: 11,
            name: "Île-de-France".to_string(),
            geometry: Geometry::Polygon(polygon![
                (x: 2.0, y: 48.0),
                (x: 3.0, y: 48.0),
                (x: 3.0, y: 49.0),
            ]),
        });
        Table::new(
            Level::Yearly,
            NO_HOURS,
            vec![Row {
                region,
                parent: "Île-de-France".to_string(),
                year: 2020,
                month: None,
                day: None,
                operator: None,
                consumption: Some(value),
                hourly: [None; HOURS_PER_DAY],
            }],
        )
    }

    #[test]
    fn test_fingerprint_stable() {
        assert_eq!(table_fingerprint(&table(1.5)), table_fingerprint(&table(1.5)));
    }

    #[test]
    fn test_fingerprint_detects_value_change() {
        assert_ne!(table_fingerprint(&table(1.5)), table_fingerprint(&table(1.6)));
    }

    #[test]
    fn test_fingerprint_hex() {
        let hex = table_fingerprint_hex(&table(1.0));
        assert_eq!(hex.len(), 64);
    }
}
