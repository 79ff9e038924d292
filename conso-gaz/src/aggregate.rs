//! Vues agrégées : moyenne mensuelle et moyenne annuelle par région

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::table::{Level, Row, Table};
use crate::types::{Region, HOURS_PER_DAY};
use crate::ConsoError;

/// Moyenne par (année, mois, région)
pub fn aggregate_monthly(joined: &Table) -> Result<Table, ConsoError> {
    aggregate(joined, Level::Monthly)
}

/// Moyenne par (année, région)
pub fn aggregate_yearly(joined: &Table) -> Result<Table, ConsoError> {
    aggregate(joined, Level::Yearly)
}

/// Clé de regroupement : année, mois (vue mensuelle uniquement), code région
type GroupKey = (i32, Option<u32>, u32);

fn aggregate(joined: &Table, level: Level) -> Result<Table, ConsoError> {
    if joined.level() != Level::Daily {
        return Err(ConsoError::InvalidLevel {
            expected: Level::Daily,
            found: joined.level(),
        });
    }

    let keep_month = level == Level::Monthly;
    let mut groups: BTreeMap<GroupKey, Group> = BTreeMap::new();

    for row in joined {
        let key = (row.year, row.month.filter(|_| keep_month), row.code());
        match groups.entry(key) {
            Entry::Vacant(entry) => {
                entry.insert(Group::new(row));
            }
            Entry::Occupied(mut entry) => entry.get_mut().push(row)?,
        }
    }

    let rows: Vec<Row> = groups
        .into_iter()
        .map(|((year, month, _), group)| group.finish(year, month))
        .collect();

    debug!(level = %level, rows = rows.len(), "Aggregated view built");

    Ok(Table::new(level, *joined.hours(), rows))
}

/// Moyenne arithmétique ignorant les valeurs manquantes
#[derive(Debug, Clone, Copy, Default)]
struct Mean {
    sum: f64,
    count: u32,
}

impl Mean {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    fn value(self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / f64::from(self.count))
    }
}

/// Accumulateur d'un groupe
struct Group {
    region: Arc<Region>,
    parent: String,
    consumption: Mean,
    hourly: [Mean; HOURS_PER_DAY],
}

impl Group {
    fn new(row: &Row) -> Self {
        let mut group = Self {
            region: Arc::clone(&row.region),
            parent: row.parent.clone(),
            consumption: Mean::default(),
            hourly: [Mean::default(); HOURS_PER_DAY],
        };
        group.accumulate(row);
        group
    }

    /// L'identité de la région doit être constante dans le groupe
    fn push(&mut self, row: &Row) -> Result<(), ConsoError> {
        if !Arc::ptr_eq(&self.region, &row.region) && *self.region != *row.region {
            return Err(ConsoError::inconsistent_region(
                row.code(),
                "name or geometry varies between days",
            ));
        }
        if self.parent != row.parent {
            return Err(ConsoError::inconsistent_region(
                row.code(),
                format!("region label '{}' vs '{}'", self.parent, row.parent),
            ));
        }
        self.accumulate(row);
        Ok(())
    }

    fn accumulate(&mut self, row: &Row) {
        self.consumption.push(row.consumption);
        for (mean, value) in self.hourly.iter_mut().zip(row.hourly) {
            mean.push(value);
        }
    }

    fn finish(self, year: i32, month: Option<u32>) -> Row {
        Row {
            region: self.region,
            parent: self.parent,
            year,
            month,
            day: None,
            operator: None,
            consumption: self.consumption.value(),
            hourly: self.hourly.map(Mean::value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::NO_HOURS;
    use geo::{Geometry, Point};

    fn region(code: u32) -> Arc<Region> {
        Arc::new(Region {
            code,
            name: format!("Région {}", code),
            geometry: Geometry::Point(Point::new(f64::from(code), 46.0)),
        })
    }

    fn day(region: &Arc<Region>, (y, m, d): (i32, u32, u32), value: Option<f64>) -> Row {
        let mut hourly = [None; HOURS_PER_DAY];
        hourly[5] = value.map(|v| v * 2.0);
        Row {
            region: Arc::clone(region),
            parent: region.name.clone(),
            year: y,
            month: Some(m),
            day: Some(d),
            operator: Some("GRTgaz".to_string()),
            consumption: value,
            hourly,
        }
    }

    fn daily(rows: Vec<Row>) -> Table {
        let mut hours = NO_HOURS;
        hours[5] = true;
        Table::new(Level::Daily, hours, rows)
    }

    #[test]
    fn test_monthly_mean() {
        let idf = region(11);
        let rows = (1..=31)
            .map(|d| day(&idf, (2020, 1, d), Some(f64::from(99 + d))))
            .collect();
        let monthly = aggregate_monthly(&daily(rows)).unwrap();

        assert_eq!(monthly.level(), Level::Monthly);
        assert_eq!(monthly.len(), 1);
        let row = &monthly.rows()[0];
        assert_eq!((row.year, row.month, row.day), (2020, Some(1), None));
        assert_eq!(row.consumption, Some(115.0));
        assert_eq!(row.hourly[5], Some(230.0));
        assert_eq!(row.operator, None);
    }

    #[test]
    fn test_yearly_groups_by_year_and_region() {
        let idf = region(11);
        let bretagne = region(53);
        let rows = vec![
            day(&idf, (2019, 12, 31), Some(10.0)),
            day(&bretagne, (2020, 1, 1), Some(4.0)),
            day(&idf, (2020, 1, 1), Some(20.0)),
            day(&idf, (2020, 6, 1), Some(40.0)),
            day(&bretagne, (2020, 6, 1), Some(8.0)),
        ];
        let yearly = aggregate_yearly(&daily(rows)).unwrap();

        let summary: Vec<(i32, Option<u32>, u32, Option<f64>)> = yearly
            .iter()
            .map(|r| (r.year, r.month, r.code(), r.consumption))
            .collect();
        assert_eq!(
            summary,
            vec![
                (2019, None, 11, Some(10.0)),
                (2020, None, 11, Some(30.0)),
                (2020, None, 53, Some(6.0)),
            ]
        );
    }

    #[test]
    fn test_missing_values_ignored() {
        let idf = region(11);
        let rows = vec![
            day(&idf, (2020, 1, 1), Some(10.0)),
            day(&idf, (2020, 1, 2), None),
            day(&idf, (2020, 1, 3), Some(20.0)),
            day(&idf, (2020, 2, 1), None),
        ];
        let monthly = aggregate_monthly(&daily(rows)).unwrap();
        assert_eq!(monthly.rows()[0].consumption, Some(15.0));
        assert_eq!(monthly.rows()[1].consumption, None);
    }

    #[test]
    fn test_empty_view() {
        let monthly = aggregate_monthly(&daily(vec![])).unwrap();
        assert!(monthly.is_empty());
        assert_eq!(monthly.level(), Level::Monthly);
        assert!(monthly.hours()[5]);
    }

    #[test]
    fn test_requires_daily_view() {
        let yearly = aggregate_yearly(&daily(vec![])).unwrap();
        assert!(matches!(
            aggregate_monthly(&yearly),
            Err(ConsoError::InvalidLevel {
                expected: Level::Daily,
                found: Level::Yearly
            })
        ));
    }

    #[test]
    fn test_inconsistent_region_label() {
        let idf = region(11);
        let mut other = day(&idf, (2020, 1, 2), Some(1.0));
        other.parent = "Paris".to_string();
        let rows = vec![day(&idf, (2020, 1, 1), Some(1.0)), other];
        assert!(matches!(
            aggregate_monthly(&daily(rows)),
            Err(ConsoError::InconsistentRegion { code: 11, .. })
        ));
    }

    #[test]
    fn test_geometry_carried_through() {
        let idf = region(11);
        let rows = vec![
            day(&idf, (2020, 1, 1), Some(1.0)),
            day(&idf, (2020, 2, 1), Some(2.0)),
        ];
        let monthly = aggregate_monthly(&daily(rows)).unwrap();
        for row in &monthly {
            assert!(Arc::ptr_eq(&row.region, &idf));
        }
    }
}
