//! The persistent station catalogue. Bulk loading (CSV ingestion,
//! geocoding, jitter, dedup) is the loader's job; `bulk_insert` only
//! persists already-built rows.

use std::sync::Mutex;

use rusqlite::{params_from_iter, Connection};

use crate::domain::FuelStation;
use crate::error::Error;

/// The interface the Corridor Selector consumes for its coarse prefilter,
/// plus the bulk-insert hook used by the catalogue loader.
pub trait FuelRepository {
    fn stations_by_cells(&self, cells: &[String]) -> Result<Vec<FuelStation>, Error>;
    fn bulk_insert(&self, stations: &[FuelStation]) -> Result<(), Error>;
}

/// SQLite-backed catalogue, in the query-and-map idiom of
/// `layers::grid::GridNetwork::load`. The connection is behind a `Mutex`
/// so the repository can be shared across `actix-web` worker threads.
pub struct SqliteFuelRepository {
    conn: Mutex<Connection>,
}

impl SqliteFuelRepository {
    pub fn open(db_path: &str) -> Result<Self, Error> {
        let conn = Connection::open(db_path)?;
        let repo = SqliteFuelRepository { conn: Mutex::new(conn) };
        repo.ensure_schema()?;
        Ok(repo)
    }

    pub fn open_in_memory() -> Result<Self, Error> {
        let conn = Connection::open_in_memory()?;
        let repo = SqliteFuelRepository { conn: Mutex::new(conn) };
        repo.ensure_schema()?;
        Ok(repo)
    }

    fn ensure_schema(&self) -> Result<(), Error> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS fuel_stations (
                id INTEGER PRIMARY KEY,
                truckstop_name TEXT NOT NULL,
                address TEXT NOT NULL,
                city TEXT NOT NULL,
                state TEXT NOT NULL,
                rack_id INTEGER NOT NULL,
                retail_price REAL NOT NULL,
                latitude REAL NOT NULL,
                longitude REAL NOT NULL,
                hex_cell TEXT NOT NULL,
                UNIQUE(truckstop_name, address, city, state)
            );
            CREATE INDEX IF NOT EXISTS idx_fuel_stations_hex_cell ON fuel_stations(hex_cell);",
        )?;
        Ok(())
    }
}

impl FuelRepository for SqliteFuelRepository {
    fn stations_by_cells(&self, cells: &[String]) -> Result<Vec<FuelStation>, Error> {
        if cells.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = std::iter::repeat("?")
            .take(cells.len())
            .collect::<Vec<_>>()
            .join(",");
        let sql = format!(
            "SELECT id, truckstop_name, address, city, state, rack_id, retail_price,
                    latitude, longitude, hex_cell
             FROM fuel_stations WHERE hex_cell IN ({placeholders})"
        );
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(cells.iter()), |row| {
            Ok(FuelStation {
                id: row.get(0)?,
                truckstop_name: row.get(1)?,
                address: row.get(2)?,
                city: row.get(3)?,
                state: row.get(4)?,
                rack_id: row.get(5)?,
                retail_price: row.get(6)?,
                latitude: row.get(7)?,
                longitude: row.get(8)?,
                hex_cell: row.get(9)?,
                deviation_distance: 0.0,
                route_mile_marker: 0.0,
            })
        })?;
        let mut stations = Vec::new();
        for row in rows {
            stations.push(row?);
        }
        Ok(stations)
    }

    fn bulk_insert(&self, stations: &[FuelStation]) -> Result<(), Error> {
        let conn = self.conn.lock().unwrap();
        for station in stations {
            conn.execute(
                "INSERT INTO fuel_stations
                    (truckstop_name, address, city, state, rack_id, retail_price,
                     latitude, longitude, hex_cell)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                 ON CONFLICT(truckstop_name, address, city, state) DO UPDATE SET
                    retail_price = excluded.retail_price,
                    hex_cell = excluded.hex_cell",
                rusqlite::params![
                    station.truckstop_name,
                    station.address,
                    station.city,
                    station.state,
                    station.rack_id,
                    station.retail_price,
                    station.latitude,
                    station.longitude,
                    station.hex_cell,
                ],
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_station(cell: &str) -> FuelStation {
        FuelStation {
            id: 0,
            truckstop_name: "Pilot".to_string(),
            address: "1 Main St".to_string(),
            city: "Topeka".to_string(),
            state: "KS".to_string(),
            rack_id: 12,
            retail_price: 3.29,
            latitude: 39.0,
            longitude: -95.0,
            hex_cell: cell.to_string(),
            deviation_distance: 0.0,
            route_mile_marker: 0.0,
        }
    }

    #[test]
    fn bulk_insert_then_query_by_cell() {
        let repo = SqliteFuelRepository::open_in_memory().unwrap();
        repo.bulk_insert(&[sample_station("872830828ffffff")]).unwrap();

        let found = repo
            .stations_by_cells(&["872830828ffffff".to_string()])
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].truckstop_name, "Pilot");
    }

    #[test]
    fn query_with_no_matching_cells_is_empty() {
        let repo = SqliteFuelRepository::open_in_memory().unwrap();
        repo.bulk_insert(&[sample_station("872830828ffffff")]).unwrap();

        let found = repo.stations_by_cells(&["differentcell".to_string()]).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn empty_cell_list_short_circuits() {
        let repo = SqliteFuelRepository::open_in_memory().unwrap();
        assert!(repo.stations_by_cells(&[]).unwrap().is_empty());
    }

    #[test]
    fn bulk_insert_upserts_on_unique_conflict() {
        let repo = SqliteFuelRepository::open_in_memory().unwrap();
        repo.bulk_insert(&[sample_station("cell-a")]).unwrap();
        let mut updated = sample_station("cell-a");
        updated.retail_price = 2.99;
        repo.bulk_insert(&[updated]).unwrap();

        let found = repo.stations_by_cells(&["cell-a".to_string()]).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].retail_price, 2.99);
    }
}
