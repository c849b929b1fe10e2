// Flight catalog: CSV loading and grouping by (source, destination)

use std::{collections::HashMap, fs::File, io::Read, path::Path};

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::flight::FlightRecord;

pub const TIME_FORMAT: &str = "%H:%M";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid time {value:?} on row {row}")]
    InvalidTime { row: usize, value: String },
}

// One row of the flight data file, column names as written by the generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightRow {
    #[serde(rename = "Date_of_Journey")]
    pub date_of_journey: String,
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Destination")]
    pub destination: String,
    #[serde(rename = "Dep_Time")]
    pub dep_time: String,
    #[serde(rename = "Arrival_Time")]
    pub arrival_time: String,
    #[serde(rename = "Duration")]
    pub duration: String,
    #[serde(rename = "Price")]
    pub price: u64,
}

impl FlightRow {
    fn into_record(self, row: usize) -> Result<FlightRecord, CatalogError> {
        let parse = |value: &str| {
            NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).map_err(|_| {
                CatalogError::InvalidTime {
                    row,
                    value: value.to_string(),
                }
            })
        };

        Ok(FlightRecord {
            departure_time: parse(&self.dep_time)?,
            arrival_time: parse(&self.arrival_time)?,
            source: self.source,
            destination: self.destination,
            price: self.price,
        })
    }
}

/// Read-only lookup of direct flights keyed by `(source, destination)`.
///
/// Flights for a route keep the order in which they were loaded, which the
/// combination search relies on for its first-wins tie-break.
#[derive(Debug, Default, Clone)]
pub struct FlightCatalog {
    routes: HashMap<String, HashMap<String, Vec<FlightRecord>>>,
    len: usize,
}

impl FlightCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading flight data");

        let catalog = Self::from_reader(File::open(path)?)?;

        info!(
            flights = catalog.len(),
            routes = catalog.routes(),
            "flight data loaded"
        );
        Ok(catalog)
    }

    // Any malformed row aborts the whole load
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut reader = csv::Reader::from_reader(reader);
        let mut catalog = Self::new();

        for (index, row) in reader.deserialize::<FlightRow>().enumerate() {
            // header is line 1
            let record = row?.into_record(index + 2)?;
            catalog.insert(record);
        }

        Ok(catalog)
    }

    pub fn from_records(records: impl IntoIterator<Item = FlightRecord>) -> Self {
        let mut catalog = Self::new();
        for record in records {
            catalog.insert(record);
        }
        catalog
    }

    pub fn insert(&mut self, record: FlightRecord) {
        self.len += 1;
        self.routes
            .entry(record.source.clone())
            .or_default()
            .entry(record.destination.clone())
            .or_default()
            .push(record);
    }

    // A route with no flights yields an empty slice, not an error
    pub fn flights(&self, source: &str, destination: &str) -> &[FlightRecord] {
        match self.routes.get(source).and_then(|by_dest| by_dest.get(destination)) {
            Some(flights) => flights,
            None => {
                debug!(source, destination, "no flights for route");
                &[]
            }
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // Number of distinct (source, destination) pairs
    pub fn routes(&self) -> usize {
        self.routes.values().map(HashMap::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight::hm;

    const SAMPLE_CSV: &str = "\
Date_of_Journey,Source,Destination,Dep_Time,Arrival_Time,Duration,Price
2025-06-11,Paris,Rome,08:10,10:25,2:15:00,120
2025-07-02,London,Rome,09:00,11:30,2:30:00,95
2025-06-20,Paris,Rome,13:45,16:00,2:15:00,80
";

    #[test]
    fn test_load_groups_by_route() {
        let catalog = FlightCatalog::from_reader(SAMPLE_CSV.as_bytes()).unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.routes(), 2);

        let paris_rome = catalog.flights("Paris", "Rome");
        assert_eq!(paris_rome.len(), 2);
        // file order is kept within a route
        assert_eq!(paris_rome[0].price, 120);
        assert_eq!(paris_rome[0].departure_time, hm(8, 10));
        assert_eq!(paris_rome[0].arrival_time, hm(10, 25));
        assert_eq!(paris_rome[1].price, 80);
    }

    #[test]
    fn test_missing_route_is_empty() {
        let catalog = FlightCatalog::from_reader(SAMPLE_CSV.as_bytes()).unwrap();
        assert!(catalog.flights("Rome", "Paris").is_empty());
        assert!(catalog.flights("Tokyo", "Rome").is_empty());
    }

    #[test]
    fn test_malformed_time_fails_load() {
        let csv = "\
Date_of_Journey,Source,Destination,Dep_Time,Arrival_Time,Duration,Price
2025-06-11,Paris,Rome,08:10,10:25,2:15:00,120
2025-06-11,Paris,Rome,25:99,10:25,2:15:00,120
";
        let result = FlightCatalog::from_reader(csv.as_bytes());
        match result {
            Err(CatalogError::InvalidTime { row, value }) => {
                assert_eq!(row, 3);
                assert_eq!(value, "25:99");
            }
            other => panic!("Expected invalid time error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_price_fails_load() {
        let csv = "\
Date_of_Journey,Source,Destination,Dep_Time,Arrival_Time,Duration,Price
2025-06-11,Paris,Rome,08:10,10:25,2:15:00,cheap
";
        let result = FlightCatalog::from_reader(csv.as_bytes());
        assert!(
            matches!(result, Err(CatalogError::CsvError(_))),
            "Expected CSV error, got {:?}",
            result
        );
    }

    #[test]
    fn test_unreadable_file_fails_load() {
        let result = FlightCatalog::load("does/not/exist/flight_data.csv");
        assert!(matches!(result, Err(CatalogError::IoError(_))));
    }

    #[test]
    fn test_from_records() {
        let catalog = FlightCatalog::from_records(vec![
            FlightRecord::new("A", "D", hm(7, 0), hm(10, 0), 100),
            FlightRecord::new("B", "D", hm(9, 0), hm(11, 30), 50),
        ]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.flights("B", "D")[0].price, 50);
    }
}
