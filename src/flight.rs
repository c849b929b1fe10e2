// Flight data model shared by the catalog, the searches and the report

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

// A direct flight between two cities. Times are time-of-day only; the
// search day is supplied by whoever evaluates the flight.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlightRecord {
    pub source: String,
    pub destination: String,
    pub departure_time: NaiveTime,
    pub arrival_time: NaiveTime,
    pub price: u64,
}

impl FlightRecord {
    pub fn new(
        source: impl Into<String>,
        destination: impl Into<String>,
        departure_time: NaiveTime,
        arrival_time: NaiveTime,
        price: u64,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            departure_time,
            arrival_time,
            price,
        }
    }

    /// Arrival timestamp of this flight when flown on `date`.
    pub fn arrival_at(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.arrival_time)
    }
}

// One slot of a combination: either a real flight or the traveler is
// already in the destination city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Leg {
    Flight(FlightRecord),
    AlreadyThere,
}

impl Leg {
    pub fn price(&self) -> u64 {
        match self {
            Leg::Flight(flight) => flight.price,
            Leg::AlreadyThere => 0,
        }
    }

    pub fn flight(&self) -> Option<&FlightRecord> {
        match self {
            Leg::Flight(flight) => Some(flight),
            Leg::AlreadyThere => None,
        }
    }
}

// Per-traveler input to the combination search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidates<'a> {
    Flights(&'a [FlightRecord]),
    AlreadyThere,
}

impl Candidates<'_> {
    // Number of choices this slot contributes to the product
    pub fn len(&self) -> usize {
        match self {
            Candidates::Flights(flights) => flights.len(),
            Candidates::AlreadyThere => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombinationResult {
    pub flights: Vec<Leg>,
    pub total_price: u64,
    pub departure_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VacationOption {
    pub destination: String,
    pub flights: Vec<Leg>,
    pub total_price: u64,
    pub departure_date: NaiveDate,
}

impl VacationOption {
    pub fn from_combination(destination: impl Into<String>, result: CombinationResult) -> Self {
        Self {
            destination: destination.into(),
            flights: result.flights,
            total_price: result.total_price,
            departure_date: result.departure_date,
        }
    }
}

#[cfg(test)]
pub(crate) fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrival_at_uses_search_day() {
        let flight = FlightRecord::new("Paris", "Rome", hm(8, 0), hm(10, 15), 120);
        let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        let arrival = flight.arrival_at(day);
        assert_eq!(arrival.date(), day);
        assert_eq!(arrival.time(), hm(10, 15));
    }

    #[test]
    fn test_leg_price() {
        let flight = FlightRecord::new("Paris", "Rome", hm(8, 0), hm(10, 15), 120);
        assert_eq!(Leg::Flight(flight).price(), 120);
        assert_eq!(Leg::AlreadyThere.price(), 0);
        assert!(Leg::AlreadyThere.flight().is_none());
    }

    #[test]
    fn test_candidates_len() {
        let flights = vec![
            FlightRecord::new("Paris", "Rome", hm(8, 0), hm(10, 15), 120),
            FlightRecord::new("Paris", "Rome", hm(9, 0), hm(11, 15), 90),
        ];
        assert_eq!(Candidates::Flights(&flights).len(), 2);
        assert_eq!(Candidates::AlreadyThere.len(), 1);
        assert!(Candidates::Flights(&[]).is_empty());
    }
}
