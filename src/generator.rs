// Synthetic flight data, written in the same CSV layout the catalog loads

use std::{fs, path::Path};

use chrono::{Days, Duration, Local, NaiveDate, NaiveTime};
use rand::{seq::SliceRandom, Rng};
use tracing::info;

use crate::{
    catalog::{CatalogError, FlightRow, TIME_FORMAT},
    cities::CITIES,
    flight::FlightRecord,
};

pub const DEFAULT_ROWS: usize = 100_000;

const MIN_BASE_DURATION_MINUTES: i64 = 60;
const MAX_BASE_DURATION_MINUTES: i64 = 600;
const DURATION_FLUCTUATION_MINUTES: i64 = 30;
const MIN_BASE_PRICE: i64 = 50;
const MAX_BASE_PRICE: i64 = 500;

#[derive(Debug, Clone)]
struct GeneratedFlight {
    journey_date: NaiveDate,
    duration: Duration,
    record: FlightRecord,
}

impl GeneratedFlight {
    fn into_row(self) -> FlightRow {
        FlightRow {
            date_of_journey: self.journey_date.format("%Y-%m-%d").to_string(),
            dep_time: self.record.departure_time.format(TIME_FORMAT).to_string(),
            arrival_time: self.record.arrival_time.format(TIME_FORMAT).to_string(),
            duration: format_duration(self.duration),
            source: self.record.source,
            destination: self.record.destination,
            price: self.record.price,
        }
    }
}

// H:MM:SS, hours unpadded
fn format_duration(duration: Duration) -> String {
    let minutes = duration.num_minutes();
    format!("{}:{:02}:00", minutes / 60, minutes % 60)
}

fn random_flight<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate) -> GeneratedFlight {
    let mut pair = CITIES.choose_multiple(rng, 2);
    let source = pair.next().copied().unwrap_or(CITIES[0]);
    let destination = pair.next().copied().unwrap_or(CITIES[1]);

    let journey_date = today
        .checked_add_days(Days::new(rng.gen_range(1..=365)))
        .unwrap_or(today);
    let departure_time = NaiveTime::from_hms_opt(rng.gen_range(0..24), rng.gen_range(0..60), 0)
        .unwrap_or(NaiveTime::MIN);

    let base_duration = rng.gen_range(MIN_BASE_DURATION_MINUTES..=MAX_BASE_DURATION_MINUTES);
    let fluctuation = rng.gen_range(-DURATION_FLUCTUATION_MINUTES..=DURATION_FLUCTUATION_MINUTES);
    let duration = Duration::minutes(base_duration + fluctuation);
    // wraps past midnight
    let arrival_time = departure_time + duration;

    // longer than planned costs more, shorter costs less
    let base_price = rng.gen_range(MIN_BASE_PRICE..=MAX_BASE_PRICE);
    let price = base_price + base_price * fluctuation / MAX_BASE_DURATION_MINUTES;

    GeneratedFlight {
        journey_date,
        duration,
        record: FlightRecord::new(
            source,
            destination,
            departure_time,
            arrival_time,
            price.unsigned_abs(),
        ),
    }
}

pub fn generate_rows<R: Rng + ?Sized>(
    rng: &mut R,
    num_rows: usize,
    today: NaiveDate,
) -> Vec<FlightRow> {
    (0..num_rows)
        .map(|_| random_flight(rng, today).into_row())
        .collect()
}

// Flight records only, for building an in-memory catalog
pub fn generate_records<R: Rng + ?Sized>(rng: &mut R, num_rows: usize) -> Vec<FlightRecord> {
    let today = Local::now().date_naive();
    (0..num_rows)
        .map(|_| random_flight(rng, today).record)
        .collect()
}

pub fn write_flight_data<R: Rng + ?Sized>(
    path: impl AsRef<Path>,
    num_rows: usize,
    rng: &mut R,
) -> Result<usize, CatalogError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let today = Local::now().date_naive();
    let mut writer = csv::Writer::from_path(path)?;
    for row in generate_rows(rng, num_rows, today) {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = num_rows, "flight data written");
    Ok(num_rows)
}
