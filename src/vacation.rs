// Vacation scan: cheapest combination per destination and departure day,
// collected across the scan window and ranked by total price

use std::{collections::HashSet, sync::Arc, thread};

use chrono::{Days, Local, NaiveDate};
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::{
    catalog::FlightCatalog,
    cities::default_destinations,
    combination::{CombinationSearch, SearchError},
    config::FinderConfig,
    flight::{Candidates, VacationOption},
};

// An option together with where the scan found it, used to restore
// discovery order after a parallel scan
#[derive(Debug)]
struct Found {
    day: u32,
    destination: usize,
    option: VacationOption,
}

pub struct VacationFinder {
    catalog: Arc<FlightCatalog>,
    destinations: Vec<String>,
    search: CombinationSearch,
}

impl VacationFinder {
    pub fn new(
        catalog: Arc<FlightCatalog>,
        destinations: Vec<String>,
        search: CombinationSearch,
    ) -> Self {
        Self {
            catalog,
            destinations,
            search,
        }
    }

    // Scans the default city list with the configured arrival window
    pub fn with_config(catalog: Arc<FlightCatalog>, config: &FinderConfig) -> Self {
        Self::new(
            catalog,
            default_destinations(),
            CombinationSearch::with_max_wait_minutes(config.max_wait_minutes),
        )
    }

    /// Scans `num_days` departure days starting today.
    pub fn find_cheapest_vacations(
        &self,
        traveler_origins: &[String],
        num_days: u32,
    ) -> Result<Vec<VacationOption>, SearchError> {
        let today = Local::now().date_naive();
        self.find_cheapest_vacations_from(traveler_origins, today, num_days)
    }

    /// Scans `num_days` departure days starting at `start`.
    ///
    /// At most one option is kept per (destination, day) and the result is
    /// sorted by total price, equal prices staying in discovery order (day
    /// first, then destination order).
    pub fn find_cheapest_vacations_from(
        &self,
        traveler_origins: &[String],
        start: NaiveDate,
        num_days: u32,
    ) -> Result<Vec<VacationOption>, SearchError> {
        self.search.check_arguments(traveler_origins)?;

        let mut found = Vec::new();
        for (day, date) in departure_days(start, num_days) {
            found.extend(self.scan_day(traveler_origins, day, date)?);
        }

        Ok(self.rank(traveler_origins, found))
    }

    /// Same result as [`Self::find_cheapest_vacations_from`], with departure
    /// days spread over `workers` threads sharing the catalog.
    pub fn find_cheapest_vacations_parallel(
        &self,
        traveler_origins: &[String],
        start: NaiveDate,
        num_days: u32,
        workers: usize,
    ) -> Result<Vec<VacationOption>, SearchError> {
        self.search.check_arguments(traveler_origins)?;

        let days: Vec<(u32, NaiveDate)> = departure_days(start, num_days).collect();
        let workers = workers.clamp(1, days.len().max(1));
        let chunk_size = days.len().div_ceil(workers).max(1);
        let collected = Mutex::new(Vec::new());

        thread::scope(|scope| {
            let handles: Vec<_> = days
                .chunks(chunk_size)
                .map(|chunk| {
                    let collected = &collected;
                    scope.spawn(move || -> Result<(), SearchError> {
                        for &(day, date) in chunk {
                            let found = self.scan_day(traveler_origins, day, date)?;
                            collected.lock().extend(found);
                        }
                        Ok(())
                    })
                })
                .collect();

            for handle in handles {
                match handle.join() {
                    Ok(result) => result?,
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }
            Ok::<(), SearchError>(())
        })?;

        let mut found = collected.into_inner();
        // completion order is arbitrary; the sequential scan order is not
        found.sort_by_key(|f| (f.day, f.destination));

        Ok(self.rank(traveler_origins, found))
    }

    // Runs the combination search for every destination on one day
    fn scan_day(
        &self,
        traveler_origins: &[String],
        day: u32,
        date: NaiveDate,
    ) -> Result<Vec<Found>, SearchError> {
        let mut found = Vec::new();

        for (index, destination) in self.destinations.iter().enumerate() {
            let candidates: Vec<Candidates<'_>> = traveler_origins
                .iter()
                .map(|origin| {
                    if origin == destination {
                        Candidates::AlreadyThere
                    } else {
                        Candidates::Flights(self.catalog.flights(origin, destination))
                    }
                })
                .collect();

            if let Some(result) =
                self.search
                    .find_cheapest_combination(traveler_origins, date, &candidates)?
            {
                debug!(
                    %destination,
                    %date,
                    total_price = result.total_price,
                    "found combination"
                );
                found.push(Found {
                    day,
                    destination: index,
                    option: VacationOption::from_combination(destination.clone(), result),
                });
            }
        }

        Ok(found)
    }

    // Drops repeated (destination, day) keys, first one wins, then sorts by price
    fn rank(&self, traveler_origins: &[String], found: Vec<Found>) -> Vec<VacationOption> {
        let mut seen: HashSet<(String, NaiveDate)> = HashSet::new();
        let mut options: Vec<VacationOption> = found
            .into_iter()
            .map(|f| f.option)
            .filter(|option| seen.insert((option.destination.clone(), option.departure_date)))
            .collect();

        // stable, so equal prices keep discovery order
        options.sort_by_key(|option| option.total_price);

        info!(
            travelers = traveler_origins.len(),
            destinations = self.destinations.len(),
            options = options.len(),
            "vacation scan finished"
        );
        options
    }
}

// (offset, date) for each day of the scan window
fn departure_days(start: NaiveDate, num_days: u32) -> impl Iterator<Item = (u32, NaiveDate)> {
    (0..num_days).map_while(move |day| {
        start
            .checked_add_days(Days::new(u64::from(day)))
            .map(|date| (day, date))
    })
}
