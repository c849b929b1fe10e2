// Cheapest combination search for one destination on one departure day
//
// The product of the per-traveler candidate lists is walked depth first in
// lexicographic order, so the first cheapest combination encountered is the
// one kept. Partial combinations that can no longer win are skipped, which
// never changes the result.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use thiserror::Error;
use tracing::debug;

use crate::flight::{Candidates, CombinationResult, Leg};

pub const DEFAULT_MAX_WAIT_MINUTES: i64 = 120;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("At least one traveler origin is required")]
    NoTravelers,

    #[error("Expected {expected} candidate lists (one per traveler), got {actual}")]
    CandidateCountMismatch { expected: usize, actual: usize },

    #[error("Maximum wait between arrivals must not be negative, got {minutes} minutes")]
    NegativeMaxWait { minutes: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombinationSearch {
    // Largest allowed spread between the first and last arrival
    pub max_wait: Duration,
}

impl Default for CombinationSearch {
    fn default() -> Self {
        Self {
            max_wait: Duration::minutes(DEFAULT_MAX_WAIT_MINUTES),
        }
    }
}

// State of a combination after the first `depth` slots have been chosen
#[derive(Debug, Clone, Copy, Default)]
struct Partial {
    price: u64,
    earliest: Option<NaiveDateTime>,
    latest: Option<NaiveDateTime>,
}

impl Partial {
    fn spread(&self) -> Duration {
        match (self.earliest, self.latest) {
            (Some(earliest), Some(latest)) => latest - earliest,
            _ => Duration::zero(),
        }
    }
}

impl CombinationSearch {
    pub fn new(max_wait: Duration) -> Self {
        Self { max_wait }
    }

    pub fn with_max_wait_minutes(minutes: i64) -> Self {
        Self::new(Duration::minutes(minutes))
    }

    // Rejects searches that cannot be asked: no travelers or a negative window
    pub fn check_arguments(&self, traveler_origins: &[String]) -> Result<(), SearchError> {
        if traveler_origins.is_empty() {
            return Err(SearchError::NoTravelers);
        }
        if self.max_wait < Duration::zero() {
            return Err(SearchError::NegativeMaxWait {
                minutes: self.max_wait.num_minutes(),
            });
        }
        Ok(())
    }

    /// Finds the cheapest valid choice of one slot per traveler.
    ///
    /// `candidates[i]` holds the flights from `traveler_origins[i]` to the
    /// destination, or [`Candidates::AlreadyThere`] when the traveler lives
    /// there. With more than one traveler every arrival must land on
    /// `departure_date` and all arrivals must fall within `max_wait` of each
    /// other. Returns `Ok(None)` when no combination qualifies.
    pub fn find_cheapest_combination(
        &self,
        traveler_origins: &[String],
        departure_date: NaiveDate,
        candidates: &[Candidates<'_>],
    ) -> Result<Option<CombinationResult>, SearchError> {
        self.check_arguments(traveler_origins)?;
        if candidates.len() != traveler_origins.len() {
            return Err(SearchError::CandidateCountMismatch {
                expected: traveler_origins.len(),
                actual: candidates.len(),
            });
        }

        // An empty slot empties the whole product
        if candidates.iter().any(Candidates::is_empty) {
            return Ok(None);
        }

        let windowed = candidates.len() > 1;
        let slots = candidates.len();

        let mut best: Option<(u64, Vec<usize>)> = None;
        let mut indices = vec![0usize; slots];
        let mut partials = Vec::with_capacity(slots + 1);
        partials.push(Partial::default());
        let mut depth = 0;
        let mut evaluated = 0usize;
        let mut pruned = 0usize;

        loop {
            if indices[depth] == candidates[depth].len() {
                if depth == 0 {
                    break;
                }
                indices[depth] = 0;
                partials.pop();
                depth -= 1;
                indices[depth] += 1;
                continue;
            }

            let bound = best.as_ref().map(|(price, _)| *price);
            let next = self.extend(
                &partials[depth],
                &candidates[depth],
                indices[depth],
                departure_date,
                windowed,
                bound,
            );

            match next {
                None => {
                    pruned += 1;
                    indices[depth] += 1;
                }
                Some(next) if depth + 1 == slots => {
                    evaluated += 1;
                    // strict comparison keeps the first combination on ties
                    if bound.map_or(true, |bound| next.price < bound) {
                        best = Some((next.price, indices.clone()));
                    }
                    indices[depth] += 1;
                }
                Some(next) => {
                    partials.push(next);
                    depth += 1;
                }
            }
        }

        debug!(
            travelers = slots,
            %departure_date,
            evaluated,
            pruned,
            found = best.is_some(),
            "combination search finished"
        );

        Ok(best.map(|(total_price, chosen)| CombinationResult {
            flights: candidates
                .iter()
                .zip(chosen)
                .map(|(slot, index)| match slot {
                    Candidates::Flights(flights) => Leg::Flight(flights[index].clone()),
                    Candidates::AlreadyThere => Leg::AlreadyThere,
                })
                .collect(),
            total_price,
            departure_date,
        }))
    }

    // Adds one slot choice to a partial combination. Returns None when the
    // result can no longer be valid or can no longer beat `bound`.
    fn extend(
        &self,
        partial: &Partial,
        slot: &Candidates<'_>,
        index: usize,
        departure_date: NaiveDate,
        windowed: bool,
        bound: Option<u64>,
    ) -> Option<Partial> {
        let mut next = *partial;

        if let Candidates::Flights(flights) = slot {
            let flight = &flights[index];
            next.price = next.price.saturating_add(flight.price);

            if windowed {
                let arrival = flight.arrival_at(departure_date);
                if arrival.date() != departure_date {
                    return None;
                }
                next.earliest = Some(next.earliest.map_or(arrival, |t| t.min(arrival)));
                next.latest = Some(next.latest.map_or(arrival, |t| t.max(arrival)));

                if next.spread() > self.max_wait {
                    return None;
                }
            }
        }

        // prices never go down, so a prefix at or above the best cannot win
        if bound.is_some_and(|bound| next.price >= bound) {
            return None;
        }

        Some(next)
    }
}
