// Human-readable and JSON rendering of the top vacation options

use crate::{
    catalog::TIME_FORMAT,
    flight::{Leg, VacationOption},
};

const SEPARATOR_WIDTH: usize = 80;

pub fn render_report(options: &[VacationOption], num_results: usize) -> String {
    if options.is_empty() {
        return String::from("No vacations found.\n");
    }

    let separator = "-".repeat(SEPARATOR_WIDTH);
    let mut out = String::from("Cheapest vacations for the travelers:\n");
    out.push_str(&format!("{}\n", separator));

    for option in options.iter().take(num_results) {
        out.push_str(&format!("Destination: {}\n", option.destination));
        out.push_str(&format!(
            "Total price for all travelers: {}\n",
            option.total_price
        ));

        for (index, leg) in option.flights.iter().enumerate() {
            out.push_str(&format!("\nTraveler {}:\n", index + 1));
            match leg {
                Leg::AlreadyThere => {
                    out.push_str("  No flight needed, already in the destination city.\n");
                    out.push_str("  Price: 0\n");
                }
                Leg::Flight(flight) => {
                    out.push_str(&format!(
                        "  Flight: {} to {}\n",
                        flight.source, flight.destination
                    ));
                    out.push_str(&format!("  Departure date: {}\n", option.departure_date));
                    out.push_str(&format!(
                        "  Departure time: {}\n",
                        flight.departure_time.format(TIME_FORMAT)
                    ));
                    out.push_str(&format!(
                        "  Arrival time: {}\n",
                        flight.arrival_time.format(TIME_FORMAT)
                    ));
                    out.push_str(&format!("  Price: {}\n", flight.price));
                }
            }
        }
        out.push_str(&format!("{}\n", separator));
    }

    out
}

pub fn render_json(
    options: &[VacationOption],
    num_results: usize,
) -> Result<String, serde_json::Error> {
    let top = &options[..num_results.min(options.len())];
    serde_json::to_string_pretty(top)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight::{hm, FlightRecord};
    use chrono::NaiveDate;

    fn sample() -> Vec<VacationOption> {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        vec![
            VacationOption {
                destination: "Rome".to_string(),
                flights: vec![
                    Leg::Flight(FlightRecord::new("Paris", "Rome", hm(8, 5), hm(10, 20), 120)),
                    Leg::AlreadyThere,
                ],
                total_price: 120,
                departure_date: date,
            },
            VacationOption {
                destination: "Milan".to_string(),
                flights: vec![
                    Leg::Flight(FlightRecord::new("Paris", "Milan", hm(7, 0), hm(8, 30), 90)),
                    Leg::Flight(FlightRecord::new("Rome", "Milan", hm(7, 30), hm(8, 45), 70)),
                ],
                total_price: 160,
                departure_date: date,
            },
        ]
    }

    #[test]
    fn test_render_report() {
        let report = render_report(&sample(), 10);

        assert!(report.starts_with("Cheapest vacations for the travelers:\n"));
        assert!(report.contains("Destination: Rome\nTotal price for all travelers: 120\n"));
        assert!(report.contains("  Flight: Paris to Rome\n  Departure date: 2025-06-01\n"));
        assert!(report.contains("  Departure time: 08:05\n  Arrival time: 10:20\n  Price: 120\n"));
        assert!(report.contains(
            "\nTraveler 2:\n  No flight needed, already in the destination city.\n  Price: 0\n"
        ));
        assert!(report.contains("Destination: Milan"));
        assert_eq!(report.matches(&"-".repeat(80)).count(), 3);
    }

    #[test]
    fn test_render_report_limits_results() {
        let report = render_report(&sample(), 1);
        assert!(report.contains("Destination: Rome"));
        assert!(!report.contains("Destination: Milan"));
    }

    #[test]
    fn test_render_empty_report() {
        assert_eq!(render_report(&[], 10), "No vacations found.\n");
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&sample(), 1).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let options = value.as_array().unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0]["destination"], "Rome");
        assert_eq!(options[0]["total_price"], 120);
        assert_eq!(options[0]["departure_date"], "2025-06-01");
        assert_eq!(options[0]["flights"][0]["kind"], "flight");
        assert_eq!(options[0]["flights"][0]["price"], 120);
        assert_eq!(options[0]["flights"][1]["kind"], "already_there");
    }
}
