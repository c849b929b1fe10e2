// Known cities, used both as generator endpoints and as the default
// destination universe of a vacation scan

pub const CITIES: [&str; 51] = [
    "Bangkok",
    "Dubai",
    "Paris",
    "London",
    "New York City",
    "Kuala Lumpur",
    "Istanbul",
    "Tokyo",
    "Antalya",
    "Seoul",
    "Phuket",
    "Mecca",
    "Hong Kong",
    "Milan",
    "Barcelona",
    "Pattaya",
    "Bali",
    "Osaka",
    "Rome",
    "Taipei",
    "Shenzhen",
    "Vienna",
    "Prague",
    "Dublin",
    "Mumbai",
    "Amsterdam",
    "Ho Chi Minh City",
    "Berlin",
    "Moscow",
    "Munich",
    "Madrid",
    "Beijing",
    "Toronto",
    "Zurich",
    "Vancouver",
    "Los Angeles",
    "Miami",
    "San Francisco",
    "Sydney",
    "Athens",
    "Melbourne",
    "Edinburgh",
    "Florence",
    "Krakow",
    "Budapest",
    "Cairo",
    "Lisbon",
    "Brussels",
    "Copenhagen",
    "Stockholm",
    "Helsinki",
];

pub fn default_destinations() -> Vec<String> {
    CITIES.iter().map(|city| city.to_string()).collect()
}

pub fn is_known_city(name: &str) -> bool {
    CITIES.contains(&name)
}
