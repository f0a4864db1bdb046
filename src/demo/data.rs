//! Static demo data. Every function is pure: same input, same output.

use once_cell::sync::Lazy;
use serde_json::{json, Value};

use crate::error::ToolError;

const VALID_APPOINTMENTS: [i64; 5] = [101, 102, 103, 104, 105];

static HOTELS: Lazy<Value> = Lazy::new(|| {
    json!({
        "new york": [
            {
                "id": 1,
                "name": "The Grand Plaza",
                "chain": "Marriott",
                "brand": "JW Marriott",
                "rating": 4.7,
                "price_category": "luxury",
                "price_per_night": 450,
                "neighborhood": "Midtown",
                "amenities": ["spa", "pool", "restaurant"],
                "points_per_night": 50000,
                "loyalty_program": "Marriott Bonvoy"
            },
            {
                "id": 2,
                "name": "City Lights Hotel",
                "chain": "Hilton",
                "brand": "DoubleTree",
                "rating": 4.2,
                "price_category": "moderate",
                "price_per_night": 275,
                "neighborhood": "Times Square",
                "amenities": ["restaurant", "gym"],
                "points_per_night": 70000,
                "loyalty_program": "Hilton Honors"
            },
            {
                "id": 3,
                "name": "Riverside Inn",
                "chain": "IHG",
                "brand": "Holiday Inn",
                "rating": 4.5,
                "price_category": "moderate",
                "price_per_night": 320,
                "neighborhood": "Upper West Side",
                "amenities": ["restaurant", "laundry"],
                "points_per_night": 35000,
                "loyalty_program": "IHG Rewards"
            },
            {
                "id": 4,
                "name": "Budget Stay",
                "chain": "Independent",
                "rating": 3.8,
                "price_category": "budget",
                "price_per_night": 150,
                "neighborhood": "Queens",
                "amenities": ["free wifi", "breakfast"]
            },
            {
                "id": 5,
                "name": "Luxury Towers",
                "chain": "Marriott",
                "brand": "The Ritz-Carlton",
                "rating": 4.9,
                "price_category": "luxury",
                "price_per_night": 550,
                "neighborhood": "Financial District",
                "amenities": ["spa", "pool", "restaurant", "gym", "concierge"],
                "points_per_night": 85000,
                "loyalty_program": "Marriott Bonvoy"
            },
            {
                "id": 6,
                "name": "Hilton Midtown",
                "chain": "Hilton",
                "brand": "Hilton",
                "rating": 4.6,
                "price_category": "luxury",
                "price_per_night": 425,
                "neighborhood": "Midtown",
                "amenities": ["spa", "restaurant", "gym"],
                "points_per_night": 80000,
                "loyalty_program": "Hilton Honors"
            },
            {
                "id": 7,
                "name": "Kimpton Hotel",
                "chain": "IHG",
                "brand": "Kimpton",
                "rating": 4.4,
                "price_category": "moderate",
                "price_per_night": 310,
                "neighborhood": "Chelsea",
                "amenities": ["restaurant", "bar", "gym"],
                "points_per_night": 40000,
                "loyalty_program": "IHG Rewards"
            }
        ],
        "london": [
            {
                "id": 101,
                "name": "The Wellington",
                "chain": "Marriott",
                "brand": "Autograph Collection",
                "rating": 4.6,
                "price_category": "luxury",
                "price_per_night": 420,
                "amenities": ["spa", "restaurant"],
                "points_per_night": 60000,
                "loyalty_program": "Marriott Bonvoy"
            },
            {
                "id": 102,
                "name": "Covent Garden Hotel",
                "chain": "Hilton",
                "brand": "Conrad",
                "rating": 4.3,
                "price_category": "moderate",
                "price_per_night": 290,
                "amenities": ["gym", "restaurant"],
                "points_per_night": 65000,
                "loyalty_program": "Hilton Honors"
            }
        ]
    })
});

static USER_PROGRAMS: Lazy<Value> = Lazy::new(|| {
    json!({
        "airline_points": {
            "Delta SkyMiles": 47500,
            "United MileagePlus": 32000,
            "American AAdvantage": 18750
        },
        "hotel_points": {
            "Marriott Bonvoy": 68000,
            "Hilton Honors": 125000,
            "IHG Rewards": 42000
        },
        "status_levels": {
            "Delta": "Gold",
            "Marriott": "Platinum",
            "Hertz": "President's Circle",
            "Chase": "Sapphire Reserve",
            "Amex": "Platinum"
        }
    })
});

static CITY_OFFERS: Lazy<Value> = Lazy::new(|| {
    json!({
        "new york": [
            {"partner": "MoMA", "discount": "20% off admission with Marriott Platinum status"},
            {"partner": "Bergdorf Goodman", "discount": "10% off purchases with Amex Platinum"},
            {"partner": "Citi Bike", "discount": "Free day pass with Delta Gold status"},
            {"partner": "Empire State Building", "discount": "Priority access and 15% off admission with Chase Sapphire Reserve"},
            {"partner": "Michelin Star Restaurants", "discount": "Priority reservations at selected restaurants with Amex Platinum"},
            {"partner": "Broadway Shows", "discount": "25% off select shows with Marriott Platinum status"},
            {"partner": "Metropolitan Museum of Art", "discount": "2-for-1 admission with United MileagePlus status"},
            {"partner": "Central Park Zoo", "discount": "15% off admission with IHG Rewards membership"},
            {"partner": "NYC Airport Express", "discount": "Free airport transfer with minimum 3-night Hilton stay"}
        ],
        "london": [
            {"partner": "Harrods", "discount": "VIP shopping experience with Marriott Platinum"},
            {"partner": "The Tube", "discount": "50% off 7-day travel card with British Airways Silver"}
        ]
    })
});

static NEW_YORK_REDEMPTIONS: Lazy<Value> = Lazy::new(|| {
    json!([
        {"program": "Marriott Bonvoy", "opportunity": "Free night at JW Marriott Essex House", "points_required": 50000, "cash_value": "$650"},
        {"program": "Delta SkyMiles", "opportunity": "Economy round-trip ticket (available for your dates)", "points_required": 25000, "cash_value": "$450"},
        {"program": "Hilton Honors", "opportunity": "Luxury weekend package: 1 night at Waldorf Astoria + spa treatment", "points_required": 95000, "cash_value": "$750"},
        {"program": "United MileagePlus", "opportunity": "VIP helicopter tour of Manhattan", "points_required": 20000, "cash_value": "$350"}
    ])
});

pub fn get_current_weather(location: &str) -> Value {
    let location = location.to_lowercase();
    if location.contains("new york") {
        json!({"temperature": 22, "unit": "Celsius", "conditions": "Partly Cloudy"})
    } else if location.contains("london") {
        json!({"temperature": 15, "unit": "Celsius", "conditions": "Rainy"})
    } else {
        json!({"temperature": 25, "unit": "Celsius", "conditions": "Sunny"})
    }
}

/// `None` stands for an explicit `null` date and matches nothing.
pub fn query_calendar(date: Option<&str>) -> Value {
    let appointments = match date {
        Some("today") => json!([
            {"id": 101, "time": "09:00-10:30", "title": "Weekly Team Meeting"},
            {"id": 102, "time": "13:00-14:00", "title": "Lunch with Client"},
            {"id": 103, "time": "16:00-17:00", "title": "Project Review"}
        ]),
        Some("tomorrow") | Some("2023-06-15") => json!([
            {"id": 104, "time": "11:00-12:00", "title": "Dentist Appointment"},
            {"id": 105, "time": "15:00-16:30", "title": "Budget Planning"}
        ]),
        _ => json!([]),
    };
    json!({"appointments": appointments, "date": date})
}

/// Ids arrive as JSON numbers; whole floats (`101.0`) match their integer.
pub fn cancel_appointment(appointment_id: f64) -> Value {
    let shown = if appointment_id.fract() == 0.0 && appointment_id.is_finite() {
        format!("{}", appointment_id as i64)
    } else {
        format!("{}", appointment_id)
    };
    let valid = VALID_APPOINTMENTS
        .iter()
        .any(|id| *id as f64 == appointment_id);
    cancellation(valid, &shown)
}

/// Textual ids (`"102"`) never match a numeric appointment id.
pub fn cancel_appointment_by_label(label: &str) -> Value {
    cancellation(false, label)
}

fn cancellation(valid: bool, shown: &str) -> Value {
    if valid {
        json!({"status": "success", "message": format!("Appointment {} canceled successfully", shown)})
    } else {
        json!({"status": "error", "message": format!("Appointment {} not found", shown)})
    }
}

fn flight(
    number: &str,
    origin: &str,
    destination: &str,
    departure: &str,
    arrival: &str,
    price: f64,
    airline: &str,
) -> Value {
    json!({
        "flight_number": number,
        "origin": origin,
        "destination": destination,
        "departure": departure,
        "arrival": arrival,
        "price": price,
        "airline": airline,
    })
}

fn city_code(city: &str) -> String {
    city.chars().take(3).collect::<String>().to_uppercase()
}

pub fn get_flight_options(origin: &str, destination: &str, date: &str) -> Value {
    let from = origin.to_lowercase();
    let to = destination.to_lowercase();

    let flights = if from.contains("san francisco") && to.contains("new york") {
        vec![
            flight("AA123", "SFO", "JFK", "08:00", "11:30", 349.99, "American Airlines"),
            flight("DL456", "SFO", "LGA", "10:15", "13:45", 425.50, "Delta"),
            flight("UA789", "SFO", "EWR", "13:45", "17:15", 315.75, "United"),
        ]
    } else if from.contains("new york") && to.contains("san francisco") {
        vec![
            flight("AA456", "JFK", "SFO", "09:00", "12:30", 379.99, "American Airlines"),
            flight("DL789", "LGA", "SFO", "11:15", "14:45", 405.50, "Delta"),
            flight("UA321", "EWR", "SFO", "14:45", "18:15", 335.75, "United"),
        ]
    } else if from.contains("london") && to.contains("new york") {
        vec![
            flight("BA101", "LHR", "JFK", "10:00", "13:00", 620.00, "British Airways"),
            flight("VS201", "LHR", "JFK", "12:30", "15:30", 580.50, "Virgin Atlantic"),
        ]
    } else {
        vec![flight(
            "Generic",
            &city_code(origin),
            &city_code(destination),
            "09:00",
            "11:00",
            350.00,
            "Generic Airlines",
        )]
    };

    json!({"flights": flights, "origin": origin, "destination": destination, "date": date})
}

/// `rating_min` is parsed as a float; an unparsable value is a tool error.
pub fn query_sqlite_hotels(city: &str, rating_min: Option<&str>) -> Result<Value, ToolError> {
    let Some(hotels) = HOTELS.get(city.to_lowercase()).and_then(Value::as_array) else {
        return Ok(json!({"status": "error", "message": format!("No hotel data available for {}", city)}));
    };

    let min_rating = rating_min
        .map(|raw| {
            raw.trim().parse::<f64>().map_err(|_| {
                ToolError::execution(format!("could not convert string to float: '{}'", raw))
            })
        })
        .transpose()?;

    let results: Vec<Value> = hotels
        .iter()
        .filter(|hotel| match min_rating {
            Some(min) => hotel["rating"].as_f64().map_or(false, |r| r >= min),
            None => true,
        })
        .cloned()
        .collect();
    let count = results.len();

    Ok(json!({
        "status": "success",
        "city": city,
        "hotels": results,
        "result_count": count,
    }))
}

pub fn query_loyalty_programs(destination: Option<&str>) -> Value {
    let mut result = json!({
        "loyalty_programs": USER_PROGRAMS.clone(),
        "point_redemption_opportunities": [],
    });

    if let Some(destination) = destination.map(str::to_lowercase) {
        if let Some(offers) = CITY_OFFERS.get(destination.as_str()) {
            result["destination_offers"] = offers.clone();
        }
        if destination == "new york" {
            result["point_redemption_opportunities"] = NEW_YORK_REDEMPTIONS.clone();
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_is_deterministic() {
        let first = get_current_weather("New York");
        assert_eq!(first["temperature"], 22);
        assert_eq!(first, get_current_weather("New York"));
        assert_eq!(get_current_weather("new york city")["conditions"], "Partly Cloudy");
        assert_eq!(get_current_weather("LONDON")["temperature"], 15);
        assert_eq!(get_current_weather("Paris")["conditions"], "Sunny");
    }

    #[test]
    fn test_calendar_dates() {
        assert_eq!(query_calendar(Some("today"))["appointments"].as_array().unwrap().len(), 3);
        assert_eq!(query_calendar(Some("tomorrow"))["appointments"][0]["id"], 104);
        assert_eq!(query_calendar(Some("2023-06-15"))["appointments"][1]["title"], "Budget Planning");
        let null_date = query_calendar(None);
        assert!(null_date["appointments"].as_array().unwrap().is_empty());
        assert!(null_date["date"].is_null());
        let empty = query_calendar(Some("2030-01-01"));
        assert!(empty["appointments"].as_array().unwrap().is_empty());
        assert_eq!(empty["date"], "2030-01-01");
    }

    #[test]
    fn test_cancel_appointment() {
        let ok = cancel_appointment(101.0);
        assert_eq!(ok["status"], "success");
        assert_eq!(ok["message"], "Appointment 101 canceled successfully");
        let missing = cancel_appointment(999.0);
        assert_eq!(missing["status"], "error");
        assert_eq!(missing["message"], "Appointment 999 not found");
        assert_eq!(cancel_appointment(101.5)["message"], "Appointment 101.5 not found");
        let text = cancel_appointment_by_label("102");
        assert_eq!(text, json!({"status": "error", "message": "Appointment 102 not found"}));
    }

    #[test]
    fn test_flight_routes() {
        let sf_ny = get_flight_options("San Francisco", "New York", "today");
        assert_eq!(sf_ny["flights"].as_array().unwrap().len(), 3);
        assert_eq!(sf_ny["flights"][0]["flight_number"], "AA123");
        assert_eq!(sf_ny["flights"][2]["price"], 315.75);

        let ny_sf = get_flight_options("new york", "san francisco", "today");
        assert_eq!(ny_sf["flights"][1]["flight_number"], "DL789");

        let lon_ny = get_flight_options("London", "New York", "2023-06-15");
        assert_eq!(lon_ny["flights"].as_array().unwrap().len(), 2);
        assert_eq!(lon_ny["date"], "2023-06-15");
    }

    #[test]
    fn test_generic_flight_codes() {
        let other = get_flight_options("Boston", "Chicago", "today");
        let flights = other["flights"].as_array().unwrap();
        assert_eq!(flights.len(), 1);
        assert_eq!(flights[0]["origin"], "BOS");
        assert_eq!(flights[0]["destination"], "CHI");
        assert_eq!(flights[0]["airline"], "Generic Airlines");

        let short = get_flight_options("LA", "", "today");
        assert_eq!(short["flights"][0]["origin"], "LA");
        assert_eq!(short["flights"][0]["destination"], "");
    }

    #[test]
    fn test_hotels_filtering() {
        let all = query_sqlite_hotels("New York", None).unwrap();
        assert_eq!(all["status"], "success");
        assert_eq!(all["result_count"], 7);

        let four_plus = query_sqlite_hotels("new york", Some("4")).unwrap();
        assert_eq!(four_plus["result_count"], 6);
        assert!(four_plus["hotels"]
            .as_array()
            .unwrap()
            .iter()
            .all(|h| h["rating"].as_f64().unwrap() >= 4.0));

        let london = query_sqlite_hotels("London", Some("4.5")).unwrap();
        assert_eq!(london["result_count"], 1);
        assert_eq!(london["hotels"][0]["name"], "The Wellington");
    }

    #[test]
    fn test_hotels_errors() {
        let unknown = query_sqlite_hotels("Paris", None).unwrap();
        assert_eq!(unknown["status"], "error");
        assert_eq!(unknown["message"], "No hotel data available for Paris");

        let err = query_sqlite_hotels("London", Some("four")).unwrap_err();
        assert_eq!(err.to_string(), "could not convert string to float: 'four'");
    }

    #[test]
    fn test_loyalty_programs() {
        let base = query_loyalty_programs(None);
        assert_eq!(base["loyalty_programs"]["hotel_points"]["Hilton Honors"], 125000);
        assert!(base["point_redemption_opportunities"].as_array().unwrap().is_empty());
        assert!(base.get("destination_offers").is_none());

        let ny = query_loyalty_programs(Some("New York"));
        assert_eq!(ny["destination_offers"].as_array().unwrap().len(), 9);
        assert_eq!(ny["point_redemption_opportunities"].as_array().unwrap().len(), 4);

        let london = query_loyalty_programs(Some("london"));
        assert_eq!(london["destination_offers"].as_array().unwrap().len(), 2);
        assert!(london["point_redemption_opportunities"].as_array().unwrap().is_empty());

        assert!(query_loyalty_programs(Some("Tokyo")).get("destination_offers").is_none());
    }
}
