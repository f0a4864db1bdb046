//! 演示工具：旅行与日程助手使用的静态数据工具
//!
//! Static travel and scheduling tools used by the `travel_demo` binary.
//! Every tool returns hard-coded data; nothing is fetched.
//!
//! ```rust,no_run
//! use gemini_live_agent::{demo, Agent};
//!
//! # fn main() -> gemini_live_agent::Result<()> {
//! let mut agent = Agent::new("gemini-2.0-flash-exp", None)?;
//! demo::register_demo_tools(&mut agent);
//! assert_eq!(agent.tools().len(), 6);
//! # Ok(())
//! # }
//! ```

mod data;

use serde::Deserialize;

use crate::agent::Agent;
use crate::tools::FunctionTool;

pub use data::{
    cancel_appointment, cancel_appointment_by_label, get_current_weather, get_flight_options,
    query_calendar, query_loyalty_programs, query_sqlite_hotels,
};

pub const TRAVEL_ASSISTANT_INSTRUCTION: &str = "You are a helpful travel and scheduling assistant. \
Be concise, informative, and focus on providing practical information. When giving recommendations, \
prioritize options that make the best use of the user's loyalty program points.";

#[derive(Debug, Deserialize)]
struct WeatherArgs {
    location: String,
}

/// A missing `date` means today; an explicit `null` is kept.
#[derive(Debug, Deserialize)]
struct CalendarArgs {
    #[serde(default = "today")]
    date: Option<String>,
}

fn today() -> Option<String> {
    Some("today".to_string())
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AppointmentId {
    Number(f64),
    Label(String),
}

#[derive(Debug, Deserialize)]
struct CancelArgs {
    appointment_id: AppointmentId,
}

#[derive(Debug, Deserialize)]
struct FlightArgs {
    origin: String,
    destination: String,
    date: String,
}

/// The model declares `rating_min` as a string but sometimes sends a number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Rating {
    Number(f64),
    Text(String),
}

impl Rating {
    fn into_text(self) -> String {
        match self {
            Rating::Number(n) => n.to_string(),
            Rating::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
struct HotelArgs {
    city: String,
    #[serde(default)]
    rating_min: Option<Rating>,
}

#[derive(Debug, Deserialize)]
struct LoyaltyArgs {
    #[serde(default)]
    destination: Option<String>,
}

pub fn weather_tool() -> FunctionTool {
    FunctionTool::builder("get_current_weather")
        .description(
            "Gets the current weather for a given location.\n\n\
             Args:\n    location: The city name (e.g., \"New York\")\n\n\
             Returns:\n    dict: Weather data including temperature, unit, and conditions",
        )
        .param::<str>("location")
        .handler(|args: WeatherArgs| Ok(get_current_weather(&args.location)))
}

pub fn calendar_tool() -> FunctionTool {
    FunctionTool::builder("query_calendar")
        .description(
            "Retrieves user's calendar appointments for a specific date.\n\n\
             Args:\n    date: Date to query, can be \"today\", \"tomorrow\", or a specific date\n          \
             (e.g., \"2023-06-15\"). Defaults to \"today\".\n\n\
             Returns:\n    dict: Collection of appointments with their details",
        )
        .optional_param::<str>("date")
        .handler(|args: CalendarArgs| Ok(query_calendar(args.date.as_deref())))
}

pub fn cancel_appointment_tool() -> FunctionTool {
    FunctionTool::builder("cancel_appointment")
        .description(
            "Cancels a specific calendar appointment.\n\n\
             Args:\n    appointment_id: The unique identifier of the appointment to cancel\n\n\
             Returns:\n    dict: Operation status and message",
        )
        .param::<i64>("appointment_id")
        .handler(|args: CancelArgs| {
            Ok(match args.appointment_id {
                AppointmentId::Number(id) => cancel_appointment(id),
                AppointmentId::Label(label) => cancel_appointment_by_label(&label),
            })
        })
}

pub fn flight_options_tool() -> FunctionTool {
    FunctionTool::builder("get_flight_options")
        .description(
            "Retrieves available flight options between locations.\n\n\
             Args:\n    origin: Departure city (e.g., \"San Francisco\")\n    \
             destination: Arrival city (e.g., \"New York\")\n    \
             date: Travel date (e.g., \"today\", \"2023-06-15\")\n\n\
             Returns:\n    dict: Available flight options with details",
        )
        .param::<str>("origin")
        .param::<str>("destination")
        .param::<str>("date")
        .handler(|args: FlightArgs| {
            Ok(get_flight_options(&args.origin, &args.destination, &args.date))
        })
}

pub fn hotels_tool() -> FunctionTool {
    FunctionTool::builder("query_sqlite_hotels")
        .description(
            "Queries the hotel database for accommodations matching specific criteria.\n\n\
             Args:\n    city: Destination city (e.g., \"New York\")\n    \
             rating_min: Minimum rating value to filter hotels by (e.g., \"4\")\n\n\
             Returns:\n    dict: Matching hotels with details and counts",
        )
        .param::<str>("city")
        .optional_param::<str>("rating_min")
        .handler(|args: HotelArgs| {
            let rating = args.rating_min.map(Rating::into_text);
            query_sqlite_hotels(&args.city, rating.as_deref())
        })
}

pub fn loyalty_programs_tool() -> FunctionTool {
    FunctionTool::builder("query_loyalty_programs")
        .description(
            "Retrieves user's loyalty program points and eligible travel discounts.\n\n\
             Args:\n    destination: Optional city to filter for location-specific deals\n\n\
             Returns:\n    dict: Available loyalty points, status levels, and special offers",
        )
        .optional_param::<Option<String>>("destination")
        .handler(|args: LoyaltyArgs| Ok(query_loyalty_programs(args.destination.as_deref())))
}

/// All six demo tools, in registration order.
pub fn demo_tools() -> Vec<FunctionTool> {
    vec![
        weather_tool(),
        calendar_tool(),
        cancel_appointment_tool(),
        flight_options_tool(),
        hotels_tool(),
        loyalty_programs_tool(),
    ]
}

pub fn register_demo_tools(agent: &mut Agent) {
    for tool in demo_tools() {
        agent.add_tool(tool);
    }
}
