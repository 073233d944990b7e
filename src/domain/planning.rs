// Planning domain models - Tasks, orders, forecasts and weather
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub title: String,
    pub due_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u32,
    pub date: String,
    pub quantity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    #[serde(default = "ForecastRequest::default_branch")]
    pub branch: String,
    #[serde(default = "ForecastRequest::default_horizon")]
    pub horizon: u32,
    #[serde(default = "ForecastRequest::default_window")]
    pub window: String,
}

impl ForecastRequest {
    fn default_branch() -> String {
        "main".to_string()
    }

    fn default_horizon() -> u32 {
        7
    }

    fn default_window() -> String {
        "1D".to_string()
    }
}

impl Default for ForecastRequest {
    fn default() -> Self {
        Self {
            branch: Self::default_branch(),
            horizon: Self::default_horizon(),
            window: Self::default_window(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub predictions: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub date: String,
    pub temperature: f64,
    #[serde(deserialize_with = "string_or_number")]
    pub plz: String,
}

/// Postal codes arrive either as `"10115"` or as a bare number.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

/// What the dashboard page shows once both of its fetches have settled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub tasks: Vec<Task>,
    pub orders: Vec<Order>,
    pub loading: bool,
}

impl DashboardSnapshot {
    pub fn new(tasks: Vec<Task>, orders: Vec<Order>) -> Self {
        Self {
            tasks,
            orders,
            loading: false,
        }
    }
}

fn task(id: u32, title: &str, due_date: &str, priority: &str, description: &str) -> Task {
    Task {
        id,
        title: title.to_string(),
        due_date: due_date.to_string(),
        priority: Some(priority.to_string()),
        description: Some(description.to_string()),
    }
}

/// Tasks shown when the task endpoint cannot be reached.
pub fn fallback_tasks() -> Vec<Task> {
    vec![
        task(
            1,
            "Pfingstmontag-Planung erstellen",
            "10.06.25",
            "Hoch",
            "Planung für den Pfingstmontag (2. Feiertag) mit angepasstem Sortiment und geänderten Öffnungszeiten.",
        ),
        task(
            2,
            "Dienstag nach Pfingsten planen",
            "10.06.25",
            "Hoch",
            "Planung für Dienstag nach Pfingsten bereits am Freitag erstellen, da zwei Feiertage in Folge.",
        ),
        task(
            3,
            "Pfingst-Bestellung aufgeben",
            "07.06.25",
            "Dringend",
            "Bestellung für Pfingstmontag und Dienstag bereits am Freitag aufgeben.",
        ),
        task(
            4,
            "Inventur durchführen",
            "15.06.25",
            "Mittel",
            "Monatliche Inventur durchführen und Bestand aktualisieren.",
        ),
    ]
}

/// Orders shown when the order endpoint cannot be reached.
pub fn fallback_orders() -> Vec<Order> {
    vec![
        Order {
            id: 1,
            date: "06.06.25".to_string(),
            quantity: 50.0,
            status: Some("Geliefert".to_string()),
            note: None,
        },
        Order {
            id: 2,
            date: "07.06.25".to_string(),
            quantity: 75.0,
            status: Some("In Bearbeitung".to_string()),
            note: None,
        },
        Order {
            id: 3,
            date: "10.06.25".to_string(),
            quantity: 60.0,
            status: Some("Geplant".to_string()),
            note: Some("Pfingstmontag-Bestellung".to_string()),
        },
    ]
}
