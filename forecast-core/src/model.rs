use serde::{Deserialize, Serialize};

/// One day of weather as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherRecord {
    pub city: String,
    pub date: String,
    pub icon: String,
    pub icon_description: String,
    pub temp_f: f64,
    pub wind_speed: f64,
    pub humidity: f64,
}

/// A previously searched city kept by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub name: String,
}

/// Body of the weather lookup request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityRequest<'a> {
    pub city_name: &'a str,
}

/// Unparsed body of the history request.
///
/// Decoding happens when the history list is rendered, so a malformed body
/// only affects that panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryResponse {
    body: String,
}

impl HistoryResponse {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn json(&self) -> serde_json::Result<Vec<HistoryEntry>> {
        serde_json::from_str(&self.body)
    }
}
