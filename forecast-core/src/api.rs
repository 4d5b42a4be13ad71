use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, header::CONTENT_TYPE};
use std::fmt::Debug;
use tracing::{debug, instrument};
use url::Url;

use crate::{
    Config,
    error::ApiError,
    model::{CityRequest, HistoryResponse, WeatherRecord},
};

const WEATHER_PATH: &[&str] = &["api", "weather", ""];
const HISTORY_PATH: &[&str] = &["api", "weather", "history"];

/// Backend endpoints the client talks to.
#[async_trait]
pub trait WeatherApi: Send + Sync + Debug {
    /// Look up a city. Element 0 is today, the rest is the forecast.
    async fn fetch_weather(&self, city_name: &str) -> Result<Vec<WeatherRecord>, ApiError>;

    /// Fetch the search history without decoding it.
    async fn fetch_search_history(&self) -> Result<HistoryResponse, ApiError>;

    async fn delete_city_from_history(&self, id: &str) -> Result<(), ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpWeatherApi {
    base_url: Url,
    http: Client,
}

impl HttpWeatherApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let invalid = |reason: String| ApiError::InvalidUrl { url: base_url.to_string(), reason };

        let parsed = Url::parse(base_url.trim()).map_err(|e| invalid(e.to_string()))?;
        if parsed.host().is_none() || parsed.cannot_be_a_base() {
            return Err(invalid("URL must have a host".to_string()));
        }

        Ok(Self { base_url: parsed, http: Client::new() })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Endpoint URL below the base. Each segment is percent-encoded, so a
    /// segment can never add path levels, a query or a fragment.
    fn url<I>(&self, segments: I) -> Result<Url, ApiError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http.request(method, url).header(CONTENT_TYPE, "application/json")
    }

    async fn send(&self, endpoint: &str, request: RequestBuilder) -> Result<String, ApiError> {
        let res = request
            .send()
            .await
            .map_err(|source| ApiError::Request { endpoint: endpoint.to_string(), source })?;

        read_body(endpoint, res).await
    }
}

async fn read_body(endpoint: &str, res: Response) -> Result<String, ApiError> {
    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|source| ApiError::Request { endpoint: endpoint.to_string(), source })?;

    if !status.is_success() {
        return Err(ApiError::Status {
            endpoint: endpoint.to_string(),
            status,
            body: truncate_body(&body),
        });
    }

    debug!(endpoint, %status, bytes = body.len(), "response received");
    Ok(body)
}

#[async_trait]
impl WeatherApi for HttpWeatherApi {
    #[instrument(skip(self), level = "debug")]
    async fn fetch_weather(&self, city_name: &str) -> Result<Vec<WeatherRecord>, ApiError> {
        let url = self.url(WEATHER_PATH)?;
        let request = self.request(Method::POST, url).json(&CityRequest { city_name });
        let body = self.send("weather", request).await?;

        serde_json::from_str(&body)
            .map_err(|source| ApiError::Decode { endpoint: "weather".to_string(), source })
    }

    #[instrument(skip(self), level = "debug")]
    async fn fetch_search_history(&self) -> Result<HistoryResponse, ApiError> {
        let url = self.url(HISTORY_PATH)?;
        let request = self.request(Method::GET, url);
        let body = self.send("history", request).await?;
        Ok(HistoryResponse::new(body))
    }

    #[instrument(skip(self), level = "debug")]
    async fn delete_city_from_history(&self, id: &str) -> Result<(), ApiError> {
        let url = self.url(HISTORY_PATH.iter().copied().chain([id]))?;
        let request = self.request(Method::DELETE, url);
        self.send("history delete", request).await?;
        Ok(())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
