// HTTP planning repository - Talks to the upstream planning backend
use crate::application::planning_repository::PlanningRepository;
use crate::domain::planning::{Forecast, ForecastRequest, Order, Task, WeatherReading};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Body posted to `/predict`. The Python predictor reads `days_ahead`,
/// newer backends read `horizon`, so both are sent.
#[derive(Debug, Serialize)]
struct PredictBody<'a> {
    branch: &'a str,
    horizon: u32,
    days_ahead: u32,
    window: &'a str,
}

impl<'a> From<&'a ForecastRequest> for PredictBody<'a> {
    fn from(request: &'a ForecastRequest) -> Self {
        Self {
            branch: &request.branch,
            horizon: request.horizon,
            days_ahead: request.horizon,
            window: &request.window,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PredictReply {
    predictions: Vec<PredictionEntry>,
}

/// One forecast entry: either a plain number or a per-day bread/pastry split.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PredictionEntry {
    Value(f64),
    Daily { bread: f64, pastry: f64 },
}

impl PredictionEntry {
    fn total(&self) -> f64 {
        match self {
            PredictionEntry::Value(value) => *value,
            PredictionEntry::Daily { bread, pastry } => bread + pastry,
        }
    }
}

impl From<PredictReply> for Forecast {
    fn from(reply: PredictReply) -> Self {
        Forecast {
            predictions: reply.predictions.iter().map(PredictionEntry::total).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpPlanningRepository {
    base_url: String,
    client: reqwest::Client,
}

impl HttpPlanningRepository {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_json<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Planning backend answered {}: {}", status, body);
        }

        response
            .json::<T>()
            .await
            .context("Failed to parse planning backend response")
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .client
            .get(self.url(path))
            .header("Accept", "application/json")
            .send()
            .await
            .with_context(|| format!("Failed to send GET {}", path))?;

        self.read_json(response).await
    }
}

#[async_trait]
impl PlanningRepository for HttpPlanningRepository {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        self.get_json("/tasks").await
    }

    async fn list_orders(&self) -> Result<Vec<Order>> {
        self.get_json("/orders").await
    }

    async fn predict(&self, request: &ForecastRequest) -> Result<Forecast> {
        let response = self
            .client
            .post(self.url("/predict"))
            .json(&PredictBody::from(request))
            .send()
            .await
            .context("Failed to send POST /predict")?;

        let reply: PredictReply = self.read_json(response).await?;
        Ok(reply.into())
    }

    async fn weather(&self, plz: &str) -> Result<Vec<WeatherReading>> {
        let path = format!("/weather/{}", urlencoding::encode(plz));
        self.get_json(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;

    async fn spawn_backend(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    fn repository(base_url: String) -> HttpPlanningRepository {
        HttpPlanningRepository::new(base_url, Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn test_reads_upstream_lists() {
        let router = Router::new()
            .route(
                "/tasks",
                get(|| async {
                    Json(json!([{"id": 1, "title": "Ofen reinigen", "due_date": "12.06.25", "priority": "Niedrig"}]))
                }),
            )
            .route(
                "/orders",
                get(|| async { Json(json!([{"id": 7, "date": "11.06.25", "quantity": 40}])) }),
            );
        let repo = repository(spawn_backend(router).await);

        let tasks = repo.list_tasks().await.unwrap();
        assert_eq!(tasks[0].title, "Ofen reinigen");
        assert_eq!(tasks[0].priority.as_deref(), Some("Niedrig"));

        let orders = repo.list_orders().await.unwrap();
        assert_eq!(orders[0].quantity, 40.0);
        assert!(orders[0].status.is_none());
    }

    #[tokio::test]
    async fn test_predict_posts_request_body() {
        let router = Router::new().route(
            "/predict",
            post(|Json(req): Json<ForecastRequest>| async move {
                let predictions: Vec<f64> = (0..req.horizon).map(f64::from).collect();
                Json(json!({ "predictions": predictions, "branch": req.branch }))
            }),
        );
        let repo = repository(spawn_backend(router).await);

        let request = ForecastRequest {
            horizon: 3,
            ..ForecastRequest::default()
        };
        let forecast = repo.predict(&request).await.unwrap();
        assert_eq!(forecast.predictions, vec![0.0, 1.0, 2.0]);
    }

    #[derive(Deserialize)]
    struct DemandRequest {
        branch: String,
        days_ahead: u32,
    }

    #[tokio::test]
    async fn test_predict_against_daily_split_backend() {
        let router = Router::new().route(
            "/predict",
            post(|Json(req): Json<DemandRequest>| async move {
                let predictions: Vec<_> = (1..=req.days_ahead)
                    .map(|day| json!({"day": day, "bread": 20 * day, "pastry": 10 * day}))
                    .collect();
                Json(json!({ "branch": req.branch, "predictions": predictions }))
            }),
        );
        let repo = repository(spawn_backend(router).await);

        let request = ForecastRequest {
            horizon: 3,
            ..ForecastRequest::default()
        };
        let forecast = repo.predict(&request).await.unwrap();
        assert_eq!(forecast.predictions, vec![30.0, 60.0, 90.0]);
    }

    #[tokio::test]
    async fn test_weather_encodes_postal_code() {
        let router = Router::new().route(
            "/weather/:plz",
            get(|Path(plz): Path<String>| async move {
                Json(json!([{"date": "2025-06-10", "temperature": 18.25, "plz": plz}]))
            }),
        );
        let repo = repository(spawn_backend(router).await);

        let readings = repo.weather("10 115").await.unwrap();
        assert_eq!(readings[0].plz, "10 115");
        assert_eq!(readings[0].temperature, 18.25);
    }

    #[tokio::test]
    async fn test_error_status_is_an_error() {
        let router = Router::new().route(
            "/tasks",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
        );
        let repo = repository(spawn_backend(router).await);

        let err = repo.list_tasks().await.unwrap_err();
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_an_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let repo = repository(format!("http://{}", addr));
        assert!(repo.list_orders().await.is_err());
    }
}
