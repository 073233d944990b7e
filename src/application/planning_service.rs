// Planning service - Upstream planning data with fixed fallbacks
use crate::application::planning_repository::PlanningRepository;
use crate::domain::planning::{
    fallback_orders, fallback_tasks, DashboardSnapshot, Forecast, ForecastRequest, Order, Task,
    WeatherReading,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct PlanningService {
    repository: Arc<dyn PlanningRepository>,
}

impl PlanningService {
    pub fn new(repository: Arc<dyn PlanningRepository>) -> Self {
        Self { repository }
    }

    pub async fn tasks(&self) -> Vec<Task> {
        match self.repository.list_tasks().await {
            Ok(tasks) => tasks,
            Err(e) => {
                tracing::warn!("Falling back to mock tasks: {:#}", e);
                fallback_tasks()
            }
        }
    }

    pub async fn orders(&self) -> Vec<Order> {
        match self.repository.list_orders().await {
            Ok(orders) => orders,
            Err(e) => {
                tracing::warn!("Falling back to mock orders: {:#}", e);
                fallback_orders()
            }
        }
    }

    pub async fn forecast(&self, request: &ForecastRequest) -> Forecast {
        self.repository.predict(request).await.unwrap_or_else(|e| {
            tracing::warn!("Forecast for branch {} unavailable: {:#}", request.branch, e);
            Forecast::default()
        })
    }

    pub async fn weather(&self, plz: &str) -> Vec<WeatherReading> {
        self.repository.weather(plz).await.unwrap_or_else(|e| {
            tracing::warn!("Weather for {} unavailable: {:#}", plz, e);
            Vec::new()
        })
    }

    /// Tasks and orders are fetched independently; each falls back on its own.
    pub async fn dashboard(&self) -> DashboardSnapshot {
        let (tasks, orders) = tokio::join!(self.tasks(), self.orders());
        DashboardSnapshot::new(tasks, orders)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Repository that either answers with fixed data or fails every call.
    pub(crate) struct FakeRepository {
        pub online: bool,
    }

    impl FakeRepository {
        pub(crate) fn online() -> Self {
            Self { online: true }
        }

        pub(crate) fn offline() -> Self {
            Self { online: false }
        }

        fn check(&self) -> anyhow::Result<()> {
            if !self.online {
                anyhow::bail!("connection refused");
            }
            Ok(())
        }
    }

    #[async_trait]
    impl PlanningRepository for FakeRepository {
        async fn list_tasks(&self) -> anyhow::Result<Vec<Task>> {
            self.check()?;
            Ok(vec![Task {
                id: 42,
                title: "Sauerteig füttern".to_string(),
                due_date: "02.07.25".to_string(),
                priority: None,
                description: None,
            }])
        }

        async fn list_orders(&self) -> anyhow::Result<Vec<Order>> {
            self.check()?;
            Ok(Vec::new())
        }

        async fn predict(&self, request: &ForecastRequest) -> anyhow::Result<Forecast> {
            self.check()?;
            Ok(Forecast {
                predictions: (1..=request.horizon).map(|d| f64::from(d * 20)).collect(),
            })
        }

        async fn weather(&self, plz: &str) -> anyhow::Result<Vec<WeatherReading>> {
            self.check()?;
            Ok(vec![WeatherReading {
                date: "2025-06-10".to_string(),
                temperature: 21.5,
                plz: plz.to_string(),
            }])
        }
    }

    #[tokio::test]
    async fn test_tasks_fall_back_when_upstream_fails() {
        let service = PlanningService::new(Arc::new(FakeRepository::offline()));

        let dashboard = service.dashboard().await;
        assert_eq!(dashboard.tasks, fallback_tasks());
        assert_eq!(dashboard.orders, fallback_orders());
        assert!(!dashboard.loading);
    }

    #[tokio::test]
    async fn test_upstream_data_passes_through() {
        let service = PlanningService::new(Arc::new(FakeRepository::online()));

        let dashboard = service.dashboard().await;
        assert_eq!(dashboard.tasks.len(), 1);
        assert_eq!(dashboard.tasks[0].id, 42);
        // An empty upstream list is data, not a failure.
        assert!(dashboard.orders.is_empty());

        let forecast = service.forecast(&ForecastRequest::default()).await;
        assert_eq!(forecast.predictions.len(), 7);
        assert_eq!(forecast.predictions[1], 40.0);

        let weather = service.weather("10115").await;
        assert_eq!(weather[0].plz, "10115");
    }

    #[tokio::test]
    async fn test_forecast_and_weather_fall_back_to_empty() {
        let service = PlanningService::new(Arc::new(FakeRepository::offline()));

        assert!(service.forecast(&ForecastRequest::default()).await.predictions.is_empty());
        assert!(service.weather("10115").await.is_empty());
    }
}
