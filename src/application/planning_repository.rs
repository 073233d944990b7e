// Repository trait for upstream planning data
use crate::domain::planning::{Forecast, ForecastRequest, Order, Task, WeatherReading};
use async_trait::async_trait;

#[async_trait]
pub trait PlanningRepository: Send + Sync {
    /// List open tasks
    async fn list_tasks(&self) -> anyhow::Result<Vec<Task>>;

    /// List supplier orders
    async fn list_orders(&self) -> anyhow::Result<Vec<Order>>;

    /// Request a demand forecast for a branch
    async fn predict(&self, request: &ForecastRequest) -> anyhow::Result<Forecast>;

    /// Weather readings for a postal code
    async fn weather(&self, plz: &str) -> anyhow::Result<Vec<WeatherReading>>;
}
