// Key-value store trait for persisted display grids
use async_trait::async_trait;
use serde_json::Value;

/// Key under which the full time-to-grid map is saved.
pub const DISPLAY_GRIDS_KEY: &str = "bakeryDisplayGrids";

#[async_trait]
pub trait GridStore: Send + Sync {
    /// Read the value saved under `key`, if any
    async fn load(&self, key: &str) -> anyhow::Result<Option<Value>>;

    /// Replace the value saved under `key`
    async fn save(&self, key: &str, value: Value) -> anyhow::Result<()>;
}
