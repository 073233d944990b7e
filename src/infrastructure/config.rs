use anyhow::{ensure, Context};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub upstream: UpstreamSettings,
    #[serde(default)]
    pub display_case: DisplayCaseSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamSettings {
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DisplayCaseSettings {
    pub name: String,
    pub description: String,
    pub rows: usize,
    pub columns: usize,
    pub times: Vec<String>,
    pub default_time: String,
    pub animation_interval_ms: u64,
    pub storage_path: PathBuf,
    pub restore_on_start: bool,
}

impl Default for DisplayCaseSettings {
    fn default() -> Self {
        Self {
            name: "Haupttheke".to_string(),
            description: "Zentrale Verkaufstheke".to_string(),
            rows: 4,
            columns: 5,
            times: ["06:00", "08:00", "11:00", "14:00", "17:00"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            default_time: "08:00".to_string(),
            animation_interval_ms: 1500,
            storage_path: PathBuf::from("data/bakery-store.json"),
            restore_on_start: true,
        }
    }
}

fn default_timeout_ms() -> u64 {
    3000
}

impl AppConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        let dc = &self.display_case;
        ensure!(dc.rows > 0 && dc.columns > 0, "display case needs at least one row and column");
        ensure!(!dc.times.is_empty(), "display case needs at least one time of day");

        let unique: HashSet<&String> = dc.times.iter().collect();
        ensure!(unique.len() == dc.times.len(), "display case times must be unique");
        ensure!(
            dc.times.contains(&dc.default_time),
            "default time {} is not one of the configured times",
            dc.default_time
        );
        Ok(())
    }
}

pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/bakery"))
        .add_source(config::Environment::with_prefix("BAKERY").separator("__"))
        .build()
        .context("Failed to read configuration")?;

    parse_app_config(settings)
}

fn parse_app_config(settings: config::Config) -> anyhow::Result<AppConfig> {
    let config: AppConfig = settings
        .try_deserialize()
        .context("Invalid configuration")?;
    config.validate()?;
    Ok(config)
}
