// Display case service - Owns the grid state, persists it, and runs the day progression
use crate::application::grid_store::{GridStore, DISPLAY_GRIDS_KEY};
use crate::domain::display_case::{
    AnimationFrame, DisplayCase, DisplayCaseGrids, DragDrop, DropOutcome, Grid, GridError,
    TimeGridMap,
};
use crate::domain::product::Product;
use crate::infrastructure::config::DisplayCaseSettings;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, Mutex};

#[derive(Debug, Error)]
pub enum DisplayCaseError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("a day progression is already running")]
    AnimationAlreadyRunning,
    #[error("failed to save display grids: {0:#}")]
    Storage(anyhow::Error),
}

/// Snapshot of what the display case page renders.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayCaseView {
    pub display_case: DisplayCase,
    pub times: Vec<String>,
    pub active_time: String,
    pub animating: bool,
    pub grid: Grid,
}

/// Result of a mutation: what the active time now shows.
#[derive(Debug, Clone, Serialize)]
pub struct GridUpdate<T> {
    pub outcome: T,
    pub active_time: String,
    pub grid: Grid,
}

#[derive(Clone)]
pub struct DisplayCaseService {
    display_case: DisplayCase,
    catalog: Arc<Vec<Product>>,
    state: Arc<Mutex<DisplayCaseGrids>>,
    store: Arc<dyn GridStore>,
    animating: Arc<AtomicBool>,
    animation_interval: Duration,
}

impl DisplayCaseService {
    pub async fn initialize(
        settings: &DisplayCaseSettings,
        catalog: Vec<Product>,
        store: Arc<dyn GridStore>,
    ) -> Self {
        let mut grids =
            DisplayCaseGrids::initialize(settings.times.clone(), settings.rows, settings.columns);

        if settings.restore_on_start {
            restore_saved_grids(&mut grids, store.as_ref()).await;
        }
        grids.select_time(&settings.default_time);

        Self {
            display_case: DisplayCase {
                id: 1,
                name: settings.name.clone(),
                description: settings.description.clone(),
                rows: settings.rows,
                columns: settings.columns,
            },
            catalog: Arc::new(catalog),
            state: Arc::new(Mutex::new(grids)),
            store,
            animating: Arc::new(AtomicBool::new(false)),
            animation_interval: Duration::from_millis(settings.animation_interval_ms),
        }
    }

    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    pub async fn overview(&self) -> DisplayCaseView {
        let grids = self.state.lock().await;
        DisplayCaseView {
            display_case: self.display_case.clone(),
            times: grids.times().to_vec(),
            active_time: grids.active_time().to_string(),
            animating: self.is_animating(),
            grid: grids.current_grid().into_owned(),
        }
    }

    pub async fn grids(&self) -> TimeGridMap {
        self.state.lock().await.grids().clone()
    }

    /// Switch the active time. Unknown labels show an empty grid.
    pub async fn select_time(&self, time: &str) -> GridUpdate<()> {
        let mut grids = self.state.lock().await;
        grids.select_time(time);
        tracing::debug!("Active display time is now {}", time);
        GridUpdate {
            outcome: (),
            active_time: grids.active_time().to_string(),
            grid: grids.current_grid().into_owned(),
        }
    }

    pub async fn place_product(
        &self,
        time: &str,
        row: usize,
        col: usize,
        product_id: u32,
    ) -> Result<GridUpdate<Product>, DisplayCaseError> {
        let product = self
            .catalog
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
            .ok_or(GridError::UnknownProduct(product_id))?;

        self.mutate(|grids| {
            grids.place_product(time, row, col, product.clone())?;
            Ok(product)
        })
        .await
    }

    pub async fn remove_product(
        &self,
        time: &str,
        row: usize,
        col: usize,
    ) -> Result<GridUpdate<Option<Product>>, DisplayCaseError> {
        self.mutate(|grids| grids.remove_product(time, row, col)).await
    }

    pub async fn reset(&self, time: &str) -> Result<GridUpdate<usize>, DisplayCaseError> {
        self.mutate(|grids| grids.reset(time)).await
    }

    pub async fn apply_drop(&self, drop: &DragDrop) -> Result<GridUpdate<DropOutcome>, DisplayCaseError> {
        self.mutate(|grids| grids.apply_drop(drop, &self.catalog)).await
    }

    /// Step through every configured time, one frame per interval.
    /// Only one progression may run at a time.
    pub fn animate(&self) -> Result<mpsc::Receiver<AnimationFrame>, DisplayCaseError> {
        if self
            .animating
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(DisplayCaseError::AnimationAlreadyRunning);
        }
        let guard = AnimationGuard(self.animating.clone());

        let (tx, rx) = mpsc::channel(16);
        let state = self.state.clone();
        let interval = self.animation_interval;

        tokio::spawn(async move {
            let times = state.lock().await.times().to_vec();

            for (index, time) in times.into_iter().enumerate() {
                if index > 0 {
                    tokio::time::sleep(interval).await;
                }
                let frame = {
                    let mut grids = state.lock().await;
                    grids.select_time(&time);
                    AnimationFrame {
                        index,
                        grid: grids.current_grid().into_owned(),
                        time,
                    }
                };
                // A disconnected viewer does not stop the progression.
                let _ = tx.send(frame).await;
            }
            tracing::debug!("Day progression finished");
            // Release before closing the channel.
            drop(guard);
            drop(tx);
        });

        Ok(rx)
    }

    pub fn is_animating(&self) -> bool {
        self.animating.load(Ordering::Acquire)
    }

    /// Apply `op` to a copy of the grids, save the copy if it changed, then commit it.
    /// The lock is held across the save so writes land in mutation order.
    async fn mutate<T>(
        &self,
        op: impl FnOnce(&mut DisplayCaseGrids) -> Result<T, GridError>,
    ) -> Result<GridUpdate<T>, DisplayCaseError> {
        let mut grids = self.state.lock().await;
        let mut next = grids.clone();
        let outcome = op(&mut next)?;

        if next.grids() != grids.grids() {
            let value = serde_json::to_value(next.grids())
                .map_err(|e| DisplayCaseError::Storage(e.into()))?;
            self.store
                .save(DISPLAY_GRIDS_KEY, value)
                .await
                .map_err(DisplayCaseError::Storage)?;
            *grids = next;
            tracing::debug!("Saved display grids");
        }

        Ok(GridUpdate {
            outcome,
            active_time: grids.active_time().to_string(),
            grid: grids.current_grid().into_owned(),
        })
    }
}

struct AnimationGuard(Arc<AtomicBool>);

impl Drop for AnimationGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

async fn restore_saved_grids(grids: &mut DisplayCaseGrids, store: &dyn GridStore) {
    let saved = match store.load(DISPLAY_GRIDS_KEY).await {
        Ok(Some(value)) => value,
        Ok(None) => return,
        Err(e) => {
            tracing::warn!("Could not read saved display grids, starting empty: {:#}", e);
            return;
        }
    };

    let restored = serde_json::from_value::<TimeGridMap>(saved)
        .map_err(|e| GridError::IncompatibleSnapshot(e.to_string()))
        .and_then(|map| grids.restore(map));

    match restored {
        Ok(()) => tracing::info!("Restored display grids for {} times", grids.times().len()),
        Err(e) => tracing::warn!("Ignoring saved display grids: {}", e),
    }
}
