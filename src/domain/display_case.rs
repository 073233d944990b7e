// Display case domain model - Per-time product grids and drag-and-drop gestures
use super::product::Product;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("no grid configured for time {0}")]
    UnknownTime(String),
    #[error("slot ({row}, {col}) is outside the {rows}x{columns} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        columns: usize,
    },
    #[error("no product at catalog index {0}")]
    UnknownCatalogIndex(usize),
    #[error("no product with id {0} in the catalog")]
    UnknownProduct(u32),
    #[error("stored grids do not match the configured display case: {0}")]
    IncompatibleSnapshot(String),
}

/// Static description of the physical display case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayCase {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub rows: usize,
    pub columns: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub product: Option<Product>,
}

impl Slot {
    pub fn is_empty(&self) -> bool {
        self.product.is_none()
    }
}

/// A `rows x columns` arrangement of slots for one time of day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    cells: Vec<Vec<Slot>>,
}

impl Grid {
    pub fn empty(rows: usize, columns: usize) -> Self {
        Self {
            cells: vec![vec![Slot::default(); columns]; rows],
        }
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn columns(&self) -> usize {
        self.cells.first().map(Vec::len).unwrap_or(0)
    }

    pub fn has_shape(&self, rows: usize, columns: usize) -> bool {
        self.cells.len() == rows && self.cells.iter().all(|row| row.len() == columns)
    }

    pub fn slot(&self, row: usize, col: usize) -> Option<&Slot> {
        self.cells.get(row).and_then(|r| r.get(col))
    }

    pub fn product_at(&self, row: usize, col: usize) -> Option<&Product> {
        self.slot(row, col).and_then(|s| s.product.as_ref())
    }

    pub fn occupied(&self) -> usize {
        self.cells.iter().flatten().filter(|s| !s.is_empty()).count()
    }

    fn slot_mut(&mut self, row: usize, col: usize) -> Result<&mut Slot, GridError> {
        let rows = self.rows();
        let columns = self.columns();
        self.cells
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(GridError::OutOfBounds {
                row,
                col,
                rows,
                columns,
            })
    }

    fn clear(&mut self) -> usize {
        let mut cleared = 0;
        for slot in self.cells.iter_mut().flatten() {
            if slot.product.take().is_some() {
                cleared += 1;
            }
        }
        cleared
    }
}

/// Every configured time label mapped to its grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeGridMap(BTreeMap<String, Grid>);

impl TimeGridMap {
    pub fn get(&self, time: &str) -> Option<&Grid> {
        self.0.get(time)
    }

    fn get_mut(&mut self, time: &str) -> Result<&mut Grid, GridError> {
        self.0
            .get_mut(time)
            .ok_or_else(|| GridError::UnknownTime(time.to_string()))
    }

    fn insert(&mut self, time: String, grid: Grid) {
        self.0.insert(time, grid);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// One end of a drag-and-drop gesture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DropTarget {
    Catalog { index: usize },
    Slot { time: String, row: usize, col: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragDrop {
    pub source: DropTarget,
    #[serde(default)]
    pub destination: Option<DropTarget>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropOutcome {
    Placed,
    Moved,
    Removed,
    Ignored,
}

/// A single step of the day progression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnimationFrame {
    pub index: usize,
    pub time: String,
    pub grid: Grid,
}

/// Owns the per-time grids and the active time selection.
#[derive(Debug, Clone)]
pub struct DisplayCaseGrids {
    times: Vec<String>,
    rows: usize,
    columns: usize,
    grids: TimeGridMap,
    active: String,
}

impl DisplayCaseGrids {
    pub fn initialize(times: Vec<String>, rows: usize, columns: usize) -> Self {
        let mut grids = TimeGridMap::default();
        for time in &times {
            grids.insert(time.clone(), Grid::empty(rows, columns));
        }
        let active = times.first().cloned().unwrap_or_default();

        Self {
            times,
            rows,
            columns,
            grids,
            active,
        }
    }

    /// Replace all grids with a previously saved map. The saved map must carry
    /// exactly the configured times and dimensions.
    pub fn restore(&mut self, saved: TimeGridMap) -> Result<(), GridError> {
        if saved.len() != self.times.len() {
            return Err(GridError::IncompatibleSnapshot(format!(
                "expected {} times, found {}",
                self.times.len(),
                saved.len()
            )));
        }
        for time in &self.times {
            let grid = saved
                .get(time)
                .ok_or_else(|| GridError::IncompatibleSnapshot(format!("missing time {}", time)))?;
            if !grid.has_shape(self.rows, self.columns) {
                return Err(GridError::IncompatibleSnapshot(format!(
                    "grid for {} is not {}x{}",
                    time, self.rows, self.columns
                )));
            }
        }
        self.grids = saved;
        Ok(())
    }

    pub fn times(&self) -> &[String] {
        &self.times
    }

    pub fn grids(&self) -> &TimeGridMap {
        &self.grids
    }

    pub fn grid(&self, time: &str) -> Option<&Grid> {
        self.grids.get(time)
    }

    pub fn active_time(&self) -> &str {
        &self.active
    }

    pub fn select_time(&mut self, time: &str) {
        self.active = time.to_string();
    }

    /// Grid for the active time, or an empty grid when the label is unknown.
    pub fn current_grid(&self) -> Cow<'_, Grid> {
        match self.grids.get(&self.active) {
            Some(grid) => Cow::Borrowed(grid),
            None => Cow::Owned(Grid::empty(self.rows, self.columns)),
        }
    }

    pub fn place_product(
        &mut self,
        time: &str,
        row: usize,
        col: usize,
        product: Product,
    ) -> Result<(), GridError> {
        let slot = self.grids.get_mut(time)?.slot_mut(row, col)?;
        slot.product = Some(product);
        Ok(())
    }

    /// Clears a slot and hands back whatever it held.
    pub fn remove_product(
        &mut self,
        time: &str,
        row: usize,
        col: usize,
    ) -> Result<Option<Product>, GridError> {
        let slot = self.grids.get_mut(time)?.slot_mut(row, col)?;
        Ok(slot.product.take())
    }

    pub fn reset(&mut self, time: &str) -> Result<usize, GridError> {
        Ok(self.grids.get_mut(time)?.clear())
    }

    pub fn apply_drop(&mut self, drop: &DragDrop, catalog: &[Product]) -> Result<DropOutcome, GridError> {
        let Some(destination) = &drop.destination else {
            return Ok(DropOutcome::Ignored);
        };

        match (&drop.source, destination) {
            (DropTarget::Catalog { index }, DropTarget::Slot { time, row, col }) => {
                let product = catalog
                    .get(*index)
                    .cloned()
                    .ok_or(GridError::UnknownCatalogIndex(*index))?;
                self.place_product(time, *row, *col, product)?;
                Ok(DropOutcome::Placed)
            }
            (DropTarget::Slot { time, row, col }, DropTarget::Slot { time: to_time, row: to_row, col: to_col }) => {
                if (time, row, col) == (to_time, to_row, to_col) {
                    return Ok(DropOutcome::Ignored);
                }
                // Validate the destination before emptying the source.
                self.grids.get_mut(to_time)?.slot_mut(*to_row, *to_col)?;
                match self.remove_product(time, *row, *col)? {
                    Some(product) => {
                        self.place_product(to_time, *to_row, *to_col, product)?;
                        Ok(DropOutcome::Moved)
                    }
                    None => Ok(DropOutcome::Ignored),
                }
            }
            (DropTarget::Slot { time, row, col }, DropTarget::Catalog { .. }) => {
                match self.remove_product(time, *row, *col)? {
                    Some(_) => Ok(DropOutcome::Removed),
                    None => Ok(DropOutcome::Ignored),
                }
            }
            (DropTarget::Catalog { .. }, DropTarget::Catalog { .. }) => Ok(DropOutcome::Ignored),
        }
    }
}
