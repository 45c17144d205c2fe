// src/lib.rs

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod navigation;
pub mod store;

use anyhow::Context;

use crate::config::Config;
use crate::error::NavigationError;
use crate::navigation::timeline::{DayTimelineSelector, Direction, Step};
use crate::navigation::NavigationCoordinator;
use crate::store::{EntityStore, LoadOutcome, ReferenceData};

/// Everything the presentation layer reads from and calls into.
/// Built once by the binary and handed down; there is no global instance.
pub struct AppState {
    pub store: EntityStore,
    pub navigation: NavigationCoordinator,
}

impl AppState {
    pub fn new(store: EntityStore) -> Self {
        Self {
            store,
            navigation: NavigationCoordinator::new(),
        }
    }

    /// Opens storage and reference data, then restores stored requests.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let storage = db::open(config).context("opening request storage")?;
        let reference = match &config.reference_data {
            Some(path) => ReferenceData::from_json_file(path)?,
            None => store::seed::reference_data(),
        };
        let mut state = Self::new(EntityStore::new(storage, &config.storage_key, reference));
        state.load();
        Ok(state)
    }

    pub fn load(&mut self) -> LoadOutcome {
        self.store.load_from_persistence()
    }

    pub fn open_notification(&mut self, id: i64) -> Result<(), NavigationError> {
        let target = self
            .store
            .notification(id)
            .map(|n| n.target)
            .ok_or(NavigationError::UnknownNotification(id))?;
        self.navigation.dispatch(target.into())
    }

    /// Opens the day timeline on the `index`-th day of the store's schedule.
    pub fn open_schedule_day(&mut self, index: usize) -> Result<(), NavigationError> {
        let schedule = self.store.schedule().to_vec();
        let day = schedule
            .get(index)
            .cloned()
            .ok_or(NavigationError::IndexOutOfRange {
                index,
                len: schedule.len(),
            })?;
        self.navigation.open_day_timeline(day, index, schedule)
    }

    pub fn step_day(&mut self, direction: Direction) -> Result<Step, NavigationError> {
        let mut selector = DayTimelineSelector::attach(&self.navigation)?;
        selector.step(direction, &mut self.navigation)
    }
}
