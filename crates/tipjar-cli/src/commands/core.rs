//! Shared session setup
//!
//! Every command runs against a [`Session`]: the loaded settings, the record
//! store, and a single "now" captured at startup.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tipjar_core::{Calendar, ExpenseRecord, JsonFileStore, RecordStore, Settings};
use tracing::debug;

pub struct Session {
    pub store: JsonFileStore,
    pub settings: Settings,
    pub calendar: Calendar,
    pub now: DateTime<Utc>,
    pub json: bool,
}

impl Session {
    pub fn new(store: JsonFileStore, settings: Settings, now: DateTime<Utc>, json: bool) -> Self {
        let calendar = settings.calendar();
        Self {
            store,
            settings,
            calendar,
            now,
            json,
        }
    }

    /// Current record snapshot, newest first
    pub fn records(&self) -> Result<Vec<ExpenseRecord>> {
        self.store
            .fetch_all()
            .with_context(|| format!("Failed to read records from {}", self.store.path().display()))
    }
}

/// Load settings and open the record file
pub fn open_session(data: &Path, config: Option<&Path>, json: bool) -> Result<Session> {
    let settings = Settings::load(config).context("Failed to load settings")?;
    debug!(data = %data.display(), "Opening record store");
    Ok(Session::new(JsonFileStore::new(data), settings, Utc::now(), json))
}
