//! Settings
//!
//! Defaults are embedded from `config/tipjar.toml`. A user file with the
//! same layout may override any subset of keys; it is read from an explicit
//! path or from `~/.config/tipjar/tipjar.toml` when present.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::calendar::Calendar;
use crate::error::{Error, Result};
use crate::models::{BucketUnit, ExpenseRecord};
use crate::search::RecordBrowser;
use crate::tip::TipPolicy;

/// Embedded default settings
const DEFAULT_CONFIG: &str = include_str!("../../../config/tipjar.toml");

/// Offsets beyond a day are rejected
const MAX_OFFSET_MINUTES: i32 = 24 * 60 - 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub calendar: CalendarSettings,
    pub browse: BrowseSettings,
    pub reports: ReportSettings,
    pub tip: TipSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarSettings {
    pub utc_offset_minutes: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseSettings {
    pub page_size: usize,
    pub prefetch_threshold: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSettings {
    pub top_n: usize,
    pub trend_days: usize,
    pub trend_weeks: usize,
    pub trend_months: usize,
    pub trend_years: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipSettings {
    /// Percentages offered for quick selection
    pub presets: Vec<f64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            calendar: CalendarSettings {
                utc_offset_minutes: 0,
            },
            browse: BrowseSettings {
                page_size: 10,
                prefetch_threshold: 3,
            },
            reports: ReportSettings {
                top_n: 5,
                trend_days: 7,
                trend_weeks: 4,
                trend_months: 6,
                trend_years: 3,
            },
            tip: TipSettings {
                presets: vec![10.0, 15.0, 18.0, 20.0],
            },
        }
    }
}

/// Default user override location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tipjar").join("tipjar.toml"))
}

impl Settings {
    /// Load the embedded defaults, then layer the override file on top.
    ///
    /// An explicit `override_path` must exist; the default location is only
    /// used when a file is there.
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let mut settings = Self::parse(DEFAULT_CONFIG)?;

        let path = match override_path {
            Some(path) if !path.exists() => {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path().filter(|p| p.exists()),
        };

        if let Some(path) = path {
            let content = fs::read_to_string(&path).map_err(|e| {
                Error::Config(format!("Failed to read {}: {}", path.display(), e))
            })?;
            settings.apply(&content)?;
            info!(path = %path.display(), "Loaded settings override");
        } else {
            debug!("Using default settings");
        }

        Ok(settings)
    }

    /// Parse a complete or partial settings file over the built-in defaults
    pub fn parse(content: &str) -> Result<Self> {
        let mut settings = Self::default();
        settings.apply(content)?;
        Ok(settings)
    }

    /// Override any keys present in `content`, then validate
    fn apply(&mut self, content: &str) -> Result<()> {
        let raw: RawSettings = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid settings TOML: {}", e)))?;

        if let Some(calendar) = raw.calendar {
            if let Some(offset) = calendar.utc_offset_minutes {
                self.calendar.utc_offset_minutes = offset;
            }
        }

        if let Some(browse) = raw.browse {
            if let Some(page_size) = browse.page_size {
                self.browse.page_size = page_size;
            }
            if let Some(threshold) = browse.prefetch_threshold {
                self.browse.prefetch_threshold = threshold;
            }
        }

        if let Some(reports) = raw.reports {
            let r = &mut self.reports;
            r.top_n = reports.top_n.unwrap_or(r.top_n);
            r.trend_days = reports.trend_days.unwrap_or(r.trend_days);
            r.trend_weeks = reports.trend_weeks.unwrap_or(r.trend_weeks);
            r.trend_months = reports.trend_months.unwrap_or(r.trend_months);
            r.trend_years = reports.trend_years.unwrap_or(r.trend_years);
        }

        if let Some(presets) = raw.tip.and_then(|t| t.presets) {
            self.tip.presets = presets;
        }

        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        let offset = self.calendar.utc_offset_minutes;
        if !(-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&offset) {
            return Err(Error::Config(format!(
                "calendar.utc_offset_minutes out of range: {}",
                offset
            )));
        }

        if self.browse.page_size == 0 {
            return Err(Error::Config("browse.page_size must be at least 1".into()));
        }

        let counts = [
            ("reports.top_n", self.reports.top_n),
            ("reports.trend_days", self.reports.trend_days),
            ("reports.trend_weeks", self.reports.trend_weeks),
            ("reports.trend_months", self.reports.trend_months),
            ("reports.trend_years", self.reports.trend_years),
        ];
        for (key, value) in counts {
            if value == 0 {
                return Err(Error::Config(format!("{} must be at least 1", key)));
            }
        }

        if let Some(bad) = self
            .tip
            .presets
            .iter()
            .find(|p| !p.is_finite() || **p < 0.0)
        {
            return Err(Error::Config(format!("Invalid tip preset: {}", bad)));
        }

        Ok(())
    }

    pub fn calendar(&self) -> Calendar {
        Calendar::with_offset_minutes(self.calendar.utc_offset_minutes).unwrap_or_default()
    }

    /// Configured number of trend buckets for a unit
    pub fn trend_count(&self, unit: BucketUnit) -> usize {
        match unit {
            BucketUnit::Day => self.reports.trend_days,
            BucketUnit::Week => self.reports.trend_weeks,
            BucketUnit::Month => self.reports.trend_months,
            BucketUnit::Year => self.reports.trend_years,
        }
    }

    pub fn browser(&self, items: Vec<ExpenseRecord>) -> RecordBrowser {
        RecordBrowser::new(items, self.browse.page_size, self.browse.prefetch_threshold)
    }

    pub fn tip_presets(&self) -> Vec<TipPolicy> {
        self.tip.presets.iter().map(|p| TipPolicy::Percent(*p)).collect()
    }
}

/// Raw structure for TOML parsing; every key is optional
#[derive(Debug, Deserialize)]
struct RawSettings {
    calendar: Option<RawCalendar>,
    browse: Option<RawBrowse>,
    reports: Option<RawReports>,
    tip: Option<RawTip>,
}

#[derive(Debug, Deserialize)]
struct RawCalendar {
    utc_offset_minutes: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct RawBrowse {
    page_size: Option<usize>,
    prefetch_threshold: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawReports {
    top_n: Option<usize>,
    trend_days: Option<usize>,
    trend_weeks: Option<usize>,
    trend_months: Option<usize>,
    trend_years: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawTip {
    presets: Option<Vec<f64>>,
}
