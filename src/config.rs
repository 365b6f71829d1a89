//! Configuration loading: group column names, day alphabet, menu defaults.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use uuid::Uuid;

use crate::timetable::DayAlphabet;

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub timetable: TimetableConfig,
    pub menu: MenuConfig,
}

// ---------------------------------------------------------------------------
// Timetable extraction settings
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct TimetableConfig {
    pub term: String,
    pub department: String,
    pub grade: String,
    pub section: String,
    /// Forward-fill the four group columns before extraction.
    pub forward_fill: bool,
    pub days: DayAlphabet,
    pub room_min_digits: usize,
    pub room_max_digits: usize,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self::english()
    }
}

impl TimetableConfig {
    /// `term, department, grade, section` with `Mon..Sun` slot columns.
    pub fn english() -> Self {
        Self {
            term: "term".into(),
            department: "department".into(),
            grade: "grade".into(),
            section: "section".into(),
            forward_fill: true,
            days: DayAlphabet::English,
            room_min_digits: 3,
            room_max_digits: 5,
        }
    }

    /// Column headers and day symbols of the university's published xlsx timetable.
    pub fn korean() -> Self {
        Self {
            term: "학기".into(),
            department: "학부과명".into(),
            grade: "학년".into(),
            section: "반".into(),
            days: DayAlphabet::Korean,
            ..Self::english()
        }
    }

    /// Group column names in identity order.
    pub fn group_columns(&self) -> [&str; 4] {
        [&self.term, &self.department, &self.grade, &self.section]
    }
}

// ---------------------------------------------------------------------------
// Cafeteria menu settings
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct MenuConfig {
    pub cafe_id: Uuid,
    pub default_price: u32,
    /// Leading rows of the scraped table that hold column titles.
    pub header_rows: usize,
    /// Upper bound on data rows taken from the table; `None` keeps all.
    pub max_rows: Option<usize>,
    /// Year assigned to `M/D` dates; the current local year when unset.
    pub year: Option<i32>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            cafe_id: Uuid::nil(),
            default_price: 5500,
            header_rows: 1,
            max_rows: Some(41),
            year: None,
        }
    }
}

/// Load a TOML config file. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        log::warn!("config file {} not found, using defaults", path.display());
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config =
        toml::from_str(&contents).context("Failed to parse config file as TOML")?;
    Ok(config)
}
