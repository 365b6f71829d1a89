//! Timetable extraction and merge engine.
//!
//! Loads a day/period timetable grid, pairs each course title with the
//! room and instructor line beneath it, and merges consecutive periods of
//! the same course into `Mon1~3` style entries.

pub mod config;
pub mod data;
pub mod menu;
pub mod timetable;

pub use config::{Config, MenuConfig, TimetableConfig, load_config};
pub use data::model::{Grid, GridError};
pub use timetable::{ScheduleEntry, merge_timetable};
