/// Timetable extraction and merge engine.
///
/// Pipeline:
/// ```text
///   Grid (group columns forward-filled)
///        │
///        ▼
///   ┌──────────┐
///   │ classify  │  column names → SlotColumn (day, period)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ extract   │  title cell + room/instructor line below → Observation
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ bucket    │  CourseIdentity → set of periods (first-seen order)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ merge     │  runs of consecutive periods → ScheduleEntry
///   └──────────┘
/// ```

pub mod bucket;
pub mod classify;
pub mod extract;
pub mod merge;
pub mod types;

pub use types::{CourseIdentity, Day, DayAlphabet, Observation, ScheduleEntry, SlotColumn};

use crate::config::TimetableConfig;
use crate::data::model::{Grid, GridError};

use bucket::Buckets;
use classify::classify_columns;
use extract::{GroupColumns, RoomPattern, extract_observations};
use merge::merge_buckets;

/// Turn a normalized grid into merged schedule entries.
///
/// The only failure is a grid that lacks one of the configured group
/// columns; malformed cells and non-slot columns simply contribute nothing.
pub fn merge_timetable(grid: &Grid, cfg: &TimetableConfig) -> Result<Vec<ScheduleEntry>, GridError> {
    let groups = GroupColumns::resolve(grid, cfg.group_columns())?;
    let slots = classify_columns(grid.columns(), cfg.days);
    let pattern = RoomPattern::new(cfg.room_min_digits, cfg.room_max_digits);

    let observations = extract_observations(grid, &slots, groups, &pattern);
    let n_obs = observations.len();
    let buckets = Buckets::from_observations(observations);
    let entries = merge_buckets(&buckets, cfg.days);

    log::info!(
        "{} rows, {} slot columns → {n_obs} observations, {} courses, {} entries",
        grid.len(),
        slots.len(),
        buckets.len(),
        entries.len()
    );
    Ok(entries)
}
