use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Day – one of the seven weekday symbols a slot column can start with
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Mon,
        Day::Tue,
        Day::Wed,
        Day::Thu,
        Day::Fri,
        Day::Sat,
        Day::Sun,
    ];
}

/// Which spelling of the week the slot column headers use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayAlphabet {
    /// `Mon`, `Tue`, ... `Sun`
    #[default]
    English,
    /// `월`, `화`, ... `일`
    Korean,
}

impl DayAlphabet {
    pub fn symbols(self) -> [&'static str; 7] {
        match self {
            DayAlphabet::English => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
            DayAlphabet::Korean => ["월", "화", "수", "목", "금", "토", "일"],
        }
    }

    pub fn symbol(self, day: Day) -> &'static str {
        self.symbols()[day as usize]
    }

    /// Exact symbol lookup; no trimming, no case folding.
    pub fn day(self, symbol: &str) -> Option<Day> {
        self.symbols()
            .iter()
            .position(|s| *s == symbol)
            .map(|i| Day::ALL[i])
    }
}

// ---------------------------------------------------------------------------
// SlotColumn – a grid column that stands for one (day, period) unit
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotColumn {
    /// Position of the column in the grid.
    pub index: usize,
    pub name: String,
    pub day: Day,
    pub period: u32,
}

// ---------------------------------------------------------------------------
// Observations and identities
// ---------------------------------------------------------------------------

/// Everything that must match for two periods to merge into one entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CourseIdentity {
    pub term: String,
    pub department: String,
    pub grade: String,
    pub section: String,
    pub day: Day,
    pub title: String,
    pub room: String,
    pub instructor: String,
}

/// One non-empty title cell in a slot column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub identity: CourseIdentity,
    pub period: u32,
}

// ---------------------------------------------------------------------------
// ScheduleEntry – the merged output record
// ---------------------------------------------------------------------------

/// A course identity with its day and a single period (`Mon3`) or a run of
/// consecutive periods (`Mon1~3`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub term: String,
    pub department: String,
    pub grade: String,
    pub section: String,
    pub day_period: String,
    pub title: String,
    pub room: String,
    pub instructor: String,
}

impl ScheduleEntry {
    pub const HEADERS: [&'static str; 8] = [
        "term",
        "department",
        "grade",
        "section",
        "day_period",
        "title",
        "room",
        "instructor",
    ];

    /// Field values in header order.
    pub fn record(&self) -> [&str; 8] {
        [
            self.term.as_str(),
            self.department.as_str(),
            self.grade.as_str(),
            self.section.as_str(),
            self.day_period.as_str(),
            self.title.as_str(),
            self.room.as_str(),
            self.instructor.as_str(),
        ]
    }
}

impl fmt::Display for ScheduleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}-{} {} {}",
            self.term, self.department, self.grade, self.section, self.day_period, self.title
        )?;
        if !self.room.is_empty() || !self.instructor.is_empty() {
            write!(f, " ({} {})", self.room, self.instructor)?;
        }
        Ok(())
    }
}
