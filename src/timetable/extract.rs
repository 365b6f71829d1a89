use std::collections::HashSet;

use regex::Regex;

use crate::data::model::{Grid, GridError};

use super::types::{CourseIdentity, Observation, SlotColumn};

// ---------------------------------------------------------------------------
// Room + instructor line: "<3–5 digit room> <instructor>"
// ---------------------------------------------------------------------------

/// The text found under a title cell when it names a room and an instructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomInstructor {
    pub room: String,
    pub instructor: String,
}

#[derive(Debug, Clone)]
pub struct RoomPattern {
    re: Regex,
}

impl Default for RoomPattern {
    fn default() -> Self {
        Self::new(3, 5)
    }
}

impl RoomPattern {
    /// Room numbers are `min_digits..=max_digits` ASCII digits. Bounds are
    /// swapped if given backwards and capped at 32.
    pub fn new(min_digits: usize, max_digits: usize) -> Self {
        let (lo, hi) = if min_digits <= max_digits {
            (min_digits, max_digits)
        } else {
            (max_digits, min_digits)
        };
        let (lo, hi) = (lo.clamp(1, 32), hi.clamp(1, 32));
        let re = Regex::new(&format!(r"^([0-9]{{{lo},{hi}}})\s+(.+)$"))
            .expect("room pattern built from numeric bounds is valid");
        RoomPattern { re }
    }

    /// Split a trimmed cell into room and instructor, or `None` if it is
    /// anything else (an empty cell, another title, a note).
    pub fn parse(&self, cell: &str) -> Option<RoomInstructor> {
        let caps = self.re.captures(cell.trim())?;
        Some(RoomInstructor {
            room: caps.get(1)?.as_str().to_string(),
            instructor: caps.get(2)?.as_str().to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Group columns resolved against one grid
// ---------------------------------------------------------------------------

/// Column positions of term, department, grade and section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupColumns {
    pub term: usize,
    pub department: usize,
    pub grade: usize,
    pub section: usize,
}

impl GroupColumns {
    pub fn resolve(grid: &Grid, names: [&str; 4]) -> Result<Self, GridError> {
        Ok(GroupColumns {
            term: grid.require_column(names[0])?,
            department: grid.require_column(names[1])?,
            grade: grid.require_column(names[2])?,
            section: grid.require_column(names[3])?,
        })
    }
}

// ---------------------------------------------------------------------------
// Extraction pass
// ---------------------------------------------------------------------------

/// Walk rows top to bottom and slot columns left to right, emitting one
/// observation per non-empty title cell.
///
/// A title's room and instructor come from the cell directly below it when
/// that cell matches `pattern`. A matched cell is consumed: it is never
/// read again, neither as a title nor as another title's room line. The
/// grid itself is left untouched.
pub fn extract_observations(
    grid: &Grid,
    slots: &[SlotColumn],
    groups: GroupColumns,
    pattern: &RoomPattern,
) -> Vec<Observation> {
    let mut consumed: HashSet<(usize, usize)> = HashSet::new();
    let mut observations = Vec::new();

    for row in 0..grid.len() {
        for slot in slots {
            if consumed.contains(&(row, slot.index)) {
                continue;
            }
            let title = grid.cell(row, slot.index).trim();
            if title.is_empty() {
                continue;
            }

            let below = row + 1;
            let found = if below < grid.len() {
                pattern.parse(grid.cell(below, slot.index))
            } else {
                None
            };
            let RoomInstructor { room, instructor } = match found {
                Some(found) => {
                    log::debug!(
                        "row {below} column '{}' consumed as room '{}' / instructor '{}'",
                        slot.name,
                        found.room,
                        found.instructor
                    );
                    consumed.insert((below, slot.index));
                    found
                }
                None => RoomInstructor {
                    room: String::new(),
                    instructor: String::new(),
                },
            };

            observations.push(Observation {
                identity: CourseIdentity {
                    term: grid.cell(row, groups.term).trim().to_string(),
                    department: grid.cell(row, groups.department).trim().to_string(),
                    grade: grid.cell(row, groups.grade).trim().to_string(),
                    section: grid.cell(row, groups.section).trim().to_string(),
                    day: slot.day,
                    title: title.to_string(),
                    room,
                    instructor,
                },
                period: slot.period,
            });
        }
    }

    observations
}
