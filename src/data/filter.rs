use crate::timetable::ScheduleEntry;

// ---------------------------------------------------------------------------
// Filter predicate: course search over merged entries
// ---------------------------------------------------------------------------

/// Search text plus optional exact group-column constraints.
/// Every `None` field means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    /// Substring of the title, instructor or room.
    pub query: Option<String>,
    pub term: Option<String>,
    pub department: Option<String>,
    pub grade: Option<String>,
    pub section: Option<String>,
}

fn field_matches(wanted: &Option<String>, actual: &str) -> bool {
    wanted
        .as_deref()
        .map_or(true, |w| w.trim() == actual.trim())
}

impl EntryFilter {
    pub fn is_empty(&self) -> bool {
        *self == EntryFilter::default()
    }

    /// An entry passes when every set constraint holds:
    /// * `query` is blank, or appears in the title, instructor or room
    /// * each group field equals the entry's value (surrounding whitespace ignored)
    pub fn matches(&self, entry: &ScheduleEntry) -> bool {
        if let Some(q) = self.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            let hit = entry.title.contains(q)
                || entry.instructor.contains(q)
                || entry.room.contains(q);
            if !hit {
                return false;
            }
        }
        field_matches(&self.term, &entry.term)
            && field_matches(&self.department, &entry.department)
            && field_matches(&self.grade, &entry.grade)
            && field_matches(&self.section, &entry.section)
    }
}

/// Return indices of entries that pass the filter, in input order.
pub fn filtered_indices(entries: &[ScheduleEntry], filter: &EntryFilter) -> Vec<usize> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, e)| filter.matches(e))
        .map(|(i, _)| i)
        .collect()
}
