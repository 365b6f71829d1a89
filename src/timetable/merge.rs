use super::bucket::Buckets;
use super::types::{CourseIdentity, DayAlphabet, ScheduleEntry};

/// A maximal run of consecutive periods, `start..=end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodRun {
    pub start: u32,
    pub end: u32,
}

impl PeriodRun {
    /// `Mon3` for a single period, `Mon1~3` for a longer run.
    pub fn label(&self, day_symbol: &str) -> String {
        if self.start == self.end {
            format!("{day_symbol}{}", self.start)
        } else {
            format!("{day_symbol}{}~{}", self.start, self.end)
        }
    }
}

/// Collapse periods into maximal runs of consecutive integers.
///
/// Input order and duplicates do not matter; runs come back in ascending
/// order.
pub fn period_runs(periods: impl IntoIterator<Item = u32>) -> Vec<PeriodRun> {
    let mut ps: Vec<u32> = periods.into_iter().collect();
    ps.sort_unstable();
    ps.dedup();

    let mut runs = Vec::new();
    let mut iter = ps.into_iter();
    let Some(first) = iter.next() else {
        return runs;
    };
    let (mut start, mut prev) = (first, first);
    for cur in iter {
        if prev.checked_add(1) != Some(cur) {
            runs.push(PeriodRun { start, end: prev });
            start = cur;
        }
        prev = cur;
    }
    runs.push(PeriodRun { start, end: prev });
    runs
}

fn entry(identity: &CourseIdentity, day_period: String) -> ScheduleEntry {
    ScheduleEntry {
        term: identity.term.clone(),
        department: identity.department.clone(),
        grade: identity.grade.clone(),
        section: identity.section.clone(),
        day_period,
        title: identity.title.clone(),
        room: identity.room.clone(),
        instructor: identity.instructor.clone(),
    }
}

/// One entry per run per bucket; buckets keep first-seen order.
pub fn merge_buckets(buckets: &Buckets, alphabet: DayAlphabet) -> Vec<ScheduleEntry> {
    let mut merged = Vec::new();
    for (identity, periods) in buckets.iter() {
        let symbol = alphabet.symbol(identity.day);
        for run in period_runs(periods.iter().copied()) {
            merged.push(entry(identity, run.label(symbol)));
        }
    }
    merged
}
