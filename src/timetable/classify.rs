use std::sync::LazyLock;

use regex::Regex;

use super::types::{Day, DayAlphabet, SlotColumn};

// -- Slot column header patterns: one day symbol followed by digits only --
static RE_SLOT_ENGLISH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(Mon|Tue|Wed|Thu|Fri|Sat|Sun)([0-9]+)$").expect("valid english slot regex")
});
static RE_SLOT_KOREAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([월화수목금토일])([0-9]+)$").expect("valid korean slot regex")
});

fn slot_pattern(alphabet: DayAlphabet) -> &'static Regex {
    match alphabet {
        DayAlphabet::English => &*RE_SLOT_ENGLISH,
        DayAlphabet::Korean => &*RE_SLOT_KOREAN,
    }
}

/// Decompose a column header such as `Mon3` into `(day, period)`.
///
/// Surrounding whitespace is ignored. Period `0` and values that do not fit
/// in a `u32` are rejected.
pub fn parse_slot(name: &str, alphabet: DayAlphabet) -> Option<(Day, u32)> {
    let caps = slot_pattern(alphabet).captures(name.trim())?;
    let day = alphabet.day(caps.get(1)?.as_str())?;
    let period: u32 = caps.get(2)?.as_str().parse().ok()?;
    (period > 0).then_some((day, period))
}

/// Select the slot columns of a header row, keeping their left-to-right order.
pub fn classify_columns(columns: &[String], alphabet: DayAlphabet) -> Vec<SlotColumn> {
    let mut slots = Vec::new();
    for (index, name) in columns.iter().enumerate() {
        match parse_slot(name, alphabet) {
            Some((day, period)) => slots.push(SlotColumn {
                index,
                name: name.trim().to_string(),
                day,
                period,
            }),
            None => log::debug!("column '{name}' is not a slot column"),
        }
    }
    log::debug!("{} of {} columns are slot columns", slots.len(), columns.len());
    slots
}
