//! Cafeteria menu rows → priced menu items.
//!
//! Input is the table already lifted out of the cafeteria page: one row per
//! day, cell 0 holding a date such as `11/9 월요일` and cells 1–3 holding
//! the breakfast, lunch and dinner items separated by whitespace.

use std::sync::LazyLock;

use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::MenuConfig;

static RE_MONTH_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{1,2})[./-]([0-9]{1,2})").expect("valid month/day regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Meal {
    Breakfast,
    Lunch,
    Dinner,
}

impl Meal {
    /// Meal served in each menu column after the date column.
    pub const COLUMNS: [(usize, Meal); 3] =
        [(1, Meal::Breakfast), (2, Meal::Lunch), (3, Meal::Dinner)];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub cafe_id: Uuid,
    pub date: NaiveDate,
    pub meal: Meal,
    pub item: String,
    pub price: u32,
}

impl MenuItem {
    pub const HEADERS: [&'static str; 5] = ["cafe_id", "date", "meal", "item", "price"];
}

/// Skip the header rows, then keep at most `max_rows` data rows.
pub fn select_rows<'a>(rows: &'a [Vec<String>], cfg: &MenuConfig) -> &'a [Vec<String>] {
    let body = rows.get(cfg.header_rows..).unwrap_or(&[]);
    match cfg.max_rows {
        Some(max) if body.len() > max => {
            log::debug!("dropping {} rows past the {max}-row limit", body.len() - max);
            &body[..max]
        }
        _ => body,
    }
}

/// Selected rows paired with their row number in the scraped table.
pub fn numbered_rows<'a>(
    rows: &'a [Vec<String>],
    cfg: &MenuConfig,
) -> impl Iterator<Item = (usize, &'a Vec<String>)> {
    let offset = cfg.header_rows;
    select_rows(rows, cfg)
        .iter()
        .enumerate()
        .map(move |(i, row)| (offset + i, row))
}

/// First `M/D`, `M.D` or `M-D` in the cell, placed in `year`.
pub fn parse_menu_date(cell: &str, year: i32) -> Option<NaiveDate> {
    let caps = RE_MONTH_DAY.captures(cell)?;
    let month: u32 = caps.get(1)?.as_str().parse().ok()?;
    let day: u32 = caps.get(2)?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Whitespace-separated menu items.
pub fn split_items(cell: &str) -> Vec<String> {
    cell.split_whitespace().map(str::to_string).collect()
}

/// Items of one day row, or `None` when the row is too short or undated.
pub fn parse_menu_row(row: &[String], cfg: &MenuConfig, year: i32) -> Option<Vec<MenuItem>> {
    if row.len() < 3 {
        return None;
    }
    let date = parse_menu_date(&row[0], year)?;
    let mut items = Vec::new();
    for (idx, meal) in Meal::COLUMNS {
        let Some(cell) = row.get(idx) else {
            continue;
        };
        for item in split_items(cell) {
            items.push(MenuItem {
                cafe_id: cfg.cafe_id,
                date,
                meal,
                item,
                price: cfg.default_price,
            });
        }
    }
    Some(items)
}

/// Parse every selected row; rows without a date are skipped.
pub fn parse_menu(rows: &[Vec<String>], cfg: &MenuConfig) -> Vec<MenuItem> {
    let year = cfg.year.unwrap_or_else(|| Local::now().year());
    let mut items = Vec::new();
    for (row_no, row) in numbered_rows(rows, cfg) {
        match parse_menu_row(row, cfg, year) {
            Some(mut found) => items.append(&mut found),
            None => log::debug!("menu row {row_no} skipped: {row:?}"),
        }
    }
    log::info!("{} menu items parsed", items.len());
    items
}
