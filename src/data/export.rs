use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

/// Output encodings for merged entries and menu items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    fn delimiter(self) -> u8 {
        match self {
            ExportFormat::Tsv => b'\t',
            _ => b',',
        }
    }
}

/// A record type with a fixed header row.
pub trait Tabular: Serialize {
    const HEADERS: &'static [&'static str];
}

impl Tabular for crate::timetable::ScheduleEntry {
    const HEADERS: &'static [&'static str] = &crate::timetable::ScheduleEntry::HEADERS;
}

impl Tabular for crate::menu::MenuItem {
    const HEADERS: &'static [&'static str] = &crate::menu::MenuItem::HEADERS;
}

/// Write records in the requested format. CSV and TSV always start with a
/// header row, even when there are no records.
pub fn write_records<T: Tabular, W: Write>(
    records: &[T],
    format: ExportFormat,
    mut writer: W,
) -> Result<()> {
    match format {
        ExportFormat::Csv | ExportFormat::Tsv => {
            let mut out = csv::WriterBuilder::new()
                .delimiter(format.delimiter())
                .has_headers(false)
                .from_writer(writer);
            out.write_record(T::HEADERS).context("writing header row")?;
            for (i, record) in records.iter().enumerate() {
                out.serialize(record)
                    .with_context(|| format!("writing record {i}"))?;
            }
            out.flush().context("flushing output")?;
        }
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, records).context("writing JSON")?;
            writeln!(writer).context("writing JSON")?;
            writer.flush().context("flushing output")?;
        }
    }
    Ok(())
}
