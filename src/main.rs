use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use timetable_merge::config::{Config, TimetableConfig, load_config};
use timetable_merge::data::export::{ExportFormat, Tabular, write_records};
use timetable_merge::data::filter::{EntryFilter, filtered_indices};
use timetable_merge::data::loader::{load_grid, load_rows};
use timetable_merge::menu::parse_menu;
use timetable_merge::merge_timetable;

#[derive(Parser)]
#[command(name = "timetable-merge", version, about = "Merge day/period timetable grids into course schedules")]
struct Cli {
    /// TOML config file (defaults apply when omitted or missing)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output encoding
    #[arg(short, long, global = true, value_enum, default_value_t = ExportFormat::Csv)]
    format: ExportFormat,

    /// Write to a file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// More logging (-v info, -vv debug) when RUST_LOG is unset
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge a timetable grid (.xlsx, .csv, .json, .parquet)
    Timetable {
        path: PathBuf,

        /// Column names and day symbols to expect
        #[arg(long, value_enum)]
        preset: Option<Preset>,

        /// Substring of title, instructor or room
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        term: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        grade: Option<String>,
        #[arg(long)]
        section: Option<String>,
    },
    /// Parse scraped cafeteria table rows from a header-less CSV
    Menu { path: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    English,
    Korean,
}

impl Preset {
    /// Override column names and day symbols, keeping the other settings.
    fn apply(self, cfg: &mut TimetableConfig) {
        let base = match self {
            Preset::English => TimetableConfig::english(),
            Preset::Korean => TimetableConfig::korean(),
        };
        cfg.term = base.term;
        cfg.department = base.department;
        cfg.grade = base.grade;
        cfg.section = base.section;
        cfg.days = base.days;
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(p) => Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("creating {}", p.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn emit<T: Tabular>(records: &[T], format: ExportFormat, output: Option<&Path>) -> Result<()> {
    let writer = open_output(output)?;
    write_records(records, format, writer)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };

    match cli.command {
        Command::Timetable {
            path,
            preset,
            search,
            term,
            department,
            grade,
            section,
        } => {
            if let Some(preset) = preset {
                preset.apply(&mut config.timetable);
            }
            let grid = load_grid(&path, &config.timetable)?;
            let entries = merge_timetable(&grid, &config.timetable)?;

            let filter = EntryFilter {
                query: search,
                term,
                department,
                grade,
                section,
            };
            let entries = if filter.is_empty() {
                entries
            } else {
                let keep = filtered_indices(&entries, &filter);
                log::info!("{} of {} entries match the filter", keep.len(), entries.len());
                keep.into_iter().map(|i| entries[i].clone()).collect()
            };
            emit(&entries, cli.format, cli.output.as_deref())
        }
        Command::Menu { path } => {
            if config.menu.cafe_id.is_nil() {
                log::warn!("no cafe_id configured; menu items carry the nil UUID");
            }
            let rows = load_rows(&path)?;
            let items = parse_menu(&rows, &config.menu);
            emit(&items, cli.format, cli.output.as_deref())
        }
    }
}
