// tests/pipeline.rs
//
// File → Grid → merged entries, across the supported input formats.
//
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use timetable_merge::config::{MenuConfig, TimetableConfig};
use timetable_merge::data::export::{ExportFormat, write_records};
use timetable_merge::data::loader::{load_grid, load_rows};
use timetable_merge::menu::{Meal, parse_menu};
use timetable_merge::{ScheduleEntry, merge_timetable};

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    path
}

fn labels(entries: &[ScheduleEntry]) -> Vec<(String, String, String)> {
    entries
        .iter()
        .map(|e| (e.section.clone(), e.day_period.clone(), e.title.clone()))
        .collect()
}

#[test]
fn csv_with_bom_and_sparse_groups() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "timetable.csv",
        "\u{feff}term,department,grade,section,Mon1,Mon2,Mon3,Notes\n\
         2025-2,CS,1,A,Algorithms,Algorithms,,\n\
         ,,,,301 Kim,301 Kim,,\n\
         ,,,B,Databases,,Databases,lab\n\
         ,,,,405 Lee,,405 Lee\n",
    );

    let cfg = TimetableConfig::english();
    let grid = load_grid(&path, &cfg).unwrap();
    assert_eq!(grid.columns()[0], "term");
    assert_eq!(grid.cell(3, 0), "2025-2");
    assert_eq!(grid.cell(3, 3), "B");

    let entries = merge_timetable(&grid, &cfg).unwrap();
    assert_eq!(
        entries[0].record(),
        ["2025-2", "CS", "1", "A", "Mon1~2", "Algorithms", "301", "Kim"]
    );
    assert_eq!(
        labels(&entries),
        vec![
            ("A".into(), "Mon1~2".into(), "Algorithms".into()),
            ("B".into(), "Mon1".into(), "Databases".into()),
            ("B".into(), "Mon3".into(), "Databases".into()),
        ]
    );
    assert!(entries[1..].iter().all(|e| e.room == "405" && e.instructor == "Lee"));
}

#[test]
fn blank_header_cells_are_skipped() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "timetable.csv",
        "term,department,grade,section,Mon1,Mon2,,\n\
         2025-2,CS,1,A,Algorithms,Algorithms,note,\n\
         ,,,,301 Kim,301 Kim,,x\n",
    );

    let cfg = TimetableConfig::english();
    let grid = load_grid(&path, &cfg).unwrap();
    assert_eq!(&grid.columns()[6..], ["Unnamed: 6", "Unnamed: 7"]);

    let entries = merge_timetable(&grid, &cfg).unwrap();
    assert_eq!(
        entries.iter().map(|e| e.record()).collect::<Vec<_>>(),
        vec![["2025-2", "CS", "1", "A", "Mon1~2", "Algorithms", "301", "Kim"]]
    );
}

/// One cell of sheet XML: numbers as `<v>`, text as an inline string.
fn xlsx_cell(reference: &str, value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else if value.parse::<f64>().is_ok() {
        format!(r#"<c r="{reference}"><v>{value}</v></c>"#)
    } else {
        format!(r#"<c r="{reference}" t="inlineStr"><is><t>{value}</t></is></c>"#)
    }
}

/// Minimal single-sheet workbook holding `rows` (the first row is the header).
fn write_xlsx(path: &std::path::Path, rows: &[&[&str]]) {
    let mut sheet = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );
    for (r, row) in rows.iter().enumerate() {
        sheet.push_str(&format!(r#"<row r="{}">"#, r + 1));
        for (c, value) in row.iter().enumerate() {
            let column = char::from(b'A' + c as u8);
            sheet.push_str(&xlsx_cell(&format!("{column}{}", r + 1), value));
        }
        sheet.push_str("</row>");
    }
    sheet.push_str("</sheetData></worksheet>");

    let parts = [
        (
            "[Content_Types].xml",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#
                .to_string(),
        ),
        (
            "_rels/.rels",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#
                .to_string(),
        ),
        (
            "xl/workbook.xml",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets><sheet name="Timetable" sheetId="1" r:id="rId1"/></sheets>
</workbook>"#
                .to_string(),
        ),
        (
            "xl/_rels/workbook.xml.rels",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#
                .to_string(),
        ),
        ("xl/worksheets/sheet1.xml", sheet),
    ];

    let mut zip = ZipWriter::new(std::fs::File::create(path).unwrap());
    for (name, body) in parts {
        zip.start_file(name, SimpleFileOptions::default()).unwrap();
        zip.write_all(body.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

#[test]
fn xlsx_workbook_loads_and_merges() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("timetable.xlsx");
    write_xlsx(
        &path,
        &[
            &["term", "department", "grade", "section", "Tue3", "Tue4", "Wed3", "Notes"],
            &["2025-2", "EE", "2", "A", "Signals", "Signals", "Signals", "301"],
            &["", "", "", "", "1102 Choi", "1102 Choi", "1102 Choi", ""],
            &["", "", "", "B", "", "", "Circuits", ""],
            &["", "", "", "", "", "", "212 Park", ""],
        ],
    );

    let cfg = TimetableConfig::english();
    let grid = load_grid(&path, &cfg).unwrap();
    assert_eq!(
        grid.columns(),
        ["term", "department", "grade", "section", "Tue3", "Tue4", "Wed3", "Notes"]
    );
    assert_eq!(grid.len(), 4);
    // Numeric cells come back without a fractional part.
    assert_eq!(grid.cell(0, 2), "2");
    assert_eq!(grid.cell(0, 7), "301");
    // Group columns are filled down.
    assert_eq!(grid.cell(2, 0), "2025-2");
    assert_eq!(grid.cell(2, 2), "2");
    assert_eq!(grid.cell(2, 3), "B");

    let entries = merge_timetable(&grid, &cfg).unwrap();
    assert_eq!(
        entries.iter().map(|e| e.record()).collect::<Vec<_>>(),
        vec![
            ["2025-2", "EE", "2", "A", "Tue3~4", "Signals", "1102", "Choi"],
            ["2025-2", "EE", "2", "A", "Wed3", "Signals", "1102", "Choi"],
            ["2025-2", "EE", "2", "B", "Wed3", "Circuits", "212", "Park"],
        ]
    );
}

#[test]
fn json_records_with_korean_headers() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "timetable.json",
        r#"[
            {"학기": "2025-2", "학부과명": "컴퓨터공학과", "학년": 2, "반": "A",
             "월1": "자료구조", "월2": "자료구조", "화1": null},
            {"학기": "", "학부과명": "", "학년": null, "반": "",
             "월1": "301 김교수", "월2": "301 김교수", "화1": "운영체제"}
        ]"#,
    );

    let cfg = TimetableConfig::korean();
    let grid = load_grid(&path, &cfg).unwrap();
    let entries = merge_timetable(&grid, &cfg).unwrap();
    let got: Vec<_> = entries.iter().map(|e| e.record()).collect();
    assert_eq!(
        got,
        vec![
            ["2025-2", "컴퓨터공학과", "2", "A", "월1~2", "자료구조", "301", "김교수"],
            ["2025-2", "컴퓨터공학과", "2", "A", "화1", "운영체제", "", ""],
        ]
    );
}

#[test]
fn parquet_grid_is_stringified() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("timetable.parquet");

    let schema = Arc::new(Schema::new(vec![
        Field::new("term", DataType::Utf8, true),
        Field::new("department", DataType::Utf8, true),
        Field::new("grade", DataType::Int64, true),
        Field::new("section", DataType::Utf8, true),
        Field::new("Fri4", DataType::Utf8, true),
        Field::new("Fri5", DataType::Utf8, true),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(vec![Some("2025-2"), None])),
        Arc::new(StringArray::from(vec![Some("EE"), None])),
        Arc::new(Int64Array::from(vec![Some(3), None])),
        Arc::new(StringArray::from(vec![Some("C"), None])),
        Arc::new(StringArray::from(vec![Some("Circuits"), Some("1102 Choi")])),
        Arc::new(StringArray::from(vec![Some("Circuits"), Some("1102 Choi")])),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();
    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let cfg = TimetableConfig::english();
    let grid = load_grid(&path, &cfg).unwrap();
    let entries = merge_timetable(&grid, &cfg).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(
        entries[0].record(),
        ["2025-2", "EE", "3", "C", "Fri4~5", "Circuits", "1102", "Choi"]
    );
}

#[test]
fn missing_group_column_fails_to_load() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "bad.csv", "term,department,grade,Mon1\nT,D,1,Algo\n");
    let err = load_grid(&path, &TimetableConfig::english()).unwrap_err();
    assert!(format!("{err:#}").contains("section"));
}

#[test]
fn overlong_csv_row_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "bad.csv",
        "term,department,grade,section,Mon1\nT,D,1,A,Algo,extra\n",
    );
    assert!(load_grid(&path, &TimetableConfig::english()).is_err());
}

#[test]
fn forward_fill_can_be_disabled() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "timetable.csv",
        "term,department,grade,section,Mon1\n\
         T,D,1,A,Algorithms\n\
         ,,,,Databases\n",
    );
    let cfg = TimetableConfig {
        forward_fill: false,
        ..TimetableConfig::english()
    };
    let grid = load_grid(&path, &cfg).unwrap();
    let entries = merge_timetable(&grid, &cfg).unwrap();
    assert_eq!(entries[1].term, "");
    assert_eq!(entries[1].title, "Databases");
}

#[test]
fn merged_entries_export_as_csv() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "timetable.csv",
        "term,department,grade,section,Thu7,Thu8\n\
         2025-2,CS,4,A,Capstone,Capstone\n\
         ,,,,510 Han,510 Han\n",
    );
    let cfg = TimetableConfig::english();
    let entries = merge_timetable(&load_grid(&path, &cfg).unwrap(), &cfg).unwrap();

    let mut out = Vec::new();
    write_records(&entries, ExportFormat::Csv, &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "term,department,grade,section,day_period,title,room,instructor\n\
         2025-2,CS,4,A,Thu7~8,Capstone,510,Han\n"
    );
}

#[test]
fn scraped_menu_rows_parse_from_csv() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "menu.csv",
        "날짜,조식,중식,석식\n\
         11/9 월요일,토스트 우유,비빔밥,돈까스\n\
         11/10 화요일,,라면\n",
    );
    let rows = load_rows(&path).unwrap();
    assert_eq!(rows.len(), 3);

    let cfg = MenuConfig {
        year: Some(2025),
        ..MenuConfig::default()
    };
    let items = parse_menu(&rows, &cfg);
    let got: Vec<_> = items
        .iter()
        .map(|i| (i.date.to_string(), i.meal, i.item.as_str()))
        .collect();
    assert_eq!(
        got,
        vec![
            ("2025-11-09".to_string(), Meal::Breakfast, "토스트"),
            ("2025-11-09".to_string(), Meal::Breakfast, "우유"),
            ("2025-11-09".to_string(), Meal::Lunch, "비빔밥"),
            ("2025-11-09".to_string(), Meal::Dinner, "돈까스"),
            ("2025-11-10".to_string(), Meal::Lunch, "라면"),
        ]
    );
}
