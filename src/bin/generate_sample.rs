use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
}

const DAYS: [&str; 5] = ["Mon", "Tue", "Wed", "Thu", "Fri"];
const PERIODS: u32 = 9;

fn main() {
    let mut rng = SimpleRng::new(42);

    let courses = [
        ("Algorithms", "301", "Kim"),
        ("Databases", "405", "Lee"),
        ("Operating Systems", "212", "Park"),
        ("Linear Algebra", "1102", "Choi"),
        ("Technical Writing", "118", "Jung"),
    ];
    let groups = [
        ("2025-2", "CS", "1", "A"),
        ("", "", "", "B"),
        ("", "", "2", "A"),
        ("", "EE", "1", "A"),
    ];

    let mut columns: Vec<String> = ["term", "department", "grade", "section"]
        .iter()
        .map(|c| c.to_string())
        .collect();
    for day in DAYS {
        for p in 1..=PERIODS {
            columns.push(format!("{day}{p}"));
        }
    }
    let n_slots = columns.len() - 4;

    // Each group is a title row followed by a room/instructor row.
    // Group columns are only filled on the first row of a group.
    let mut rows: Vec<Vec<String>> = Vec::new();
    for (term, dept, grade, section) in groups {
        let mut titles = vec![String::new(); n_slots];
        let mut rooms = vec![String::new(); n_slots];
        for d in 0..DAYS.len() {
            let (title, room, prof) = courses[rng.below(courses.len())];
            let start = 1 + rng.below(PERIODS as usize - 2);
            let len = 1 + rng.below(3);
            for p in start..(start + len).min(PERIODS as usize + 1) {
                let idx = d * PERIODS as usize + (p - 1);
                titles[idx] = title.to_string();
                rooms[idx] = format!("{room} {prof}");
            }
        }
        let mut head = vec![term.to_string(), dept.to_string(), grade.to_string(), section.to_string()];
        head.extend(titles);
        rows.push(head);
        let mut below = vec![String::new(); 4];
        below.extend(rooms);
        rows.push(below);
    }

    let fields: Vec<Field> = columns
        .iter()
        .map(|c| Field::new(c, DataType::Utf8, false))
        .collect();
    let schema = Arc::new(Schema::new(fields));
    let arrays: Vec<ArrayRef> = (0..columns.len())
        .map(|col| {
            let values: Vec<&str> = rows.iter().map(|r| r[col].as_str()).collect();
            Arc::new(StringArray::from(values)) as ArrayRef
        })
        .collect();

    let batch = RecordBatch::try_new(schema.clone(), arrays).expect("Failed to create RecordBatch");

    // Write Parquet
    let output_path = "sample_timetable.parquet";
    let file = std::fs::File::create(output_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!(
        "Wrote {} rows ({} slot columns) to {output_path}",
        rows.len(),
        n_slots
    );
}
