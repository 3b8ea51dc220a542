use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

pub const CROSSES: &[(&str, &str)] = &[
    ("Bb", "Bb"),
    ("Bb Ee", "bb ee"),
    ("", "Bb"),
    ("Kk", "kk"),
];

pub struct Workspace {
    pub crosses_csv: PathBuf,
    pub output_dir: PathBuf,
}

pub fn create_workspace(label: &str) -> io::Result<Workspace> {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    let base_dir = std::env::temp_dir().join("punnett-tests").join(format!(
        "{}-{}-{}",
        std::process::id(),
        id,
        label
    ));
    fs::create_dir_all(&base_dir)?;

    let crosses_csv = base_dir.join("crosses.csv");
    let output_dir = base_dir.join("output");

    let mut contents = String::from("parent1,parent2\n");
    for (parent1, parent2) in CROSSES {
        contents.push_str(&format!("{parent1},{parent2}\n"));
    }
    fs::write(&crosses_csv, contents)?;

    Ok(Workspace {
        crosses_csv,
        output_dir,
    })
}

/// Number of rows `crosses.csv` should contain for `CROSSES` with pooled aggregation.
pub fn expected_rows() -> usize {
    // Bb x Bb: 3, Bb Ee x bb ee: Bb, bb, Ee, ee, failed cross: 1, Kk x kk: 2
    3 + 4 + 1 + 2
}
