use crate::cross::{CrossOptions, calculate_with};
use crate::error::{CustomError, Result};
use crate::model::GenotypeProbability;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

const PARALLEL_THRESHOLD: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cross {
    pub parent1: String,
    pub parent2: String,
}

#[derive(Debug)]
pub struct CrossResult {
    pub cross: Cross,
    pub outcome: Result<Vec<GenotypeProbability>>,
}

/// Reads crosses from a two-column CSV (parent1, parent2). A leading
/// "parent1,parent2" header and blank rows are skipped.
pub fn load_crosses_csv(path: impl AsRef<Path>) -> Result<Vec<Cross>> {
    let csv_path = PathBuf::from(path.as_ref());
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(&csv_path)
        .map_err(|source| CustomError::CsvRead {
            source,
            path: csv_path.clone(),
        })?;

    let mut crosses = Vec::new();
    for (record_idx, result) in reader.records().enumerate() {
        let record = result.map_err(|source| CustomError::CsvRead {
            source,
            path: csv_path.clone(),
        })?;

        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        if record.len() != 2 {
            let line_num = record
                .position()
                .map_or(record_idx + 1, |pos| pos.line() as usize);
            return Err(CustomError::CrossesColumns {
                line_num,
                n_fields: record.len(),
            });
        }

        let parent1 = record[0].trim();
        let parent2 = record[1].trim();

        if crosses.is_empty()
            && parent1.eq_ignore_ascii_case("parent1")
            && parent2.eq_ignore_ascii_case("parent2")
        {
            continue;
        }
        crosses.push(Cross {
            parent1: parent1.to_string(),
            parent2: parent2.to_string(),
        });
    }

    if crosses.is_empty() {
        return Err(CustomError::CrossesEmpty);
    }
    Ok(crosses)
}

fn progress_bar(n_crosses: usize) -> ProgressBar {
    let pb = ProgressBar::new(n_crosses as u64);
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:30} {pos}/{len} crosses")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb
}

fn calculate_one(cross: &Cross, options: &CrossOptions) -> CrossResult {
    CrossResult {
        cross: cross.clone(),
        outcome: calculate_with(&cross.parent1, &cross.parent2, options),
    }
}

pub fn calculate_all(crosses: &[Cross], options: &CrossOptions) -> Vec<CrossResult> {
    let pb = progress_bar(crosses.len());
    let results = crosses
        .iter()
        .map(|cross| {
            let result = calculate_one(cross, options);
            pb.inc(1);
            result
        })
        .collect();
    pb.abandon();
    results
}

pub fn calculate_all_parallel(crosses: &[Cross], options: &CrossOptions) -> Vec<CrossResult> {
    let pb = progress_bar(crosses.len());
    let results = crosses
        .par_iter()
        .map(|cross| {
            let result = calculate_one(cross, options);
            pb.inc(1);
            result
        })
        .collect();
    pb.abandon();
    results
}

/// Calculates every cross. Results come back in input order and a failed
/// cross does not stop the others.
pub fn run_crosses(
    crosses: &[Cross],
    options: &CrossOptions,
    threads: Option<usize>,
) -> Result<Vec<CrossResult>> {
    if (threads.is_none() && crosses.len() < PARALLEL_THRESHOLD) || threads == Some(1) {
        Ok(calculate_all(crosses, options))
    } else if let Some(n) = threads {
        let pool = ThreadPoolBuilder::new().num_threads(n).build()?;
        Ok(pool.install(|| calculate_all_parallel(crosses, options)))
    } else {
        Ok(calculate_all_parallel(crosses, options))
    }
}
