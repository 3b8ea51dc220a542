use crate::batch::CrossResult;
use crate::error::{CustomError, Result};
use crate::loci::LocusInfo;
use crate::model::GenotypeProbability;
use clap::ValueEnum;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

pub fn write_results(
    results: &[GenotypeProbability],
    format: OutputFormat,
    writer: impl Write,
) -> Result<()> {
    match format {
        OutputFormat::Table => write_table(results, writer),
        OutputFormat::Csv => write_csv(results, writer),
        OutputFormat::Json => write_json(results, writer),
    }
}

fn io_error(source: std::io::Error) -> CustomError {
    CustomError::Write {
        source,
        path: "<stdout>".into(),
    }
}

pub fn write_table(results: &[GenotypeProbability], mut writer: impl Write) -> Result<()> {
    let width = results
        .iter()
        .map(|r| r.genotype.chars().count())
        .max()
        .unwrap_or(0)
        .max("Genotype".len());

    writeln!(writer, "{:<width$}  {:>11}  Phenotype", "Genotype", "Probability").map_err(io_error)?;
    for result in results {
        writeln!(
            writer,
            "{:<width$}  {:>10.2}%  {}",
            result.genotype, result.probability, result.phenotype
        )
        .map_err(io_error)?;
    }
    Ok(())
}

pub fn write_csv(results: &[GenotypeProbability], writer: impl Write) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for result in results {
        wtr.serialize(result)?;
    }
    wtr.flush().map_err(io_error)?;
    Ok(())
}

pub fn write_json(results: &[GenotypeProbability], mut writer: impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, results)?;
    writeln!(writer).map_err(io_error)?;
    Ok(())
}

/// Writes one row per offspring genotype, or one row with the error message for a failed cross.
pub fn write_crosses_csv(results: &[CrossResult], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record([
        "cross",
        "parent1",
        "parent2",
        "genotype",
        "probability",
        "phenotype",
        "error",
    ])?;

    for (idx, result) in results.iter().enumerate() {
        let cross = &result.cross;
        match &result.outcome {
            Ok(rows) => {
                for row in rows {
                    wtr.serialize((
                        idx + 1,
                        cross.parent1.as_str(),
                        cross.parent2.as_str(),
                        Some(row.genotype.as_str()),
                        Some(row.probability),
                        Some(row.phenotype.as_str()),
                        None::<&str>,
                    ))?;
                }
            }
            Err(e) => {
                wtr.serialize((
                    idx + 1,
                    cross.parent1.as_str(),
                    cross.parent2.as_str(),
                    None::<&str>,
                    None::<f64>,
                    None::<&str>,
                    Some(e.to_string()),
                ))?;
            }
        }
    }
    wtr.flush().map_err(|e| CustomError::Write {
        source: e,
        path: path.into(),
    })?;
    Ok(())
}

pub fn write_loci_table(loci: &[LocusInfo], mut writer: impl Write) -> Result<()> {
    let name_width = loci
        .iter()
        .map(|l| l.name.len())
        .max()
        .unwrap_or(0)
        .max("Locus".len());
    let genotype_width = loci
        .iter()
        .map(|l| l.genotype.len())
        .max()
        .unwrap_or(0)
        .max("Example".len());

    writeln!(
        writer,
        "{:<3} {:<name_width$}  {:<genotype_width$}  Alleles",
        "", "Locus", "Example"
    )
    .map_err(io_error)?;
    for locus in loci {
        writeln!(
            writer,
            "{:<3} {:<name_width$}  {:<genotype_width$}  {}",
            locus.symbol, locus.name, locus.genotype, locus.description
        )
        .map_err(io_error)?;
    }
    Ok(())
}
