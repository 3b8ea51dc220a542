use crate::batch::{load_crosses_csv, run_crosses};
use crate::cross::{Aggregation, CrossOptions, calculate_with};
use crate::error::{CustomError, Parent, Result};
use crate::loci::{LOCI, LocusInfo, find_locus};
use crate::output::{OutputFormat, write_crosses_csv, write_loci_table, write_results};
use crate::parse::Notation;
use chrono::Local;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Calculate offspring genotype probabilities from two parent genotypes.
#[derive(Parser, Debug)]
#[command(name = "punnett", version, about)]
pub struct Args {
    /// Genotype of the first parent, e.g. "Bb Ee".
    #[arg(long)]
    pub parent1: Option<String>,

    /// Genotype of the second parent.
    #[arg(long)]
    pub parent2: Option<String>,

    /// Reference locus used for any parent not given explicitly (see --list-loci).
    #[arg(short, long)]
    pub locus: Option<String>,

    /// How genotype strings are split into loci.
    #[arg(short, long, value_enum, default_value_t = Notation::Flat)]
    pub notation: Notation,

    /// How pairings from several loci are combined.
    #[arg(short, long, value_enum, default_value_t = Aggregation::Pooled)]
    pub aggregation: Aggregation,

    /// Output format for a single cross.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// CSV file of crosses (columns: parent1, parent2) to calculate in one run.
    #[arg(
        short,
        long,
        value_hint = clap::ValueHint::FilePath,
        conflicts_with_all = ["parent1", "parent2", "locus"]
    )]
    pub crosses_csv: Option<PathBuf>,

    /// Output directory for batch results.
    #[arg(
        short,
        long,
        value_hint = clap::ValueHint::DirPath,
        default_value_t = format!("punnett_output_{}", Local::now().format("%Y%m%d_%H%M%S"))
    )]
    pub output_directory: String,

    /// Number of threads for batch runs.
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Print the reference table of common coat colour loci and exit.
    #[arg(long)]
    pub list_loci: bool,
}

#[derive(Debug, Clone)]
pub enum RunSpec {
    ListLoci,
    Single {
        parent1: String,
        parent2: String,
        options: CrossOptions,
        format: OutputFormat,
    },
    Batch {
        crosses_csv: PathBuf,
        output_dir: PathBuf,
        options: CrossOptions,
        threads: Option<usize>,
    },
}

impl RunSpec {
    pub fn print_paths(&self) {
        if let RunSpec::Batch {
            crosses_csv,
            output_dir,
            ..
        } = self
        {
            println!("CROSSES: {}", crosses_csv.display());
            println!("OUTPUT : {}", output_dir.display());
            println!();
        }
    }

    pub fn options(&self) -> Option<&CrossOptions> {
        match self {
            RunSpec::ListLoci => None,
            RunSpec::Single { options, .. } | RunSpec::Batch { options, .. } => Some(options),
        }
    }
}

fn resolve_parent(
    explicit: Option<&str>,
    locus: Option<&LocusInfo>,
    parent: Parent,
    flag: &'static str,
) -> Result<String> {
    match (explicit, locus) {
        (Some(genotype), _) => Ok(genotype.to_string()),
        (None, Some(locus)) => Ok(locus.genotype.to_string()),
        (None, None) => Err(CustomError::MissingParent { parent, flag }),
    }
}

pub fn build_run_spec(args: &Args) -> Result<RunSpec> {
    if args.list_loci {
        return Ok(RunSpec::ListLoci);
    }

    let mut options = CrossOptions {
        notation: args.notation,
        aggregation: args.aggregation,
    };

    if let Some(crosses_csv) = &args.crosses_csv {
        return Ok(RunSpec::Batch {
            crosses_csv: crosses_csv.clone(),
            output_dir: PathBuf::from(&args.output_directory),
            options,
            threads: args.threads,
        });
    }

    let locus = match &args.locus {
        Some(name) => Some(
            find_locus(name).ok_or_else(|| CustomError::UnknownLocus { name: name.clone() })?,
        ),
        None => None,
    };
    let parent1 = resolve_parent(args.parent1.as_deref(), locus, Parent::First, "parent1")?;
    let parent2 = resolve_parent(args.parent2.as_deref(), locus, Parent::Second, "parent2")?;

    // Reference genotypes with multi-character alleles cannot be read flat
    if let Some(locus) = locus
        && locus.needs_pairs_notation()
        && options.notation == Notation::Flat
        && (args.parent1.is_none() || args.parent2.is_none())
    {
        eprintln!(
            "Using pairs notation: the {} locus genotype {} has multi-character alleles.",
            locus.symbol, locus.genotype
        );
        options.notation = Notation::Pairs;
    }

    Ok(RunSpec::Single {
        parent1,
        parent2,
        options,
        format: args.format,
    })
}

pub fn run(run_spec: &RunSpec) -> Result<()> {
    match run_spec {
        RunSpec::ListLoci => write_loci_table(LOCI, std::io::stdout().lock()),
        RunSpec::Single {
            parent1,
            parent2,
            options,
            format,
        } => {
            let results = calculate_with(parent1, parent2, options)?;
            if *format == OutputFormat::Table {
                println!("Parent 1: {parent1}");
                println!("Parent 2: {parent2}");
                println!();
            }
            write_results(&results, *format, std::io::stdout().lock())
        }
        RunSpec::Batch {
            crosses_csv,
            output_dir,
            options,
            threads,
        } => run_batch(crosses_csv, output_dir, options, *threads),
    }
}

fn run_batch(
    crosses_csv: &Path,
    output_dir: &Path,
    options: &CrossOptions,
    threads: Option<usize>,
) -> Result<()> {
    std::fs::create_dir_all(output_dir).map_err(|e| CustomError::OutputDir { source: e })?;

    let crosses = load_crosses_csv(crosses_csv)?;
    println!("Calculating {} crosses...", crosses.len());
    let results = run_crosses(&crosses, options, threads)?;

    let n_failed = results.iter().filter(|r| r.outcome.is_err()).count();
    if n_failed > 0 {
        println!("{n_failed} of {} crosses failed; see the error column.", results.len());
    }

    let results_path = output_dir.join("crosses.csv");
    println!("Writing cross results to {}...", results_path.display());
    write_crosses_csv(&results, &results_path)?;
    Ok(())
}
