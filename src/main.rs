use clap::Parser;
use miette::IntoDiagnostic;
use punnett::cli::{self, Args};
use punnett::error::Result;

fn try_main() -> Result<()> {
    let args = Args::parse();
    let run_spec = cli::build_run_spec(&args)?;
    run_spec.print_paths();
    cli::run(&run_spec)
}

fn main() -> miette::Result<()> {
    try_main().into_diagnostic()
}
