use std::fs;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};

use heredity::{posteriors, Population, ProbabilityTables};

/// Compute per-person gene and trait posteriors from a pedigree CSV.
///
/// The file needs a `name,mother,father,trait` header; parents are either
/// both named or both empty, and the trait column is 1, 0, or empty for
/// unknown.
#[derive(Parser, Debug)]
struct Args {
    /// Path to the pedigree CSV.
    data: PathBuf,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }

    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let text = fs::read_to_string(&args.data)
        .wrap_err_with(|| format!("reading {}", args.data.display()))?;
    let population = Population::from_csv(&text)?;

    let tables = ProbabilityTables::default();
    let result = posteriors(&population, &tables);

    for (name, posterior) in &result {
        println!("{name}:");
        println!("  Gene:");
        for copies in (0..3usize).rev() {
            println!("    {copies}: {:.4}", posterior.gene[copies]);
        }
        println!("  Trait:");
        println!("    True: {:.4}", posterior.phenotype[1]);
        println!("    False: {:.4}", posterior.phenotype[0]);
    }

    Ok(())
}
