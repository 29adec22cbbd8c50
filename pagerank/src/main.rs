use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};

use pagerank::{iterate_rank, sample_rank, Corpus, DAMPING, SAMPLES};

/// Rank a directory of HTML pages by sampling and by iteration.
#[derive(Parser, Debug)]
struct Args {
    /// Directory containing the `.html` corpus.
    corpus: PathBuf,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }

    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let corpus = Corpus::from_dir(&args.corpus)
        .wrap_err_with(|| format!("crawling {}", args.corpus.display()))?;

    let mut rng = rand::thread_rng();
    let sampled = sample_rank(&corpus, DAMPING, SAMPLES, &mut rng)?;

    println!("PageRank Results from Sampling (n = {SAMPLES})");
    for (page, rank) in &sampled {
        println!("  {page}: {rank:.4}");
    }

    let iterated = iterate_rank(&corpus, DAMPING)?;

    println!("PageRank Results from Iteration");
    for (page, rank) in &iterated {
        println!("  {page}: {rank:.4}");
    }

    Ok(())
}
