//! The two rank estimators: a Monte-Carlo random walk and deterministic
//! power iteration.
//!
//! Both model the same random surfer: with probability `damping` follow
//! one of the current page's outbound links, otherwise jump to a uniformly
//! random page. A dangling page (no outbound links) behaves as if it
//! linked to every page, itself included — the treatment is deliberately
//! the same in both estimators.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use crate::corpus::{Corpus, CorpusError};

/// Probability of following an outbound link instead of jumping.
pub const DAMPING: f64 = 0.85;

/// Walk length used by the sampling estimator.
pub const SAMPLES: usize = 10_000;

/// Power iteration stops once no page moves by this much.
const CONVERGENCE_THRESHOLD: f64 = 0.001;

/// One random-walk step: the distribution over all pages reachable from
/// `page`.
///
/// Linked pages get `damping / out_degree + (1 - damping) / n`; every page
/// gets at least `(1 - damping) / n`. A page with no outbound links (or
/// one the corpus does not know) yields the uniform distribution.
pub fn transition_model(corpus: &Corpus, page: &str, damping: f64) -> BTreeMap<String, f64> {
    let n = corpus.len() as f64;

    match corpus.links(page).filter(|links| !links.is_empty()) {
        None => corpus.pages().map(|p| (p.to_owned(), 1.0 / n)).collect(),
        Some(links) => {
            let base = (1.0 - damping) / n;
            let linked = damping / links.len() as f64 + base;

            corpus
                .pages()
                .map(|p| {
                    let weight = if links.contains(p) { linked } else { base };
                    (p.to_owned(), weight)
                })
                .collect()
        }
    }
}

/// Estimate ranks by walking the corpus for `samples` steps.
///
/// The walk starts on a uniformly random page and each step draws from
/// [transition_model] of the page it is on. The estimate for a page is its
/// visit frequency, so the result is stochastic; it approaches the
/// [iterate_rank] fixed point as `samples` grows. The RNG comes in as a
/// parameter so tests can seed it.
pub fn sample_rank<R: Rng + ?Sized>(
    corpus: &Corpus,
    damping: f64,
    samples: usize,
    rng: &mut R,
) -> Result<BTreeMap<String, f64>, CorpusError> {
    let pages: Vec<&str> = corpus.pages().collect();
    let mut current: String = (*pages.choose(rng).ok_or(CorpusError::Empty)?).to_owned();

    let mut visits: BTreeMap<String, usize> =
        pages.iter().map(|page| ((*page).to_owned(), 0)).collect();

    for _ in 0..samples {
        *visits
            .get_mut(&current)
            .expect("the walk stays inside the corpus") += 1;

        let choices: Vec<(String, f64)> =
            transition_model(corpus, &current, damping).into_iter().collect();
        current = choices
            .choose_weighted(rng, |(_, weight)| *weight)
            .expect("transition model weights are positive")
            .0
            .clone();
    }

    Ok(visits
        .into_iter()
        .map(|(page, count)| (page, count as f64 / samples as f64))
        .collect())
}

/// Compute ranks exactly by iterating to a fixed point.
///
/// Every page starts at `1/n`. Each round recomputes each page's rank as
/// `(1 - damping)/n + damping × Σ rank(source)/out_degree(source)` over its
/// incoming links, with dangling sources spreading their rank uniformly
/// over all pages. Iteration stops once every page moves less than the
/// convergence threshold. Deterministic for a given corpus and damping
/// factor.
pub fn iterate_rank(corpus: &Corpus, damping: f64) -> Result<BTreeMap<String, f64>, CorpusError> {
    if corpus.is_empty() {
        return Err(CorpusError::Empty);
    }

    let n = corpus.len() as f64;
    let mut ranks: BTreeMap<String, f64> =
        corpus.pages().map(|page| (page.to_owned(), 1.0 / n)).collect();

    let mut iterations = 0usize;

    loop {
        iterations += 1;

        let mut next = BTreeMap::new();
        for dest in corpus.pages() {
            let mut incoming = 0.0;
            for source in corpus.pages() {
                let out_degree = corpus.out_degree(source);
                if out_degree == 0 {
                    incoming += ranks[source] / n;
                } else if corpus
                    .links(source)
                    .map_or(false, |links| links.contains(dest))
                {
                    incoming += ranks[source] / out_degree as f64;
                }
            }

            next.insert(dest.to_owned(), (1.0 - damping) / n + damping * incoming);
        }

        let converged = next
            .iter()
            .all(|(page, rank)| (rank - ranks[page]).abs() < CONVERGENCE_THRESHOLD);
        ranks = next;

        if converged {
            break;
        }
    }

    info!(iterations, pages = corpus.len(), "power iteration converged");

    Ok(ranks)
}
