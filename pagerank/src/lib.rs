//! PageRank over a directory of HTML pages.
//!
//! The [corpus] module crawls a directory of `.html` files and keeps only
//! the links that point at other pages in the same directory. The [rank]
//! module then estimates each page's rank twice: once by simulating a
//! random surfer ([rank::sample_rank]) and once by iterating the rank
//! equations to a fixed point ([rank::iterate_rank]). The iterative answer
//! is exact and reproducible; the sampled one converges toward it as the
//! walk gets longer.

pub mod corpus;
pub mod rank;

pub use corpus::{Corpus, CorpusError};
pub use rank::{iterate_rank, sample_rank, transition_model, DAMPING, SAMPLES};
