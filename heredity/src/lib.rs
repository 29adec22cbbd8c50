//! Exact Bayesian inference over a small pedigree.
//!
//! Given a CSV of people, their parents, and any observed traits, this
//! crate computes every person's posterior distribution over how many
//! copies of a gene they carry and whether they show the associated trait.
//! The model is the classic two-transmission one: each parent independently
//! passes a copy (or not) with a probability set by their own count, with a
//! small mutation rate either way.
//!
//! Everything is computed by exhaustive enumeration over gene and trait
//! assignments, so it is exact and also exponential in the number of
//! people. Keep pedigrees small.

pub mod inference;
pub mod pedigree;
pub mod subsets;

pub use inference::{joint_probability, posteriors, Posterior, ProbabilityTables};
pub use pedigree::{Parents, PedigreeError, Person, Population};
