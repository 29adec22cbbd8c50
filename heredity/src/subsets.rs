//! Subset enumeration, kept apart from the probability math so the
//! combinatorics can be tested on their own.

use std::collections::BTreeSet;

use itertools::Itertools;

/// Every subset of `items`, from the empty set up to the full set.
///
/// Subsets come back in powerset order: by size, and within a size in the
/// positional order of `items`. For `n` items that is `2^n` sets, which is
/// exactly why callers keep their populations small.
pub fn subsets<T>(items: &[T]) -> Vec<BTreeSet<T>>
where
    T: Ord + Clone,
{
    items
        .iter()
        .cloned()
        .powerset()
        .map(BTreeSet::from_iter)
        .collect()
}
