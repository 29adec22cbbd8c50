//! Exact inference by weighted enumeration.
//!
//! Every person carries a hidden gene count in {0, 1, 2} and a phenotype
//! that may or may not be observed. We enumerate every assignment of gene
//! counts and phenotypes that is consistent with the observations, weight
//! each one by its joint probability, and accumulate the weights into
//! per-person distributions. The enumeration is exponential in the
//! population size; that is the accepted cost of being exact, and it is
//! fine for the pedigrees of a few people this is meant for.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::pedigree::Population;
use crate::subsets::subsets;

/// The fixed conditional probability tables the model runs on.
///
/// Passed by value wherever it is needed rather than living in a global,
/// so tests can swap in alternative tables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbabilityTables {
    /// Unconditional prior over a founder's gene count, indexed by count.
    pub gene_prior: [f64; 3],
    /// Phenotype likelihood, indexed by `[gene count][has trait as usize]`.
    pub trait_given_gene: [[f64; 2]; 3],
    /// Probability that a transmitted copy flips on the way to the child.
    pub mutation: f64,
}

impl Default for ProbabilityTables {
    fn default() -> Self {
        ProbabilityTables {
            gene_prior: [0.96, 0.03, 0.01],
            trait_given_gene: [[0.99, 0.01], [0.44, 0.56], [0.35, 0.65]],
            mutation: 0.01,
        }
    }
}

impl ProbabilityTables {
    /// Probability that a parent with `copies` copies passes the gene on.
    ///
    /// No copies can still transmit via mutation; two copies can still fail
    /// to; one copy is a coin flip either way.
    fn transmits(&self, copies: usize) -> f64 {
        match copies {
            0 => self.mutation,
            1 => 0.5,
            _ => 1.0 - self.mutation,
        }
    }

    fn likelihood(&self, copies: usize, has_trait: bool) -> f64 {
        self.trait_given_gene[copies][usize::from(has_trait)]
    }
}

/// Gene count assigned to `name` by the current partition.
fn gene_count(name: &str, one_gene: &BTreeSet<&str>, two_genes: &BTreeSet<&str>) -> usize {
    if one_gene.contains(name) {
        1
    } else if two_genes.contains(name) {
        2
    } else {
        0
    }
}

/// The joint probability of one complete assignment: everyone in `one_gene`
/// has one copy, everyone in `two_genes` has two, everyone else has zero,
/// and exactly the people in `have_trait` show the trait.
///
/// Founders draw their gene count from the prior. A child's count comes
/// from two independent transmission events, one per parent: zero copies
/// means neither parent transmitted, two means both did, and one copy sums
/// the two mutually exclusive ways exactly one of them did.
pub fn joint_probability(
    population: &Population,
    tables: &ProbabilityTables,
    one_gene: &BTreeSet<&str>,
    two_genes: &BTreeSet<&str>,
    have_trait: &BTreeSet<&str>,
) -> f64 {
    let mut probability = 1.0;

    for person in population.people() {
        let copies = gene_count(&person.name, one_gene, two_genes);
        let has_trait = have_trait.contains(person.name.as_str());

        match &person.parents {
            None => {
                probability *= tables.gene_prior[copies] * tables.likelihood(copies, has_trait);
            }
            Some(parents) => {
                let from_mother = tables.transmits(gene_count(&parents.mother, one_gene, two_genes));
                let from_father = tables.transmits(gene_count(&parents.father, one_gene, two_genes));

                let inheritance = match copies {
                    0 => (1.0 - from_mother) * (1.0 - from_father),
                    1 => from_mother * (1.0 - from_father) + (1.0 - from_mother) * from_father,
                    _ => from_mother * from_father,
                };

                probability *= inheritance * tables.likelihood(copies, has_trait);
            }
        }
    }

    probability
}

/// A person's normalized posterior over gene count and phenotype.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Posterior {
    /// Probability of carrying 0, 1, or 2 copies.
    pub gene: [f64; 3],
    /// Probability of not showing / showing the trait.
    pub phenotype: [f64; 2],
}

impl Posterior {
    /// Rescale both distributions independently to sum to 1, keeping
    /// relative proportions.
    pub fn normalize(&mut self) {
        let gene_total: f64 = self.gene.iter().sum();
        for value in &mut self.gene {
            *value /= gene_total;
        }

        let phenotype_total: f64 = self.phenotype.iter().sum();
        for value in &mut self.phenotype {
            *value /= phenotype_total;
        }
    }
}

/// Compute every person's posterior by full enumeration.
///
/// Iterates all trait subsets consistent with the observations, then all
/// disjoint one-gene / two-gene subset pairs, accumulating each
/// assignment's joint probability into the per-person running sums before
/// normalizing.
pub fn posteriors(
    population: &Population,
    tables: &ProbabilityTables,
) -> BTreeMap<String, Posterior> {
    let names: Vec<&str> = population.names().collect();
    let mut accumulated: BTreeMap<&str, Posterior> = names
        .iter()
        .map(|name| (*name, Posterior::default()))
        .collect();

    let mut assignments = 0usize;

    for have_trait in subsets(&names) {
        let contradicts_evidence = population.people().any(|person| {
            person
                .trait_observed
                .map_or(false, |observed| observed != have_trait.contains(person.name.as_str()))
        });
        if contradicts_evidence {
            continue;
        }

        for one_gene in subsets(&names) {
            let remaining: Vec<&str> = names
                .iter()
                .copied()
                .filter(|name| !one_gene.contains(name))
                .collect();

            for two_genes in subsets(&remaining) {
                let p = joint_probability(population, tables, &one_gene, &two_genes, &have_trait);
                assignments += 1;

                for name in &names {
                    let entry = accumulated
                        .get_mut(name)
                        .expect("accumulator has an entry per name");
                    entry.gene[gene_count(name, &one_gene, &two_genes)] += p;
                    entry.phenotype[usize::from(have_trait.contains(name))] += p;
                }
            }
        }
    }

    debug!(assignments, people = names.len(), "enumeration complete");

    accumulated
        .into_iter()
        .map(|(name, mut posterior)| {
            posterior.normalize();
            (name.to_owned(), posterior)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pedigree::Person;

    fn family_trio(
        harry_trait: Option<bool>,
        james_trait: Option<bool>,
        lily_trait: Option<bool>,
    ) -> Population {
        Population::from_people([
            Person::child("Harry", "Lily", "James", harry_trait),
            Person::founder("James", james_trait),
            Person::founder("Lily", lily_trait),
        ])
        .unwrap()
    }

    fn set<'a>(names: &[&'a str]) -> BTreeSet<&'a str> {
        names.iter().copied().collect()
    }

    #[test]
    fn single_founder_joint_probability() {
        let population = Population::from_people([Person::founder("Arthur", None)]).unwrap();
        let tables = ProbabilityTables::default();

        let p = joint_probability(&population, &tables, &set(&["Arthur"]), &set(&[]), &set(&[]));

        // One copy without the trait: 0.03 × 0.44.
        assert!((p - 0.0132).abs() < 1e-12);
    }

    #[test]
    fn trio_joint_probability_matches_hand_computation() {
        let population = family_trio(None, None, None);
        let tables = ProbabilityTables::default();

        // Lily: zero copies, no trait  → 0.96 × 0.99
        // James: two copies, trait     → 0.01 × 0.65
        // Harry: one copy, no trait    → (0.01·0.01 + 0.99·0.99) × 0.44
        let p = joint_probability(
            &population,
            &tables,
            &set(&["Harry"]),
            &set(&["James"]),
            &set(&["James"]),
        );

        assert!((p - 0.0026643247488).abs() < 1e-12);
    }

    #[test]
    fn zero_mutation_makes_spontaneous_copies_impossible() {
        let tables = ProbabilityTables {
            mutation: 0.0,
            ..Default::default()
        };
        let population = family_trio(None, None, None);

        // Both parents carry zero copies, so without mutation Harry cannot
        // carry one.
        let p = joint_probability(&population, &tables, &set(&["Harry"]), &set(&[]), &set(&[]));

        assert_eq!(p, 0.0);
    }

    #[test]
    fn joint_probabilities_sum_to_one_over_the_full_enumeration() {
        let population = family_trio(None, None, None);
        let tables = ProbabilityTables::default();
        let names: Vec<&str> = population.names().collect();

        let mut total = 0.0;
        for have_trait in crate::subsets::subsets(&names) {
            for one_gene in crate::subsets::subsets(&names) {
                let remaining: Vec<&str> = names
                    .iter()
                    .copied()
                    .filter(|name| !one_gene.contains(name))
                    .collect();
                for two_genes in crate::subsets::subsets(&remaining) {
                    total +=
                        joint_probability(&population, &tables, &one_gene, &two_genes, &have_trait);
                }
            }
        }

        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn posteriors_are_normalized() {
        let population = family_trio(None, Some(true), Some(false));
        let tables = ProbabilityTables::default();

        let result = posteriors(&population, &tables);

        assert_eq!(result.len(), 3);
        for posterior in result.values() {
            let gene_total: f64 = posterior.gene.iter().sum();
            let phenotype_total: f64 = posterior.phenotype.iter().sum();
            assert!((gene_total - 1.0).abs() < 1e-9);
            assert!((phenotype_total - 1.0).abs() < 1e-9);
            assert!(posterior.gene.iter().all(|p| *p >= 0.0));
            assert!(posterior.phenotype.iter().all(|p| *p >= 0.0));
        }
    }

    #[test]
    fn observed_traits_pin_the_phenotype_posterior() {
        let population = family_trio(None, Some(true), Some(false));
        let tables = ProbabilityTables::default();

        let result = posteriors(&population, &tables);

        let james = &result["James"];
        assert_eq!(james.phenotype[0], 0.0);
        assert!((james.phenotype[1] - 1.0).abs() < 1e-12);

        let lily = &result["Lily"];
        assert_eq!(lily.phenotype[1], 0.0);
        assert!((lily.phenotype[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn founder_without_evidence_recovers_the_prior() {
        let population = Population::from_people([Person::founder("Arthur", None)]).unwrap();
        let tables = ProbabilityTables::default();

        let result = posteriors(&population, &tables);
        let arthur = &result["Arthur"];

        for copies in 0..3 {
            assert!((arthur.gene[copies] - tables.gene_prior[copies]).abs() < 1e-9);
        }
    }
}
