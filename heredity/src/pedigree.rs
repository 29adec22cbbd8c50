//! Loading and validating the pedigree.
//!
//! The input is a CSV with header `name,mother,father,trait`. Parents are
//! all-or-nothing: a row either names both of them or neither, and every
//! named parent must itself be a row in the file. Violations are fatal at
//! load time; there is nothing sensible to infer over a broken pedigree.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

/// The two parent references of a non-founder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parents {
    pub mother: String,
    pub father: String,
}

/// One row of the pedigree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    /// `None` marks a founder. Both parents are present otherwise.
    pub parents: Option<Parents>,
    /// The observed phenotype, when the data records one.
    pub trait_observed: Option<bool>,
}

impl Person {
    /// A person with no recorded parents.
    pub fn founder(name: &str, trait_observed: Option<bool>) -> Self {
        Person {
            name: name.to_owned(),
            parents: None,
            trait_observed,
        }
    }

    /// A person with both parents recorded.
    pub fn child(name: &str, mother: &str, father: &str, trait_observed: Option<bool>) -> Self {
        Person {
            name: name.to_owned(),
            parents: Some(Parents {
                mother: mother.to_owned(),
                father: father.to_owned(),
            }),
            trait_observed,
        }
    }
}

/// Why a pedigree failed to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PedigreeError {
    /// A row named exactly one of mother/father.
    MissingParent { person: String },
    /// A parent reference points at a name with no row of its own.
    UnknownParent { person: String, parent: String },
    /// A data row did not have the four expected fields.
    MalformedRow { line: usize },
    /// The input had no header row.
    MissingHeader,
}

impl Display for PedigreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PedigreeError::MissingParent { person } => {
                write!(f, "{person} names only one parent; rows need both or neither")
            }
            PedigreeError::UnknownParent { person, parent } => {
                write!(f, "{person} references unknown parent {parent}")
            }
            PedigreeError::MalformedRow { line } => {
                write!(f, "line {line} does not have the four expected fields")
            }
            PedigreeError::MissingHeader => write!(f, "input has no header row"),
        }
    }
}

impl std::error::Error for PedigreeError {}

/// The full set of people, keyed by name.
///
/// Parent references form a forest: parents are themselves entries, and the
/// structure carries no cycles. Iteration order is the sorted name order,
/// which keeps every enumeration downstream deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Population {
    people: BTreeMap<String, Person>,
}

impl Population {
    /// Build a population from already-constructed people, validating
    /// parent references the same way the CSV loader does.
    pub fn from_people<I>(people: I) -> Result<Self, PedigreeError>
    where
        I: IntoIterator<Item = Person>,
    {
        let population = Population {
            people: people
                .into_iter()
                .map(|person| (person.name.clone(), person))
                .collect(),
        };
        population.validate()?;
        Ok(population)
    }

    /// Parse the `name,mother,father,trait` CSV format.
    ///
    /// Empty mother and father mean a founder; `trait` is `1`, `0`, or
    /// empty for unknown. Anything else in the trait column also reads as
    /// unknown.
    pub fn from_csv(text: &str) -> Result<Self, PedigreeError> {
        let mut lines = text.lines().enumerate();
        let (_, _header) = lines.next().ok_or(PedigreeError::MissingHeader)?;

        let mut people = BTreeMap::new();
        for (index, line) in lines {
            if line.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            let &[name, mother, father, observed] = fields.as_slice() else {
                return Err(PedigreeError::MalformedRow { line: index + 1 });
            };

            let parents = match (mother.is_empty(), father.is_empty()) {
                (true, true) => None,
                (false, false) => Some(Parents {
                    mother: mother.to_owned(),
                    father: father.to_owned(),
                }),
                _ => {
                    return Err(PedigreeError::MissingParent {
                        person: name.to_owned(),
                    })
                }
            };

            let trait_observed = match observed {
                "1" => Some(true),
                "0" => Some(false),
                _ => None,
            };

            people.insert(
                name.to_owned(),
                Person {
                    name: name.to_owned(),
                    parents,
                    trait_observed,
                },
            );
        }

        let population = Population { people };
        population.validate()?;
        Ok(population)
    }

    fn validate(&self) -> Result<(), PedigreeError> {
        for person in self.people.values() {
            if let Some(parents) = &person.parents {
                for parent in [&parents.mother, &parents.father] {
                    if !self.people.contains_key(parent) {
                        return Err(PedigreeError::UnknownParent {
                            person: person.name.clone(),
                            parent: parent.clone(),
                        });
                    }
                }
            }
        }

        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Person> {
        self.people.get(name)
    }

    /// Everyone, in sorted name order.
    pub fn people(&self) -> impl Iterator<Item = &Person> {
        self.people.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.people.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAMILY: &str = "\
name,mother,father,trait
Harry,Lily,James,
James,,,1
Lily,,,0
";

    #[test]
    fn loads_founders_and_children() {
        let population = Population::from_csv(FAMILY).unwrap();

        assert_eq!(population.len(), 3);

        let harry = population.get("Harry").unwrap();
        assert_eq!(
            harry.parents,
            Some(Parents {
                mother: "Lily".to_owned(),
                father: "James".to_owned(),
            })
        );
        assert_eq!(harry.trait_observed, None);

        let james = population.get("James").unwrap();
        assert_eq!(james.parents, None);
        assert_eq!(james.trait_observed, Some(true));

        let lily = population.get("Lily").unwrap();
        assert_eq!(lily.trait_observed, Some(false));
    }

    #[test]
    fn names_iterate_sorted() {
        let population = Population::from_csv(FAMILY).unwrap();
        let names: Vec<&str> = population.names().collect();
        assert_eq!(names, vec!["Harry", "James", "Lily"]);
    }

    #[test]
    fn one_parent_is_rejected() {
        let csv = "name,mother,father,trait\nHarry,Lily,,\nLily,,,0\n";
        assert_eq!(
            Population::from_csv(csv),
            Err(PedigreeError::MissingParent {
                person: "Harry".to_owned()
            })
        );
    }

    #[test]
    fn unknown_parent_is_rejected() {
        let csv = "name,mother,father,trait\nHarry,Lily,James,\nLily,,,0\n";
        assert_eq!(
            Population::from_csv(csv),
            Err(PedigreeError::UnknownParent {
                person: "Harry".to_owned(),
                parent: "James".to_owned()
            })
        );
    }

    #[test]
    fn short_rows_are_rejected() {
        let csv = "name,mother,father,trait\nHarry,Lily\n";
        assert_eq!(
            Population::from_csv(csv),
            Err(PedigreeError::MalformedRow { line: 2 })
        );
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(Population::from_csv(""), Err(PedigreeError::MissingHeader));
    }

    #[test]
    fn from_people_validates_references() {
        let result = Population::from_people([
            Person::child("Harry", "Lily", "James", None),
            Person::founder("Lily", Some(false)),
        ]);
        assert_eq!(
            result.unwrap_err(),
            PedigreeError::UnknownParent {
                person: "Harry".to_owned(),
                parent: "James".to_owned()
            }
        );
    }
}
