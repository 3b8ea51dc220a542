use crate::error::{CustomError, Result, ValidationError};
use crate::model::{Allele, AllelePair, Genotype, GenotypeProbability};
use crate::parse::{Notation, parse_parents};
use crate::phenotype::classify;
use clap::ValueEnum;
use itertools::{Itertools, iproduct};
use ndarray::Array2;
use std::collections::HashMap;

/// Largest number of loci a joint cross expands (2^8 x 2^8 cells).
pub const MAX_JOINT_LOCI: usize = 8;

/// How offspring pairings from several loci are combined into one table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Aggregation {
    /// Every locus adds its four pairings to one shared table. Loci are not combined.
    #[default]
    Pooled,
    /// Full multi-locus Punnett square. Keys hold one pair per locus.
    Joint,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrossOptions {
    pub notation: Notation,
    pub aggregation: Aggregation,
}

/// Crosses two parents with the default options (flat notation, pooled table).
pub fn calculate(parent1: &str, parent2: &str) -> Result<Vec<GenotypeProbability>> {
    calculate_with(parent1, parent2, &CrossOptions::default())
}

/// Crosses two parents and returns offspring genotypes by descending probability (in percent).
pub fn calculate_with(
    parent1: &str,
    parent2: &str,
    options: &CrossOptions,
) -> Result<Vec<GenotypeProbability>> {
    let (genotype1, genotype2) = parse_parents(parent1, parent2, options.notation)?;
    let frequencies = match options.aggregation {
        Aggregation::Pooled => pooled_frequencies(&genotype1, &genotype2),
        Aggregation::Joint => joint_frequencies(&genotype1, &genotype2)?,
    };
    frequencies.into_probabilities()
}

/// Insertion-ordered genotype counts.
#[derive(Debug, Default)]
struct Frequencies {
    index: HashMap<String, usize>,
    counts: Vec<(String, u64)>,
}

impl Frequencies {
    fn add(&mut self, key: String) {
        match self.index.get(&key) {
            Some(&idx) => self.counts[idx].1 += 1,
            None => {
                self.index.insert(key.clone(), self.counts.len());
                self.counts.push((key, 1));
            }
        }
    }

    fn total(&self) -> u64 {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    fn into_probabilities(self) -> Result<Vec<GenotypeProbability>> {
        let total = self.total();
        if total == 0 {
            return Err(CustomError::Calculation {
                reason: "no offspring pairings were counted".to_string(),
            });
        }

        let mut results: Vec<GenotypeProbability> = self
            .counts
            .into_iter()
            .map(|(genotype, count)| GenotypeProbability {
                phenotype: classify(&genotype).to_string(),
                probability: 100.0 * count as f64 / total as f64,
                genotype,
            })
            .collect();
        // Stable, so ties keep first-encounter order
        results.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        Ok(results)
    }
}

fn pooled_frequencies(genotype1: &Genotype, genotype2: &Genotype) -> Frequencies {
    let mut frequencies = Frequencies::default();
    for (locus1, locus2) in genotype1.loci().iter().zip(genotype2.loci()) {
        for (a, b) in iproduct!(locus1.alleles(), locus2.alleles()) {
            frequencies.add(AllelePair::canonical(a.clone(), b.clone()).to_string());
        }
    }
    frequencies
}

fn joint_frequencies(genotype1: &Genotype, genotype2: &Genotype) -> Result<Frequencies> {
    let square = punnett_square(genotype1, genotype2)?;
    let mut frequencies = Frequencies::default();
    for offspring in square.iter() {
        frequencies.add(offspring.to_string());
    }
    Ok(frequencies)
}

/// All gametes of a parent, one allele per locus. Locus 0 varies slowest.
pub fn gametes(genotype: &Genotype) -> Vec<Vec<Allele>> {
    genotype
        .loci()
        .iter()
        .map(|locus| locus.alleles().into_iter())
        .multi_cartesian_product()
        .map(|gamete| gamete.into_iter().cloned().collect())
        .collect()
}

fn fertilize(gamete1: &[Allele], gamete2: &[Allele]) -> Genotype {
    Genotype::new(
        gamete1
            .iter()
            .zip(gamete2)
            .map(|(a, b)| AllelePair::canonical(a.clone(), b.clone()))
            .collect(),
    )
}

/// Builds the full Punnett square. Rows are gametes of `genotype1`, columns gametes of `genotype2`.
pub fn punnett_square(genotype1: &Genotype, genotype2: &Genotype) -> Result<Array2<Genotype>> {
    let n_loci = genotype1.n_loci();
    if n_loci != genotype2.n_loci() {
        return Err(ValidationError::LocusCountMismatch {
            n1: n_loci,
            n2: genotype2.n_loci(),
        }
        .into());
    }
    if n_loci == 0 {
        return Err(ValidationError::NoCompleteLocus.into());
    }
    if n_loci > MAX_JOINT_LOCI {
        return Err(ValidationError::TooManyLoci {
            n_loci,
            max: MAX_JOINT_LOCI,
        }
        .into());
    }

    let gametes1 = gametes(genotype1);
    let gametes2 = gametes(genotype2);
    Ok(Array2::from_shape_fn(
        (gametes1.len(), gametes2.len()),
        |(i, j)| fertilize(&gametes1[i], &gametes2[j]),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Parent;
    use crate::parse::parse_pairs;

    fn summary(results: &[GenotypeProbability]) -> Vec<(&str, f64)> {
        results
            .iter()
            .map(|r| (r.genotype.as_str(), r.probability))
            .collect()
    }

    fn total(results: &[GenotypeProbability]) -> f64 {
        results.iter().map(|r| r.probability).sum()
    }

    fn expect_validation(result: Result<Vec<GenotypeProbability>>) -> ValidationError {
        match result {
            Err(CustomError::Validation(e)) => e,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn monohybrid_cross() {
        let results = calculate("Bb", "Bb").unwrap();
        assert_eq!(
            summary(&results),
            vec![("Bb", 50.0), ("BB", 25.0), ("bb", 25.0)]
        );
    }

    #[test]
    fn repeated_calls_are_identical() {
        let first = calculate("Bb Ee Kk", "bb Ee kk").unwrap();
        let second = calculate("Bb Ee Kk", "bb Ee kk").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn probabilities_sum_to_one_hundred() {
        for (p1, p2) in [
            ("Bb", "Bb"),
            ("BB", "bb"),
            ("Bb Ee", "Bb Ee"),
            ("Bb Ee Dd", "bb ee DD"),
            ("Kk Bb Ee Mm", "kk bb Ee mm"),
        ] {
            let results = calculate(p1, p2).unwrap();
            assert!(
                (total(&results) - 100.0).abs() < 0.01,
                "{p1} x {p2} summed to {}",
                total(&results)
            );
        }
    }

    #[test]
    fn swapped_pairings_share_a_key() {
        let a = AllelePair::canonical(Allele::new("b"), Allele::new("B"));
        let b = AllelePair::canonical(Allele::new("B"), Allele::new("b"));
        assert_eq!(a.to_string(), b.to_string());

        let results = calculate("bB", "Bb").unwrap();
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn empty_genotype_is_rejected() {
        assert_eq!(
            expect_validation(calculate("", "Bb")),
            ValidationError::MissingGenotype {
                parent: Parent::First
            }
        );
        assert_eq!(
            expect_validation(calculate("Bb", "")),
            ValidationError::MissingGenotype {
                parent: Parent::Second
            }
        );
    }

    #[test]
    fn length_mismatch_is_rejected() {
        assert_eq!(
            expect_validation(calculate("Bb", "BbEe")),
            ValidationError::LengthMismatch { len1: 2, len2: 4 }
        );
    }

    #[test]
    fn pooled_multi_locus_cross() {
        let results = calculate("Bb Ee", "Bb Ee").unwrap();
        assert_eq!(
            summary(&results),
            vec![
                ("Bb", 25.0),
                ("Ee", 25.0),
                ("BB", 12.5),
                ("bb", 12.5),
                ("EE", 12.5),
                ("ee", 12.5),
            ]
        );
        assert!((total(&results) - 100.0).abs() < 0.01);
    }

    #[test]
    fn every_genotype_has_a_phenotype() {
        let results = calculate("Bb Ee Dd", "Bb ee Dd").unwrap();
        for result in &results {
            assert!(!result.phenotype.is_empty());
        }
        let dilute = results.iter().find(|r| r.genotype == "Dd").unwrap();
        assert_eq!(dilute.phenotype, "Unknown");
        let red = results.iter().find(|r| r.genotype == "ee").unwrap();
        assert_eq!(red.phenotype, "Red/Yellow (recessive)");
    }

    #[test]
    fn joint_dihybrid_cross() {
        let options = CrossOptions {
            aggregation: Aggregation::Joint,
            ..CrossOptions::default()
        };
        let results = calculate_with("Bb Ee", "Bb Ee", &options).unwrap();
        assert_eq!(results.len(), 9);
        assert_eq!(results[0].genotype, "Bb Ee");
        assert_eq!(results[0].probability, 25.0);
        let double_recessive = results.iter().find(|r| r.genotype == "bb ee").unwrap();
        assert_eq!(double_recessive.probability, 6.25);
        assert_eq!(double_recessive.phenotype, "Red/Yellow (recessive)");
        assert!((total(&results) - 100.0).abs() < 0.01);
    }

    #[test]
    fn joint_and_pooled_agree_on_one_locus() {
        let joint = CrossOptions {
            aggregation: Aggregation::Joint,
            ..CrossOptions::default()
        };
        assert_eq!(
            calculate_with("Bb", "bb", &joint).unwrap(),
            calculate("Bb", "bb").unwrap()
        );
    }

    #[test]
    fn pairs_notation_with_multi_character_alleles() {
        let options = CrossOptions {
            notation: Notation::Pairs,
            aggregation: Aggregation::Joint,
        };
        let results = calculate_with("K/kbr", "kbr/ky", &options).unwrap();
        assert_eq!(
            summary(&results),
            vec![("K/kbr", 25.0), ("K/ky", 25.0), ("kbr/kbr", 25.0), ("kbr/ky", 25.0)]
        );
        assert_eq!(results[0].phenotype, "Black (dominant)");
        assert_eq!(results[2].phenotype, "Brindle");
    }

    #[test]
    fn joint_rejects_too_many_loci() {
        let options = CrossOptions {
            aggregation: Aggregation::Joint,
            ..CrossOptions::default()
        };
        let parent = "Aa".repeat(MAX_JOINT_LOCI + 1);
        assert_eq!(
            expect_validation(calculate_with(&parent, &parent, &options)),
            ValidationError::TooManyLoci {
                n_loci: MAX_JOINT_LOCI + 1,
                max: MAX_JOINT_LOCI
            }
        );
    }

    #[test]
    fn gametes_vary_last_locus_fastest() {
        let genotype = parse_pairs("Bb Ee", Parent::First).unwrap();
        let rendered: Vec<String> = gametes(&genotype)
            .iter()
            .map(|g| g.iter().join(""))
            .collect();
        assert_eq!(rendered, vec!["BE", "Be", "bE", "be"]);
    }

    #[test]
    fn square_shape_matches_gamete_counts() {
        let genotype1 = parse_pairs("Bb Ee Dd", Parent::First).unwrap();
        let genotype2 = parse_pairs("bb ee DD", Parent::Second).unwrap();
        let square = punnett_square(&genotype1, &genotype2).unwrap();
        assert_eq!(square.dim(), (8, 8));
        assert_eq!(square[[0, 0]].to_string(), "Bb Ee DD");
    }
}
