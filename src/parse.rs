use crate::error::{Parent, Result, ValidationError};
use crate::model::{Allele, AllelePair, Genotype};
use clap::ValueEnum;

/// How a genotype string is split into loci.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Notation {
    /// Whitespace is ignored and every two characters form a locus ("Bb Ee" or "BbEe").
    #[default]
    Flat,
    /// Whitespace separates loci. Multi-character alleles are split with '/' ("K/kbr Ay/at").
    Pairs,
}

/// Parses both parents and checks they describe the same number of loci.
pub fn parse_parents(parent1: &str, parent2: &str, notation: Notation) -> Result<(Genotype, Genotype)> {
    let (genotype1, genotype2) = match notation {
        Notation::Flat => parse_flat_parents(parent1, parent2)?,
        Notation::Pairs => {
            let genotype1 = parse_pairs(parent1, Parent::First)?;
            let genotype2 = parse_pairs(parent2, Parent::Second)?;
            if genotype1.n_loci() != genotype2.n_loci() {
                return Err(ValidationError::LocusCountMismatch {
                    n1: genotype1.n_loci(),
                    n2: genotype2.n_loci(),
                }
                .into());
            }
            (genotype1, genotype2)
        }
    };
    if genotype1.n_loci() == 0 {
        return Err(ValidationError::NoCompleteLocus.into());
    }
    Ok((genotype1, genotype2))
}

fn parse_flat_parents(parent1: &str, parent2: &str) -> Result<(Genotype, Genotype)> {
    let alleles1 = strip_whitespace(parent1);
    let alleles2 = strip_whitespace(parent2);
    if alleles1.is_empty() {
        return Err(ValidationError::MissingGenotype {
            parent: Parent::First,
        }
        .into());
    }
    if alleles2.is_empty() {
        return Err(ValidationError::MissingGenotype {
            parent: Parent::Second,
        }
        .into());
    }
    if alleles1.len() != alleles2.len() {
        return Err(ValidationError::LengthMismatch {
            len1: alleles1.len(),
            len2: alleles2.len(),
        }
        .into());
    }
    Ok((flat_loci(&alleles1), flat_loci(&alleles2)))
}

fn strip_whitespace(raw: &str) -> Vec<char> {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

// A trailing unpaired allele is dropped.
fn flat_loci(alleles: &[char]) -> Genotype {
    Genotype::new(
        alleles
            .chunks_exact(2)
            .map(|pair| AllelePair::new(Allele::new(pair[0]), Allele::new(pair[1])))
            .collect(),
    )
}

/// Parses one genotype written as whitespace-separated locus tokens.
pub fn parse_pairs(raw: &str, parent: Parent) -> Result<Genotype> {
    let loci = raw
        .split_whitespace()
        .map(|token| parse_locus_token(token, parent))
        .collect::<Result<Vec<_>>>()?;
    if loci.is_empty() {
        return Err(ValidationError::MissingGenotype { parent }.into());
    }
    Ok(Genotype::new(loci))
}

fn parse_locus_token(token: &str, parent: Parent) -> Result<AllelePair> {
    let malformed = || ValidationError::MalformedLocus {
        parent,
        token: token.to_string(),
    };

    if let Some((a, b)) = token.split_once('/') {
        if a.is_empty() || b.is_empty() || b.contains('/') {
            return Err(malformed().into());
        }
        return Ok(AllelePair::new(Allele::new(a), Allele::new(b)));
    }

    let mut chars = token.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(a), Some(b), None) => Ok(AllelePair::new(Allele::new(a), Allele::new(b))),
        _ => Err(malformed().into()),
    }
}
