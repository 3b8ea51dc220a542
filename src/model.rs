use itertools::Itertools;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// One allele symbol at a locus, e.g. `B`, `b`, `kbr`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Allele(String);

impl Allele {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    pub fn symbol(&self) -> &str {
        &self.0
    }

    /// Dominant alleles are written with a leading uppercase letter.
    pub fn is_dominant(&self) -> bool {
        self.0.chars().next().is_some_and(char::is_uppercase)
    }

    fn is_single(&self) -> bool {
        self.0.chars().count() == 1
    }

    /// Case-insensitive alphabetical order, with the dominant form first when
    /// two alleles only differ in case.
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.0
            .to_lowercase()
            .cmp(&other.0.to_lowercase())
            .then_with(|| other.is_dominant().cmp(&self.is_dominant()))
    }
}

impl fmt::Display for Allele {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The two alleles an individual carries at one locus.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AllelePair {
    first: Allele,
    second: Allele,
}

impl AllelePair {
    /// Keeps the alleles in the order given. Parent genotypes are stored this way
    /// so gametes are enumerated in input order.
    pub fn new(first: Allele, second: Allele) -> Self {
        Self { first, second }
    }

    /// Orders the alleles so that `bB` and `Bb` compare equal.
    pub fn canonical(a: Allele, b: Allele) -> Self {
        if b.canonical_cmp(&a) == Ordering::Less {
            Self::new(b, a)
        } else {
            Self::new(a, b)
        }
    }

    pub fn alleles(&self) -> [&Allele; 2] {
        [&self.first, &self.second]
    }
}

impl fmt::Display for AllelePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.first.is_single() && self.second.is_single() {
            write!(f, "{}{}", self.first, self.second)
        } else {
            write!(f, "{}/{}", self.first, self.second)
        }
    }
}

/// An ordered list of loci.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Genotype {
    loci: Vec<AllelePair>,
}

impl Genotype {
    pub fn new(loci: Vec<AllelePair>) -> Self {
        Self { loci }
    }

    pub fn loci(&self) -> &[AllelePair] {
        &self.loci
    }

    pub fn n_loci(&self) -> usize {
        self.loci.len()
    }
}

impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.loci.iter().join(" "))
    }
}

/// One row of a calculation result. `probability` is a percentage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenotypeProbability {
    pub genotype: String,
    pub probability: f64,
    pub phenotype: String,
}
