use thiserror::Error;

/// Which side of the cross an input belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parent {
    First,
    Second,
}

impl std::fmt::Display for Parent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Parent::First => write!(f, "parent 1"),
            Parent::Second => write!(f, "parent 2"),
        }
    }
}

/// Problems with caller-supplied genotypes. The input has to change before a retry can succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing genotype for {parent}")]
    MissingGenotype { parent: Parent },

    #[error("genotype length mismatch (parent 1 has {len1} alleles, parent 2 has {len2})")]
    LengthMismatch { len1: usize, len2: usize },

    #[error("locus count mismatch (parent 1 has {n1} loci, parent 2 has {n2})")]
    LocusCountMismatch { n1: usize, n2: usize },

    #[error("could not read locus \"{token}\" of {parent} as an allele pair")]
    MalformedLocus { parent: Parent, token: String },

    #[error("genotypes do not contain a complete locus")]
    NoCompleteLocus,

    #[error("too many loci for a joint cross (got {n_loci}, max {max})")]
    TooManyLoci { n_loci: usize, max: usize },
}

#[derive(Debug, Error)]
pub enum CustomError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("calculation failed: {reason}")]
    Calculation { reason: String },

    #[error("could not create output directory")]
    OutputDir {
        #[source]
        source: std::io::Error,
    },

    #[error("could not write to {path}")]
    Write {
        #[source]
        source: std::io::Error,
        path: std::path::PathBuf,
    },

    #[error("could not read CSV file {path}")]
    CsvRead {
        #[source]
        source: csv::Error,
        path: std::path::PathBuf,
    },

    #[error("could not write to CSV")]
    CsvWrite(#[from] csv::Error),

    #[error("could not write JSON")]
    Json(#[from] serde_json::Error),

    #[error("crosses CSV must have exactly two columns (parent1, parent2) (line {line_num} has {n_fields})")]
    CrossesColumns { line_num: usize, n_fields: usize },

    #[error("crosses CSV did not contain any crosses")]
    CrossesEmpty,

    #[error("unknown locus \"{name}\" (use --list-loci to see the reference table)")]
    UnknownLocus { name: String },

    #[error("missing genotype for {parent} (pass --{flag} or --locus)")]
    MissingParent { parent: Parent, flag: &'static str },

    #[error("could not build thread pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl CustomError {
    /// True when the error came from bad input rather than an internal failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, CustomError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, CustomError>;
