use std::fmt;

/// Simplified coat colour label. Real coat colour depends on how all loci
/// interact, so this is only a first approximation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phenotype {
    RecessiveRed,
    DominantBlack,
    Brindle,
    Brown,
    Black,
    Unknown,
}

impl Phenotype {
    pub fn label(self) -> &'static str {
        match self {
            Phenotype::RecessiveRed => "Red/Yellow (recessive)",
            Phenotype::DominantBlack => "Black (dominant)",
            Phenotype::Brindle => "Brindle",
            Phenotype::Brown => "Brown/Liver/Chocolate",
            Phenotype::Black => "Black",
            Phenotype::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Phenotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

struct Rule {
    pattern: &'static str,
    phenotype: Phenotype,
}

// First match wins. `ee` is epistatic over everything below it.
const RULES: &[Rule] = &[
    Rule {
        pattern: "ee",
        phenotype: Phenotype::RecessiveRed,
    },
    Rule {
        pattern: "K",
        phenotype: Phenotype::DominantBlack,
    },
    Rule {
        pattern: "kbr",
        phenotype: Phenotype::Brindle,
    },
    Rule {
        pattern: "bb",
        phenotype: Phenotype::Brown,
    },
    Rule {
        pattern: "B",
        phenotype: Phenotype::Black,
    },
];

/// Classifies a rendered genotype key such as `"Bb"` or `"Bb ee"`.
pub fn classify(genotype: &str) -> Phenotype {
    RULES
        .iter()
        .find(|rule| genotype.contains(rule.pattern))
        .map_or(Phenotype::Unknown, |rule| rule.phenotype)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_locus_labels() {
        assert_eq!(classify("ee"), Phenotype::RecessiveRed);
        assert_eq!(classify("K/ky"), Phenotype::DominantBlack);
        assert_eq!(classify("kbr/ky"), Phenotype::Brindle);
        assert_eq!(classify("bb"), Phenotype::Brown);
        assert_eq!(classify("BB"), Phenotype::Black);
        assert_eq!(classify("Bb"), Phenotype::Black);
        assert_eq!(classify("Ee"), Phenotype::Unknown);
        assert_eq!(classify("Dd"), Phenotype::Unknown);
    }

    #[test]
    fn earlier_rules_take_precedence() {
        assert_eq!(classify("BB ee"), Phenotype::RecessiveRed);
        assert_eq!(classify("bb ee"), Phenotype::RecessiveRed);
        assert_eq!(classify("K/kbr bb"), Phenotype::DominantBlack);
        assert_eq!(classify("kbr/ky bb"), Phenotype::Brindle);
        assert_eq!(classify("bb Ee"), Phenotype::Brown);
    }

    #[test]
    fn labels_are_never_empty() {
        for phenotype in [
            Phenotype::RecessiveRed,
            Phenotype::DominantBlack,
            Phenotype::Brindle,
            Phenotype::Brown,
            Phenotype::Black,
            Phenotype::Unknown,
        ] {
            assert!(!phenotype.to_string().is_empty());
        }
    }
}
