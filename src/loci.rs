/// A common dog coat colour locus, used to pre-fill parent genotypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocusInfo {
    pub symbol: &'static str,
    pub name: &'static str,
    /// Example genotype in pairs notation.
    pub genotype: &'static str,
    pub description: &'static str,
}

impl LocusInfo {
    /// True when the example genotype can only be read in pairs notation.
    pub fn needs_pairs_notation(&self) -> bool {
        self.genotype.contains('/')
    }
}

pub const LOCI: &[LocusInfo] = &[
    LocusInfo {
        symbol: "A",
        name: "Agouti",
        genotype: "Ay/at",
        description: "Ay = sable/fawn, aw = wild sable, at = tan points, a = recessive black",
    },
    LocusInfo {
        symbol: "B",
        name: "Brown",
        genotype: "Bb",
        description: "B = black pigment, b = brown/liver pigment",
    },
    LocusInfo {
        symbol: "D",
        name: "Dilute",
        genotype: "Dd",
        description: "D = full colour, d = dilute (blue/isabella)",
    },
    LocusInfo {
        symbol: "E",
        name: "Extension",
        genotype: "Ee",
        description: "Em = melanistic mask, E = normal extension, e = recessive red/yellow",
    },
    LocusInfo {
        symbol: "K",
        name: "Dominant Black",
        genotype: "K/ky",
        description: "K = dominant black, kbr = brindle, ky = allows agouti pattern",
    },
    LocusInfo {
        symbol: "M",
        name: "Merle",
        genotype: "Mm",
        description: "M = merle, m = non-merle",
    },
    LocusInfo {
        symbol: "S",
        name: "White Spotting",
        genotype: "S/sp",
        description: "S = solid, si = Irish spotting, sp = piebald, sw = extreme white",
    },
];

/// Looks up a locus by symbol ("K"), name ("Dominant Black") or "K locus", ignoring case.
pub fn find_locus(query: &str) -> Option<&'static LocusInfo> {
    let query = query.trim();
    let query = strip_suffix_ignore_case(query, " locus").unwrap_or(query).trim();
    LOCI.iter().find(|locus| {
        locus.symbol.eq_ignore_ascii_case(query) || locus.name.eq_ignore_ascii_case(query)
    })
}

fn strip_suffix_ignore_case<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    let split = s.len().checked_sub(suffix.len())?;
    if s.is_char_boundary(split) && s[split..].eq_ignore_ascii_case(suffix) {
        Some(&s[..split])
    } else {
        None
    }
}
