//! Typed relation symbols for synset and lemma pointers.
//!
//! Data records encode relations as short ASCII symbols (`@` hypernym,
//! `~` hyponym, `#p` part holonym, ...). The inventory is closed for a given
//! WordNet 3.x release, so an unknown symbol is a parse error rather than an
//! open-ended string.

use serde::{Deserialize, Serialize};

/// A typed relation between synsets or between lemmas.
///
/// Synset-level pointers use the whole inventory; the lemma-level relations
/// in practice are [`Antonym`](Relation::Antonym),
/// [`DerivationallyRelated`](Relation::DerivationallyRelated), and
/// [`Pertainym`](Relation::Pertainym), but the format does not restrict them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Relation {
    Antonym,
    Hypernym,
    InstanceHypernym,
    Hyponym,
    InstanceHyponym,
    MemberHolonym,
    SubstanceHolonym,
    PartHolonym,
    MemberMeronym,
    SubstanceMeronym,
    PartMeronym,
    Attribute,
    DerivationallyRelated,
    TopicDomain,
    InTopicDomain,
    RegionDomain,
    InRegionDomain,
    UsageDomain,
    InUsageDomain,
    Entailment,
    Cause,
    AlsoSee,
    VerbGroup,
    SimilarTo,
    Pertainym,
    ParticipleOfVerb,
}

impl Relation {
    /// The pointer symbol as written in data records.
    pub fn symbol(self) -> &'static str {
        match self {
            Relation::Antonym => "!",
            Relation::Hypernym => "@",
            Relation::InstanceHypernym => "@i",
            Relation::Hyponym => "~",
            Relation::InstanceHyponym => "~i",
            Relation::MemberHolonym => "#m",
            Relation::SubstanceHolonym => "#s",
            Relation::PartHolonym => "#p",
            Relation::MemberMeronym => "%m",
            Relation::SubstanceMeronym => "%s",
            Relation::PartMeronym => "%p",
            Relation::Attribute => "=",
            Relation::DerivationallyRelated => "+",
            Relation::TopicDomain => ";c",
            Relation::InTopicDomain => "-c",
            Relation::RegionDomain => ";r",
            Relation::InRegionDomain => "-r",
            Relation::UsageDomain => ";u",
            Relation::InUsageDomain => "-u",
            Relation::Entailment => "*",
            Relation::Cause => ">",
            Relation::AlsoSee => "^",
            Relation::VerbGroup => "$",
            Relation::SimilarTo => "&",
            Relation::Pertainym => "\\",
            Relation::ParticipleOfVerb => "<",
        }
    }

    /// Parse a pointer symbol token.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "!" => Relation::Antonym,
            "@" => Relation::Hypernym,
            "@i" => Relation::InstanceHypernym,
            "~" => Relation::Hyponym,
            "~i" => Relation::InstanceHyponym,
            "#m" => Relation::MemberHolonym,
            "#s" => Relation::SubstanceHolonym,
            "#p" => Relation::PartHolonym,
            "%m" => Relation::MemberMeronym,
            "%s" => Relation::SubstanceMeronym,
            "%p" => Relation::PartMeronym,
            "=" => Relation::Attribute,
            "+" => Relation::DerivationallyRelated,
            ";c" => Relation::TopicDomain,
            "-c" => Relation::InTopicDomain,
            ";r" => Relation::RegionDomain,
            "-r" => Relation::InRegionDomain,
            ";u" => Relation::UsageDomain,
            "-u" => Relation::InUsageDomain,
            "*" => Relation::Entailment,
            ">" => Relation::Cause,
            "^" => Relation::AlsoSee,
            "$" => Relation::VerbGroup,
            "&" => Relation::SimilarTo,
            "\\" => Relation::Pertainym,
            "<" => Relation::ParticipleOfVerb,
            _ => return None,
        })
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Relation; 26] = [
        Relation::Antonym,
        Relation::Hypernym,
        Relation::InstanceHypernym,
        Relation::Hyponym,
        Relation::InstanceHyponym,
        Relation::MemberHolonym,
        Relation::SubstanceHolonym,
        Relation::PartHolonym,
        Relation::MemberMeronym,
        Relation::SubstanceMeronym,
        Relation::PartMeronym,
        Relation::Attribute,
        Relation::DerivationallyRelated,
        Relation::TopicDomain,
        Relation::InTopicDomain,
        Relation::RegionDomain,
        Relation::InRegionDomain,
        Relation::UsageDomain,
        Relation::InUsageDomain,
        Relation::Entailment,
        Relation::Cause,
        Relation::AlsoSee,
        Relation::VerbGroup,
        Relation::SimilarTo,
        Relation::Pertainym,
        Relation::ParticipleOfVerb,
    ];

    #[test]
    fn symbol_round_trip() {
        for rel in ALL {
            assert_eq!(Relation::from_symbol(rel.symbol()), Some(rel));
        }
    }

    #[test]
    fn unknown_symbol() {
        assert_eq!(Relation::from_symbol("?"), None);
        assert_eq!(Relation::from_symbol(""), None);
        assert_eq!(Relation::from_symbol("@@"), None);
    }
}
