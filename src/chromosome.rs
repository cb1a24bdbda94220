//! Ordering of chromosome names.
//!
//! Names are classified into tiers (autosome numbers, linkage groups, sex
//! chromosomes, mitochondrion, everything else) and compared tier first, then
//! by a tier-specific key. The derived `Ord` on [`ChromosomeKey`] is the whole
//! comparator.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::SequenceRecord;

static LINKAGE_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^LG([0-9]+)$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SexChromosome {
    X,
    Y,
}

/// Non-negative integer of any length, compared by value.
///
/// Leading zeros are dropped; a shorter digit string is the smaller number and
/// equal lengths compare lexicographically. Field order drives the derived `Ord`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Digits {
    len: usize,
    digits: String,
}

impl Digits {
    /// `None` unless `value` is non-empty and all ASCII digits.
    pub fn parse(value: &str) -> Option<Self> {
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let trimmed = value.trim_start_matches('0');
        let digits = if trimmed.is_empty() { "0" } else { trimmed };
        Some(Self {
            len: digits.len(),
            digits: digits.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.digits
    }
}

/// Sort key derived from a chromosome name. Variant order is the tier order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChromosomeKey {
    Numeric(Digits),
    LinkageGroup(Digits),
    Sex(SexChromosome),
    Mitochondrial,
    /// Lowercased name.
    Other(String),
}

impl ChromosomeKey {
    pub fn classify(name: &str) -> Self {
        if let Some(value) = Digits::parse(name) {
            return ChromosomeKey::Numeric(value);
        }

        if let Some(group) = LINKAGE_GROUP
            .captures(name)
            .and_then(|caps| caps.get(1))
            .and_then(|m| Digits::parse(m.as_str()))
        {
            return ChromosomeKey::LinkageGroup(group);
        }

        if name.eq_ignore_ascii_case("X") {
            return ChromosomeKey::Sex(SexChromosome::X);
        }
        if name.eq_ignore_ascii_case("Y") {
            return ChromosomeKey::Sex(SexChromosome::Y);
        }
        if name.eq_ignore_ascii_case("MT") || name.eq_ignore_ascii_case("M") {
            return ChromosomeKey::Mitochondrial;
        }

        ChromosomeKey::Other(name.to_lowercase())
    }

    pub fn tier(&self) -> u8 {
        match self {
            ChromosomeKey::Numeric(_) => 0,
            ChromosomeKey::LinkageGroup(_) => 1,
            ChromosomeKey::Sex(_) => 2,
            ChromosomeKey::Mitochondrial => 3,
            ChromosomeKey::Other(_) => 4,
        }
    }
}

pub fn compare_names(a: &str, b: &str) -> Ordering {
    ChromosomeKey::classify(a).cmp(&ChromosomeKey::classify(b))
}

/// Stable sort; records with equal keys keep their relative order.
pub fn sort_records(records: &mut [SequenceRecord]) {
    records.sort_by(|a, b| compare_names(&a.chromosome_name, &b.chromosome_name));
}

pub fn sort_names(names: &mut [String]) {
    names.sort_by(|a, b| compare_names(a, b));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(value: &str) -> Digits {
        Digits::parse(value).unwrap()
    }

    #[test]
    fn classify_tiers() {
        assert_eq!(
            ChromosomeKey::classify("12"),
            ChromosomeKey::Numeric(digits("12"))
        );
        assert_eq!(
            ChromosomeKey::classify("007"),
            ChromosomeKey::Numeric(digits("7"))
        );
        assert_eq!(
            ChromosomeKey::classify("lg3"),
            ChromosomeKey::LinkageGroup(digits("3"))
        );
        assert_eq!(
            ChromosomeKey::classify("x"),
            ChromosomeKey::Sex(SexChromosome::X)
        );
        assert_eq!(ChromosomeKey::classify("m"), ChromosomeKey::Mitochondrial);
        assert_eq!(ChromosomeKey::classify("Mt"), ChromosomeKey::Mitochondrial);
        assert_eq!(
            ChromosomeKey::classify("Scaffold_9"),
            ChromosomeKey::Other("scaffold_9".to_string())
        );
    }

    #[test]
    fn signed_numbers_are_not_numeric() {
        assert_eq!(ChromosomeKey::classify("+5").tier(), 4);
        assert_eq!(ChromosomeKey::classify("-1").tier(), 4);
        assert_eq!(ChromosomeKey::classify("").tier(), 4);
        assert_eq!(ChromosomeKey::classify("LG").tier(), 4);
    }

    #[test]
    fn digits_compare_by_value() {
        assert_eq!(digits("0007"), digits("7"));
        assert_eq!(digits("000").as_str(), "0");
        assert!(digits("9") < digits("10"));
        assert!(digits("18446744073709551615") < digits("18446744073709551616"));
        assert!(digits("99999999999999999999999") > digits("100"));
        assert_eq!(ChromosomeKey::classify("99999999999999999999999").tier(), 0);
        assert_eq!(ChromosomeKey::classify("LG123456789012345678901").tier(), 1);
    }

    #[test]
    fn linkage_group_rejects_non_ascii_digits() {
        assert_eq!(ChromosomeKey::classify("LG٣").tier(), 4);
    }
}
