use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KiraError;

/// Placeholder rendered for any value the API did not report.
pub const MISSING: &str = "n/a";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenomeAccession(String);

impl GenomeAccession {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GenomeAccession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GenomeAccession {
    type Err = KiraError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_string();
        let is_valid = normalized.starts_with("GCF_") || normalized.starts_with("GCA_");
        let (prefix, version) = match normalized.split_once('.') {
            Some((prefix, version)) => (prefix, Some(version)),
            None => (normalized.as_str(), None),
        };
        let has_numeric = prefix
            .get(4..)
            .map(|rest| !rest.is_empty() && rest.chars().all(|ch| ch.is_ascii_digit()))
            .unwrap_or(false);
        let version_ok = version
            .map(|v| !v.is_empty() && v.chars().all(|ch| ch.is_ascii_digit()))
            .unwrap_or(true);
        if !is_valid || !has_numeric || !version_ok {
            return Err(KiraError::InvalidGenomeAccession(value.to_string()));
        }
        Ok(Self(normalized))
    }
}

/// Assembly role of a sequence as reported by the NCBI sequence report.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SequenceRole {
    AssembledMolecule,
    UnlocalizedScaffold,
    UnplacedScaffold,
    AltScaffold,
    FixPatch,
    NovelPatch,
    Other(String),
}

impl SequenceRole {
    pub fn is_assembled(&self) -> bool {
        matches!(self, SequenceRole::AssembledMolecule)
    }

    pub fn as_str(&self) -> &str {
        match self {
            SequenceRole::AssembledMolecule => "assembled-molecule",
            SequenceRole::UnlocalizedScaffold => "unlocalized-scaffold",
            SequenceRole::UnplacedScaffold => "unplaced-scaffold",
            SequenceRole::AltScaffold => "alt-scaffold",
            SequenceRole::FixPatch => "fix-patch",
            SequenceRole::NovelPatch => "novel-patch",
            SequenceRole::Other(value) => value,
        }
    }
}

impl From<&str> for SequenceRole {
    fn from(value: &str) -> Self {
        match value.trim() {
            "assembled-molecule" => SequenceRole::AssembledMolecule,
            "unlocalized-scaffold" => SequenceRole::UnlocalizedScaffold,
            "unplaced-scaffold" => SequenceRole::UnplacedScaffold,
            "alt-scaffold" => SequenceRole::AltScaffold,
            "fix-patch" => SequenceRole::FixPatch,
            "novel-patch" => SequenceRole::NovelPatch,
            other => SequenceRole::Other(other.to_string()),
        }
    }
}

impl fmt::Display for SequenceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One chromosome or scaffold row of an assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceRecord {
    pub genome_id: GenomeAccession,
    pub taxon: String,
    pub chromosome_name: String,
    pub role: SequenceRole,
    pub genbank_accession: Option<String>,
    pub refseq_accession: Option<String>,
    pub size_bp: Option<u64>,
    pub gc_percent: Option<f64>,
}

impl SequenceRecord {
    pub fn new(genome_id: GenomeAccession, chromosome_name: impl Into<String>) -> Self {
        Self {
            genome_id,
            taxon: MISSING.to_string(),
            chromosome_name: chromosome_name.into(),
            role: SequenceRole::Other(String::new()),
            genbank_accession: None,
            refseq_accession: None,
            size_bp: None,
            gc_percent: None,
        }
    }
}
