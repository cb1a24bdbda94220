use std::fmt;

use serde::Serialize;

use crate::domain::{MISSING, SequenceRecord};

/// Output columns in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Column {
    GenomeId,
    Taxon,
    Chromosome,
    GenBank,
    RefSeq,
    SizeBp,
    GcContent,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::GenomeId,
        Column::Taxon,
        Column::Chromosome,
        Column::GenBank,
        Column::RefSeq,
        Column::SizeBp,
        Column::GcContent,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::GenomeId => "GenomeID",
            Column::Taxon => "Taxon",
            Column::Chromosome => "Chromosome",
            Column::GenBank => "GenBank",
            Column::RefSeq => "RefSeq",
            Column::SizeBp => "Size (bp)",
            Column::GcContent => "GC content (%)",
        }
    }

    /// Exact, case-sensitive header lookup.
    pub fn from_header(name: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|column| column.header() == name)
    }

    pub fn render(self, record: &SequenceRecord) -> String {
        match self {
            Column::GenomeId => record.genome_id.to_string(),
            Column::Taxon => record.taxon.clone(),
            Column::Chromosome => record.chromosome_name.clone(),
            Column::GenBank => or_missing(record.genbank_accession.as_deref()),
            Column::RefSeq => or_missing(record.refseq_accession.as_deref()),
            Column::SizeBp => record
                .size_bp
                .map(|size| size.to_string())
                .unwrap_or_else(|| MISSING.to_string()),
            Column::GcContent => record
                .gc_percent
                .map(|gc| format!("{gc:.1}"))
                .unwrap_or_else(|| MISSING.to_string()),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Columns that survive `--exclude-col`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSelection {
    columns: Vec<Column>,
}

impl Default for ColumnSelection {
    fn default() -> Self {
        Self {
            columns: Column::ALL.to_vec(),
        }
    }
}

impl ColumnSelection {
    pub fn excluding<S: AsRef<str>>(excluded: &[S]) -> Self {
        for name in excluded {
            if Column::from_header(name.as_ref()).is_none() {
                tracing::debug!(column = name.as_ref(), "ignoring unknown column exclusion");
            }
        }
        let columns = Column::ALL
            .into_iter()
            .filter(|column| !excluded.iter().any(|name| name.as_ref() == column.header()))
            .collect();
        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn header(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.header().to_string()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Keeps placed chromosomes only, unless `include_unplaced` is set.
pub fn filter_by_role(
    records: Vec<SequenceRecord>,
    include_unplaced: bool,
) -> Vec<SequenceRecord> {
    if include_unplaced {
        return records;
    }
    records
        .into_iter()
        .filter(|record| record.role.is_assembled() && record.chromosome_name != "Un")
        .collect()
}

pub fn project(records: &[SequenceRecord], selection: &ColumnSelection) -> Table {
    let rows = records
        .iter()
        .map(|record| {
            selection
                .columns()
                .iter()
                .map(|column| column.render(record))
                .collect()
        })
        .collect();
    Table {
        header: selection.header(),
        rows,
    }
}

/// Splits `--exclude-col` values on commas; each argument may itself be a list.
pub fn split_column_args<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| value.as_ref().split(','))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

fn or_missing(value: Option<&str>) -> String {
    value.unwrap_or(MISSING).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_is_case_sensitive() {
        assert_eq!(Column::from_header("RefSeq"), Some(Column::RefSeq));
        assert_eq!(Column::from_header("refseq"), None);
    }

    #[test]
    fn split_mixed_separators() {
        let values = vec!["RefSeq,GenBank".to_string(), " Taxon ".to_string()];
        assert_eq!(split_column_args(&values), vec!["RefSeq", "GenBank", "Taxon"]);
    }

    #[test]
    fn split_keeps_names_with_spaces() {
        let values = vec!["GC content (%)".to_string()];
        assert_eq!(split_column_args(&values), vec!["GC content (%)"]);
    }
}
