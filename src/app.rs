use std::time::{Duration, Instant};

use serde::Serialize;

use crate::chromosome::sort_records;
use crate::domain::{GenomeAccession, SequenceRecord};
use crate::error::KiraError;
use crate::ncbi::{NcbiClient, fetch_sequence_reports, fetch_taxon};
use crate::report::filter_by_role;

#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub include_unplaced: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenomeStatus {
    Exported { rows: usize },
    Empty,
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct GenomeOutcome {
    pub genome_id: String,
    pub taxon: Option<String>,
    pub fetched: usize,
    #[serde(flatten)]
    pub status: GenomeStatus,
}

impl GenomeOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self.status, GenomeStatus::Failed { .. })
    }
}

#[derive(Debug, Clone)]
pub struct ExportResult {
    pub records: Vec<SequenceRecord>,
    pub outcomes: Vec<GenomeOutcome>,
}

impl ExportResult {
    pub fn processed(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_failure()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Fails when no row survived: `BatchFailed` if every genome failed,
    /// `NothingToWrite` otherwise.
    pub fn ensure_rows(&self) -> Result<(), KiraError> {
        if !self.records.is_empty() {
            return Ok(());
        }
        if self.total() > 0 && self.failed() == self.total() {
            return Err(KiraError::BatchFailed(self.total()));
        }
        Err(KiraError::NothingToWrite)
    }
}

#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub message: String,
    pub elapsed: Option<Duration>,
}

pub trait ProgressSink {
    fn event(&self, event: ProgressEvent);
}

/// Fetches, filters and orders sequence reports for a batch of assemblies.
#[derive(Clone)]
pub struct Exporter<N: NcbiClient> {
    ncbi: N,
}

impl<N: NcbiClient> Exporter<N> {
    pub fn new(ncbi: N) -> Self {
        Self { ncbi }
    }

    /// Processes accessions in order. A failing assembly is recorded in its
    /// outcome and does not stop the batch.
    pub fn export(
        &self,
        accessions: &[GenomeAccession],
        options: &ExportOptions,
        sink: &dyn ProgressSink,
    ) -> ExportResult {
        let mut records = Vec::new();
        let mut outcomes = Vec::with_capacity(accessions.len());

        for (index, accession) in accessions.iter().enumerate() {
            sink.event(ProgressEvent {
                message: format!(
                    "[{}/{}] processing {}",
                    index + 1,
                    accessions.len(),
                    accession
                ),
                elapsed: None,
            });
            let start = Instant::now();
            match self.export_one(accession, options) {
                Ok((taxon, fetched, genome_records)) => {
                    let status = if genome_records.is_empty() {
                        let err = KiraError::EmptyResult(accession.to_string());
                        tracing::warn!(fetched, "{err}");
                        GenomeStatus::Empty
                    } else {
                        GenomeStatus::Exported {
                            rows: genome_records.len(),
                        }
                    };
                    sink.event(ProgressEvent {
                        message: format!(
                            "{accession} ({taxon}): {} of {fetched} sequences kept",
                            genome_records.len()
                        ),
                        elapsed: Some(start.elapsed()),
                    });
                    records.extend(genome_records);
                    outcomes.push(GenomeOutcome {
                        genome_id: accession.to_string(),
                        taxon: Some(taxon),
                        fetched,
                        status,
                    });
                }
                Err(err) => {
                    tracing::error!(accession = accession.as_str(), "{err}");
                    sink.event(ProgressEvent {
                        message: format!("{accession}: failed"),
                        elapsed: Some(start.elapsed()),
                    });
                    outcomes.push(GenomeOutcome {
                        genome_id: accession.to_string(),
                        taxon: None,
                        fetched: 0,
                        status: GenomeStatus::Failed {
                            error: err.to_string(),
                        },
                    });
                }
            }
        }

        ExportResult { records, outcomes }
    }

    /// Single-assembly variant; any failure, including an empty result, is an error.
    pub fn export_single(
        &self,
        accession: &GenomeAccession,
        options: &ExportOptions,
        sink: &dyn ProgressSink,
    ) -> Result<ExportResult, KiraError> {
        sink.event(ProgressEvent {
            message: format!("processing {accession}"),
            elapsed: None,
        });
        let start = Instant::now();
        let (taxon, fetched, records) = self.export_one(accession, options)?;
        if records.is_empty() {
            return Err(KiraError::EmptyResult(accession.to_string()));
        }
        sink.event(ProgressEvent {
            message: format!(
                "{accession} ({taxon}): {} of {fetched} sequences kept",
                records.len()
            ),
            elapsed: Some(start.elapsed()),
        });
        let outcome = GenomeOutcome {
            genome_id: accession.to_string(),
            taxon: Some(taxon),
            fetched,
            status: GenomeStatus::Exported {
                rows: records.len(),
            },
        };
        Ok(ExportResult {
            records,
            outcomes: vec![outcome],
        })
    }

    fn export_one(
        &self,
        accession: &GenomeAccession,
        options: &ExportOptions,
    ) -> Result<(String, usize, Vec<SequenceRecord>), KiraError> {
        let reports = fetch_sequence_reports(&self.ncbi, accession)?;
        let fetched = reports.len();
        let taxon = fetch_taxon(&self.ncbi, accession);

        let all = reports
            .into_iter()
            .map(|report| report.into_record(accession, &taxon))
            .collect::<Vec<_>>();
        let mut kept = filter_by_role(all, options.include_unplaced);
        sort_records(&mut kept);

        tracing::info!(
            accession = accession.as_str(),
            taxon = taxon.as_str(),
            fetched,
            kept = kept.len(),
            "sequence report processed"
        );
        Ok((taxon, fetched, kept))
    }
}
