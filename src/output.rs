use std::fs;
use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;

use crate::app::{ExportResult, GenomeOutcome, ProgressEvent, ProgressSink};
use crate::domain::GenomeAccession;
use crate::error::KiraError;
use crate::report::Table;

pub const BATCH_OUTPUT: &str = "chromosomes.csv";

#[derive(Debug, Clone, Copy)]
pub enum OutputMode {
    Human,
    Json,
}

/// Output path when `--output` is not given.
pub fn default_output_path(single: Option<&GenomeAccession>) -> Utf8PathBuf {
    match single {
        Some(accession) => Utf8PathBuf::from(format!("{accession}_chromosomes.csv")),
        None => Utf8PathBuf::from(BATCH_OUTPUT),
    }
}

pub struct CsvOutput;

impl CsvOutput {
    /// Writes the table to a temp file next to `path` and renames it into place.
    pub fn write(path: &Utf8Path, table: &Table) -> Result<(), KiraError> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent.to_path_buf(),
            _ => Utf8PathBuf::from("."),
        };
        fs::create_dir_all(parent.as_std_path())
            .map_err(|err| KiraError::Filesystem(err.to_string()))?;
        let temp = tempfile::Builder::new()
            .prefix("kira-chrom")
            .suffix(".csv.tmp")
            .tempfile_in(parent.as_std_path())
            .map_err(|err| KiraError::Filesystem(err.to_string()))?;

        {
            let mut writer = csv::Writer::from_writer(temp.as_file());
            Self::write_table(&mut writer, table)?;
            writer
                .flush()
                .map_err(|err| KiraError::CsvWrite(err.to_string()))?;
        }

        temp.persist(path.as_std_path())
            .map_err(|err| KiraError::Filesystem(err.to_string()))?;
        Ok(())
    }

    pub fn write_table<W: Write>(
        writer: &mut csv::Writer<W>,
        table: &Table,
    ) -> Result<(), KiraError> {
        writer
            .write_record(&table.header)
            .map_err(|err| KiraError::CsvWrite(err.to_string()))?;
        for row in &table.rows {
            writer
                .write_record(row)
                .map_err(|err| KiraError::CsvWrite(err.to_string()))?;
        }
        Ok(())
    }

    pub fn to_csv_string(table: &Table) -> Result<String, KiraError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        Self::write_table(&mut writer, table)?;
        let bytes = writer
            .into_inner()
            .map_err(|err| KiraError::CsvWrite(err.to_string()))?;
        String::from_utf8(bytes).map_err(|err| KiraError::CsvWrite(err.to_string()))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub generated_at: String,
    pub tool: String,
    pub output: Option<String>,
    pub rows: usize,
    pub processed: usize,
    pub failed: usize,
    pub total: usize,
    pub genomes: Vec<GenomeOutcome>,
}

impl ExportSummary {
    pub fn new(result: &ExportResult, output: Option<&Utf8Path>) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            tool: format!("kira-chrom/{}", env!("CARGO_PKG_VERSION")),
            output: output.map(|path| path.to_string()),
            rows: result.records.len(),
            processed: result.processed(),
            failed: result.failed(),
            total: result.total(),
            genomes: result.outcomes.clone(),
        }
    }

    pub fn headline(&self) -> String {
        format!("processed {} of {} genomes", self.processed, self.total)
    }
}

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_summary(summary: &ExportSummary) -> io::Result<()> {
        Self::print_json(summary)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

impl ProgressSink for JsonOutput {
    fn event(&self, _event: ProgressEvent) {}
}

/// Forwards progress events to the log.
pub struct LogOutput;

impl ProgressSink for LogOutput {
    fn event(&self, event: ProgressEvent) {
        match event.elapsed {
            Some(elapsed) => {
                tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "{}", event.message)
            }
            None => tracing::info!("{}", event.message),
        }
    }
}

impl LogOutput {
    pub fn print_summary(summary: &ExportSummary) {
        for genome in summary.genomes.iter().filter(|g| g.is_failure()) {
            tracing::warn!(genome = genome.genome_id.as_str(), "skipped after failure");
        }
        match &summary.output {
            Some(path) => tracing::info!(rows = summary.rows, "{} -> {path}", summary.headline()),
            None => tracing::info!(rows = summary.rows, "{}", summary.headline()),
        }
    }
}
