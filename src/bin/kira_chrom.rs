use std::path::PathBuf;
use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{ArgGroup, Parser};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use kira_chromosome_exporter::app::{ExportOptions, Exporter, ProgressSink};
use kira_chromosome_exporter::config::ConfigLoader;
use kira_chromosome_exporter::domain::GenomeAccession;
use kira_chromosome_exporter::error::KiraError;
use kira_chromosome_exporter::input::read_genome_list;
use kira_chromosome_exporter::ncbi::NcbiHttpClient;
use kira_chromosome_exporter::output::{
    CsvOutput, ExportSummary, JsonOutput, LogOutput, OutputMode, default_output_path,
};
use kira_chromosome_exporter::report::{ColumnSelection, project, split_column_args};

#[derive(Parser)]
#[command(name = "kira-chrom")]
#[command(about = "Export chromosome tables for NCBI genome assemblies to CSV")]
#[command(
    after_help = concat!(
        "Available columns: GenomeID, Taxon, Chromosome, GenBank, RefSeq, ",
        "Size (bp), GC content (%)"
    )
)]
#[command(version, author)]
#[command(group(ArgGroup::new("source").required(true).args(["genome_id", "file"])))]
struct Cli {
    /// Assembly accession, e.g. GCA_023547065.1
    genome_id: Option<String>,

    /// File with one assembly accession per line
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Output CSV path (default: <genome_id>_chromosomes.csv or chromosomes.csv)
    #[arg(short, long)]
    output: Option<Utf8PathBuf>,

    /// Include unplaced and unlocalized scaffolds
    #[arg(long)]
    include_unplaced: bool,

    /// Columns to drop, space or comma separated
    #[arg(long = "exclude-col", value_name = "COLUMN", num_args = 1..)]
    exclude_col: Vec<String>,

    /// JSON settings file (default: ./kira-chrom.json when present)
    #[arg(long)]
    config: Option<String>,

    /// Print a JSON run summary on stdout
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(kira) = report.downcast_ref::<KiraError>() {
            return ExitCode::from(kira.exit_code());
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let config = ConfigLoader::resolve(cli.config.as_deref())?
        .merge_cli(cli.include_unplaced, split_column_args(&cli.exclude_col));

    let single = cli
        .genome_id
        .as_deref()
        .map(str::parse::<GenomeAccession>)
        .transpose()?;
    let accessions = match (&single, &cli.file) {
        (Some(accession), _) => vec![accession.clone()],
        (None, Some(path)) => read_genome_list(path)?,
        (None, None) => {
            return Err(miette::Report::msg(
                "either GENOME_ID or --file is required",
            ));
        }
    };
    let output = cli
        .output
        .unwrap_or_else(|| default_output_path(single.as_ref()));

    let client = NcbiHttpClient::with_settings(&config.api_base_url, config.timeout())?;
    let exporter = Exporter::new(client);
    let options = ExportOptions {
        include_unplaced: config.include_unplaced,
    };
    let sink: &dyn ProgressSink = match output_mode {
        OutputMode::Human => &LogOutput,
        OutputMode::Json => &JsonOutput,
    };

    let result = match &single {
        Some(accession) => exporter.export_single(accession, &options, sink)?,
        None => exporter.export(&accessions, &options, sink),
    };

    let written = if result.records.is_empty() {
        None
    } else {
        let selection = ColumnSelection::excluding(&config.exclude_columns);
        let table = project(&result.records, &selection);
        CsvOutput::write(&output, &table)?;
        Some(output.as_path())
    };

    let summary = ExportSummary::new(&result, written);
    match output_mode {
        OutputMode::Human => LogOutput::print_summary(&summary),
        OutputMode::Json => JsonOutput::print_summary(&summary).into_diagnostic()?,
    }

    result.ensure_rows()?;
    Ok(())
}
