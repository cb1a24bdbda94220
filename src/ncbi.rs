use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::{GenomeAccession, MISSING, SequenceRecord, SequenceRole};
use crate::error::KiraError;

pub const DEFAULT_BASE_URL: &str = "https://api.ncbi.nlm.nih.gov/datasets/v2";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// One page of `/genome/accession/{acc}/sequence_reports`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SequenceReportPage {
    #[serde(default)]
    pub reports: Vec<SequenceReport>,
    #[serde(default)]
    pub next_page_token: Option<String>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub total_count: Option<u64>,
}

impl SequenceReportPage {
    /// Continuation token, if the API reported a non-empty one.
    pub fn continuation(&self) -> Option<&str> {
        self.next_page_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SequenceReport {
    #[serde(default)]
    pub chr_name: Option<String>,
    #[serde(default)]
    pub assigned_molecule: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub genbank_accession: Option<String>,
    #[serde(default)]
    pub refseq_accession: Option<String>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub length: Option<u64>,
    #[serde(default, deserialize_with = "float_or_string")]
    pub gc_percent: Option<f64>,
}

impl SequenceReport {
    pub fn into_record(self, genome_id: &GenomeAccession, taxon: &str) -> SequenceRecord {
        let chromosome_name = present(self.chr_name)
            .or_else(|| present(self.assigned_molecule))
            .unwrap_or_else(|| MISSING.to_string());
        SequenceRecord {
            genome_id: genome_id.clone(),
            taxon: taxon.to_string(),
            chromosome_name,
            role: SequenceRole::from(self.role.as_deref().unwrap_or_default()),
            genbank_accession: present(self.genbank_accession),
            refseq_accession: present(self.refseq_accession),
            size_bp: self.length,
            gc_percent: self.gc_percent,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DatasetReportPage {
    #[serde(default)]
    reports: Vec<DatasetReport>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DatasetReport {
    #[serde(default)]
    organism: Option<Organism>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Organism {
    #[serde(default)]
    organism_name: Option<String>,
}

pub trait NcbiClient: Send + Sync {
    fn sequence_report_page(
        &self,
        accession: &GenomeAccession,
        page_token: Option<&str>,
    ) -> Result<SequenceReportPage, KiraError>;
    fn organism_name(&self, accession: &GenomeAccession) -> Result<Option<String>, KiraError>;
}

/// Follows `next_page_token` until the API stops returning one and returns
/// every report in arrival order.
pub fn fetch_sequence_reports<C: NcbiClient + ?Sized>(
    client: &C,
    accession: &GenomeAccession,
) -> Result<Vec<SequenceReport>, KiraError> {
    let mut reports = Vec::new();
    let mut page_token: Option<String> = None;
    let mut pages = 0usize;
    loop {
        let page = client.sequence_report_page(accession, page_token.as_deref())?;
        pages += 1;
        let next = page.continuation().map(str::to_string);
        tracing::debug!(
            accession = accession.as_str(),
            page = pages,
            reports = page.reports.len(),
            total = ?page.total_count,
            "sequence report page received"
        );
        reports.extend(page.reports);
        match next {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }
    Ok(reports)
}

/// Organism name for the assembly, or `n/a` when it cannot be resolved.
pub fn fetch_taxon<C: NcbiClient + ?Sized>(client: &C, accession: &GenomeAccession) -> String {
    match client.organism_name(accession) {
        Ok(Some(name)) => name,
        Ok(None) => {
            tracing::warn!(
                accession = accession.as_str(),
                "dataset report has no organism name"
            );
            MISSING.to_string()
        }
        Err(err) => {
            tracing::warn!(
                accession = accession.as_str(),
                "could not fetch organism name: {err}"
            );
            MISSING.to_string()
        }
    }
}

pub fn parse_sequence_report_page(body: &str) -> Result<SequenceReportPage, KiraError> {
    serde_json::from_str(body).map_err(|err| KiraError::NcbiParse(err.to_string()))
}

pub fn parse_organism_name(body: &str) -> Result<Option<String>, KiraError> {
    let page: DatasetReportPage =
        serde_json::from_str(body).map_err(|err| KiraError::NcbiParse(err.to_string()))?;
    Ok(page
        .reports
        .into_iter()
        .next()
        .and_then(|report| report.organism)
        .and_then(|organism| present(organism.organism_name)))
}

#[derive(Clone)]
pub struct NcbiHttpClient {
    client: Client,
    base_url: String,
}

impl NcbiHttpClient {
    pub fn with_settings(base_url: &str, timeout: Duration) -> Result<Self, KiraError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("kira-chrom/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| KiraError::NcbiHttp(err.to_string()))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert("X-Datasets-Client", HeaderValue::from_static("kira-chrom"));
        headers.insert(
            "X-Datasets-Client-Version",
            HeaderValue::from_str(env!("CARGO_PKG_VERSION"))
                .map_err(|err| KiraError::NcbiHttp(err.to_string()))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|err| KiraError::NcbiHttp(err.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn sequence_reports_url(&self, accession: &GenomeAccession) -> String {
        format!(
            "{}/genome/accession/{}/sequence_reports",
            self.base_url,
            accession.as_str()
        )
    }

    pub fn dataset_report_url(&self, accession: &GenomeAccession) -> String {
        format!(
            "{}/genome/accession/{}/dataset_report",
            self.base_url,
            accession.as_str()
        )
    }

    fn get_text(&self, request: reqwest::blocking::RequestBuilder) -> Result<String, KiraError> {
        let response = request
            .send()
            .map_err(|err| KiraError::NcbiHttp(err.to_string()))?;
        let response = Self::handle_status(response)?;
        response
            .text()
            .map_err(|err| KiraError::NcbiHttp(err.to_string()))
    }

    fn handle_status(
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response, KiraError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let message = response
            .text()
            .unwrap_or_else(|_| "NCBI request failed".to_string());
        Err(KiraError::NcbiStatus { status, message })
    }
}

impl NcbiClient for NcbiHttpClient {
    fn sequence_report_page(
        &self,
        accession: &GenomeAccession,
        page_token: Option<&str>,
    ) -> Result<SequenceReportPage, KiraError> {
        let mut request = self.client.get(self.sequence_reports_url(accession));
        if let Some(token) = page_token {
            request = request.query(&[("page_token", token)]);
        }
        let body = self.get_text(request)?;
        parse_sequence_report_page(&body)
    }

    fn organism_name(&self, accession: &GenomeAccession) -> Result<Option<String>, KiraError> {
        let body = self.get_text(self.client.get(self.dataset_report_url(accession)))?;
        parse_organism_name(&body)
    }
}

/// Treats empty strings and the API's `na` marker as absent.
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("na"))
}

fn number_or_string<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn float_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
