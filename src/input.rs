use std::fs;
use std::path::Path;

use crate::domain::GenomeAccession;
use crate::error::KiraError;

/// Reads a genome list: one accession per line, blank lines and `#` comments skipped.
pub fn read_genome_list(path: &Path) -> Result<Vec<GenomeAccession>, KiraError> {
    let content = fs::read_to_string(path).map_err(|err| KiraError::InputRead {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    let accessions = parse_genome_list(&content).map_err(|err| match err {
        KiraError::InvalidInput(message) => {
            KiraError::InvalidInput(format!("{}: {message}", path.display()))
        }
        other => other,
    })?;
    tracing::debug!(path = %path.display(), count = accessions.len(), "read genome list");
    Ok(accessions)
}

pub fn parse_genome_list(content: &str) -> Result<Vec<GenomeAccession>, KiraError> {
    let mut accessions = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let accession = trimmed.parse::<GenomeAccession>().map_err(|_| {
            KiraError::InvalidInput(format!(
                "line {}: not a genome accession: {trimmed}",
                index + 1
            ))
        })?;
        accessions.push(accession);
    }
    if accessions.is_empty() {
        return Err(KiraError::InvalidInput(
            "genome list contains no accessions".to_string(),
        ));
    }
    Ok(accessions)
}
