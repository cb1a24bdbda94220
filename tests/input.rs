use std::io::Write;

use assert_matches::assert_matches;

use kira_chromosome_exporter::error::KiraError;
use kira_chromosome_exporter::input::read_genome_list;

#[test]
fn reads_accessions_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "GCA_023547065.1").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "# zebrafish").unwrap();
    writeln!(file, "GCF_000002035.6").unwrap();

    let accessions = read_genome_list(file.path()).unwrap();
    let values = accessions.iter().map(|a| a.as_str()).collect::<Vec<_>>();
    assert_eq!(values, vec!["GCA_023547065.1", "GCF_000002035.6"]);
}

#[test]
fn missing_file_is_input_error() {
    let temp = tempfile::tempdir().unwrap();
    let err = read_genome_list(&temp.path().join("absent.txt")).unwrap_err();
    assert_matches!(err, KiraError::InputRead { .. });
}

#[test]
fn malformed_line_names_the_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "GCA_023547065.1").unwrap();
    writeln!(file, "hg38").unwrap();

    let err = read_genome_list(file.path()).unwrap_err();
    assert_matches!(err, KiraError::InvalidInput(ref message) if message.contains("line 2"));
}

#[test]
fn empty_list_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# nothing yet").unwrap();
    let err = read_genome_list(file.path()).unwrap_err();
    assert_matches!(err, KiraError::InvalidInput(_));
}
