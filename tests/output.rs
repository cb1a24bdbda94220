use std::fs;

use camino::Utf8PathBuf;

use kira_chromosome_exporter::output::CsvOutput;
use kira_chromosome_exporter::report::Table;

fn table() -> Table {
    Table {
        header: vec!["Chromosome".to_string(), "GC content (%)".to_string()],
        rows: vec![
            vec!["1".to_string(), "41.0".to_string()],
            vec!["MT".to_string(), "n/a".to_string()],
        ],
    }
}

#[test]
fn writes_csv_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(temp.path().join("out").join("chromosomes.csv")).unwrap();

    CsvOutput::write(&path, &table()).unwrap();

    let content = fs::read_to_string(path.as_std_path()).unwrap();
    assert_eq!(content, "Chromosome,GC content (%)\n1,41.0\nMT,n/a\n");
}

#[test]
fn overwrites_existing_file_without_leftovers() {
    let temp = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(temp.path().join("chromosomes.csv")).unwrap();
    fs::write(path.as_std_path(), "stale").unwrap();

    CsvOutput::write(&path, &table()).unwrap();

    let content = fs::read_to_string(path.as_std_path()).unwrap();
    assert!(content.starts_with("Chromosome,"));
    let entries = fs::read_dir(temp.path()).unwrap().count();
    assert_eq!(entries, 1);
}
