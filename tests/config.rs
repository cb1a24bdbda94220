use std::fs;

use assert_matches::assert_matches;

use kira_chromosome_exporter::config::{ColumnList, Config, ConfigLoader, ResolvedConfig};
use kira_chromosome_exporter::error::KiraError;
use kira_chromosome_exporter::ncbi::DEFAULT_BASE_URL;

#[test]
fn parse_config_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("kira-chrom.json");
    fs::write(
        &path,
        r#"{
            "api_base_url": "http://localhost:8080/datasets/v2/",
            "timeout_secs": 5,
            "include_unplaced": true,
            "exclude_columns": ["RefSeq", "GC content (%)"]
        }"#,
    )
    .unwrap();

    let resolved = ConfigLoader::resolve(path.to_str()).unwrap();
    assert_eq!(resolved.api_base_url, "http://localhost:8080/datasets/v2");
    assert_eq!(resolved.timeout_secs, 5);
    assert!(resolved.include_unplaced);
    assert_eq!(resolved.exclude_columns, vec!["RefSeq", "GC content (%)"]);
}

#[test]
fn unknown_keys_are_ignored() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("kira-chrom.json");
    fs::write(&path, r#"{ "schema_version": 1, "timeout_secs": 7 }"#).unwrap();

    let resolved = ConfigLoader::resolve(path.to_str()).unwrap();
    assert_eq!(resolved.timeout_secs, 7);
    assert_eq!(resolved.api_base_url, DEFAULT_BASE_URL);
}

#[test]
fn explicit_missing_file_is_an_error() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("nope.json");
    let err = ConfigLoader::resolve(path.to_str()).unwrap_err();
    assert_matches!(err, KiraError::ConfigRead(_));
}

#[test]
fn invalid_json_is_a_parse_error() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("bad.json");
    fs::write(&path, "{ not json").unwrap();
    let err = ConfigLoader::resolve(path.to_str()).unwrap_err();
    assert_matches!(err, KiraError::ConfigParse(_));
}

#[test]
fn zero_timeout_is_rejected() {
    let config = Config {
        timeout_secs: Some(0),
        ..Default::default()
    };
    assert_matches!(
        ConfigLoader::resolve_config(config),
        Err(KiraError::ConfigParse(_))
    );
}

#[test]
fn cli_flags_extend_config() {
    let config = Config {
        exclude_columns: Some(ColumnList::List(vec!["RefSeq".to_string()])),
        ..Default::default()
    };
    let resolved = ConfigLoader::resolve_config(config)
        .unwrap()
        .merge_cli(true, vec!["Taxon".to_string(), "RefSeq".to_string()]);
    assert!(resolved.include_unplaced);
    assert_eq!(resolved.exclude_columns, vec!["RefSeq", "Taxon"]);
    assert_eq!(resolved.api_base_url, DEFAULT_BASE_URL);
    assert_eq!(ResolvedConfig::default().timeout_secs, 30);
}
