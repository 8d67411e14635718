use sorter_core::config;
use std::fs;
use tempfile::tempdir;

#[test]
fn loads_toml_over_defaults() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("sorter.toml");
    fs::write(
        &path,
        r#"
[provider]
kind = "noop"
model = "local"

[extraction]
max_chars = 5000

[labels]
indefinite = "Indefinidos"
error = "Erro_IA"

[organize]
conflict = "skip"
exclude = ["*.tmp"]
"#,
    )
    .unwrap();

    let cfg = config::load(Some(path.to_str().unwrap())).unwrap();
    assert_eq!(cfg.provider.kind, "noop");
    assert_eq!(cfg.provider.model, "local");
    assert_eq!(cfg.extraction.max_chars, 5000);
    assert_eq!(cfg.extraction.sample_rows, 5);
    assert_eq!(cfg.classification.prompt_chars, 10_000);
    assert_eq!(cfg.labels.indefinite, "Indefinidos");
    assert_eq!(cfg.labels.not_processed, "Not_Processed");
    assert_eq!(cfg.organize.conflict, "skip");
    assert_eq!(cfg.organize.exclude, vec!["*.tmp".to_string()]);
    assert!(cfg.provider.api_key.is_none());
}

#[test]
fn invalid_labels_fail_to_load() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("bad.toml");
    fs::write(&path, "[provider]\nkind = \"noop\"\n\n[labels]\nerror = \"Erro IA\"\n").unwrap();
    assert!(config::load(Some(path.to_str().unwrap())).is_err());
}

#[test]
fn explicit_missing_file_is_an_error() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("absent.toml");
    assert!(config::load(Some(path.to_str().unwrap())).is_err());
}
