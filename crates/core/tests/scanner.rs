use sorter_core::scanner::list_files;
use std::fs;
use tempfile::tempdir;

#[test]
fn lists_only_immediate_visible_files() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    fs::write(root.join("b.pdf"), "x").unwrap();
    fs::write(root.join("a.txt"), "x").unwrap();
    fs::write(root.join(".env"), "KEY=1").unwrap();
    fs::write(root.join("download.part"), "x").unwrap();
    fs::create_dir(root.join("Finance")).unwrap();
    fs::write(root.join("Finance").join("old.txt"), "x").unwrap();

    let files = list_files(root, &["*.part".to_string()], false).unwrap();
    let names: Vec<&str> = files.iter().map(|f| f.file_name.as_str()).collect();
    assert_eq!(names, vec!["a.txt", "b.pdf"]);
    assert_eq!(files[1].extension, "pdf");

    let files = list_files(root, &[], true).unwrap();
    let names: Vec<&str> = files.iter().map(|f| f.file_name.as_str()).collect();
    assert_eq!(names, vec![".env", "a.txt", "b.pdf", "download.part"]);
}

#[test]
fn missing_root_is_an_error() {
    let temp = tempdir().unwrap();
    assert!(list_files(&temp.path().join("nope"), &[], false).is_err());
    fs::write(temp.path().join("file"), "x").unwrap();
    assert!(list_files(&temp.path().join("file"), &[], false).is_err());
}

#[test]
fn invalid_exclude_pattern_is_reported() {
    let temp = tempdir().unwrap();
    let err = list_files(temp.path(), &["[".to_string()], false).unwrap_err();
    assert!(err.to_string().contains("bad exclude pattern"));
}
