use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A file about to be classified. The extension is lower-cased without the dot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    pub path: PathBuf,
    pub file_name: String,
    pub extension: String,
}

impl FileDescriptor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.trim_start_matches('.').to_lowercase())
            .unwrap_or_default();
        Self {
            path,
            file_name,
            extension,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    PlainText,
    WordDocument,
    Pdf,
    Spreadsheet,
    Delimited,
    BinaryDescriptive,
    Unsupported,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractedContent {
    pub text: String,
    pub strategy: StrategyKind,
    /// Set when `text` is a synthetic description because reading failed.
    pub degraded: bool,
}

impl ExtractedContent {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelKind {
    Category,
    NotProcessed,
    Indefinite,
    ClassificationError,
}

/// The reserved outcomes; never produced from a model reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    NotProcessed,
    Indefinite,
    ClassificationError,
}

impl From<Sentinel> for LabelKind {
    fn from(sentinel: Sentinel) -> Self {
        match sentinel {
            Sentinel::NotProcessed => LabelKind::NotProcessed,
            Sentinel::Indefinite => LabelKind::Indefinite,
            Sentinel::ClassificationError => LabelKind::ClassificationError,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLabel {
    pub name: String,
    pub kind: LabelKind,
}

impl CategoryLabel {
    pub fn category(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: LabelKind::Category,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.kind != LabelKind::Category
    }
}

/// Returns at most `max` characters of `s`, cut on a char boundary.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased() {
        let fd = FileDescriptor::new("/tmp/Report.Final.PDF");
        assert_eq!(fd.extension, "pdf");
        assert_eq!(fd.file_name, "Report.Final.PDF");
    }

    #[test]
    fn missing_extension_is_empty() {
        assert_eq!(FileDescriptor::new("/tmp/Makefile").extension, "");
        assert_eq!(FileDescriptor::new("/tmp/.bashrc").extension, "");
    }

    #[test]
    fn truncation_respects_multibyte_chars() {
        assert_eq!(truncate_chars("relatório", 8), "relatóri");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
    }
}
