//! Content extraction: a registry mapping file extensions to strategies that
//! turn a file into a bounded text summary for the model prompt.
//!
//! Extraction never fails past this module. A strategy error is logged and
//! replaced by the strategy's synthetic description of the file.

use crate::config::ExtractionConfig;
use crate::models::{ExtractedContent, FileDescriptor, StrategyKind};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

pub mod binary;
pub mod delimited;
pub mod document;
pub mod spreadsheet;
pub mod text;

pub use binary::{BinaryDescription, MediaKind};
pub use delimited::DelimitedText;
pub use document::{PdfDocument, WordDocument};
pub use spreadsheet::Spreadsheet;
pub use text::PlainText;

pub trait ExtractionStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    fn extract(&self, file: &FileDescriptor, limits: &ExtractionConfig) -> anyhow::Result<String>;

    /// Stand-in text used when `extract` fails.
    fn describe_failure(&self, file: &FileDescriptor) -> String;
}

pub const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "md", "markdown", "rst", "log", "ini", "cfg", "conf", "toml", "yaml", "yml", "json",
    "xml", "html", "htm", "css", "js", "jsx", "ts", "tsx", "py", "rs", "go", "java", "c", "h",
    "cpp", "hpp", "cs", "rb", "php", "sh", "bat", "ps1", "sql", "tex", "rtf",
];
// Legacy binary `.doc` is left to the unsupported fallback; docx-rs reads OOXML only.
pub const WORD_EXTENSIONS: &[&str] = &["docx"];
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "xlsb", "ods"];
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "tif", "tiff", "webp", "svg", "heic", "ico",
];
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "aac", "ogg", "m4a", "wma"];
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mkv", "mov", "wmv", "webm", "flv"];
pub const ARCHIVE_EXTENSIONS: &[&str] = &["zip", "rar", "7z", "tar", "gz", "bz2", "xz", "tgz"];
pub const EXECUTABLE_EXTENSIONS: &[&str] = &[
    "exe", "msi", "dmg", "app", "deb", "rpm", "apk", "bin", "dll", "so", "jar",
];

/// Fallback for extensions nothing is registered for.
#[derive(Debug, Default)]
pub struct Unsupported;

impl ExtractionStrategy for Unsupported {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Unsupported
    }

    fn extract(&self, file: &FileDescriptor, _limits: &ExtractionConfig) -> anyhow::Result<String> {
        Ok(self.describe_failure(file))
    }

    fn describe_failure(&self, file: &FileDescriptor) -> String {
        let ext = if file.extension.is_empty() {
            "none"
        } else {
            file.extension.as_str()
        };
        format!("not content-processable: {}, extension {}", file.file_name, ext)
    }
}

pub struct ExtractorRegistry {
    strategies: HashMap<String, Arc<dyn ExtractionStrategy>>,
    fallback: Arc<dyn ExtractionStrategy>,
    limits: ExtractionConfig,
}

impl ExtractorRegistry {
    /// An empty registry: every file goes to the unsupported fallback.
    pub fn new(limits: ExtractionConfig) -> Self {
        Self {
            strategies: HashMap::new(),
            fallback: Arc::new(Unsupported),
            limits,
        }
    }

    pub fn with_defaults(limits: ExtractionConfig) -> Self {
        let mut reg = Self::new(limits);
        reg.register_all(TEXT_EXTENSIONS, Arc::new(PlainText));
        reg.register_all(WORD_EXTENSIONS, Arc::new(WordDocument));
        reg.register("pdf", Arc::new(PdfDocument));
        reg.register_all(SPREADSHEET_EXTENSIONS, Arc::new(Spreadsheet));
        reg.register("csv", Arc::new(DelimitedText::new(b',')));
        reg.register("tsv", Arc::new(DelimitedText::new(b'\t')));
        for (exts, kind) in [
            (IMAGE_EXTENSIONS, MediaKind::Image),
            (AUDIO_EXTENSIONS, MediaKind::Audio),
            (VIDEO_EXTENSIONS, MediaKind::Video),
            (ARCHIVE_EXTENSIONS, MediaKind::Archive),
            (EXECUTABLE_EXTENSIONS, MediaKind::Executable),
        ] {
            reg.register_all(exts, Arc::new(BinaryDescription::new(kind)));
        }
        reg
    }

    /// Adds or replaces the strategy for one extension.
    pub fn register(&mut self, ext: &str, strategy: Arc<dyn ExtractionStrategy>) {
        self.strategies
            .insert(ext.trim_start_matches('.').to_lowercase(), strategy);
    }

    pub fn register_all(&mut self, exts: &[&str], strategy: Arc<dyn ExtractionStrategy>) {
        for ext in exts {
            self.register(ext, strategy.clone());
        }
    }

    pub fn with_strategy(mut self, ext: &str, strategy: Arc<dyn ExtractionStrategy>) -> Self {
        self.register(ext, strategy);
        self
    }

    pub fn strategy_for(&self, file: &FileDescriptor) -> Arc<dyn ExtractionStrategy> {
        if let Some(strategy) = self.strategies.get(&file.extension) {
            return strategy.clone();
        }
        if file.extension.is_empty() && self.limits.sniff_unknown {
            if let Some(ext) = sniff_extension(file) {
                if let Some(strategy) = self.strategies.get(ext) {
                    debug!(path = %file.path.display(), sniffed = ext, "dispatching on magic number");
                    return strategy.clone();
                }
            }
        }
        self.fallback.clone()
    }

    pub fn extract(&self, file: &FileDescriptor) -> ExtractedContent {
        let strategy = self.strategy_for(file);
        match strategy.extract(file, &self.limits) {
            Ok(text) => ExtractedContent {
                text,
                strategy: strategy.kind(),
                degraded: false,
            },
            Err(err) => {
                warn!(path = %file.path.display(), error = %err, "extraction failed, using description");
                ExtractedContent {
                    text: strategy.describe_failure(file),
                    strategy: strategy.kind(),
                    degraded: true,
                }
            }
        }
    }
}

fn sniff_extension(file: &FileDescriptor) -> Option<&'static str> {
    infer::get_from_path(&file.path)
        .ok()
        .flatten()
        .map(|t| t.extension())
}
