use super::ExtractionStrategy;
use crate::config::ExtractionConfig;
use crate::models::{FileDescriptor, StrategyKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Audio,
    Video,
    Archive,
    Executable,
}

impl MediaKind {
    fn noun(self) -> &'static str {
        match self {
            MediaKind::Image => "image file",
            MediaKind::Audio => "audio file",
            MediaKind::Video => "video file",
            MediaKind::Archive => "compressed archive",
            MediaKind::Executable => "executable or installer",
        }
    }
}

/// Media and binaries are never opened; the model only sees name and kind.
#[derive(Debug)]
pub struct BinaryDescription {
    kind: MediaKind,
}

impl BinaryDescription {
    pub fn new(kind: MediaKind) -> Self {
        Self { kind }
    }
}

impl ExtractionStrategy for BinaryDescription {
    fn kind(&self) -> StrategyKind {
        StrategyKind::BinaryDescriptive
    }

    fn extract(&self, file: &FileDescriptor, _limits: &ExtractionConfig) -> anyhow::Result<String> {
        Ok(self.describe_failure(file))
    }

    fn describe_failure(&self, file: &FileDescriptor) -> String {
        format!("{}: {}", self.kind.noun(), file.file_name)
    }
}
